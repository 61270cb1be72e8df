use super::*;
use std::fs;
use std::path::Path;

fn run_in(root: &Path, args: &[&str]) -> (i32, Vec<u8>, String) {
    let mut argv = vec![
        OsString::from(PROGRAM_NAME),
        OsString::from("--root"),
        root.as_os_str().to_owned(),
    ];
    argv.extend(args.iter().map(OsString::from));

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let status = run(argv, &mut stdout, &mut stderr);
    (
        status,
        stdout,
        String::from_utf8(stderr).expect("utf8 stderr"),
    )
}

fn fixture() -> tempfile::TempDir {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(temp.path().join("docs/old")).expect("docs");
    fs::write(temp.path().join("docs/Guide.md"), "# Guide\n").expect("guide");
    fs::write(temp.path().join("docs/old/guide-v1.md"), "old").expect("old guide");
    fs::write(temp.path().join("hello.txt"), "hello\n").expect("hello");
    temp
}

#[test]
fn help_is_written_to_stdout() {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    assert_eq!(run([PROGRAM_NAME, "--help"], &mut stdout, &mut stderr), 0);
    let text = String::from_utf8(stdout).expect("utf8");
    assert!(text.contains("Usage: dirindex [OPTIONS] [PATH]"));
    assert!(stderr.is_empty());
}

#[test]
fn unknown_option_is_an_input_error() {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    assert_eq!(run([PROGRAM_NAME, "--bogus"], &mut stdout, &mut stderr), 1);
    assert!(stdout.is_empty());
    assert!(String::from_utf8(stderr).expect("utf8").starts_with("dirindex: "));
}

#[test]
fn file_contents_are_copied() {
    let temp = fixture();
    let (status, stdout, _) = run_in(temp.path(), &["/hello.txt"]);
    assert_eq!(status, 0);
    assert_eq!(stdout, b"hello\n");
}

#[test]
fn root_listing_puts_directories_first() {
    let temp = fixture();
    let (status, stdout, _) = run_in(temp.path(), &[]);
    assert_eq!(status, 0);
    let text = String::from_utf8(stdout).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Index of /");
    assert!(lines[1].ends_with("docs/"), "{text}");
    assert!(lines[2].ends_with("hello.txt"), "{text}");
}

#[test]
fn literal_search_prints_relative_paths() {
    let temp = fixture();
    let (status, stdout, _) = run_in(temp.path(), &["-q", "guide", "/docs"]);
    assert_eq!(status, 0);
    let text = String::from_utf8(stdout).expect("utf8");
    assert_eq!(text, "Guide.md\nold/guide-v1.md\n");
}

#[test]
fn regexp_search_matches_whole_relative_path() {
    let temp = fixture();
    let (status, stdout, _) = run_in(temp.path(), &["-q", "^old/", "--regexp", "/docs"]);
    assert_eq!(status, 0);
    assert_eq!(String::from_utf8(stdout).expect("utf8"), "old/guide-v1.md\n");
}

#[test]
fn bad_regexp_exits_with_input_status() {
    let temp = fixture();
    let (status, stdout, stderr) = run_in(temp.path(), &["-q", "(", "--regexp"]);
    assert_eq!(status, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("invalid search pattern"), "{stderr}");
}

#[test]
fn missing_path_exits_with_not_found_status() {
    let temp = fixture();
    let (status, _, stderr) = run_in(temp.path(), &["/missing"]);
    assert_eq!(status, 2);
    assert!(stderr.contains("/missing"), "{stderr}");
}

#[test]
fn unknown_archive_format_is_rejected() {
    let temp = fixture();
    let (status, stdout, stderr) = run_in(temp.path(), &["--dl", "rar"]);
    assert_eq!(status, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("dl must be one of"), "{stderr}");
}

#[test]
fn archive_goes_to_output_file() {
    let temp = fixture();
    let out_dir = tempfile::tempdir().expect("out dir");
    let target = out_dir.path().join("docs.tar.gz");
    let target_arg = target.to_str().expect("utf8 path");

    let (status, stdout, _) = run_in(temp.path(), &["--dl", "targz", "-o", target_arg, "/docs"]);
    assert_eq!(status, 0);
    assert!(stdout.is_empty());
    let bytes = fs::read(&target).expect("archive");
    assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
}

#[test]
fn zip_archive_goes_to_stdout() {
    let temp = fixture();
    let (status, stdout, _) = run_in(temp.path(), &["--dl", "zip"]);
    assert_eq!(status, 0);
    assert_eq!(&stdout[..4], b"PK\x03\x04");
}

#[test]
fn explicit_level_produces_a_readable_archive() {
    let temp = fixture();
    let (status, stdout, _) = run_in(temp.path(), &["--dl", "zip", "--level", "1", "/docs"]);
    assert_eq!(status, 0);
    let archive = zip::ZipArchive::new(std::io::Cursor::new(stdout)).expect("zip");
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort_unstable();
    assert_eq!(names, ["Guide.md", "old/guide-v1.md"]);
}

#[test]
fn out_of_range_level_is_an_input_error() {
    let temp = fixture();
    let (status, stdout, stderr) = run_in(temp.path(), &["--dl", "zip", "--level", "10"]);
    assert_eq!(status, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("1-9"), "{stderr}");
}

#[test]
fn unknown_debug_flag_is_an_input_error() {
    let temp = fixture();
    let (status, _, stderr) = run_in(temp.path(), &["--debug", "nonsense"]);
    assert_eq!(status, 1);
    assert!(stderr.contains("unknown debug flag"), "{stderr}");
}

#[test]
fn exit_codes_are_clamped() {
    assert_eq!(exit_code_from(0), std::process::ExitCode::SUCCESS);
    assert_eq!(exit_code_from(-5), std::process::ExitCode::SUCCESS);
    assert_eq!(exit_code_from(300), std::process::ExitCode::from(u8::MAX));
}
