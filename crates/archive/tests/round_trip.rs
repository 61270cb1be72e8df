use archive::{ArchiveEncoder, ArchiveFormat, CompressionLevel, encode_archive};
use filetime::{FileTime, set_file_mtime};
use flate2::read::GzDecoder;
use std::collections::BTreeMap;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

fn sample_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut expected = BTreeMap::new();
    let files: [(&str, Vec<u8>); 4] = [
        ("README.md", b"# hello\n".to_vec()),
        ("docs/guide.txt", b"step one\nstep two\n".to_vec()),
        ("docs/deep/nested/data.bin", (0..=255u8).cycle().take(70_000).collect()),
        ("empty.txt", Vec::new()),
    ];
    for (name, contents) in files {
        let path = root.join(name);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, &contents).expect("write");
        expected.insert(name.to_owned(), contents);
    }
    fs::create_dir(root.join("empty-dir")).expect("empty dir");
    expected
}

fn read_tar_gz(bytes: &[u8]) -> BTreeMap<String, Vec<u8>> {
    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    let mut out = BTreeMap::new();
    for entry in archive.entries().expect("entries") {
        let mut entry = entry.expect("entry");
        assert_eq!(entry.header().entry_type(), tar::EntryType::Regular);
        let name = entry.path().expect("path").to_string_lossy().into_owned();
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).expect("read");
        out.insert(name, contents);
    }
    out
}

fn read_zip(bytes: Vec<u8>) -> BTreeMap<String, Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("zip");
    let mut out = BTreeMap::new();
    for index in 0..archive.len() {
        let mut file = archive.by_index(index).expect("entry");
        assert!(file.is_file());
        let name = file.name().to_owned();
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).expect("read");
        out.insert(name, contents);
    }
    out
}

#[test]
fn tar_gz_round_trip_preserves_paths_and_bytes() {
    let temp = tempfile::tempdir().expect("tempdir");
    let expected = sample_tree(temp.path());

    let mut out = Vec::new();
    let stats = encode_archive(temp.path(), ArchiveFormat::TarGz, &mut out).expect("encode");

    assert_eq!(stats.files, 4);
    assert_eq!(
        stats.bytes,
        expected.values().map(|data| data.len() as u64).sum::<u64>()
    );
    assert_eq!(read_tar_gz(&out), expected);
}

#[test]
fn zip_round_trip_preserves_paths_and_bytes() {
    let temp = tempfile::tempdir().expect("tempdir");
    let expected = sample_tree(temp.path());

    let mut out = Vec::new();
    let stats = encode_archive(temp.path(), ArchiveFormat::Zip, &mut out).expect("encode");

    assert_eq!(stats.files, 4);
    assert_eq!(read_zip(out), expected);
}

#[test]
fn empty_directory_produces_valid_empty_archives() {
    let temp = tempfile::tempdir().expect("tempdir");

    let mut tar_out = Vec::new();
    let stats = encode_archive(temp.path(), ArchiveFormat::TarGz, &mut tar_out).expect("tar");
    assert_eq!(stats.files, 0);
    assert!(read_tar_gz(&tar_out).is_empty());

    let mut zip_out = Vec::new();
    encode_archive(temp.path(), ArchiveFormat::Zip, &mut zip_out).expect("zip");
    assert!(read_zip(zip_out).is_empty());
}

#[test]
fn tar_headers_carry_mtime_and_size() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("stamped.txt");
    fs::write(&file, b"0123456789").expect("write");
    set_file_mtime(&file, FileTime::from_unix_time(1_600_000_000, 0)).expect("mtime");

    let mut out = Vec::new();
    encode_archive(temp.path(), ArchiveFormat::TarGz, &mut out).expect("encode");

    let mut archive = tar::Archive::new(GzDecoder::new(&out[..]));
    let entry = archive
        .entries()
        .expect("entries")
        .next()
        .expect("one entry")
        .expect("entry ok");
    assert_eq!(entry.header().mtime().expect("mtime"), 1_600_000_000);
    assert_eq!(entry.header().size().expect("size"), 10);
}

#[test]
fn long_names_survive_tar_encoding() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dir = temp.path().join("a".repeat(80)).join("b".repeat(80));
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(dir.join("leaf.txt"), b"leaf").expect("write");

    let mut out = Vec::new();
    encode_archive(temp.path(), ArchiveFormat::TarGz, &mut out).expect("encode");
    let names: Vec<String> = read_tar_gz(&out).into_keys().collect();
    assert_eq!(
        names,
        [format!("{}/{}/leaf.txt", "a".repeat(80), "b".repeat(80))]
    );
}

#[test]
fn compression_level_is_configurable() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("repeat.txt"), "abc".repeat(10_000)).expect("write");

    let mut fast = Vec::new();
    ArchiveEncoder::new(ArchiveFormat::Zip)
        .level(CompressionLevel::Fast)
        .encode(temp.path(), &mut fast)
        .expect("fast");
    let mut best = Vec::new();
    ArchiveEncoder::new(ArchiveFormat::Zip)
        .level(CompressionLevel::Best)
        .encode(temp.path(), &mut best)
        .expect("best");

    assert!(best.len() <= fast.len());
    assert_eq!(read_zip(best), read_zip(fast));
}

#[test]
fn missing_root_is_a_walk_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let error = encode_archive(temp.path().join("gone"), ArchiveFormat::Zip, Vec::new())
        .expect_err("missing root");
    assert!(matches!(error, archive::ArchiveError::Walk(_)));
}

#[cfg(unix)]
#[test]
fn symlinks_and_special_files_are_skipped_in_both_formats() {
    use std::os::unix::fs::{PermissionsExt, symlink};

    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("root");
    let outside = temp.path().join("outside");
    fs::create_dir_all(&root).expect("root");
    fs::create_dir_all(&outside).expect("outside");
    fs::write(outside.join("secret.txt"), b"secret").expect("secret");
    fs::write(root.join("real.txt"), b"real").expect("real");
    fs::set_permissions(root.join("real.txt"), fs::Permissions::from_mode(0o600)).expect("chmod");
    symlink(&outside, root.join("linked-dir")).expect("dir link");
    symlink("real.txt", root.join("alias.txt")).expect("file link");

    let mut tar_out = Vec::new();
    encode_archive(&root, ArchiveFormat::TarGz, &mut tar_out).expect("tar");
    let tar_names: Vec<String> = read_tar_gz(&tar_out).into_keys().collect();
    assert_eq!(tar_names, ["real.txt"]);

    let mut zip_out = Vec::new();
    encode_archive(&root, ArchiveFormat::Zip, &mut zip_out).expect("zip");
    let mut archive = zip::ZipArchive::new(Cursor::new(zip_out)).expect("zip");
    assert_eq!(archive.len(), 1);
    let entry = archive.by_index(0).expect("entry");
    assert_eq!(entry.name(), "real.txt");
    assert_eq!(entry.unix_mode().map(|mode| mode & 0o777), Some(0o600));
}

#[test]
fn zip_entries_carry_modification_time() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("stamped.txt");
    fs::write(&file, b"0123456789").expect("write");
    set_file_mtime(&file, FileTime::from_unix_time(1_600_000_000, 0)).expect("mtime");

    let mut out = Vec::new();
    encode_archive(temp.path(), ArchiveFormat::Zip, &mut out).expect("encode");

    let mut archive = zip::ZipArchive::new(Cursor::new(out)).expect("zip");
    let entry = archive.by_name("stamped.txt").expect("entry");
    assert_eq!(entry.size(), 10);
    let modified = entry.last_modified().expect("timestamp");
    assert_eq!(
        (modified.year(), modified.month(), modified.day()),
        (2020, 9, 13)
    );
}

#[cfg(target_os = "linux")]
#[test]
fn tar_keeps_distinct_non_utf8_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join(OsStr::from_bytes(b"a\xff")), b"one").expect("first");
    fs::write(temp.path().join(OsStr::from_bytes(b"a\xfe")), b"two").expect("second");

    let mut out = Vec::new();
    let stats = encode_archive(temp.path(), ArchiveFormat::TarGz, &mut out).expect("encode");
    assert_eq!(stats.files, 2);

    let mut archive = tar::Archive::new(GzDecoder::new(&out[..]));
    let mut entries = BTreeMap::new();
    for entry in archive.entries().expect("entries") {
        let mut entry = entry.expect("entry");
        let name = entry.path_bytes().into_owned();
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).expect("read");
        entries.insert(name, contents);
    }
    assert_eq!(
        entries,
        BTreeMap::from([
            (b"a\xfe".to_vec(), b"two".to_vec()),
            (b"a\xff".to_vec(), b"one".to_vec()),
        ])
    );
}

#[cfg(target_os = "linux")]
#[test]
fn zip_rejects_non_utf8_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join(OsStr::from_bytes(b"a\xff")), b"one").expect("first");

    let error = encode_archive(temp.path(), ArchiveFormat::Zip, Vec::new())
        .expect_err("non-utf8 name");
    assert!(
        matches!(&error, archive::ArchiveError::NonUtf8Name { path } if path.ends_with(OsStr::from_bytes(b"a\xff"))),
        "{error}"
    );
    assert!(!error.is_input_error());
}
