use search::{SearchError, SearchQuery, search};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::thread;
use walk::EntryKind;

fn sample_tree(root: &Path) {
    fs::create_dir_all(root.join("docs/guides")).expect("docs");
    fs::create_dir_all(root.join("src")).expect("src");
    fs::write(root.join("README.md"), b"# top").expect("readme");
    fs::write(root.join("docs/Readme.txt"), b"docs").expect("docs readme");
    fs::write(root.join("docs/guides/install.md"), b"install").expect("install");
    fs::write(root.join("src/main.rs"), b"fn main() {}").expect("main");
}

fn run(root: &Path, text: &str, use_regex: bool) -> BTreeSet<String> {
    let mut handle = search(root, &SearchQuery::new(text, use_regex)).expect("search");
    let found = handle
        .by_ref()
        .map(|found| found.relative_path().to_owned())
        .collect();
    let summary = handle.finish().expect("finish");
    assert!(!summary.cancelled);
    found
}

#[test]
fn literal_search_matches_base_names_case_insensitively() {
    let temp = tempfile::tempdir().expect("tempdir");
    sample_tree(temp.path());

    let found = run(temp.path(), "readme", false);
    let expected: BTreeSet<String> = ["README.md", "docs/Readme.txt"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn literal_search_ignores_directory_part_of_path() {
    let temp = tempfile::tempdir().expect("tempdir");
    sample_tree(temp.path());

    let found = run(temp.path(), "guides", false);
    assert_eq!(found.into_iter().collect::<Vec<_>>(), ["docs/guides"]);
}

#[test]
fn regex_search_matches_relative_path() {
    let temp = tempfile::tempdir().expect("tempdir");
    sample_tree(temp.path());

    let found = run(temp.path(), r"^docs/.*\.md$", true);
    assert_eq!(
        found.into_iter().collect::<Vec<_>>(),
        ["docs/guides/install.md"]
    );
}

#[test]
fn root_is_never_reported() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("needle");
    fs::create_dir(&root).expect("root");
    fs::write(root.join("hay"), b"").expect("hay");

    assert!(run(&root, "needle", false).is_empty());
    assert!(run(&root, ".*", true).contains("hay"));
}

#[test]
fn invalid_pattern_fails_before_traversal() {
    let error = search(
        "/definitely/not/a/real/root",
        &SearchQuery::new("(unclosed", true),
    )
    .expect_err("invalid pattern");
    assert!(matches!(error, SearchError::InvalidPattern { .. }));
    assert!(error.is_input_error());
}

#[test]
fn empty_query_is_an_input_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let error = search(temp.path(), &SearchQuery::new("", false)).expect_err("empty");
    assert!(error.is_input_error());
}

#[test]
fn missing_root_is_reported_by_finish() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut handle =
        search(temp.path().join("gone"), &SearchQuery::new("x", false)).expect("search");
    assert!(handle.next().is_none());
    match handle.finish() {
        Err(SearchError::Walk(error)) => assert!(error.is_not_found()),
        other => panic!("expected walk error, got {other:?}"),
    }
}

#[test]
fn cancel_stops_a_blocked_producer() {
    let temp = tempfile::tempdir().expect("tempdir");
    for index in 0..50 {
        fs::write(temp.path().join(format!("file-{index:02}.log")), b"").expect("write");
    }

    let mut handle = search(temp.path(), &SearchQuery::new("file", false)).expect("search");
    let first = handle.next().expect("first match");
    assert_eq!(first.query(), "file");

    handle.cancel();
    let summary = handle.finish().expect("finish");
    assert!(summary.cancelled);
    assert!(summary.delivered < 50);
}

#[test]
fn canceller_works_from_another_thread() {
    let temp = tempfile::tempdir().expect("tempdir");
    for index in 0..20 {
        fs::write(temp.path().join(format!("item{index}")), b"").expect("write");
    }

    let mut handle = search(temp.path(), &SearchQuery::new("item", false)).expect("search");
    let canceller = handle.canceller();
    assert!(handle.next().is_some());

    thread::spawn(move || canceller.cancel())
        .join()
        .expect("cancel thread");
    let summary = handle.finish().expect("finish");
    assert!(summary.cancelled);
}

#[test]
fn dropping_the_handle_cancels_the_search() {
    let temp = tempfile::tempdir().expect("tempdir");
    for index in 0..10 {
        fs::write(temp.path().join(format!("entry{index}")), b"").expect("write");
    }

    let mut handle = search(temp.path(), &SearchQuery::new("entry", false)).expect("search");
    let canceller = handle.canceller();
    assert!(handle.next().is_some());
    drop(handle);
    assert!(canceller.is_cancelled());
}

#[test]
fn finish_without_consuming_releases_the_producer() {
    let temp = tempfile::tempdir().expect("tempdir");
    sample_tree(temp.path());

    let handle = search(temp.path(), &SearchQuery::new("e", false)).expect("search");
    let summary = handle.finish().expect("finish");
    assert_eq!(summary.delivered, 0);
    assert!(summary.cancelled);
}

#[test]
fn match_href_escapes_hash() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("issue#12.txt"), b"").expect("write");

    let mut handle = search(temp.path(), &SearchQuery::new("issue", false)).expect("search");
    let found = handle.next().expect("match");
    assert_eq!(found.href(), "issue%2312.txt");
    assert_eq!(found.info().kind(), EntryKind::File);
}

#[cfg(unix)]
#[test]
fn search_through_symlink_cycle_terminates() {
    use std::os::unix::fs::symlink;

    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("root");
    fs::create_dir_all(root.join("inner")).expect("inner");
    fs::write(root.join("inner/target.txt"), b"").expect("target");
    symlink("..", root.join("inner/loop")).expect("loop");
    symlink("inner", root.join("alias")).expect("alias");

    let found = run(&root, "target", false);
    assert_eq!(found.len(), 1);

    let mut handle = search(&root, &SearchQuery::new("alias", false)).expect("search");
    let alias = handle.next().expect("alias match");
    assert_eq!(alias.info().kind(), EntryKind::Symlink);
    assert!(alias.info().acts_as_dir());
}

#[cfg(unix)]
#[test]
fn permission_denied_directories_are_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempfile::tempdir().expect("tempdir");
    let locked = temp.path().join("locked");
    fs::create_dir(&locked).expect("locked");
    fs::write(locked.join("hidden-note"), b"").expect("hidden");
    fs::write(temp.path().join("open-note"), b"").expect("open");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");

    let privileged = fs::read_dir(&locked).is_ok();
    let found = run(temp.path(), "note", false);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("restore");

    assert!(found.contains("open-note"));
    if !privileged {
        assert_eq!(found.len(), 1);
    }
}
