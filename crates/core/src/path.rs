use std::path::{Component, Path, PathBuf};

/// Normalises a request path lexically.
///
/// The result always starts with `/`, contains no empty, `.` or `..`
/// segments, and has no trailing slash unless it is the root. `..` at the
/// root is dropped, so the cleaned path can never climb above it.
///
/// # Examples
///
/// ```
/// use dirindex_core::clean_request_path;
///
/// assert_eq!(clean_request_path("a/./b//c/../"), "/a/b");
/// assert_eq!(clean_request_path("/../../etc/passwd"), "/etc/passwd");
/// assert_eq!(clean_request_path(""), "/");
/// ```
#[must_use]
pub fn clean_request_path(raw: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut cleaned = String::with_capacity(raw.len() + 1);
    cleaned.push('/');
    cleaned.push_str(&segments.join("/"));
    cleaned
}

/// Maps a cleaned request path onto the filesystem below `root`.
///
/// Segments that the platform would not treat as a single normal component
/// (for example ones containing a native separator) are rejected.
pub(crate) fn resolve_under(root: &Path, cleaned: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for segment in cleaned.split('/').filter(|segment| !segment.is_empty()) {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => path.push(part),
            _ => return None,
        }
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_variants_collapse() {
        for raw in ["/", "//", "/.", "/..", ".", "..", "/./../"] {
            assert_eq!(clean_request_path(raw), "/", "{raw:?}");
        }
    }

    #[test]
    fn parent_segments_never_escape() {
        assert_eq!(clean_request_path("/a/../../b"), "/b");
        assert_eq!(clean_request_path("../a/b/../c"), "/a/c");
    }

    #[test]
    fn dots_inside_names_are_kept() {
        assert_eq!(clean_request_path("/.hidden/..data/x.."), "/.hidden/..data/x..");
    }

    #[test]
    fn resolve_under_appends_segments() {
        let root = Path::new("/srv/files");
        assert_eq!(resolve_under(root, "/"), Some(root.to_path_buf()));
        assert_eq!(
            resolve_under(root, "/music/a b"),
            Some(root.join("music").join("a b"))
        );
    }

    #[cfg(windows)]
    #[test]
    fn native_separators_are_rejected() {
        assert_eq!(resolve_under(Path::new("C:\\srv"), "/..\\secret"), None);
    }
}
