//! Cycle-safe traversal that follows directory symlinks.
//!
//! The walker is driven by a visitor callback invoked pre-order for every
//! entry. Directories and directory symlinks are only entered when their
//! canonical path has not been entered before during the same call, so a
//! link back to an ancestor costs at most one extra visit (the link itself)
//! and two links to one directory expand it once.

use crate::entry::{Entry, EntryKind};
use crate::error::WalkError;
use logging::debug_log;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Visitor verdict for one entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Visit {
    /// Keep going; descend if the entry is an unvisited directory.
    #[default]
    Continue,
    /// Do not descend into this entry. No effect on non-directories.
    SkipDir,
}

/// Walks the tree rooted at `root`, following directory symlinks.
///
/// `visit` is called once per reachable entry with `None` as the error.
/// It is called with `Some(error)` in two situations:
///
/// - the root cannot be stat'ed: the entry carries only the root path and no
///   further calls are made;
/// - a directory cannot be enumerated: the directory is reported a second
///   time, after its successful visit.
///
/// Returning `Err` from the visitor aborts the traversal and the error is
/// returned unchanged. Siblings are visited in byte order of their names.
///
/// # Examples
///
/// ```
/// use walk::{walk, Visit};
/// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempfile::tempdir()?;
/// std::fs::create_dir(temp.path().join("docs"))?;
/// std::fs::write(temp.path().join("docs/guide.md"), b"# guide")?;
///
/// let mut seen = Vec::new();
/// walk(temp.path(), |entry, error| {
///     if let Some(error) = error {
///         return Err(error.to_string());
///     }
///     seen.push(entry.relative_path().to_path_buf());
///     Ok(Visit::Continue)
/// })?;
/// assert_eq!(seen.len(), 3);
/// # Ok(())
/// # }
/// # demo().unwrap();
/// ```
pub fn walk<P, F, E>(root: P, mut visit: F) -> Result<(), E>
where
    P: AsRef<Path>,
    F: FnMut(&Entry, Option<&WalkError>) -> Result<Visit, E>,
{
    let root = root.as_ref();
    debug_log!(Walk, 1, "walking {}", root.display());

    let metadata = match fs::metadata(root) {
        Ok(metadata) => metadata,
        Err(error) => {
            let error = WalkError::root_metadata(root.to_path_buf(), error);
            visit(&Entry::unavailable_root(root.to_path_buf()), Some(&error))?;
            return Ok(());
        }
    };

    let mut traversal = Traversal {
        visited: HashSet::new(),
        stack: Vec::new(),
    };
    traversal.step(Entry::root(root.to_path_buf(), metadata), &mut visit)?;

    while let Some(dir) = traversal.stack.last_mut() {
        let Some((name, kind)) = dir.next_child() else {
            traversal.stack.pop();
            continue;
        };
        let entry = Entry::new(
            dir.path.join(&name),
            dir.relative_path.join(&name),
            dir.depth + 1,
            kind,
        );
        traversal.step(entry, &mut visit)?;
    }

    debug_log!(
        Walk,
        2,
        "finished {} ({} directories entered)",
        root.display(),
        traversal.visited.len()
    );
    Ok(())
}

/// State owned by one `walk` call and dropped when it returns.
struct Traversal {
    visited: HashSet<PathBuf>,
    stack: Vec<OpenDirectory>,
}

impl Traversal {
    fn step<F, E>(&mut self, entry: Entry, visit: &mut F) -> Result<(), E>
    where
        F: FnMut(&Entry, Option<&WalkError>) -> Result<Visit, E>,
    {
        if visit(&entry, None)? == Visit::SkipDir {
            return Ok(());
        }

        let Some(canonical) = self.descent_target(&entry) else {
            return Ok(());
        };
        self.visited.insert(canonical);

        debug_log!(Walk, 3, "entering directory: {}", entry.path().display());
        let (directory, error) = OpenDirectory::read(&entry);
        if let Some(error) = error {
            visit(&entry, Some(&error))?;
        }
        self.stack.push(directory);
        Ok(())
    }

    /// Canonical path to enter for `entry`, or `None` when it is a leaf or
    /// was already entered.
    fn descent_target(&self, entry: &Entry) -> Option<PathBuf> {
        let canonical = match entry.kind() {
            EntryKind::Directory => {
                fs::canonicalize(entry.path()).unwrap_or_else(|_| entry.path().to_path_buf())
            }
            EntryKind::Symlink => {
                let (target, kind) = entry.link_target()?;
                if kind != EntryKind::Directory {
                    return None;
                }
                match fs::canonicalize(target) {
                    Ok(canonical) => canonical,
                    Err(error) => {
                        debug_log!(
                            Walk,
                            2,
                            "cannot canonicalize link target {}: {}",
                            target.display(),
                            error
                        );
                        return None;
                    }
                }
            }
            EntryKind::File | EntryKind::Other => return None,
        };

        if self.visited.contains(&canonical) {
            debug_log!(
                Walk,
                2,
                "skipping already visited directory: {}",
                entry.path().display()
            );
            return None;
        }
        Some(canonical)
    }
}

/// A directory whose children are being visited.
struct OpenDirectory {
    path: PathBuf,
    relative_path: PathBuf,
    depth: usize,
    children: std::vec::IntoIter<(OsString, EntryKind)>,
}

impl OpenDirectory {
    /// Enumerates `entry`'s children.
    ///
    /// Children read before a failure are kept and still visited; the failure
    /// is returned alongside them.
    fn read(entry: &Entry) -> (Self, Option<WalkError>) {
        let mut children = Vec::new();
        let mut failure = None;

        match fs::read_dir(entry.path()) {
            Ok(read_dir) => {
                for dirent in read_dir {
                    match dirent {
                        Ok(dirent) => {
                            let kind = dirent
                                .file_type()
                                .or_else(|_| fs::symlink_metadata(dirent.path()).map(|m| m.file_type()))
                                .map_or(EntryKind::Other, EntryKind::from_file_type);
                            children.push((dirent.file_name(), kind));
                        }
                        Err(error) => {
                            failure =
                                Some(WalkError::read_dir_entry(entry.path().to_path_buf(), error));
                            break;
                        }
                    }
                }
            }
            Err(error) => failure = Some(WalkError::read_dir(entry.path().to_path_buf(), error)),
        }

        children.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        debug_log!(
            Walk,
            4,
            "found {} entries in {}",
            children.len(),
            entry.path().display()
        );

        let directory = Self {
            path: entry.path().to_path_buf(),
            relative_path: entry.relative_path().to_path_buf(),
            depth: entry.depth(),
            children: children.into_iter(),
        };
        (directory, failure)
    }

    fn next_child(&mut self) -> Option<(OsString, EntryKind)> {
        self.children.next()
    }
}
