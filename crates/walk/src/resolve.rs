//! Entry classification and symlink resolution shared by both walkers and the
//! directory index builder.

use crate::entry::{EntryKind, FileInfo};
use crate::error::WalkError;
use logging::debug_log;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Stats `path` without following a final symlink and returns a snapshot.
///
/// Symlinks additionally have their target stat'ed so
/// [`FileInfo::target_kind`] is populated. A dangling link is not an error;
/// its target kind is simply `None`.
pub fn resolve(path: &Path) -> Result<FileInfo, WalkError> {
    let metadata =
        fs::symlink_metadata(path).map_err(|error| WalkError::metadata(path.to_path_buf(), error))?;
    Ok(FileInfo::from_metadata(path.to_path_buf(), &metadata))
}

/// Reads the symlink at `link` and returns the path it designates.
///
/// Relative targets are interpreted against the directory containing the
/// link; absolute targets are returned unchanged. Returns `None` when the
/// link cannot be read.
pub fn resolve_link(link: &Path) -> Option<PathBuf> {
    let target = match fs::read_link(link) {
        Ok(target) => target,
        Err(error) => {
            debug_log!(Walk, 2, "unreadable link {}: {}", link.display(), error);
            return None;
        }
    };

    if target.is_absolute() {
        return Some(target);
    }
    let base = link.parent().unwrap_or_else(|| Path::new(""));
    Some(base.join(target))
}

/// Classifies the object a symlink points at, or `None` when it dangles.
pub fn link_target_kind(link: &Path) -> Option<EntryKind> {
    let target = resolve_link(link)?;
    match fs::metadata(&target) {
        Ok(metadata) => Some(EntryKind::from_file_type(metadata.file_type())),
        Err(error) => {
            debug_log!(
                Walk,
                2,
                "broken link {} -> {}: {}",
                link.display(),
                target.display(),
                error
            );
            None
        }
    }
}

/// Joins the normal components of a relative path with `/`.
///
/// Used for archive entry names and search results, which are always
/// forward-slash separated regardless of platform.
#[must_use]
pub fn slash_path(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        if let Component::Normal(part) = component {
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(&part.to_string_lossy());
        }
    }
    out
}

/// Permission bits suitable for archive headers.
#[cfg(unix)]
#[must_use]
pub fn permissions_mode(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

/// Permission bits suitable for archive headers.
#[cfg(not(unix))]
#[must_use]
pub fn permissions_mode(metadata: &fs::Metadata) -> u32 {
    match (metadata.is_dir(), metadata.permissions().readonly()) {
        (true, _) => 0o755,
        (false, true) => 0o444,
        (false, false) => 0o644,
    }
}
