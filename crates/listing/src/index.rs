use crate::error::ListingError;
use crate::readme::{Readme, ReadmeKind};
use logging::{debug_log, info_log};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use walk::{FileInfo, resolve};

/// Name of a child that replaces the generated listing when present.
pub const INDEX_HTML: &str = "index.html";

/// One level of a directory, sorted for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Listing {
    name: String,
    path: String,
    dir: PathBuf,
    entries: Vec<FileInfo>,
    readme: Option<Readme>,
    root: bool,
}

/// Enumerates `dir` and builds its listing.
///
/// `request_path` is the slash-separated path the client asked for (`/` for
/// the served root). A child that disappears between enumeration and
/// classification is left out.
///
/// # Errors
///
/// Fails when the directory cannot be read, a child cannot be classified, or
/// the selected README cannot be read.
pub fn build_index(dir: &Path, request_path: &str) -> Result<Listing, ListingError> {
    Listing::from_entries(read_entries(dir)?, dir, request_path)
}

/// Classifies the children of `dir` in enumeration order.
///
/// Nothing is read beyond the directory itself and each child's metadata, so
/// callers can look for [`INDEX_HTML`] with [`find_index_html`] before paying
/// for a full listing.
///
/// # Errors
///
/// Fails when the directory cannot be read or a child cannot be classified.
pub fn read_entries(dir: &Path) -> Result<Vec<FileInfo>, ListingError> {
    let read_dir = fs::read_dir(dir).map_err(|source| ListingError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for dirent in read_dir {
        let dirent = dirent.map_err(|source| ListingError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        match resolve(&dirent.path()) {
            Ok(info) => entries.push(info),
            Err(error) if error.is_not_found() => {
                debug_log!(Index, 2, "child vanished: {}", error);
            }
            Err(error) => return Err(error.into()),
        }
    }
    Ok(entries)
}

/// Child named exactly `index.html`, in any order of `entries`.
#[must_use]
pub fn find_index_html(entries: &[FileInfo]) -> Option<&FileInfo> {
    entries.iter().find(|info| info.name() == INDEX_HTML)
}

impl Listing {
    /// Sorts `entries` and selects a README among them.
    ///
    /// Directories (including symlinks to directories) come first, then
    /// everything else; each group is ordered by name, byte-wise. The README
    /// is the first non-directory child in that order whose name is
    /// `readme.txt`, `readme.html` or `readme.md` in any case, read from
    /// `dir`.
    ///
    /// # Errors
    ///
    /// Fails when the selected README cannot be read.
    pub fn from_entries(
        mut entries: Vec<FileInfo>,
        dir: &Path,
        request_path: &str,
    ) -> Result<Self, ListingError> {
        entries.sort_by(directories_first);

        let readme = match entries
            .iter()
            .filter(|info| !info.acts_as_dir())
            .find_map(|info| ReadmeKind::from_name(info.name()).map(|kind| (kind, info)))
        {
            Some((kind, info)) => Some(load_readme(dir, kind, info)?),
            None => None,
        };

        let listing = Self {
            name: last_segment(request_path).to_owned(),
            path: request_path.to_owned(),
            dir: dir.to_path_buf(),
            root: request_path == "/",
            entries,
            readme,
        };
        info_log!(
            Listing,
            2,
            "listed {} ({} entries{})",
            listing.path,
            listing.entries.len(),
            if listing.readme.is_some() { ", readme" } else { "" }
        );
        Ok(listing)
    }

    /// Name of the listed directory; empty for the root.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Request path the listing was built for.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Filesystem directory the listing describes.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Children in display order.
    #[must_use]
    pub fn entries(&self) -> &[FileInfo] {
        &self.entries
    }

    /// Selected README, if any.
    #[must_use]
    pub const fn readme(&self) -> Option<&Readme> {
        self.readme.as_ref()
    }

    /// Reports whether this is the served root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.root
    }

    /// Child named exactly `index.html`, which callers serve instead of the
    /// generated listing.
    #[must_use]
    pub fn index_html(&self) -> Option<&FileInfo> {
        find_index_html(&self.entries)
    }

    /// Consumes the listing, returning its children.
    #[must_use]
    pub fn into_entries(self) -> Vec<FileInfo> {
        self.entries
    }
}

fn directories_first(left: &FileInfo, right: &FileInfo) -> Ordering {
    right
        .acts_as_dir()
        .cmp(&left.acts_as_dir())
        .then_with(|| left.name().cmp(right.name()))
}

fn load_readme(dir: &Path, kind: ReadmeKind, info: &FileInfo) -> Result<Readme, ListingError> {
    let path = match info.path().file_name() {
        Some(file_name) => dir.join(file_name),
        None => info.path().to_path_buf(),
    };
    let bytes = fs::read(&path).map_err(|source| ListingError::Readme {
        path: path.clone(),
        source,
    })?;
    debug_log!(
        Index,
        1,
        "rendering {} as {:?} ({} bytes)",
        path.display(),
        kind,
        bytes.len()
    );
    Ok(Readme::new(kind, info.name(), &String::from_utf8_lossy(&bytes)))
}

fn last_segment(request_path: &str) -> &str {
    request_path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}
