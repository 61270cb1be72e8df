use crate::error::{WalkError, clone_io_error};
use crate::resolve::{link_target_kind, permissions_mode, resolve_link};
use std::cell::OnceCell;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Classification of a filesystem object, taken without following symlinks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link; see [`FileInfo::target_kind`] for what it points at.
    Symlink,
    /// Fifo, socket or device node.
    Other,
}

impl EntryKind {
    /// Classifies a [`fs::FileType`].
    #[must_use]
    pub fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// Owned snapshot of one filesystem entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileInfo {
    path: PathBuf,
    name: String,
    kind: EntryKind,
    size: u64,
    modified: Option<SystemTime>,
    mode: u32,
    target_kind: Option<EntryKind>,
}

impl FileInfo {
    /// Builds a snapshot from `metadata`.
    ///
    /// When `metadata` came from lstat and describes a symlink, the target is
    /// stat'ed to fill [`FileInfo::target_kind`].
    #[must_use]
    pub fn from_metadata(path: PathBuf, metadata: &fs::Metadata) -> Self {
        let kind = EntryKind::from_file_type(metadata.file_type());
        let target_kind = if kind == EntryKind::Symlink {
            link_target_kind(&path)
        } else {
            None
        };
        Self::with_target(path, metadata, target_kind)
    }

    fn with_target(path: PathBuf, metadata: &fs::Metadata, target_kind: Option<EntryKind>) -> Self {
        let name = path
            .file_name()
            .unwrap_or(path.as_os_str())
            .to_string_lossy()
            .into_owned();
        Self {
            kind: EntryKind::from_file_type(metadata.file_type()),
            size: metadata.len(),
            modified: metadata.modified().ok(),
            mode: permissions_mode(metadata),
            name,
            path,
            target_kind,
        }
    }

    /// Full filesystem path of the entry.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, lossily decoded for display.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of the entry itself (a symlink reports [`EntryKind::Symlink`]).
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Size in bytes as reported by lstat.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Modification time, when the platform reports one.
    #[must_use]
    pub const fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Permission bits.
    #[must_use]
    pub const fn mode(&self) -> u32 {
        self.mode
    }

    /// Kind of the symlink target; `None` for non-links and dangling links.
    #[must_use]
    pub const fn target_kind(&self) -> Option<EntryKind> {
        self.target_kind
    }

    /// Reports whether following the entry leads to a directory.
    #[must_use]
    pub fn acts_as_dir(&self) -> bool {
        match self.kind {
            EntryKind::Directory => true,
            EntryKind::Symlink => self.target_kind == Some(EntryKind::Directory),
            EntryKind::File | EntryKind::Other => false,
        }
    }

    /// Icon class used by listing renderers.
    #[must_use]
    pub fn icon_name(&self) -> &'static str {
        match self.kind {
            EntryKind::Directory => "folder",
            EntryKind::Symlink if self.acts_as_dir() => "folder-shortcut",
            EntryKind::Symlink => "file-shortcut",
            EntryKind::File | EntryKind::Other => "file",
        }
    }
}

/// Entry handed to the cycle-safe walker's visitor.
///
/// Classification comes from the directory enumeration and costs no extra
/// system call. Full metadata and the symlink target are fetched on first
/// access and memoized for the lifetime of the entry.
#[derive(Debug)]
pub struct Entry {
    path: PathBuf,
    relative_path: PathBuf,
    depth: usize,
    kind: EntryKind,
    metadata: OnceCell<io::Result<fs::Metadata>>,
    link_target: OnceCell<Option<(PathBuf, EntryKind)>>,
}

impl Entry {
    pub(crate) fn root(path: PathBuf, metadata: fs::Metadata) -> Self {
        let entry = Self::new(
            path,
            PathBuf::new(),
            0,
            EntryKind::from_file_type(metadata.file_type()),
        );
        let _ = entry.metadata.set(Ok(metadata));
        entry
    }

    /// Placeholder for a root that could not be stat'ed; only the path is meaningful.
    pub(crate) fn unavailable_root(path: PathBuf) -> Self {
        Self::new(path, PathBuf::new(), 0, EntryKind::Other)
    }

    pub(crate) fn new(
        path: PathBuf,
        relative_path: PathBuf,
        depth: usize,
        kind: EntryKind,
    ) -> Self {
        Self {
            path,
            relative_path,
            depth,
            kind,
            metadata: OnceCell::new(),
            link_target: OnceCell::new(),
        }
    }

    /// Filesystem path of the entry. Entries reached through a symlinked
    /// directory keep the link in their path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the traversal root; empty for the root itself.
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Final component of the entry's path.
    #[must_use]
    pub fn name(&self) -> &OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }

    /// Distance from the traversal root (root depth is `0`).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Indicates whether this entry is the traversal root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    /// Classification without following symlinks.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Lazily fetched lstat metadata, memoized after the first call.
    ///
    /// The root's metadata comes from following the root path, so a symlinked
    /// root reports the directory it points at.
    pub fn metadata(&self) -> Result<&fs::Metadata, WalkError> {
        self.metadata
            .get_or_init(|| fs::symlink_metadata(&self.path))
            .as_ref()
            .map_err(|error| WalkError::metadata(self.path.clone(), clone_io_error(error)))
    }

    /// Resolved symlink target path and kind, memoized.
    ///
    /// `None` for non-links and for links that cannot be read or point at
    /// nothing.
    pub fn link_target(&self) -> Option<(&Path, EntryKind)> {
        self.link_target
            .get_or_init(|| {
                if self.kind != EntryKind::Symlink {
                    return None;
                }
                let target = resolve_link(&self.path)?;
                let kind = fs::metadata(&target)
                    .ok()
                    .map(|metadata| EntryKind::from_file_type(metadata.file_type()))?;
                Some((target, kind))
            })
            .as_ref()
            .map(|(path, kind)| (path.as_path(), *kind))
    }

    /// Kind of the symlink target, if the entry is a resolvable link.
    pub fn target_kind(&self) -> Option<EntryKind> {
        self.link_target().map(|(_, kind)| kind)
    }

    /// Reports whether following the entry leads to a directory.
    pub fn acts_as_dir(&self) -> bool {
        match self.kind {
            EntryKind::Directory => true,
            EntryKind::Symlink => self.target_kind() == Some(EntryKind::Directory),
            EntryKind::File | EntryKind::Other => false,
        }
    }

    /// Builds an owned snapshot, reusing memoized metadata and link target.
    pub fn to_info(&self) -> Result<FileInfo, WalkError> {
        let metadata = self.metadata()?;
        Ok(FileInfo::with_target(
            self.path.clone(),
            metadata,
            self.target_kind(),
        ))
    }
}

/// Entry yielded by the plain [`Walker`](crate::Walker).
#[derive(Debug)]
pub struct WalkEntry {
    pub(crate) full_path: PathBuf,
    pub(crate) relative_path: PathBuf,
    pub(crate) metadata: fs::Metadata,
    pub(crate) depth: usize,
    pub(crate) is_root: bool,
}

impl WalkEntry {
    /// Returns the absolute path to the filesystem entry.
    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// Returns the path relative to the traversal root.
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Provides access to the metadata captured for the entry (lstat for
    /// every entry except the root).
    #[must_use]
    pub fn metadata(&self) -> &fs::Metadata {
        &self.metadata
    }

    /// Classification of the entry.
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        EntryKind::from_file_type(self.metadata.file_type())
    }

    /// Returns the file name associated with the entry, if any.
    ///
    /// The root entry yields `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use walk::WalkBuilder;
    /// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
    /// let temp = tempfile::tempdir()?;
    /// let root = temp.path().join("root");
    /// std::fs::create_dir(&root)?;
    /// let mut walker = WalkBuilder::new(&root).build()?;
    /// let entry = walker.next().unwrap()?;
    /// assert!(entry.metadata().is_dir());
    /// assert!(entry.file_name().is_none());
    /// # Ok(())
    /// # }
    /// # demo().unwrap();
    /// ```
    #[must_use]
    pub fn file_name(&self) -> Option<&OsStr> {
        if self.is_root {
            None
        } else {
            self.relative_path.file_name()
        }
    }

    /// Reports the depth of the entry relative to the root (root depth is `0`).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Indicates whether this entry corresponds to the traversal root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.is_root
    }
}
