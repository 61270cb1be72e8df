use std::io;
use std::path::PathBuf;
use thiserror::Error;
use walk::WalkError;

/// Failures raised while producing an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The requested format name is not one of `targz` or `zip`.
    #[error("dl must be one of 'targz', 'zip' (got '{0}')")]
    UnsupportedFormat(String),
    /// Traversal of the source tree failed.
    #[error(transparent)]
    Walk(#[from] WalkError),
    /// A source file could not be opened or read.
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        /// File being archived.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// The archive could not be written to the output.
    #[error("failed to write archive: {0}")]
    Write(#[source] io::Error),
    /// A file's length changed between stat and read.
    #[error("'{}' changed size while being archived", path.display())]
    SizeChanged {
        /// File being archived.
        path: PathBuf,
    },
    /// A file name is not valid UTF-8 and cannot be stored in a zip entry.
    #[error("'{}' has a name that is not valid UTF-8; use targz instead", path.display())]
    NonUtf8Name {
        /// File being archived.
        path: PathBuf,
    },
    /// The zip writer rejected an entry.
    #[error("failed to write zip entry: {0}")]
    Zip(#[source] zip::result::ZipError),
}

impl ArchiveError {
    /// Reports whether the failure was caused by the client's request.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::UnsupportedFormat(_))
    }
}
