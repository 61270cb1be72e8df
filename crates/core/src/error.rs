//! Error taxonomy shared by every front end.
//!
//! Each [`BrowseError`] falls into one [`ErrorClass`], which fixes both the
//! HTTP status a server answers with and the process exit code the CLI
//! returns.

use archive::ArchiveError;
use listing::ListingError;
use search::SearchError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a failed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorClass {
    /// The client sent something unusable: a bad regex, an empty query or an
    /// unknown archive format.
    Input = 1,
    /// The requested path does not exist under the served root.
    NotFound = 2,
    /// The filesystem failed underneath an otherwise valid request.
    Hard = 3,
}

impl ErrorClass {
    /// HTTP status code answered for this class.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::Input => 400,
            Self::NotFound => 404,
            Self::Hard => 500,
        }
    }

    /// Process exit code used by the command-line front end.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        self as i32
    }

    /// Short description suitable for a status line.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Input => "bad request",
            Self::NotFound => "not found",
            Self::Hard => "internal error",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Failure of [`Browser::handle`](crate::Browser::handle) or of a deferred
/// response body.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// Nothing exists at the requested path.
    #[error("{request_path}: no such file or directory")]
    NotFound {
        /// Cleaned request path.
        request_path: String,
    },
    /// The requested path exists but could not be opened or stat'ed.
    #[error("failed to open '{}': {source}", path.display())]
    Open {
        /// Filesystem path.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// Search could not start or stopped on a hard error.
    #[error(transparent)]
    Search(#[from] SearchError),
    /// Archive request was rejected or failed while streaming.
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    /// Directory listing failed.
    #[error(transparent)]
    Listing(#[from] ListingError),
}

impl BrowseError {
    /// Classifies the failure.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::Open { .. } => ErrorClass::Hard,
            Self::Search(error) if error.is_input_error() => ErrorClass::Input,
            Self::Archive(error) if error.is_input_error() => ErrorClass::Input,
            Self::Listing(error) if error.is_not_found() => ErrorClass::NotFound,
            Self::Search(_) | Self::Archive(_) | Self::Listing(_) => ErrorClass::Hard,
        }
    }

    /// HTTP status code for the failure.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.class().status_code()
    }

    /// Process exit code for the failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.class().exit_code()
    }
}
