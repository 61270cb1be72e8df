use std::io;
use std::path::PathBuf;
use thiserror::Error;
use walk::WalkError;

/// Failures raised while building a directory listing.
#[derive(Debug, Error)]
pub enum ListingError {
    /// The directory itself could not be enumerated.
    #[error("failed to read directory '{}': {source}", path.display())]
    ReadDir {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// A child could not be classified.
    #[error(transparent)]
    Entry(#[from] WalkError),
    /// The selected README could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Readme {
        /// README file.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
}

impl ListingError {
    /// Reports whether the listed directory does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ReadDir { source, .. } => source.kind() == io::ErrorKind::NotFound,
            Self::Entry(_) | Self::Readme { .. } => false,
        }
    }
}
