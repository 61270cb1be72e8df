use archive::CompressionLevelError;
use dirindex_core::{BrowseError, ErrorClass};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by [`run`](crate::run).
#[derive(Debug, Error)]
pub enum CliError {
    /// Command-line parsing failed.
    #[error("{0}")]
    Usage(#[from] clap::Error),
    /// A `--info` or `--debug` token was not recognised.
    #[error("{0}")]
    Verbosity(String),
    /// `--level` was outside the deflate range.
    #[error("{0}")]
    Level(#[from] CompressionLevelError),
    /// The request itself failed.
    #[error(transparent)]
    Browse(#[from] BrowseError),
    /// The `--output` file could not be created.
    #[error("failed to create '{}': {source}", path.display())]
    CreateOutput {
        /// Requested destination.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// Writing the result failed.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl CliError {
    /// Classification used for the exit status.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Usage(_) | Self::Verbosity(_) | Self::Level(_) => ErrorClass::Input,
            Self::Browse(error) => error.class(),
            Self::CreateOutput { .. } | Self::Output(_) => ErrorClass::Hard,
        }
    }

    /// Process exit status: 1 for input errors, 2 for missing paths, 3 for
    /// filesystem failures.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.class().exit_code()
    }
}
