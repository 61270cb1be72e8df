use std::io;
use thiserror::Error;
use walk::WalkError;

/// Failures reported by [`search`](crate::search) and [`SearchHandle::finish`](crate::SearchHandle::finish).
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query text was empty.
    #[error("search query must not be empty")]
    EmptyQuery,
    /// The query was flagged as a regular expression but does not compile.
    #[error("invalid search pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern as supplied by the client.
        pattern: String,
        /// Compilation failure.
        #[source]
        source: regex::Error,
    },
    /// Traversal hit a filesystem error other than permission denied.
    #[error(transparent)]
    Walk(#[from] WalkError),
    /// The producer thread could not be started.
    #[error("failed to spawn search thread: {0}")]
    Spawn(#[source] io::Error),
    /// The producer thread panicked.
    #[error("search thread panicked")]
    ProducerPanicked,
}

impl SearchError {
    /// Reports whether the failure was caused by the client's query.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::EmptyQuery | Self::InvalidPattern { .. })
    }
}
