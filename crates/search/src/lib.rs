#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Recursive search over a served directory.
//!
//! [`search`] validates a [`SearchQuery`], then walks the tree on a dedicated
//! thread using the cycle-safe walker from the `walk` crate. Matches stream
//! to the caller through a [`SearchHandle`] while traversal is still running;
//! at most one match is in flight at any time.
//!
//! Literal queries match the base name case-insensitively. Regular
//! expressions match the forward-slash path relative to the search root.
//! Results follow traversal order and carry no further ordering guarantee.

mod cancel;
mod error;
mod pipeline;
mod query;

pub use cancel::CancelHandle;
pub use error::SearchError;
pub use pipeline::{Match, SearchHandle, SearchSummary, search};
pub use query::{Matcher, SearchQuery};
