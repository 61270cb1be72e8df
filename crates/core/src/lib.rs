#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `dirindex_core` turns a request path plus its query parameters into a
//! [`Response`]: the bytes of a file, a directory listing, a streaming
//! search, or an archive download. Front ends (the CLI, or an HTTP server
//! supplied by the embedder) only render what this crate returns.
//!
//! # Design
//!
//! - [`Browser::handle`] cleans the request path lexically so it can never
//!   leave the configured root, validates `q`, `regexp` and `dl`, and then
//!   dispatches: files are opened; directories are searched when `q` is set,
//!   archived when `dl` is set, and listed otherwise.
//! - [`RequestQuery::parse`] decodes form-encoded query strings with
//!   [`form_urlencoded`](https://docs.rs/form_urlencoded).
//! - Archive downloads are deferred: [`ArchiveDownload`] exposes its
//!   `Content-Disposition` value first and produces bytes only in
//!   [`ArchiveDownload::write_to`].
//!
//! # Errors
//!
//! Every failure is a [`BrowseError`], classified by [`ErrorClass`] into
//! client input errors (400), missing paths (404) and filesystem failures
//! (500).
//!
//! # Examples
//!
//! ```
//! use dirindex_core::{Browser, RequestQuery, Response};
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! std::fs::create_dir(temp.path().join("docs"))?;
//! std::fs::write(temp.path().join("docs/guide.txt"), b"read me")?;
//!
//! let browser = Browser::new(temp.path());
//! let Response::Listing(listing) = browser.handle("/docs/", &RequestQuery::default())? else {
//!     panic!("expected a listing");
//! };
//! assert_eq!(listing.entries()[0].name(), "guide.txt");
//!
//! let query = RequestQuery::parse("q=GUIDE");
//! let Response::Search(results) = browser.handle("/", &query)? else {
//!     panic!("expected a search");
//! };
//! let found: Vec<String> = results.map(|m| m.relative_path().to_owned()).collect();
//! assert_eq!(found, ["docs/guide.txt"]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod browser;
mod config;
mod error;
mod path;
mod query;
mod response;

pub use browser::Browser;
pub use config::BrowserConfig;
pub use error::{BrowseError, ErrorClass};
pub use path::clean_request_path;
pub use query::RequestQuery;
pub use response::{ArchiveDownload, Response, SearchResults, ServedFile};
