#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `archive` packages a directory subtree into a downloadable tar.gz or zip
//! stream. Output is written incrementally to any [`std::io::Write`]; neither
//! format needs to seek, so the writer can be a socket.
//!
//! # Design
//!
//! - [`encode_archive`] and [`ArchiveEncoder`] traverse with the plain
//!   `walk` iterator, which never follows symlinks, and store regular files
//!   only.
//! - tar.gz output uses [`tar`](https://docs.rs/tar) over a
//!   [`flate2`](https://docs.rs/flate2) gzip encoder.
//! - zip output uses [`zip`](https://docs.rs/zip)'s streaming writer, which
//!   writes data descriptors instead of back-patching headers. Names that are
//!   not valid UTF-8 are rejected for zip; tar keeps their raw bytes.
//!
//! # Errors
//!
//! [`ArchiveError`] separates client mistakes (an unknown `dl` value) from
//! read, write and traversal failures. Once bytes have been written an error
//! leaves a truncated archive behind; callers can only log it.

mod counting;
mod encode;
mod error;
mod format;
mod level;
mod tar_gz;
mod zip_sink;

pub use encode::{ArchiveEncoder, ArchiveStats, encode_archive};
pub use error::ArchiveError;
pub use format::{ArchiveFormat, content_disposition, download_name};
pub use level::{CompressionLevel, CompressionLevelError};
