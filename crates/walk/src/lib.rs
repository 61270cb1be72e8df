#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` enumerates the directory tree served by `dirindex`. It offers two
//! traversals with different symlink policies and the entry classification
//! helpers shared by the search, archive and listing crates.
//!
//! # Design
//!
//! - [`walk`] is a callback-driven, pre-order traversal that follows
//!   directory symlinks. Every entered directory is recorded by canonical
//!   path, so cycles terminate and a directory reachable through several
//!   links is expanded once. The visitor decides per entry whether to
//!   descend ([`Visit`]) and receives recoverable errors inline.
//! - [`WalkBuilder`] and [`Walker`] provide a plain [`Iterator`] that yields
//!   symlinks as leaves and stops at the first error. The archive encoder
//!   uses it, since archives never expand links.
//! - [`resolve`], [`resolve_link`] and [`link_target_kind`] classify single
//!   paths into [`FileInfo`] snapshots for the listing builder.
//!
//! # Invariants
//!
//! - Siblings are always visited in byte order of their names.
//! - [`walk`] enters each canonical directory at most once per call; the
//!   visited set lives only for that call.
//! - Metadata on [`Entry`] is fetched lazily and at most once.
//!
//! # Errors
//!
//! [`WalkError`] records the failing path and the underlying [`std::io::Error`].
//! [`WalkError::is_permission_denied`] lets callers treat access failures as
//! soft errors.
//!
//! # Examples
//!
//! ```
//! use walk::WalkBuilder;
//! use std::collections::BTreeSet;
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path().join("site");
//! let nested = root.join("nested");
//! fs::create_dir_all(&nested)?;
//! fs::write(root.join("index.html"), b"<p>hi</p>")?;
//! fs::write(nested.join("notes.txt"), b"data")?;
//!
//! let mut seen = BTreeSet::new();
//! for entry in WalkBuilder::new(&root).include_root(false).build()? {
//!     seen.insert(entry?.relative_path().to_path_buf());
//! }
//!
//! assert!(seen.contains(std::path::Path::new("index.html")));
//! assert!(seen.contains(std::path::Path::new("nested/notes.txt")));
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod entry;
mod error;
mod follow;
mod resolve;
mod walker;

pub use builder::WalkBuilder;
pub use entry::{Entry, EntryKind, FileInfo, WalkEntry};
pub use error::{WalkError, WalkErrorKind};
pub use follow::{Visit, walk};
pub use resolve::{link_target_kind, permissions_mode, resolve, resolve_link, slash_path};
pub use walker::Walker;
