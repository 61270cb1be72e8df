#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `listing` builds the single-level view of a directory shown when no search
//! or download was requested: the children sorted directories-first, an
//! optional README rendered to HTML, and the breadcrumb trail above it.
//!
//! # Design
//!
//! - [`build_index`] enumerates one directory and classifies each child with
//!   [`walk::resolve`], so symlinks to directories sort with directories.
//! - [`Listing::from_entries`] sorts pre-classified children and selects the
//!   README. Selection scans the sorted children and takes the first whose
//!   name is one of the [`ReadmeKind`] file names, ignoring case; the variant
//!   found decides the rendering.
//! - Markdown is rendered with [`comrak`](https://docs.rs/comrak) with raw
//!   HTML passthrough and the table, strikethrough, autolink and task-list
//!   extensions. README content is trusted.
//!
//! # Invariants
//!
//! - An empty directory yields an empty listing without a README.
//! - At most one README is rendered per listing.
//!
//! # Examples
//!
//! ```
//! use listing::{ReadmeKind, build_index};
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! std::fs::create_dir(temp.path().join("src"))?;
//! std::fs::write(temp.path().join("README.md"), "# Demo\n")?;
//!
//! let listing = build_index(temp.path(), "/demo/")?;
//! let names: Vec<_> = listing.entries().iter().map(|info| info.name()).collect();
//! assert_eq!(names, ["src", "README.md"]);
//! assert_eq!(listing.name(), "demo");
//!
//! let readme = listing.readme().expect("readme selected");
//! assert_eq!(readme.kind(), ReadmeKind::Markdown);
//! assert!(readme.html().contains("<h1>Demo</h1>"));
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod display;
mod error;
mod index;
mod readme;

pub use display::{Crumb, crumbs, href, human_size};
pub use error::ListingError;
pub use index::{INDEX_HTML, Listing, build_index, find_index_html, read_entries};
pub use readme::{Readme, ReadmeKind, escape_html};
