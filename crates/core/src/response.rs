use crate::error::BrowseError;
use archive::{ArchiveEncoder, ArchiveFormat, ArchiveStats, CompressionLevel};
use listing::Listing;
use logging::info_log;
use search::{CancelHandle, Match, SearchHandle, SearchSummary};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use walk::FileInfo;

/// Outcome of [`Browser::handle`](crate::Browser::handle).
#[derive(Debug)]
pub enum Response {
    /// A regular file to stream back as-is.
    File(ServedFile),
    /// A directory's `index.html`, served in place of a listing.
    IndexHtml(PathBuf),
    /// A generated directory listing.
    Listing(Listing),
    /// A running search whose matches arrive as they are found.
    Search(SearchResults),
    /// An archive of a subtree, produced when written.
    Archive(ArchiveDownload),
}

/// An opened regular file.
#[derive(Debug)]
pub struct ServedFile {
    file: File,
    info: FileInfo,
}

impl ServedFile {
    pub(crate) fn new(file: File, info: FileInfo) -> Self {
        Self { file, info }
    }

    /// Snapshot taken from the open handle, so symlinks are already followed.
    #[must_use]
    pub const fn info(&self) -> &FileInfo {
        &self.info
    }

    /// Open handle positioned at the start of the file.
    #[must_use]
    pub const fn file(&self) -> &File {
        &self.file
    }

    /// Releases the open handle.
    #[must_use]
    pub fn into_file(self) -> File {
        self.file
    }
}

/// A search in progress below a requested directory.
#[derive(Debug)]
pub struct SearchResults {
    handle: SearchHandle,
    query: String,
    regexp: bool,
    request_path: String,
}

impl SearchResults {
    pub(crate) fn new(handle: SearchHandle, query: String, regexp: bool, request_path: String) -> Self {
        Self {
            handle,
            query,
            regexp,
            request_path,
        }
    }

    /// Query text as submitted.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Reports whether the query is a regular expression.
    #[must_use]
    pub const fn is_regexp(&self) -> bool {
        self.regexp
    }

    /// Directory being searched, as a cleaned request path.
    #[must_use]
    pub fn request_path(&self) -> &str {
        &self.request_path
    }

    /// Handle that stops the search from another thread.
    #[must_use]
    pub fn canceller(&self) -> CancelHandle {
        self.handle.canceller()
    }

    /// Stops the search at the next entry.
    pub fn cancel(&self) {
        self.handle.cancel();
    }

    /// Waits for the search to stop and reports how it ended.
    ///
    /// # Errors
    ///
    /// Returns the filesystem error that cut the search short.
    pub fn finish(self) -> Result<SearchSummary, BrowseError> {
        let summary = self.handle.finish()?;
        info_log!(
            Search,
            1,
            "search '{}' under {} delivered {} matches{}",
            self.query,
            self.request_path,
            summary.delivered,
            if summary.cancelled { " (cancelled)" } else { "" }
        );
        Ok(summary)
    }
}

impl Iterator for SearchResults {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        self.handle.next()
    }
}

/// A pending archive download.
///
/// The `Content-Disposition` value is available before any bytes are
/// produced, so callers can send headers first and then call
/// [`ArchiveDownload::write_to`].
#[derive(Clone, Debug)]
pub struct ArchiveDownload {
    source: PathBuf,
    format: ArchiveFormat,
    file_name: String,
    content_disposition: String,
    level: CompressionLevel,
}

impl ArchiveDownload {
    pub(crate) fn new(source: PathBuf, format: ArchiveFormat, request_path: &str) -> Self {
        let file_name = archive::download_name(request_path, format);
        Self {
            content_disposition: archive::content_disposition(&file_name),
            source,
            format,
            file_name,
            level: CompressionLevel::Default,
        }
    }

    /// Overrides the deflate level used by [`ArchiveDownload::write_to`].
    #[must_use]
    pub const fn with_level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    /// Directory that will be archived.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Selected container format.
    #[must_use]
    pub const fn format(&self) -> ArchiveFormat {
        self.format
    }

    /// Suggested download file name, such as `photos.tar.gz`.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// `Content-Disposition` header value.
    #[must_use]
    pub fn content_disposition(&self) -> &str {
        &self.content_disposition
    }

    /// `Content-Type` header value.
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    /// Streams the archive into `output`.
    ///
    /// # Errors
    ///
    /// Any read or write failure aborts the archive. Bytes already written
    /// stay written, so the error is also logged for callers that can no
    /// longer report it to the client.
    pub fn write_to<W: Write>(&self, output: W) -> Result<ArchiveStats, BrowseError> {
        ArchiveEncoder::new(self.format)
            .level(self.level)
            .encode(&self.source, output)
            .map_err(|error| {
                info_log!(
                    Archive,
                    1,
                    "archive {} aborted: {}",
                    self.file_name,
                    error
                );
                BrowseError::from(error)
            })
    }
}
