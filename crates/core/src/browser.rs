use crate::config::BrowserConfig;
use crate::error::BrowseError;
use crate::path::{clean_request_path, resolve_under};
use crate::query::RequestQuery;
use crate::response::{ArchiveDownload, Response, SearchResults, ServedFile};
use archive::ArchiveFormat;
use listing::{Listing, find_index_html, read_entries};
use logging::{debug_log, info_log};
use search::{SearchQuery, search};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use walk::FileInfo;

/// Resolves requests against a served root directory.
///
/// A `Browser` holds no per-request state; one instance can serve any number
/// of concurrent requests.
#[derive(Clone, Debug)]
pub struct Browser {
    config: BrowserConfig,
}

/// What a directory request asks for, validated before any filesystem access.
enum Intent {
    Search(SearchQuery),
    Archive(ArchiveFormat),
    List,
}

impl Intent {
    fn from_query(query: &RequestQuery) -> Result<Self, BrowseError> {
        if !query.q.is_empty() {
            let search_query = SearchQuery::new(query.q.as_str(), query.regexp);
            search_query.compile()?;
            return Ok(Self::Search(search_query));
        }
        if !query.dl.is_empty() {
            return Ok(Self::Archive(ArchiveFormat::from_query(&query.dl)?));
        }
        Ok(Self::List)
    }
}

impl Browser {
    /// Serves `root` with default settings.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(BrowserConfig::new(root))
    }

    /// Serves according to `config`.
    #[must_use]
    pub const fn with_config(config: BrowserConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Answers one request.
    ///
    /// `request_path` is cleaned first and can never leave the root. A file
    /// is opened and returned. For a directory a non-empty `q` starts a
    /// search, otherwise a non-empty `dl` prepares an archive, otherwise the
    /// directory is listed (or its `index.html` returned when enabled).
    ///
    /// # Errors
    ///
    /// Query parameters are validated before the filesystem is touched: a
    /// bad regex or an unknown archive format fails without any system call.
    /// A path that does not exist is [`BrowseError::NotFound`].
    pub fn handle(&self, request_path: &str, query: &RequestQuery) -> Result<Response, BrowseError> {
        let intent = Intent::from_query(query)?;
        let cleaned = clean_request_path(request_path);
        let Some(full) = resolve_under(self.config.root(), &cleaned) else {
            return Err(BrowseError::NotFound {
                request_path: cleaned,
            });
        };
        debug_log!(
            Request,
            1,
            "{} -> {} (q={:?} regexp={} dl={:?})",
            cleaned,
            full.display(),
            query.q,
            query.regexp,
            query.dl
        );

        let file = File::open(&full).map_err(|source| open_error(&cleaned, &full, source))?;
        let metadata = file
            .metadata()
            .map_err(|source| open_error(&cleaned, &full, source))?;

        if !metadata.is_dir() {
            info_log!(Serve, 1, "serving {} ({} bytes)", cleaned, metadata.len());
            let info = FileInfo::from_metadata(full, &metadata);
            return Ok(Response::File(ServedFile::new(file, info)));
        }
        drop(file);

        match intent {
            Intent::Search(search_query) => {
                let handle = search(&full, &search_query)?;
                info_log!(
                    Search,
                    2,
                    "searching {} for {:?}{}",
                    cleaned,
                    query.q,
                    if query.regexp { " (regexp)" } else { "" }
                );
                Ok(Response::Search(SearchResults::new(
                    handle,
                    query.q.clone(),
                    query.regexp,
                    cleaned,
                )))
            }
            Intent::Archive(format) => {
                let download = ArchiveDownload::new(full, format, &cleaned);
                info_log!(
                    Archive,
                    1,
                    "archiving {} as {}",
                    cleaned,
                    download.file_name()
                );
                Ok(Response::Archive(download))
            }
            Intent::List => {
                let entries = read_entries(&full)?;
                if self.config.follows_index_html()
                    && let Some(index) = find_index_html(&entries)
                {
                    debug_log!(Request, 1, "{} has index.html", cleaned);
                    return Ok(Response::IndexHtml(index.path().to_path_buf()));
                }
                let listing = Listing::from_entries(entries, &full, &cleaned)?;
                Ok(Response::Listing(listing))
            }
        }
    }
}

fn open_error(cleaned: &str, full: &Path, source: io::Error) -> BrowseError {
    match source.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => BrowseError::NotFound {
            request_path: cleaned.to_owned(),
        },
        _ => BrowseError::Open {
            path: full.to_path_buf(),
            source,
        },
    }
}
