//! Producer thread and consumer handle.
//!
//! The producer drives the cycle-safe walker and hands each match over a
//! zero-capacity channel, so it stays blocked until the consumer takes that
//! match. While blocked it also waits on the cancellation signal:
//!
//! ```text
//! producer thread                       consumer
//! ───────────────                       ────────
//! walk → match ──── hand-off (cap 0) ──▶ next()
//!        ▲                               │
//!        └──── wake (cancel / drop) ◀────┘
//! ```

use crate::cancel::{CancelHandle, CancelSignal, cancel_pair};
use crate::error::SearchError;
use crate::query::{Matcher, SearchQuery};
use crossbeam_channel::{Receiver, Sender, bounded, never, select};
use logging::{VerbosityConfig, debug_log, info_log};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use walk::{FileInfo, Visit, WalkError, slash_path};

/// One search hit.
#[derive(Clone, Debug)]
pub struct Match {
    info: FileInfo,
    relative_path: String,
    query: Arc<str>,
}

impl Match {
    /// Snapshot of the matched entry; symlinks carry their target kind.
    #[must_use]
    pub const fn info(&self) -> &FileInfo {
        &self.info
    }

    /// Forward-slash path relative to the searched directory.
    #[must_use]
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Relative path with `#` escaped so it can be used as a link target.
    #[must_use]
    pub fn href(&self) -> String {
        self.relative_path.replace('#', "%23")
    }

    /// Query text that produced the match.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Outcome of a search that did not hit a hard error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchSummary {
    /// Matches accepted by the consumer.
    pub delivered: u64,
    /// Whether traversal stopped early because of cancellation or because the
    /// consumer went away.
    pub cancelled: bool,
}

/// Consumer side of a running search.
///
/// Iterating yields matches as the producer discovers them and ends when the
/// traversal completes. Dropping the handle cancels the producer.
#[derive(Debug)]
pub struct SearchHandle {
    matches: Receiver<Match>,
    cancel: CancelHandle,
    producer: Option<JoinHandle<Result<SearchSummary, SearchError>>>,
}

impl SearchHandle {
    /// Stops the producer at its next entry, or at once if it is blocked on
    /// the hand-off.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Handle that cancels this search from another thread.
    #[must_use]
    pub fn canceller(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Stops receiving, waits for the producer and reports how it ended.
    ///
    /// Matches not yet consumed are discarded; a producer still running is
    /// released and the summary reports `cancelled`.
    pub fn finish(mut self) -> Result<SearchSummary, SearchError> {
        drop(std::mem::replace(&mut self.matches, never()));
        let Some(producer) = self.producer.take() else {
            return Ok(SearchSummary::default());
        };
        producer
            .join()
            .map_err(|_| SearchError::ProducerPanicked)?
    }
}

impl Iterator for SearchHandle {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        self.matches.recv().ok()
    }
}

impl Drop for SearchHandle {
    fn drop(&mut self) {
        if self.producer.is_some() {
            self.cancel.cancel();
        }
    }
}

/// Starts a recursive search below `root`.
///
/// The query is validated before anything else happens; an empty query or a
/// pattern that does not compile fails without touching the filesystem. The
/// root itself is never reported. Permission errors are skipped; any other
/// filesystem error ends the traversal and is returned by
/// [`SearchHandle::finish`].
///
/// # Examples
///
/// ```
/// use search::{SearchQuery, search};
/// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempfile::tempdir()?;
/// std::fs::create_dir(temp.path().join("notes"))?;
/// std::fs::write(temp.path().join("notes/Todo.txt"), b"milk")?;
///
/// let mut handle = search(temp.path(), &SearchQuery::new("todo", false))?;
/// let found: Vec<String> = handle.by_ref().map(|m| m.relative_path().to_owned()).collect();
/// assert_eq!(found, ["notes/Todo.txt"]);
/// assert_eq!(handle.finish()?.delivered, 1);
/// # Ok(())
/// # }
/// # demo().unwrap();
/// ```
pub fn search<P: AsRef<Path>>(root: P, query: &SearchQuery) -> Result<SearchHandle, SearchError> {
    let matcher = query.compile()?;
    let root = root.as_ref().to_path_buf();
    debug_log!(
        Search,
        1,
        "searching {} for {:?} (regex: {})",
        root.display(),
        query.text(),
        query.use_regex()
    );

    let (match_tx, match_rx) = bounded(0);
    let (cancel, signal) = cancel_pair();
    let producer = Producer {
        root,
        matcher,
        query: Arc::from(query.text()),
        matches: match_tx,
        signal,
        verbosity: logging::current(),
    };

    let join = thread::Builder::new()
        .name("dirindex-search".into())
        .spawn(move || producer.run())
        .map_err(SearchError::Spawn)?;

    Ok(SearchHandle {
        matches: match_rx,
        cancel,
        producer: Some(join),
    })
}

enum Stop {
    Cancelled,
    Failed(WalkError),
}

struct Producer {
    root: PathBuf,
    matcher: Matcher,
    query: Arc<str>,
    matches: Sender<Match>,
    signal: CancelSignal,
    verbosity: VerbosityConfig,
}

impl Producer {
    fn run(self) -> Result<SearchSummary, SearchError> {
        let Self {
            root,
            matcher,
            query,
            matches,
            signal,
            verbosity,
        } = self;
        logging::init(verbosity);
        let mut delivered = 0u64;

        let outcome = walk::walk(&root, |entry, error| {
            if signal.is_cancelled() {
                return Err(Stop::Cancelled);
            }
            if let Some(error) = error {
                if error.is_permission_denied() {
                    debug_log!(Search, 2, "skipping {}: {}", entry.path().display(), error);
                    return Ok(Visit::SkipDir);
                }
                return Err(Stop::Failed(error.clone()));
            }
            if entry.is_root() {
                return Ok(Visit::Continue);
            }

            let relative = slash_path(entry.relative_path());
            if !matcher.is_match(&entry.name().to_string_lossy(), &relative) {
                return Ok(Visit::Continue);
            }

            let info = match entry.to_info() {
                Ok(info) => info,
                Err(error) if error.is_permission_denied() => return Ok(Visit::Continue),
                Err(error) => return Err(Stop::Failed(error)),
            };
            let found = Match {
                info,
                relative_path: relative,
                query: Arc::clone(&query),
            };

            debug_log!(Search, 3, "match: {}", found.relative_path);
            select! {
                send(matches, found) -> sent => {
                    if sent.is_err() {
                        return Err(Stop::Cancelled);
                    }
                }
                recv(signal.wake()) -> _ => {
                    return Err(Stop::Cancelled);
                }
            }
            delivered += 1;
            Ok(Visit::Continue)
        });

        match outcome {
            Ok(()) => {
                info_log!(Search, 1, "search for {:?} found {} matches", &*query, delivered);
                Ok(SearchSummary {
                    delivered,
                    cancelled: false,
                })
            }
            Err(Stop::Cancelled) => {
                debug_log!(Search, 1, "search cancelled after {} matches", delivered);
                Ok(SearchSummary {
                    delivered,
                    cancelled: true,
                })
            }
            Err(Stop::Failed(error)) => {
                info_log!(Search, 1, "error encountered searching: {}", error);
                Err(error.into())
            }
        }
    }
}
