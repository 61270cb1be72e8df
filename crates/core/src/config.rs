use std::path::{Path, PathBuf};

/// Settings for a [`Browser`](crate::Browser).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserConfig {
    root: PathBuf,
    follow_index_html: bool,
}

impl BrowserConfig {
    /// Serves `root` with `index.html` replacement enabled.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_index_html: true,
        }
    }

    /// Controls whether a directory containing `index.html` is answered with
    /// that file instead of a generated listing.
    #[must_use]
    pub const fn follow_index_html(mut self, enabled: bool) -> Self {
        self.follow_index_html = enabled;
        self
    }

    /// Served root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reports whether `index.html` replacement is enabled.
    #[must_use]
    pub const fn follows_index_html(&self) -> bool {
        self.follow_index_html
    }
}
