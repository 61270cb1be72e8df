use crate::error::WalkError;
use crate::walker::Walker;
use std::path::PathBuf;

/// Configures a plain, non-following traversal rooted at a specific path.
///
/// Symlinks below the root are yielded as entries but never entered, which
/// makes the traversal terminate without any cycle bookkeeping. A symlinked
/// root is followed so that a served directory may itself be a link.
#[derive(Clone, Debug)]
pub struct WalkBuilder {
    root: PathBuf,
    include_root: bool,
}

impl WalkBuilder {
    /// Creates a new builder that will traverse the provided root path.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            include_root: true,
        }
    }

    /// Controls whether the root entry should be included in the output.
    ///
    /// When disabled, traversal starts directly with the root's children.
    #[must_use]
    pub const fn include_root(mut self, include: bool) -> Self {
        self.include_root = include;
        self
    }

    /// Builds a [`Walker`] using the configured options.
    pub fn build(self) -> Result<Walker, WalkError> {
        Walker::new(self.root, self.include_root)
    }
}
