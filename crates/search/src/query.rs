use crate::error::SearchError;
use regex::Regex;

/// Search request as received from a client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    use_regex: bool,
}

impl SearchQuery {
    /// Creates a query. `use_regex` selects pattern matching on the relative
    /// path instead of a literal match on the base name.
    pub fn new(text: impl Into<String>, use_regex: bool) -> Self {
        Self {
            text: text.into(),
            use_regex,
        }
    }

    /// Query text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the text is a regular expression.
    #[must_use]
    pub const fn use_regex(&self) -> bool {
        self.use_regex
    }

    /// Validates the query and builds its matcher without touching the
    /// filesystem.
    pub fn compile(&self) -> Result<Matcher, SearchError> {
        if self.text.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        if self.use_regex {
            let regex = Regex::new(&self.text).map_err(|source| SearchError::InvalidPattern {
                pattern: self.text.clone(),
                source,
            })?;
            Ok(Matcher::Pattern(regex))
        } else {
            Ok(Matcher::Literal(self.text.to_lowercase()))
        }
    }
}

/// Compiled predicate applied to every traversed entry.
#[derive(Clone, Debug)]
pub enum Matcher {
    /// Lowercased needle searched for in the lowercased base name.
    Literal(String),
    /// Pattern matched against the forward-slash relative path.
    Pattern(Regex),
}

impl Matcher {
    /// Tests one entry given its base name and traversal-relative path.
    #[must_use]
    pub fn is_match(&self, name: &str, relative_path: &str) -> bool {
        match self {
            Self::Literal(needle) => name.to_lowercase().contains(needle.as_str()),
            Self::Pattern(regex) => regex.is_match(relative_path),
        }
    }
}
