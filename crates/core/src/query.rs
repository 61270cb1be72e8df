/// Query parameters that select between listing, search and download.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestQuery {
    /// Search text (`q`). Empty means no search.
    pub q: String,
    /// Regex mode (`regexp=on`).
    pub regexp: bool,
    /// Archive format name (`dl`). Empty means no download.
    pub dl: String,
}

impl RequestQuery {
    /// Decodes an `application/x-www-form-urlencoded` query string.
    ///
    /// The first occurrence of each key wins; unknown keys are ignored. A
    /// leading `?` is tolerated.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirindex_core::RequestQuery;
    ///
    /// let query = RequestQuery::parse("?q=a%2Bb&regexp=on&q=ignored");
    /// assert_eq!(query.q, "a+b");
    /// assert!(query.regexp);
    /// assert!(query.dl.is_empty());
    /// ```
    #[must_use]
    pub fn parse(query_string: &str) -> Self {
        let raw = query_string.strip_prefix('?').unwrap_or(query_string);
        let mut q = None;
        let mut regexp = None;
        let mut dl = None;

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.as_ref() {
                "q" => &mut q,
                "regexp" => &mut regexp,
                "dl" => &mut dl,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Self {
            q: q.unwrap_or_default(),
            regexp: regexp.as_deref() == Some("on"),
            dl: dl.unwrap_or_default(),
        }
    }

    /// Search request.
    #[must_use]
    pub fn search(q: impl Into<String>, regexp: bool) -> Self {
        Self {
            q: q.into(),
            regexp,
            dl: String::new(),
        }
    }

    /// Archive download request.
    #[must_use]
    pub fn download(dl: impl Into<String>) -> Self {
        Self {
            dl: dl.into(),
            ..Self::default()
        }
    }
}
