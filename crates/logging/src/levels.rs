//! crates/logging/src/levels.rs
//! Flag enums and level structures for info and debug verbosity.

/// Info flags for user-facing diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfoFlag {
    /// Archive downloads (start, completion, totals).
    Archive,
    /// Directory listings and README selection.
    Listing,
    /// Search requests and their outcome.
    Search,
    /// Plain file serving.
    Serve,
}

impl InfoFlag {
    /// Every info flag, in the order used by `--info=help` style output.
    pub const ALL: [Self; 4] = [Self::Archive, Self::Listing, Self::Search, Self::Serve];

    /// Returns the lowercase token accepted by `--info`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Listing => "listing",
            Self::Search => "search",
            Self::Serve => "serve",
        }
    }

    /// Returns the tracing target used when the `tracing` feature is enabled.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Archive => "dirindex::archive",
            Self::Listing => "dirindex::listing",
            Self::Search => "dirindex::search",
            Self::Serve => "dirindex::serve",
        }
    }

    /// Parses a flag name case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.name().eq_ignore_ascii_case(name))
    }
}

/// Debug flags for internal diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugFlag {
    /// Archive encoder internals (headers, payload sizes).
    Archive,
    /// Directory index building.
    Index,
    /// Request dispatch decisions.
    Request,
    /// Search pipeline hand-off and cancellation.
    Search,
    /// Walker traversal, cycle detection and link resolution.
    Walk,
}

impl DebugFlag {
    /// Every debug flag.
    pub const ALL: [Self; 5] = [
        Self::Archive,
        Self::Index,
        Self::Request,
        Self::Search,
        Self::Walk,
    ];

    /// Returns the lowercase token accepted by `--debug`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Index => "index",
            Self::Request => "request",
            Self::Search => "search",
            Self::Walk => "walk",
        }
    }

    /// Returns the tracing target used when the `tracing` feature is enabled.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Archive => "dirindex::archive",
            Self::Index => "dirindex::index",
            Self::Request => "dirindex::request",
            Self::Search => "dirindex::search",
            Self::Walk => "dirindex::walk",
        }
    }

    /// Parses a flag name case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.name().eq_ignore_ascii_case(name))
    }
}

/// Info verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfoLevels {
    /// Archive download level.
    pub archive: u8,
    /// Directory listing level.
    pub listing: u8,
    /// Search request level.
    pub search: u8,
    /// File serving level.
    pub serve: u8,
}

impl InfoLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: InfoFlag) -> u8 {
        match flag {
            InfoFlag::Archive => self.archive,
            InfoFlag::Listing => self.listing,
            InfoFlag::Search => self.search,
            InfoFlag::Serve => self.serve,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: InfoFlag, level: u8) {
        match flag {
            InfoFlag::Archive => self.archive = level,
            InfoFlag::Listing => self.listing = level,
            InfoFlag::Search => self.search = level,
            InfoFlag::Serve => self.serve = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        for flag in InfoFlag::ALL {
            self.set(flag, level);
        }
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugLevels {
    /// Archive encoder level.
    pub archive: u8,
    /// Index builder level.
    pub index: u8,
    /// Request dispatch level.
    pub request: u8,
    /// Search pipeline level.
    pub search: u8,
    /// Walker level.
    pub walk: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Archive => self.archive,
            DebugFlag::Index => self.index,
            DebugFlag::Request => self.request,
            DebugFlag::Search => self.search,
            DebugFlag::Walk => self.walk,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Archive => self.archive = level,
            DebugFlag::Index => self.index = level,
            DebugFlag::Request => self.request = level,
            DebugFlag::Search => self.search = level,
            DebugFlag::Walk => self.walk = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        for flag in DebugFlag::ALL {
            self.set(flag, level);
        }
    }
}
