//! crates/logging/src/config.rs
//! Verbosity configuration combining info and debug levels.

use super::levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};

/// Combined verbosity configuration for info and debug flags.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Info flag levels.
    pub info: InfoLevels,
    /// Debug flag levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Create a new configuration from a `-v` count.
    ///
    /// Levels above 4 behave like 4.
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();

        if level >= 1 {
            config.info.set_all(1);
        }
        if level >= 2 {
            config.info.search = 2;
            config.info.archive = 2;
            config.debug.request = 1;
            config.debug.search = 1;
        }
        if level >= 3 {
            config.debug.set_all(1);
            config.debug.walk = 2;
            config.debug.search = 2;
        }
        if level >= 4 {
            config.debug.set_all(3);
        }

        config
    }

    /// Apply a single `--info` token such as `search`, `archive2`, `ALL` or `NONE`.
    pub fn apply_info_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = split_token(token)?;
        match name.to_ascii_lowercase().as_str() {
            "all" => self.info.set_all(level),
            "none" => self.info.set_all(0),
            other => {
                let flag = InfoFlag::from_name(other)
                    .ok_or_else(|| format!("unknown info flag '{other}'"))?;
                self.info.set(flag, level);
            }
        }
        Ok(())
    }

    /// Apply a single `--debug` token such as `walk`, `search2`, `ALL` or `NONE`.
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = split_token(token)?;
        match name.to_ascii_lowercase().as_str() {
            "all" => self.debug.set_all(level),
            "none" => self.debug.set_all(0),
            other => {
                let flag = DebugFlag::from_name(other)
                    .ok_or_else(|| format!("unknown debug flag '{other}'"))?;
                self.debug.set(flag, level);
            }
        }
        Ok(())
    }

    /// Highest level configured across every flag.
    pub fn max_level(&self) -> u8 {
        let info = InfoFlag::ALL.into_iter().map(|f| self.info.get(f));
        let debug = DebugFlag::ALL.into_iter().map(|f| self.debug.get(f));
        info.chain(debug).max().unwrap_or(0)
    }

    /// Reports whether any debug flag is enabled.
    pub fn any_debug(&self) -> bool {
        DebugFlag::ALL.into_iter().any(|f| self.debug.get(f) > 0)
    }
}

/// Splits `name[N]` into its name and level; a missing level means 1.
fn split_token(token: &str) -> Result<(&str, u8), String> {
    let token = token.trim();
    if token.is_empty() {
        return Err(String::from("empty flag token"));
    }

    let digits_at = token
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(token.len());
    let (name, digits) = token.split_at(digits_at);
    if name.is_empty() {
        return Err(format!("flag token '{token}' has no name"));
    }

    let level = if digits.is_empty() {
        1
    } else {
        digits
            .parse::<u8>()
            .map_err(|_| format!("invalid level in flag token '{token}'"))?
    };
    Ok((name, level))
}
