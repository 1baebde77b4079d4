//! Excluded-provider detection on MX answers.

use crate::config::{MatchMode, DEFAULT_EXCLUDED_MX_PATTERN};
use crate::dns::MxRecord;

/// Decides whether an MX answer points at the excluded provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxMatcher {
    pattern: String,
    mode: MatchMode,
}

impl Default for MxMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_MX_PATTERN, MatchMode::Substring)
    }
}

impl MxMatcher {
    /// Both modes compare lower-cased text. In `HostSuffix` mode surrounding
    /// dots are dropped from the pattern, so `".outlook.com."` means
    /// `outlook.com`.
    pub fn new(pattern: &str, mode: MatchMode) -> Self {
        let pattern = pattern.trim().to_lowercase();
        let pattern = match mode {
            MatchMode::Substring => pattern,
            MatchMode::HostSuffix => pattern.trim_matches('.').to_string(),
        };
        Self { pattern, mode }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// True when a single raw MX data string matches.
    pub fn matches_record(&self, raw: &str) -> bool {
        if self.pattern.is_empty() {
            return false;
        }
        match self.mode {
            MatchMode::Substring => raw.to_lowercase().contains(&self.pattern),
            MatchMode::HostSuffix => {
                let host = match MxRecord::parse(raw) {
                    Some(record) => record.exchange,
                    None => raw.trim().trim_end_matches('.').to_lowercase(),
                };
                host == self.pattern
                    || host
                        .strip_suffix(&self.pattern)
                        .is_some_and(|prefix| prefix.ends_with('.'))
            }
        }
    }

    /// True when at least one record matches.
    pub fn matches_any<S: AsRef<str>>(&self, records: &[S]) -> bool {
        records.iter().any(|r| self.matches_record(r.as_ref()))
    }
}
