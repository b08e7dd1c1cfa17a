//! User configuration snapshot
//!
//! Mirrors the keys the extension keeps in `chrome.storage.sync`. Missing keys
//! take their defaults so partially written settings still load.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::host::normalize_host;
use crate::window::{BlockWindow, TimeOfDay, TimeParseError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Blocking policy as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct Configuration {
    /// Site entries, free-form (`example.com`, `https://example.com/x`)
    pub blocked_sites: Vec<String>,
    /// Search terms or phrases
    pub blocked_searches: Vec<String>,
    /// Window start as `HH:MM`, empty when unset
    pub block_start: String,
    /// Window end as `HH:MM`, empty when unset
    pub block_end: String,
}

impl Configuration {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parsed time window; invalid bounds come back unset.
    pub fn window(&self) -> BlockWindow {
        BlockWindow::parse(&self.block_start, &self.block_end)
    }

    /// True if no rule is configured at all.
    pub fn is_empty(&self) -> bool {
        self.blocked_sites.is_empty() && self.blocked_searches.is_empty()
    }

    /// Entries and bounds that are silently ignored during matching.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();

        for entry in &self.blocked_sites {
            if normalize_host(entry).is_empty() {
                out.push(Diagnostic::UnusableSite(entry.clone()));
            }
        }
        for term in &self.blocked_searches {
            if term.trim().is_empty() {
                out.push(Diagnostic::BlankTerm(term.clone()));
            }
        }

        let start = TimeOfDay::parse(&self.block_start);
        let end = TimeOfDay::parse(&self.block_end);
        match (start, end) {
            (Err(TimeParseError::Empty), Err(TimeParseError::Empty)) => {}
            (Err(error), _) => out.push(Diagnostic::InvalidTime {
                field: "blockStart",
                value: self.block_start.clone(),
                error,
            }),
            (_, Err(error)) => out.push(Diagnostic::InvalidTime {
                field: "blockEnd",
                value: self.block_end.clone(),
                error,
            }),
            (Ok(_), Ok(_)) => {}
        }

        out
    }
}

// =============================================================================
// Diagnostics
// =============================================================================

/// A configuration problem that makes part of the policy inert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Site entry with no usable hostname; never matches
    UnusableSite(String),
    /// Whitespace-only search term; never matches
    BlankTerm(String),
    /// Window bound that failed to parse; the window is disabled
    InvalidTime {
        field: &'static str,
        value: String,
        error: TimeParseError,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnusableSite(entry) => write!(f, "site entry {entry:?} has no hostname and never matches"),
            Self::BlankTerm(term) => write!(f, "search term {term:?} is blank and never matches"),
            Self::InvalidTime { field, value, error } => {
                write!(f, "{field} {value:?} is invalid ({error}); blocking applies all day")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let config = Configuration::from_json(
            r#"{"blockedSites":["example.com"],"blockedSearches":["poker"],"blockStart":"08:00","blockEnd":"17:00"}"#,
        )
        .unwrap();
        assert_eq!(config.blocked_sites, vec!["example.com"]);
        assert_eq!(config.blocked_searches, vec!["poker"]);
        assert_eq!(config.block_start, "08:00");
        assert!(config.window().is_restricted());
    }

    #[test]
    fn test_missing_keys_default() {
        let config = Configuration::from_json(r#"{"blockedSites":["a.com"]}"#).unwrap();
        assert!(config.blocked_searches.is_empty());
        assert_eq!(config.block_start, "");
        assert!(!config.window().is_restricted());

        let empty = Configuration::from_json("{}").unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty, Configuration::default());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(Configuration::from_json("not json"), Err(ConfigError::Json(_))));
        assert!(Configuration::from_json(r#"{"blockedSites":"a.com"}"#).is_err());
    }

    #[test]
    fn test_diagnostics() {
        let config = Configuration {
            blocked_sites: vec!["example.com".into(), "bad host".into()],
            blocked_searches: vec!["poker".into(), "  ".into()],
            block_start: "25:00".into(),
            block_end: "06:00".into(),
        };
        let diagnostics = config.diagnostics();
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics[0], Diagnostic::UnusableSite("bad host".into()));
        assert_eq!(diagnostics[1], Diagnostic::BlankTerm("  ".into()));
        assert!(matches!(
            &diagnostics[2],
            Diagnostic::InvalidTime { field: "blockStart", error: TimeParseError::HourOutOfRange(25), .. }
        ));
    }

    #[test]
    fn test_diagnostics_half_window() {
        let config = Configuration {
            block_start: "08:00".into(),
            ..Default::default()
        };
        let diagnostics = config.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].to_string().starts_with("blockEnd"));
        assert!(Configuration::default().diagnostics().is_empty());
    }

    #[test]
    fn test_round_trip_keys() {
        let config = Configuration {
            blocked_sites: vec!["a.com".to_string()],
            ..Default::default()
        };
        let json = config.to_json_pretty().unwrap();
        assert!(json.contains("\"blockedSites\""));
        assert!(json.contains("\"blockEnd\""));
        assert_eq!(Configuration::from_json(&json).unwrap(), config);
    }
}
