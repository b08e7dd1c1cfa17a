//! Core type definitions for NavBlock
//!
//! These types cross the boundary between the decision engine and its
//! collaborators (the extension background script, the CLI).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Verdict
// =============================================================================

/// Final decision for a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Verdict {
    /// Navigation proceeds untouched
    Allow,
    /// Destination host is on the blocked site list
    BlockSite,
    /// Destination is a search whose query contains a blocked term
    BlockSearch,
}

impl Verdict {
    /// True for either block verdict.
    #[inline]
    pub fn is_blocked(self) -> bool {
        !matches!(self, Self::Allow)
    }

    /// The reason tag carried on the notice page (`site` / `search`).
    pub fn reason(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::BlockSite => Some("site"),
            Self::BlockSearch => Some("search"),
        }
    }
}

// =============================================================================
// Navigation Target
// =============================================================================

/// A navigation attempt being evaluated.
#[derive(Debug, Clone, Copy)]
pub struct NavigationTarget<'a> {
    /// Destination URL exactly as reported by the browser
    pub url: &'a str,
    /// Local wall-clock time the navigation was observed
    pub observed_at: NaiveDateTime,
}

impl<'a> NavigationTarget<'a> {
    pub fn new(url: &'a str, observed_at: NaiveDateTime) -> Self {
        Self { url, observed_at }
    }

    /// Target observed at the current local time.
    pub fn now(url: &'a str) -> Self {
        Self::new(url, chrono::Local::now().naive_local())
    }
}
