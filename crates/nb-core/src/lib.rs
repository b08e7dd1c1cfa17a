//! NavBlock Core Library
//!
//! This crate decides whether a top-level navigation should be replaced with
//! the "blocked" notice page. The policy is user supplied: blocked site
//! hostnames, blocked search terms, and an optional daily time window.
//!
//! # Architecture
//!
//! Decisions are pure functions of a configuration snapshot, the navigation
//! target and the time of day. A [`Configuration`] is compiled into a
//! [`Policy`] once (site entries normalized, terms compiled to whole-word
//! patterns) and shared by every decision until the user changes settings.
//! Malformed input never surfaces as an error on the decision path: it
//! resolves to [`Verdict::Allow`] or disables only the rule it belongs to.
//!
//! # Modules
//!
//! - `host`: Site entry normalization and subdomain matching
//! - `search`: Search engine registry and query extraction
//! - `term`: Whole-word search term matching
//! - `window`: `HH:MM` parsing and daily window containment
//! - `decision`: Policy compilation and the decision engine
//! - `config`: User configuration snapshot
//! - `notice`: Notice page addressing
//! - `store`: Shared policy snapshot for asynchronous collaborators
//! - `types`: Shared type definitions

pub mod config;
pub mod decision;
pub mod host;
pub mod notice;
pub mod search;
pub mod store;
pub mod term;
pub mod types;
pub mod window;

// Re-export commonly used types
pub use config::{ConfigError, Configuration, Diagnostic};
pub use decision::{decide, Engine, Policy};
pub use host::{is_host_blocked, normalize_host};
pub use notice::{notice_url, Notice, NoticeKind};
pub use search::{extract_query, is_search_engine};
pub use store::PolicyStore;
pub use term::{is_search_blocked, matches_term};
pub use types::{NavigationTarget, Verdict};
pub use window::{is_within_window, parse_time_of_day, BlockWindow, TimeOfDay};
