//! NavBlock List Tools
//!
//! This crate edits the blocked-site and blocked-search lists of a
//! configuration and imports entries from plain-text, hosts-file and
//! ABP-style lists.

pub mod editor;
pub mod optimizer;
pub mod parser;

pub use editor::{normalize_entry, ListEditor, ListError, ListKind};
pub use optimizer::{dedupe_entries, DedupeStats};
pub use parser::{parse_site_list, parse_term_list, ParsedList};
