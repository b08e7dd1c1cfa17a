//! Blocked-list editing
//!
//! Entries are trimmed and lowercased on the way in, and a list never holds
//! the same entry twice. Insertion order is kept so the user sees entries in
//! the order they were added.

use nb_core::Configuration;

use crate::optimizer::{dedupe_entries, DedupeStats};

/// Error type for list edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("Entry is empty")]
    EmptyEntry,
    #[error("{kind} entry not found: {entry}")]
    NotFound { kind: ListKind, entry: String },
}

/// Which list of a configuration to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Sites,
    Searches,
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Sites => "site",
            Self::Searches => "search",
        })
    }
}

/// Normalize user input for storage.
pub fn normalize_entry(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Edits the lists of a configuration in place.
pub struct ListEditor<'a> {
    config: &'a mut Configuration,
}

impl<'a> ListEditor<'a> {
    pub fn new(config: &'a mut Configuration) -> Self {
        Self { config }
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut Vec<String> {
        match kind {
            ListKind::Sites => &mut self.config.blocked_sites,
            ListKind::Searches => &mut self.config.blocked_searches,
        }
    }

    /// Add an entry. Returns `Ok(false)` when it was already present.
    pub fn add(&mut self, kind: ListKind, value: &str) -> Result<bool, ListError> {
        let entry = normalize_entry(value);
        if entry.is_empty() {
            return Err(ListError::EmptyEntry);
        }
        let list = self.list_mut(kind);
        if list.contains(&entry) {
            return Ok(false);
        }
        log::debug!("adding {} entry {:?}", kind, entry);
        list.push(entry);
        Ok(true)
    }

    /// Add many entries, returning how many were new.
    pub fn extend<I, S>(&mut self, kind: ListKind, values: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .filter(|value| matches!(self.add(kind, value.as_ref()), Ok(true)))
            .count()
    }

    /// Remove an entry by exact match.
    pub fn remove(&mut self, kind: ListKind, entry: &str) -> Result<(), ListError> {
        let list = self.list_mut(kind);
        let before = list.len();
        list.retain(|item| item != entry);
        if list.len() == before {
            return Err(ListError::NotFound {
                kind,
                entry: entry.to_string(),
            });
        }
        Ok(())
    }

    /// Normalize and deduplicate a list that may have been written elsewhere.
    pub fn tidy(&mut self, kind: ListKind) -> DedupeStats {
        let list = self.list_mut(kind);
        for entry in list.iter_mut() {
            *entry = normalize_entry(entry);
        }
        dedupe_entries(list)
    }
}
