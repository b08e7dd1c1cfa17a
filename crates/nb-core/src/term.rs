//! Whole-word search term matching
//!
//! A blocked term matches a query only as a complete word or phrase:
//! `news` blocks "breaking news today" but not "newsletter signup". Words of
//! a multi-word term may be separated by any run of whitespace in the query.

use regex::{Regex, RegexBuilder};
use url::Url;

use crate::search::{extract_query, is_search_engine};

/// A compiled whole-word pattern for one blocked term.
#[derive(Debug, Clone)]
pub struct TermPattern {
    term: String,
    regex: Regex,
}

impl TermPattern {
    /// Compile a term. Returns `None` for blank terms and for terms whose
    /// pattern cannot be built; neither can ever match.
    pub fn new(term: &str) -> Option<Self> {
        let cleaned = term.trim().to_lowercase();
        if cleaned.is_empty() {
            return None;
        }

        let words: Vec<String> = cleaned.split_whitespace().map(regex::escape).collect();
        let pattern = format!(r"\b{}\b", words.join(r"\s+"));

        match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(regex) => Some(Self { term: cleaned, regex }),
            Err(e) => {
                log::warn!("blocked term {:?} ignored: {}", term, e);
                None
            }
        }
    }

    /// The trimmed, lowercased term this pattern was built from.
    pub fn term(&self) -> &str {
        &self.term
    }

    #[inline]
    pub fn is_match(&self, query: &str) -> bool {
        self.regex.is_match(query)
    }
}

/// Check if `term` occurs in `query` as a whole word or phrase.
pub fn matches_term(query: &str, term: &str) -> bool {
    TermPattern::new(term).is_some_and(|pattern| pattern.is_match(query))
}

/// Check if a URL is a search on a known engine for any blocked term.
pub fn is_search_blocked<S: AsRef<str>>(url: &Url, blocked_searches: &[S]) -> bool {
    if blocked_searches.is_empty() {
        return false;
    }
    let Some(host) = url.host_str() else {
        return false;
    };
    if !is_search_engine(host) {
        return false;
    }
    let query = extract_query(url).to_lowercase();
    if query.is_empty() {
        return false;
    }
    blocked_searches
        .iter()
        .any(|term| matches_term(&query, term.as_ref()))
}

// =============================================================================
// Term Set
// =============================================================================

/// Compiled blocked-term list.
#[derive(Debug, Clone, Default)]
pub struct TermSet {
    patterns: Vec<TermPattern>,
}

impl TermSet {
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Self {
        let patterns = terms
            .iter()
            .filter_map(|term| TermPattern::new(term.as_ref()))
            .collect();
        Self { patterns }
    }

    /// Check if any term matches `query`. An empty query never matches.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return false;
        }
        self.patterns.iter().any(|pattern| pattern.is_match(query))
    }

    /// Same checks as [`is_search_blocked`], against the compiled terms.
    pub fn blocks_search(&self, url: &Url) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        match url.host_str() {
            Some(host) if is_search_engine(host) => {}
            _ => return false,
        }
        self.matches(&extract_query(url).to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TermPattern> {
        self.patterns.iter()
    }
}
