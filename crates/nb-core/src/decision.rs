//! Navigation decision engine
//!
//! Every navigation goes through [`Engine::decide`]. Evaluation order is
//! fixed: jurisdiction, URL parse, time window, site list, search terms.
//! Anything malformed on the way resolves to [`Verdict::Allow`].

use url::Url;

use crate::config::Configuration;
use crate::host::HostSet;
use crate::term::TermSet;
use crate::types::{NavigationTarget, Verdict};
use crate::window::{BlockWindow, TimeOfDay};

// =============================================================================
// Policy
// =============================================================================

/// A configuration compiled for matching.
///
/// Site entries are normalized and search terms compiled once, so a policy
/// can be shared across many decisions.
#[derive(Debug, Clone, Default)]
pub struct Policy {
    hosts: HostSet,
    terms: TermSet,
    window: BlockWindow,
}

impl Policy {
    pub fn compile(config: &Configuration) -> Self {
        Self {
            hosts: HostSet::new(&config.blocked_sites),
            terms: TermSet::new(&config.blocked_searches),
            window: config.window(),
        }
    }

    pub fn hosts(&self) -> &HostSet {
        &self.hosts
    }

    pub fn terms(&self) -> &TermSet {
        &self.terms
    }

    pub fn window(&self) -> BlockWindow {
        self.window
    }

    /// True if the policy can never block anything.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty() && self.terms.is_empty()
    }
}

impl From<&Configuration> for Policy {
    fn from(config: &Configuration) -> Self {
        Self::compile(config)
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Decision engine bound to the address of its own notice page.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    notice_page: String,
}

impl Engine {
    /// Create an engine. Navigations to `notice_page` (or below it) are
    /// never evaluated, which keeps a blocked tab from redirecting forever.
    pub fn new(notice_page: impl Into<String>) -> Self {
        Self {
            notice_page: notice_page.into(),
        }
    }

    pub fn notice_page(&self) -> &str {
        &self.notice_page
    }

    /// Check if a raw URL is one the engine evaluates at all.
    pub fn in_jurisdiction(&self, raw_url: &str) -> bool {
        if raw_url.is_empty() {
            return false;
        }
        if !raw_url.starts_with("http://") && !raw_url.starts_with("https://") {
            return false;
        }
        self.notice_page.is_empty() || !raw_url.starts_with(&self.notice_page)
    }

    /// Decide a navigation at time of day `now`.
    pub fn decide(&self, policy: &Policy, target: &NavigationTarget<'_>, now: TimeOfDay) -> Verdict {
        if !self.in_jurisdiction(target.url) {
            return Verdict::Allow;
        }

        let url = match Url::parse(target.url) {
            Ok(url) => url,
            Err(e) => {
                log::debug!("allow {}: unparsable URL ({})", target.url, e);
                return Verdict::Allow;
            }
        };

        if !policy.window.contains(now) {
            log::debug!("allow {}: {} outside block window {}", target.url, now, policy.window);
            return Verdict::Allow;
        }

        let verdict = if url.host_str().is_some_and(|host| policy.hosts.contains(host)) {
            Verdict::BlockSite
        } else if policy.terms.blocks_search(&url) {
            Verdict::BlockSearch
        } else {
            Verdict::Allow
        };

        if verdict.is_blocked() {
            log::debug!("{:?} {}", verdict, target.url);
        }
        verdict
    }

    /// Decide a navigation at the time it was observed.
    pub fn decide_observed(&self, policy: &Policy, target: &NavigationTarget<'_>) -> Verdict {
        self.decide(policy, target, TimeOfDay::from_time(&target.observed_at))
    }
}

/// Decide a navigation against a raw configuration.
///
/// Compiles the configuration for this one call; callers deciding many
/// navigations should keep a [`Policy`] instead.
pub fn decide(config: &Configuration, target: &NavigationTarget<'_>, now: TimeOfDay) -> Verdict {
    Engine::default().decide(&Policy::compile(config), target, now)
}
