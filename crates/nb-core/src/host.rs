//! Hostname normalization and blocked-site matching
//!
//! A blocked-site entry is free-form user text (`example.com`,
//! `https://Example.com/path`, `shop.example.com:8080`). It is normalized to a
//! bare lowercase hostname and matched against candidate hosts either exactly
//! or as a parent domain.

use url::Url;

const DEFAULT_SCHEME: &str = "https://";

/// Normalize a blocked-site entry to a lowercase hostname.
///
/// Entries without a scheme separator get `https://` prepended before
/// parsing. Returns an empty string when the entry cannot be parsed or has no
/// host; an empty result never matches anything.
pub fn normalize_host(entry: &str) -> String {
    if entry.is_empty() {
        return String::new();
    }

    let parsed = if entry.contains("://") {
        Url::parse(entry)
    } else {
        Url::parse(&format!("{DEFAULT_SCHEME}{entry}"))
    };

    match parsed {
        Ok(url) => url.host_str().map(str::to_lowercase).unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// Check if `host` equals `blocked` or is one of its subdomains.
///
/// Both sides must already be lowercase.
#[inline]
pub fn host_matches(host: &str, blocked: &str) -> bool {
    if host.is_empty() || blocked.is_empty() {
        return false;
    }
    if host == blocked {
        return true;
    }
    host.len() > blocked.len()
        && host.ends_with(blocked)
        && host.as_bytes()[host.len() - blocked.len() - 1] == b'.'
}

/// Check a candidate hostname against raw blocked-site entries.
///
/// Each entry is normalized on the fly; entries that fail to normalize are
/// skipped without affecting the rest of the list.
pub fn is_host_blocked<S: AsRef<str>>(candidate: &str, blocked_sites: &[S]) -> bool {
    if candidate.is_empty() {
        return false;
    }
    let host = candidate.to_lowercase();
    blocked_sites
        .iter()
        .any(|entry| host_matches(&host, &normalize_host(entry.as_ref())))
}

// =============================================================================
// Host Set
// =============================================================================

/// Pre-normalized blocked-site list.
#[derive(Debug, Clone, Default)]
pub struct HostSet {
    hosts: Vec<String>,
}

impl HostSet {
    /// Normalize every entry once, dropping those that can never match.
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Self {
        let mut hosts = Vec::with_capacity(entries.len());
        for entry in entries {
            let host = normalize_host(entry.as_ref());
            if host.is_empty() {
                log::debug!("skipping blocked site entry {:?}: no hostname", entry.as_ref());
                continue;
            }
            hosts.push(host);
        }
        Self { hosts }
    }

    /// Check if `candidate` is covered by any entry.
    pub fn contains(&self, candidate: &str) -> bool {
        if candidate.is_empty() {
            return false;
        }
        let host = candidate.to_lowercase();
        self.hosts.iter().any(|blocked| host_matches(&host, blocked))
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("example.com"), "example.com");
        assert_eq!(normalize_host("Example.COM"), "example.com");
        assert_eq!(normalize_host("https://www.Example.com/path?x=1"), "www.example.com");
        assert_eq!(normalize_host("http://shop.example.com:8080"), "shop.example.com");
        assert_eq!(normalize_host("shop.example.com/deals"), "shop.example.com");
    }

    #[test]
    fn test_normalize_host_failures() {
        assert_eq!(normalize_host(""), "");
        assert_eq!(normalize_host("exa mple.com"), "");
        assert_eq!(normalize_host("http://"), "");
        assert_eq!(normalize_host("example.com:notaport"), "");
    }

    #[test]
    fn test_host_matches() {
        assert!(host_matches("example.com", "example.com"));
        assert!(host_matches("shop.example.com", "example.com"));
        assert!(host_matches("a.b.example.com", "example.com"));
        assert!(!host_matches("notexample.com", "example.com"));
        assert!(!host_matches("example.com", "shop.example.com"));
        assert!(!host_matches("", "example.com"));
        assert!(!host_matches("example.com", ""));
    }

    #[test]
    fn test_is_host_blocked() {
        let sites = ["example.com", "https://News.site.org/"];
        assert!(is_host_blocked("example.com", &sites));
        assert!(is_host_blocked("WWW.Example.com", &sites));
        assert!(is_host_blocked("news.site.org", &sites));
        assert!(is_host_blocked("eu.news.site.org", &sites));
        assert!(!is_host_blocked("site.org", &sites));
        assert!(!is_host_blocked("myexample.com", &sites));
        assert!(!is_host_blocked("", &sites));
    }

    #[test]
    fn test_bad_entry_does_not_poison_list() {
        let sites = ["exa mple.com", "", "example.org"];
        assert!(is_host_blocked("www.example.org", &sites));
        assert!(!is_host_blocked("exa mple.com", &sites));
    }

    #[test]
    fn test_matches_normalized_entry_exactly() {
        for entry in ["example.com", "https://a.example.com/x", "HTTP://B.Example.Com"] {
            let normalized = normalize_host(entry);
            for host in ["example.com", "a.example.com", "x.a.example.com", "b.example.com", "other.net"] {
                let expected = host == normalized || host.ends_with(&format!(".{normalized}"));
                assert_eq!(is_host_blocked(host, &[entry]), expected, "{host} vs {entry}");
            }
        }
    }

    #[test]
    fn test_host_set() {
        let set = HostSet::new(&["example.com", "exa mple.com", "Social.net"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("m.social.net"));
        assert!(set.contains("EXAMPLE.com"));
        assert!(!set.contains("social.network"));
        assert!(!set.contains(""));
        assert!(HostSet::new::<&str>(&[]).is_empty());
    }
}
