//! Search engine detection and query extraction

use url::Url;

/// Known search engine domains.
pub const SEARCH_ENGINES: &[&str] = &[
    "google.com",
    "bing.com",
    "duckduckgo.com",
    "search.yahoo.com",
    "brave.com",
    "ecosia.org",
];

/// Query parameter names, in lookup priority order.
pub const QUERY_PARAMS: &[&str] = &["q", "query", "p", "search"];

/// Check if a hostname belongs to a known search engine.
///
/// Matches the engine domain itself and anything ending with it. The suffix
/// test does not require a `.` separator, so `notbing.com` is treated as an
/// engine too.
pub fn is_search_engine(host: &str) -> bool {
    if host.is_empty() {
        return false;
    }
    let host = host.to_lowercase();
    SEARCH_ENGINES
        .iter()
        .any(|engine| host == *engine || host.ends_with(engine))
}

/// Extract the search query from a URL.
///
/// Takes the first occurrence of each key in [`QUERY_PARAMS`] order and
/// returns the first non-empty value. Returns an empty string when none is
/// present.
pub fn extract_query(url: &Url) -> String {
    for key in QUERY_PARAMS {
        let value = url
            .query_pairs()
            .find(|(name, _)| name == *key)
            .map(|(_, value)| value);
        if let Some(value) = value {
            if !value.is_empty() {
                return value.into_owned();
            }
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_is_search_engine() {
        assert!(is_search_engine("google.com"));
        assert!(is_search_engine("www.google.com"));
        assert!(is_search_engine("images.google.com"));
        assert!(is_search_engine("WWW.BING.COM"));
        assert!(is_search_engine("search.yahoo.com"));
        assert!(is_search_engine("search.brave.com"));
        assert!(is_search_engine("www.ecosia.org"));
        assert!(!is_search_engine("yahoo.com"));
        assert!(!is_search_engine("google.de"));
        assert!(!is_search_engine(""));
    }

    #[test]
    fn test_suffix_without_dot_is_engine() {
        // Current behaviour: no label boundary is required.
        assert!(is_search_engine("notbing.com"));
    }

    #[test]
    fn test_extract_query() {
        assert_eq!(extract_query(&url("https://www.google.com/search?q=rust+lang")), "rust lang");
        assert_eq!(extract_query(&url("https://duckduckgo.com/?query=a%20b")), "a b");
        assert_eq!(extract_query(&url("https://search.yahoo.com/search?p=weather")), "weather");
        assert_eq!(extract_query(&url("https://www.ecosia.org/?search=trees")), "trees");
        assert_eq!(extract_query(&url("https://www.google.com/")), "");
    }

    #[test]
    fn test_extract_query_priority() {
        assert_eq!(extract_query(&url("https://x.com/?p=second&q=first")), "first");
        assert_eq!(extract_query(&url("https://x.com/?search=4&query=2&p=3")), "2");
    }

    #[test]
    fn test_extract_query_skips_empty() {
        assert_eq!(extract_query(&url("https://x.com/?q=&p=fallback")), "fallback");
        assert_eq!(extract_query(&url("https://x.com/?q=&query=")), "");
    }

    #[test]
    fn test_extract_query_first_occurrence() {
        assert_eq!(extract_query(&url("https://x.com/?q=one&q=two")), "one");
        // The first `q` is empty, so lookup moves on to the next key.
        assert_eq!(extract_query(&url("https://x.com/?q=&q=two")), "");
    }
}
