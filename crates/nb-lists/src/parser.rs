use std::net::IpAddr;

use nb_core::normalize_host;

use crate::editor::normalize_entry;

/// Entries read from a list file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedList {
    pub entries: Vec<String>,
    /// Non-comment lines that could not be turned into an entry
    pub skipped: usize,
}

/// Names hosts files map to loopback that are never worth blocking.
const LOCAL_HOSTNAMES: &[&str] = &[
    "localhost",
    "localhost.localdomain",
    "local",
    "broadcasthost",
    "ip6-localhost",
    "ip6-loopback",
    "0.0.0.0",
];

/// Parse a site list.
///
/// Accepts one site per line as plain entries (`example.com`,
/// `https://example.com/`), hosts-file lines (`0.0.0.0 example.com`) and
/// ABP host anchors (`||example.com^`). Lines starting with `!` or `#` are
/// comments, as are `[...]` section headers that are not a bracketed IPv6
/// address. Exception rules (`@@...`) are skipped.
pub fn parse_site_list(text: &str) -> ParsedList {
    let mut list = ParsedList::default();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || is_comment_line(line) {
            continue;
        }

        if line.starts_with("@@") {
            list.skipped += 1;
            continue;
        }

        let mut tokens = line.split_whitespace();
        let entry = match (tokens.next(), tokens.next()) {
            _ if line.starts_with("||") => anchored_host(&line[2..]),
            (Some(address), Some(name)) if address.parse::<IpAddr>().is_ok() => mapped_host(name),
            (Some(_), None) => Some(normalize_entry(line)),
            _ => None,
        };

        match entry {
            Some(entry) if !entry.is_empty() => list.entries.push(entry),
            _ => {
                log::debug!("skipping site list line {:?}", line);
                list.skipped += 1;
            }
        }
    }

    list
}

/// Parse a search term list: one term or phrase per line.
pub fn parse_term_list(text: &str) -> ParsedList {
    let mut list = ParsedList::default();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        list.entries.push(normalize_entry(line));
    }

    list
}

fn is_comment_line(line: &str) -> bool {
    match line.as_bytes().first() {
        Some(b'!' | b'#') => true,
        Some(b'[') => normalize_host(line).is_empty(),
        _ => false,
    }
}

/// Host of an ABP `||host^` rule, given the text after `||`. Rules with a
/// path, port or wildcard block less than a whole site and yield `None`.
fn anchored_host(rule: &str) -> Option<String> {
    let rule = rule.strip_prefix('.').unwrap_or(rule);
    let host = rule
        .split(|c: char| matches!(c, '^' | '|' | '$'))
        .next()
        .unwrap_or_default();
    if host.contains(|c: char| matches!(c, '/' | '?' | '#' | ':' | '*')) {
        return None;
    }

    let host = normalize_host(host);
    (!host.is_empty()).then_some(host)
}

/// Host named on a hosts-file line, unless it is a loopback alias.
fn mapped_host(name: &str) -> Option<String> {
    let host = normalize_host(name);
    if host.is_empty() || LOCAL_HOSTNAMES.contains(&host.as_str()) {
        return None;
    }
    Some(host)
}
