use std::collections::HashSet;

pub struct DedupeStats {
    pub before: usize,
    pub after: usize,
    pub deduped: usize,
    pub blank: usize,
}

/// Drop blank and repeated entries, keeping the first occurrence of each.
pub fn dedupe_entries(entries: &mut Vec<String>) -> DedupeStats {
    let before = entries.len();

    let mut blank = 0usize;
    entries.retain(|entry| {
        if entry.trim().is_empty() {
            blank += 1;
            false
        } else {
            true
        }
    });

    let mut seen: HashSet<String> = HashSet::with_capacity(entries.len());
    let mut deduped = 0usize;
    entries.retain(|entry| {
        if seen.insert(entry.clone()) {
            true
        } else {
            deduped += 1;
            false
        }
    });

    DedupeStats {
        before,
        after: entries.len(),
        deduped,
        blank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_keeps_first() {
        let mut entries: Vec<String> = ["b", "a", "b", " ", "c", "a"].iter().map(|s| s.to_string()).collect();
        let stats = dedupe_entries(&mut entries);
        assert_eq!(entries, vec!["b", "a", "c"]);
        assert_eq!(stats.before, 6);
        assert_eq!(stats.after, 3);
        assert_eq!(stats.deduped, 2);
        assert_eq!(stats.blank, 1);
    }
}
