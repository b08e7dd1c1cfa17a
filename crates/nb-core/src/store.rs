//! Shared policy snapshot
//!
//! Collaborators that receive configuration updates asynchronously keep the
//! current [`Policy`] here. Readers take an `Arc` to a complete snapshot; an
//! update compiles the new policy first and swaps it in with a single write.

use std::sync::{Arc, PoisonError, RwLock};

use crate::config::Configuration;
use crate::decision::Policy;

#[derive(Debug, Default)]
pub struct PolicyStore {
    current: RwLock<Arc<Policy>>,
}

impl PolicyStore {
    pub fn new(config: &Configuration) -> Self {
        Self {
            current: RwLock::new(Arc::new(Policy::compile(config))),
        }
    }

    /// Current snapshot.
    pub fn load(&self) -> Arc<Policy> {
        // Writers only ever store a complete Arc, so a poisoned lock still
        // holds a usable snapshot.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Replace the snapshot with `config`, returning the previous one.
    pub fn replace(&self, config: &Configuration) -> Arc<Policy> {
        let next = Arc::new(Policy::compile(config));
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn sites(entries: &[&str]) -> Configuration {
        Configuration {
            blocked_sites: entries.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_replace_swaps_snapshot() {
        let store = PolicyStore::new(&sites(&["a.com"]));
        let before = store.load();
        let previous = store.replace(&sites(&["b.com", "c.com"]));

        assert!(Arc::ptr_eq(&before, &previous));
        assert!(before.hosts().contains("a.com"));
        assert_eq!(store.load().hosts().len(), 2);
        assert!(!store.load().hosts().contains("a.com"));
    }

    #[test]
    fn test_default_is_empty() {
        assert!(PolicyStore::default().load().is_empty());
    }

    #[test]
    fn test_concurrent_readers_see_whole_snapshots() {
        let store = Arc::new(PolicyStore::new(&sites(&["a.com", "b.com"])));
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let policy = store.load();
                        // Either the old pair or the new pair, never a mix.
                        let old = policy.hosts().contains("a.com") && policy.hosts().contains("b.com");
                        let new = policy.hosts().contains("x.com") && policy.hosts().contains("y.com");
                        assert!(old ^ new);
                    }
                })
            })
            .collect();

        for _ in 0..50 {
            store.replace(&sites(&["x.com", "y.com"]));
            store.replace(&sites(&["a.com", "b.com"]));
        }
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
