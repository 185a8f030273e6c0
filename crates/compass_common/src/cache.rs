//! Session judgment cache.
//!
//! Keyed by mode-qualified, case-normalized action text. Stores only the
//! y-coordinate and its bounds: a repeated action under the same mode
//! always replays the previously observed action weight, while the intent
//! axis is re-queried on every submission. Never persisted.

use crate::types::Mode;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Far above anything a single session plots; eviction exists only as a
/// memory bound.
const CACHE_CAPACITY: usize = 1024;

/// Cached action weight: the y-coordinate and its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedWeight {
    pub y: f64,
    pub y_range: Option<(f64, f64)>,
}

#[derive(Debug)]
pub struct JudgmentCache {
    entries: LruCache<String, CachedWeight>,
}

impl JudgmentCache {
    pub fn new() -> Self {
        Self {
            entries: LruCache::new(NonZeroUsize::new(CACHE_CAPACITY).unwrap()),
        }
    }

    /// Lookup key: mode tag plus trimmed, lower-cased action text.
    pub fn key(mode: Mode, action: &str) -> String {
        format!("{}:{}", mode.as_str(), action.trim().to_lowercase())
    }

    pub fn get(&mut self, key: &str) -> Option<CachedWeight> {
        self.entries.get(key).copied()
    }

    pub fn put(&mut self, key: String, weight: CachedWeight) {
        self.entries.put(key, weight);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for JudgmentCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_normalizes_case_and_whitespace() {
        let a = JudgmentCache::key(Mode::Duty, "  Stole Bread ");
        let b = JudgmentCache::key(Mode::Duty, "stole bread");
        assert_eq!(a, b);
        assert_eq!(a, "duty:stole bread");
    }

    #[test]
    fn test_key_is_mode_qualified() {
        let duty = JudgmentCache::key(Mode::Duty, "lied");
        let outcome = JudgmentCache::key(Mode::Outcome, "lied");
        assert_ne!(duty, outcome);
    }

    #[test]
    fn test_put_get_clear() {
        let mut cache = JudgmentCache::new();
        let key = JudgmentCache::key(Mode::Outcome, "helped a rival");
        assert!(cache.get(&key).is_none());

        cache.put(
            key.clone(),
            CachedWeight {
                y: 0.6,
                y_range: Some((0.4, 0.8)),
            },
        );
        let hit = cache.get(&key).unwrap();
        assert_eq!(hit.y, 0.6);
        assert_eq!(hit.y_range, Some((0.4, 0.8)));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn test_put_overwrites_existing_key() {
        let mut cache = JudgmentCache::new();
        let key = JudgmentCache::key(Mode::Duty, "lied");
        cache.put(key.clone(), CachedWeight { y: -0.5, y_range: None });
        cache.put(key.clone(), CachedWeight { y: 0.1, y_range: None });
        assert_eq!(cache.get(&key).unwrap().y, 0.1);
        assert_eq!(cache.len(), 1);
    }
}
