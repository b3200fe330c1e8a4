//! Best score persistence
//!
//! The only durable state is one integer stored as a decimal string under
//! a fixed key. Storage failures never reach gameplay: reads fall back to
//! 0 and writes are best-effort.

use crate::consts::BEST_SCORE_KEY;
use crate::platform::storage::{KeyValueStore, StorageError};

pub struct BestScoreStore<S> {
    store: S,
    /// Last value written (or read), to skip redundant writes
    saved: u64,
}

impl<S: KeyValueStore> BestScoreStore<S> {
    pub fn new(store: S) -> Self {
        Self { store, saved: 0 }
    }

    /// Read the stored best; 0 when absent, unreadable or corrupt
    pub fn load(&mut self) -> u64 {
        let best = match self.store.get(BEST_SCORE_KEY) {
            Ok(Some(raw)) => parse_score(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring corrupt best score {:?}", raw);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Could not read best score: {}", e);
                0
            }
        };
        self.saved = best;
        log::info!("Best score: {}", best);
        best
    }

    /// Write `best` if it differs from what was last stored
    pub fn save(&mut self, best: u64) {
        if best == self.saved {
            return;
        }
        match self.write(best) {
            Ok(()) => self.saved = best,
            Err(e) => log::warn!("Could not save best score: {}", e),
        }
    }

    fn write(&mut self, best: u64) -> Result<(), StorageError> {
        self.store.set(BEST_SCORE_KEY, &best.to_string())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Accept what a browser would have written: an integer, maybe as a float
fn parse_score(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    raw.parse::<u64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as u64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStore;

    /// Store whose every call fails
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            })
        }
    }

    #[test]
    fn test_missing_defaults_to_zero() {
        let mut best = BestScoreStore::new(MemoryStore::new());
        assert_eq!(best.load(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let mut best = BestScoreStore::new(MemoryStore::new());
        best.save(120);
        assert_eq!(
            best.store().get(BEST_SCORE_KEY).unwrap().as_deref(),
            Some("120")
        );

        let mut reopened = BestScoreStore::new(best.store().clone());
        assert_eq!(reopened.load(), 120);
    }

    #[test]
    fn test_corrupt_values() {
        let mut store = MemoryStore::new();
        store.set(BEST_SCORE_KEY, "banana").unwrap();
        assert_eq!(BestScoreStore::new(store.clone()).load(), 0);

        store.set(BEST_SCORE_KEY, "250").unwrap();
        assert_eq!(BestScoreStore::new(store.clone()).load(), 250);

        store.set(BEST_SCORE_KEY, "40.0").unwrap();
        assert_eq!(BestScoreStore::new(store.clone()).load(), 40);

        store.set(BEST_SCORE_KEY, "-5").unwrap();
        assert_eq!(BestScoreStore::new(store).load(), 0);
    }

    #[test]
    fn test_failures_are_swallowed() {
        let mut best = BestScoreStore::new(BrokenStore);
        assert_eq!(best.load(), 0);
        best.save(10);
    }
}
