//! Time-bounded in-memory cache of parsed feeds, one slot per topic.
//!
//! Entries older than the configured TTL are treated as absent on read even
//! though they stay in the map until the next successful fetch replaces them.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::domain::Entry;

/// Default time-to-live for a cached topic (5 minutes).
pub const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CacheEntry {
    entries: Arc<[Entry]>,
    fetched_at: Instant,
}

#[derive(Debug)]
pub struct CacheStore {
    ttl: Duration,
    slots: HashMap<String, CacheEntry>,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DURATION)
    }
}

impl CacheStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: HashMap::new(),
        }
    }

    /// Cached entries for `topic`, or `None` when absent or expired.
    pub fn get(&self, topic: &str) -> Option<Arc<[Entry]>> {
        let slot = self.slots.get(topic)?;
        if slot.fetched_at.elapsed() < self.ttl {
            Some(slot.entries.clone())
        } else {
            None
        }
    }

    /// Store `entries` for `topic` stamped with the current time, replacing
    /// whatever was there.
    pub fn put(&mut self, topic: &str, entries: Arc<[Entry]>) {
        self.slots.insert(
            topic.to_string(),
            CacheEntry {
                entries,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Number of physically stored slots, expired ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
