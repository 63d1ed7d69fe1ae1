//! Time-bounded memo of resolved pronouns
//!
//! Entries expire lazily: an expired entry is dropped the next time it is
//! read or when any insert runs, never by a background sweep.

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// Process-wide resolution cache keyed by runner identifier
#[derive(Debug)]
pub struct ResolutionCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResolutionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Unexpired value for `key`
    pub async fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().await;

        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store `value`, replacing any previous entry and restarting its TTL
    ///
    /// Expired entries are dropped while the lock is held.
    pub async fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        let now = Instant::now();
        let entry = CacheEntry {
            value: value.into(),
            expires_at: now + self.ttl,
        };

        let mut entries = self.entries.lock().await;
        entries.retain(|_, existing| existing.expires_at > now);
        entries.insert(key.into(), entry);
    }

    /// Number of stored entries, expired ones included until pruned
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
