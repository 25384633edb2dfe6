//! TTL cache for ranked stream sets.
//!
//! The cache is an injected collaborator owned by the hosting process, not
//! process-global state. Entries expire independently of pipeline runs.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ranking::OutputStream;

/// Generic TTL store for ranked results, keyed by request identity.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Fetch a non-expired entry.
    async fn get(&self, key: &str) -> Option<Vec<OutputStream>>;

    /// Store an entry that expires after `ttl`.
    async fn set(&self, key: &str, value: Vec<OutputStream>, ttl: Duration);
}

/// In-memory TTL cache. Expired entries are dropped lazily on access.
#[derive(Default)]
pub struct MemoryResultCache {
    entries: RwLock<HashMap<String, (Instant, Vec<OutputStream>)>>,
}

impl MemoryResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (non-expired) entries.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries
            .values()
            .filter(|(deadline, _)| *deadline > Instant::now())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ResultCache for MemoryResultCache {
    async fn get(&self, key: &str) -> Option<Vec<OutputStream>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some((deadline, value)) if *deadline > Instant::now() => {
                    return Some(value.clone())
                }
                Some(_) => {}
                None => return None,
            }
        }
        // Entry exists but expired: drop it.
        let mut entries = self.entries.write().await;
        entries.remove(key);
        None
    }

    async fn set(&self, key: &str, value: Vec<OutputStream>, ttl: Duration) {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), (Instant::now() + ttl, value));
    }
}
