//! Deduplicating profile cache

use super::ProfileSource;
use crate::auth::types::Actor;
use crate::config::ProfileSourceConfig;
use crate::utils::error::AccessError;
use moka::future::Cache;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Cache entries are keyed by session key and the key's epoch. Invalidating
/// a key moves it to a fresh epoch, so a fetch started before the
/// invalidation can only land under the retired epoch.
type EntryKey = (String, u64);

#[derive(Debug, Default)]
struct Epochs {
    counter: u64,
    cleared_at: u64,
    per_key: HashMap<String, u64>,
}

impl Epochs {
    fn current(&self, key: &str) -> u64 {
        self.per_key
            .get(key)
            .copied()
            .unwrap_or_default()
            .max(self.cleared_at)
    }

    fn advance(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }
}

/// Caches fetched profiles by key.
///
/// Concurrent lookups of the same key share a single in-flight fetch. Only
/// successful fetches are cached; a failed fetch is retried on the next lookup.
/// A fetch still in flight when its key is invalidated never repopulates the
/// cache.
#[derive(Clone)]
pub struct ProfileCache {
    inner: Cache<EntryKey, Option<Arc<Actor>>>,
    epochs: Arc<Mutex<Epochs>>,
}

impl ProfileCache {
    /// Create a cache bounded by `capacity` entries, each living for `ttl`
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
            epochs: Arc::new(Mutex::new(Epochs::default())),
        }
    }

    /// Create a cache from the profile source configuration
    pub fn from_config(config: &ProfileSourceConfig) -> Self {
        Self::new(
            config.cache_capacity,
            Duration::from_secs(config.cache_ttl_secs),
        )
    }

    fn entry_key(&self, key: &str) -> EntryKey {
        (key.to_string(), self.epochs.lock().current(key))
    }

    /// Return the cached profile for `key`, fetching it from `source` if absent
    pub async fn get_or_fetch(
        &self,
        key: &str,
        source: &dyn ProfileSource,
    ) -> Result<Option<Arc<Actor>>, Arc<AccessError>> {
        let entry = self.entry_key(key);
        let result = self
            .inner
            .try_get_with(entry.clone(), async {
                debug!("Profile cache miss for key {}", key);
                source.fetch_profile().await.map(|actor| actor.map(Arc::new))
            })
            .await;

        if self.entry_key(key) != entry {
            debug!("Key {} was invalidated during the fetch, dropping its entry", key);
            self.inner.invalidate(&entry).await;
        }

        result
    }

    /// Drop the cached profile for `key`, including any fetch still in flight
    pub async fn invalidate(&self, key: &str) {
        let retired = {
            let mut epochs = self.epochs.lock();
            let retired = epochs.current(key);
            let next = epochs.advance();
            epochs.per_key.insert(key.to_string(), next);
            retired
        };
        self.inner.invalidate(&(key.to_string(), retired)).await;
    }

    /// Drop every cached profile
    pub fn clear(&self) {
        {
            let mut epochs = self.epochs.lock();
            let next = epochs.advance();
            epochs.cleared_at = next;
            epochs.per_key.clear();
        }
        self.inner.invalidate_all();
    }

    /// Whether a profile is cached for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(&self.entry_key(key))
    }
}

impl std::fmt::Debug for ProfileCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileCache")
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}
