// In-memory TTL store with per-key single-flight and optional LRU bound.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::Result;

/// How a value was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheStatus {
    Hit,
    Miss,
}

/// Cached value with metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    /// When the value was computed.
    pub cached_at: DateTime<Utc>,
    last_access: u64,
}

impl<V> CacheEntry<V> {
    fn new(value: V, tick: u64) -> Self {
        Self {
            value,
            cached_at: Utc::now(),
            last_access: tick,
        }
    }

    /// Check if this entry is older than `ttl`.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::ZERO);

        elapsed >= ttl
    }
}

struct CacheState<V> {
    entries: HashMap<String, CacheEntry<V>>,
    tick: u64,
}

impl<V> CacheState<V> {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

pub struct TtlCache<V> {
    name: &'static str,
    ttl: Duration,
    max_entries: Option<usize>,
    state: Mutex<CacheState<V>>,
    key_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<V: Clone> TtlCache<V> {
    /// `max_entries: None` leaves the cache bounded only by the number of
    /// distinct keys seen within one TTL.
    pub fn new(name: &'static str, ttl: Duration, max_entries: Option<usize>) -> Self {
        Self {
            name,
            ttl,
            max_entries,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                tick: 0,
            }),
            key_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Fresh value for `key`, if any. Refreshes its LRU position.
    pub async fn get(&self, key: &str) -> Option<V> {
        let mut state = self.state.lock().await;
        let tick = state.next_tick();
        let entry = state.entries.get_mut(key)?;
        if entry.is_expired(self.ttl) {
            return None;
        }
        entry.last_access = tick;
        Some(entry.value.clone())
    }

    /// Returns the cached value for `key` or runs `compute` and stores its
    /// result. At most one `compute` runs per key at a time; callers queued
    /// behind it see the stored value. Errors are returned and not cached.
    /// `bypass` skips the lookup but still stores the fresh result.
    pub async fn get_or_compute<F, Fut>(
        &self,
        key: &str,
        bypass: bool,
        compute: F,
    ) -> Result<(V, CacheStatus)>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if !bypass {
            if let Some(value) = self.get(key).await {
                tracing::debug!("{} cache hit: {}", self.name, key);
                return Ok((value, CacheStatus::Hit));
            }
        }

        let key_lock = self.key_lock(key).await;
        let result = {
            let _guard = key_lock.lock().await;

            // Another caller may have filled the entry while we waited.
            let cached = if bypass { None } else { self.get(key).await };
            match cached {
                Some(value) => Ok((value, CacheStatus::Hit)),
                None => self.compute_and_store(key, compute).await,
            }
        };

        self.release_key_lock(key, &key_lock).await;
        result
    }

    async fn compute_and_store<F, Fut>(&self, key: &str, compute: F) -> Result<(V, CacheStatus)>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        tracing::debug!("{} cache miss: {}", self.name, key);
        let value = compute().await?;
        self.insert(key, value.clone()).await;
        Ok((value, CacheStatus::Miss))
    }

    pub async fn insert(&self, key: &str, value: V) {
        let mut state = self.state.lock().await;
        let tick = state.next_tick();
        state
            .entries
            .insert(key.to_string(), CacheEntry::new(value, tick));

        if let Some(max) = self.max_entries {
            while state.entries.len() > max {
                let Some(oldest) = state
                    .entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.last_access)
                    .map(|(k, _)| k.clone())
                else {
                    break;
                };
                tracing::debug!("{} cache evicting: {}", self.name, oldest);
                state.entries.remove(&oldest);
            }
        }
    }

    async fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        self.key_locks
            .lock()
            .await
            .entry(key.to_string())
            .or_default()
            .clone()
    }

    /// Drops the per-key lock once no other caller holds it.
    async fn release_key_lock(&self, key: &str, key_lock: &Arc<Mutex<()>>) {
        let mut locks = self.key_locks.lock().await;
        // One reference in the map, one held by the caller.
        if Arc::strong_count(key_lock) <= 2 {
            locks.remove(key);
        }
    }
}
