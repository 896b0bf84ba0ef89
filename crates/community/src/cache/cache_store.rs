use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::{Arc, Weak};
use tracing::{debug, error};

struct Entry {
    payload: String,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Process-local key/value cache with per-entry expiry. Values are stored
/// as JSON so callers can cache any serde type.
#[derive(Default)]
pub struct CacheStore {
    entries: DashMap<String, Entry>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a background sweep that drops expired entries every `period`.
    /// The task ends once the cache itself is dropped.
    pub fn spawn_cleanup(cache: &Arc<Self>, period: std::time::Duration) {
        let weak = Arc::downgrade(cache);
        tokio::spawn(cleanup_task(weak, period));
    }

    pub async fn get_from_cache<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let payload = {
            let entry = match self.entries.get(key) {
                Some(entry) => entry,
                None => {
                    debug!("Cache miss for key: {key}");
                    return None;
                }
            };

            if entry.is_live(Utc::now()) {
                entry.payload.clone()
            } else {
                drop(entry);
                debug!("Cache entry expired for key: {key}");
                self.entries
                    .remove_if(key, |_, entry| !entry.is_live(Utc::now()));
                return None;
            }
        };

        match serde_json::from_str::<T>(&payload) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                error!("Failed to deserialize cached value for key '{key}': {e:?}");
                None
            }
        }
    }

    pub async fn set_to_cache<T>(&self, key: &str, data: &T, expiration: Duration)
    where
        T: Serialize,
    {
        let payload = match serde_json::to_string(data) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize data for key '{key}': {e:?}");
                return;
            }
        };

        self.entries.insert(
            key.to_string(),
            Entry {
                payload,
                expires_at: Utc::now() + expiration,
            },
        );
    }

    pub async fn delete_from_cache(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Bumps the counter under `key` unless it already reached `limit`.
    /// The read and the write happen under the same shard lock, so
    /// concurrent callers can never push the counter past `limit`.
    /// Returns the new count, or `None` when the limit was already hit.
    pub async fn increment_within(
        &self,
        key: &str,
        limit: i64,
        expiration: Duration,
    ) -> Option<i64> {
        let now = Utc::now();

        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Entry {
                payload: "0".into(),
                expires_at: now + expiration,
            });

        let current = if entry.is_live(now) {
            serde_json::from_str::<i64>(&entry.payload).unwrap_or(0)
        } else {
            0
        };

        if current >= limit {
            return None;
        }

        let next = current + 1;
        entry.payload = next.to_string();
        entry.expires_at = now + expiration;

        Some(next)
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

async fn cleanup_task(cache: Weak<CacheStore>, period: std::time::Duration) {
    let mut interval = tokio::time::interval(period);

    loop {
        interval.tick().await;

        let Some(cache) = cache.upgrade() else {
            break;
        };

        let removed = cache.purge_expired();
        if removed > 0 {
            debug!("Purged {removed} expired cache entries");
        }
    }
}
