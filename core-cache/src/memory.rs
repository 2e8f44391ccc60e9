//! In-process LRU cache with per-entry expiry

use crate::error::{CacheError, Result};
use crate::{CacheLookup, SongCache};
use async_trait::async_trait;
use bridge_traits::{Clock, SystemClock};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at_ms: i64,
}

/// Bounded in-memory song cache
///
/// Holds at most `capacity` entries, evicting the least recently used when
/// full. An entry past its expiry is reported as a miss and dropped on read.
pub struct InMemorySongCache {
    entries: Mutex<LruCache<String, Entry>>,
    clock: Arc<dyn Clock>,
}

impl InMemorySongCache {
    /// Create a cache backed by the system clock
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::with_clock(capacity, Arc::new(SystemClock))
    }

    /// Create a cache with an injected time source
    pub fn with_clock(capacity: NonZeroUsize, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            clock,
        }
    }

    /// Create a cache from an unchecked capacity
    ///
    /// # Errors
    /// Returns `InvalidConfig` when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            CacheError::InvalidConfig("cache capacity must be greater than 0".to_string())
        })?;
        Ok(Self::new(capacity))
    }

    /// Number of stored entries, including expired ones not yet read
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SongCache for InMemorySongCache {
    async fn get(&self, key: &str) -> CacheLookup {
        let now = self.clock.unix_timestamp_millis();
        let mut entries = self.entries.lock().await;

        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at_ms > now => {
                trace!(key, "Cache hit");
                return CacheLookup::Hit(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!(key, "Cache entry expired");
            entries.pop(key);
        }
        CacheLookup::Miss
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidConfig(
                "ttl must be greater than 0".to_string(),
            ));
        }

        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let expires_at_ms = self.clock.unix_timestamp_millis().saturating_add(ttl_ms);

        let mut entries = self.entries.lock().await;
        if let Some((evicted, _)) = entries.push(
            key.to_string(),
            Entry {
                value,
                expires_at_ms,
            },
        ) {
            if evicted != key {
                debug!(evicted = %evicted, "Evicted least recently used song");
            }
        }
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<()> {
        self.entries.lock().await.pop(key);
        trace!(key, "Cache entry invalidated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Clock that only moves when told to.
    struct ManualClock {
        millis: AtomicI64,
    }

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                millis: AtomicI64::new(1_700_000_000_000),
            })
        }

        fn advance(&self, by: Duration) {
            self.millis
                .fetch_add(by.as_millis() as i64, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst)).unwrap()
        }
    }

    fn cache_with(capacity: usize, clock: Arc<ManualClock>) -> InMemorySongCache {
        InMemorySongCache::with_clock(NonZeroUsize::new(capacity).unwrap(), clock)
    }

    #[tokio::test]
    async fn test_put_then_get_hits() {
        let cache = cache_with(4, ManualClock::new());

        cache
            .put("song:1", "{\"id\":\"1\"}".to_string(), Duration::from_secs(600))
            .await
            .unwrap();

        assert_eq!(
            cache.get("song:1").await,
            CacheLookup::Hit("{\"id\":\"1\"}".to_string())
        );
        assert_eq!(cache.get("song:2").await, CacheLookup::Miss);
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let clock = ManualClock::new();
        let cache = cache_with(4, clock.clone());
        cache
            .put("song:1", "v".to_string(), Duration::from_secs(600))
            .await
            .unwrap();

        clock.advance(Duration::from_secs(599));
        assert_eq!(cache.get("song:1").await, CacheLookup::Hit("v".to_string()));

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get("song:1").await, CacheLookup::Miss);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_put_replaces_and_renews() {
        let clock = ManualClock::new();
        let cache = cache_with(4, clock.clone());
        cache
            .put("song:1", "old".to_string(), Duration::from_secs(10))
            .await
            .unwrap();

        clock.advance(Duration::from_secs(8));
        cache
            .put("song:1", "new".to_string(), Duration::from_secs(10))
            .await
            .unwrap();

        clock.advance(Duration::from_secs(8));
        assert_eq!(cache.get("song:1").await, CacheLookup::Hit("new".to_string()));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_invalidate_removes_entry() {
        let cache = cache_with(4, ManualClock::new());
        cache
            .put("song:1", "v".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        cache.invalidate("song:1").await.unwrap();
        assert_eq!(cache.get("song:1").await, CacheLookup::Miss);

        cache.invalidate("song:missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_least_recently_used_is_evicted() {
        let cache = cache_with(2, ManualClock::new());
        let ttl = Duration::from_secs(60);
        cache.put("song:a", "a".to_string(), ttl).await.unwrap();
        cache.put("song:b", "b".to_string(), ttl).await.unwrap();

        // Touch a so b becomes the eviction candidate.
        assert!(matches!(cache.get("song:a").await, CacheLookup::Hit(_)));
        cache.put("song:c", "c".to_string(), ttl).await.unwrap();

        assert_eq!(cache.get("song:b").await, CacheLookup::Miss);
        assert!(matches!(cache.get("song:a").await, CacheLookup::Hit(_)));
        assert!(matches!(cache.get("song:c").await, CacheLookup::Hit(_)));
    }

    #[tokio::test]
    async fn test_zero_ttl_is_rejected() {
        let cache = cache_with(2, ManualClock::new());
        let err = cache
            .put("song:a", "a".to_string(), Duration::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, CacheError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert!(InMemorySongCache::with_capacity(0).is_err());
        assert!(InMemorySongCache::with_capacity(8).is_ok());
    }
}
