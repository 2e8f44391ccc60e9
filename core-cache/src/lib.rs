//! # Song Cache
//!
//! Optional key/value layer holding serialized songs with a time-to-live.
//!
//! The cache is a capability, not a dependency: every implementation may
//! answer [`CacheLookup::Unavailable`], and callers treat that exactly like a
//! miss. Nothing stored here is authoritative.
//!
//! - [`InMemorySongCache`] - bounded LRU with per-entry expiry
//! - [`DisabledSongCache`] - always unavailable, for deployments without a cache

pub mod disabled;
pub mod error;
pub mod memory;

pub use disabled::DisabledSongCache;
pub use error::{CacheError, Result};
pub use memory::InMemorySongCache;

use async_trait::async_trait;
use std::time::Duration;

/// Outcome of a cache read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// A stored value that has not expired
    Hit(String),
    /// No value for the key
    Miss,
    /// The cache could not answer
    Unavailable,
}

/// Cache key under which a song is stored: `song:{id}`
pub fn song_key(id: &str) -> String {
    format!("song:{}", id)
}

/// Key/value store for serialized songs
#[async_trait]
pub trait SongCache: Send + Sync {
    async fn get(&self, key: &str) -> CacheLookup;

    /// Stores `value` until `ttl` elapses, replacing any previous value.
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    /// Removes the value for `key`. Removing an absent key succeeds.
    async fn invalidate(&self, key: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_key_format() {
        assert_eq!(song_key("abc-123"), "song:abc-123");
    }
}
