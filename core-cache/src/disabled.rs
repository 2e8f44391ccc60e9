//! Cache stand-in used when caching is turned off

use crate::error::{CacheError, Result};
use crate::{CacheLookup, SongCache};
use async_trait::async_trait;
use std::time::Duration;

/// A cache that is never available
///
/// Reads answer `Unavailable` and writes fail, so callers exercise their
/// ordinary degrade-to-store path.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSongCache;

#[async_trait]
impl SongCache for DisabledSongCache {
    async fn get(&self, _key: &str) -> CacheLookup {
        CacheLookup::Unavailable
    }

    async fn put(&self, _key: &str, _value: String, _ttl: Duration) -> Result<()> {
        Err(CacheError::Unavailable("cache disabled".to_string()))
    }

    async fn invalidate(&self, _key: &str) -> Result<()> {
        Err(CacheError::Unavailable("cache disabled".to_string()))
    }
}
