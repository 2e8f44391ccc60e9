//! # Song Service
//!
//! Coordinates the song store, the cache and the enrichment source.
//!
//! ## Read path
//!
//! `get_song` is cache-aside: a cached copy that deserializes is returned
//! without touching the store; a miss, an unavailable cache or a corrupt
//! entry falls through to the store, and the store's answer is written back
//! best-effort. Negative results are never cached.
//!
//! ## Write path
//!
//! Updates invalidate, write to the store and then write the new value
//! through to the cache. Deletes invalidate, delete and invalidate again.
//! Cache failures on either path are logged and never returned.
//!
//! Listing, filtering and verse pagination are not cached.
//!
//! Every store call is bounded by `store_timeout` and every cache call by
//! `cache_timeout`; an elapsed cache budget counts as unavailable.

use crate::error::{CoreError, Result};
use core_cache::{song_key, CacheLookup, SongCache};
use core_library::query::SongFilter;
use core_library::repositories::{Page, PageRequest, SongRepository};
use core_library::{LibraryError, Song};
use core_metadata::EnrichmentSource;
use core_runtime::config::{DEFAULT_CACHE_TIMEOUT, DEFAULT_CACHE_TTL, DEFAULT_STORE_TIMEOUT};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

/// Retrieval orchestrator for the song catalog
pub struct SongService {
    repository: Arc<dyn SongRepository>,
    cache: Arc<dyn SongCache>,
    enrichment: Arc<dyn EnrichmentSource>,
    cache_ttl: Duration,
    store_timeout: Duration,
    cache_timeout: Duration,
}

impl SongService {
    pub fn new(
        repository: Arc<dyn SongRepository>,
        cache: Arc<dyn SongCache>,
        enrichment: Arc<dyn EnrichmentSource>,
    ) -> Self {
        Self {
            repository,
            cache,
            enrichment,
            cache_ttl: DEFAULT_CACHE_TTL,
            store_timeout: DEFAULT_STORE_TIMEOUT,
            cache_timeout: DEFAULT_CACHE_TIMEOUT,
        }
    }

    /// Lifetime of songs written to the cache
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn with_cache_timeout(mut self, timeout: Duration) -> Self {
        self.cache_timeout = timeout;
        self
    }

    /// Look up one song, preferring the cache
    #[instrument(skip(self))]
    pub async fn get_song(&self, id: &str) -> Result<Song> {
        let key = song_key(id);

        match self.cache_get(&key).await {
            CacheLookup::Hit(json) => match serde_json::from_str::<Song>(&json) {
                Ok(song) => {
                    debug!("Served song from cache");
                    return Ok(song);
                }
                Err(e) => warn!(error = %e, "Discarding undecodable cached song"),
            },
            CacheLookup::Miss => debug!("Song cache miss"),
            CacheLookup::Unavailable => debug!("Song cache unavailable, reading store"),
        }

        let song = self
            .store(self.repository.find_by_id(id))
            .await?
            .ok_or_else(|| CoreError::song_not_found(id))?;

        self.cache_put(&key, &song).await;
        Ok(song)
    }

    /// Every song in the catalog
    #[instrument(skip(self))]
    pub async fn get_all_songs(&self) -> Result<Vec<Song>> {
        self.store(self.repository.find_all()).await
    }

    /// One page of songs matching `filter`, newest release first
    #[instrument(skip(self))]
    pub async fn get_songs_paginated(
        &self,
        filter: &SongFilter,
        page: PageRequest,
    ) -> Result<Page<Song>> {
        self.store(self.repository.find_filtered(filter, page)).await
    }

    /// One page of a song's verses
    ///
    /// An unknown ID yields an empty page, unlike [`SongService::get_song`].
    #[instrument(skip(self))]
    pub async fn get_lyrics_paginated(&self, id: &str, page: PageRequest) -> Result<Page<String>> {
        self.store(self.repository.find_lyrics_verses(id, page)).await
    }

    /// Create a song from enrichment data
    ///
    /// Fails with `EnrichmentUnavailable` before any store write when the
    /// enrichment source cannot supply details.
    #[instrument(skip(self))]
    pub async fn add_song(&self, group: &str, song: &str) -> Result<Song> {
        let group = group.trim();
        let song = song.trim();
        if group.is_empty() {
            return Err(CoreError::invalid_input("group", "group name cannot be empty"));
        }
        if song.is_empty() {
            return Err(CoreError::invalid_input("song", "song name cannot be empty"));
        }

        let detail = self.enrichment.fetch_details(group, song).await.map_err(|e| {
            warn!(error = %e, "Enrichment failed, song not added");
            CoreError::from(e)
        })?;

        let created = Song::new(group, song, detail.release_date, detail.text, detail.link);
        self.store(self.repository.insert(&created)).await?;

        info!(id = %created.id, "Song added");
        Ok(created)
    }

    /// Replace the song stored under `id` and refresh its cache entry
    ///
    /// The stored ID always wins over `song.id`.
    #[instrument(skip(self, song))]
    pub async fn update_song(&self, id: &str, song: Song) -> Result<Song> {
        song.validate()
            .map_err(|message| CoreError::invalid_input("song", message))?;

        let key = song_key(id);
        self.cache_invalidate(&key).await;

        let updated = Song {
            id: id.to_string(),
            ..song
        };
        self.store(self.repository.update(id, &updated)).await?;

        self.cache_put(&key, &updated).await;
        info!("Song updated");
        Ok(updated)
    }

    /// Remove a song and its cache entry
    #[instrument(skip(self))]
    pub async fn delete_song(&self, id: &str) -> Result<()> {
        let key = song_key(id);
        self.cache_invalidate(&key).await;

        self.store(self.repository.delete(id)).await?;

        // A reader may have repopulated the entry between the first
        // invalidation and the delete.
        self.cache_invalidate(&key).await;
        info!("Song deleted");
        Ok(())
    }

    async fn store<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = core_library::Result<T>>,
    {
        match timeout(self.store_timeout, call).await {
            Ok(result) => result.map_err(|e| {
                if e.is_unavailable() {
                    warn!(error = %e, "Store call failed");
                }
                CoreError::from(e)
            }),
            Err(_) => {
                warn!(
                    timeout_ms = self.store_timeout.as_millis() as u64,
                    "Store call timed out"
                );
                Err(CoreError::from(LibraryError::Timeout(self.store_timeout)))
            }
        }
    }

    async fn cache_get(&self, key: &str) -> CacheLookup {
        match timeout(self.cache_timeout, self.cache.get(key)).await {
            Ok(lookup) => lookup,
            Err(_) => {
                warn!(key, "Cache read exceeded its budget");
                CacheLookup::Unavailable
            }
        }
    }

    async fn cache_put(&self, key: &str, song: &Song) {
        let json = match serde_json::to_string(song) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "Could not serialize song for cache");
                return;
            }
        };

        match timeout(self.cache_timeout, self.cache.put(key, json, self.cache_ttl)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(key, error = %e, "Cache write failed"),
            Err(_) => warn!(key, "Cache write exceeded its budget"),
        }
    }

    async fn cache_invalidate(&self, key: &str) {
        match timeout(self.cache_timeout, self.cache.invalidate(key)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(key, error = %e, "Cache invalidation failed"),
            Err(_) => warn!(key, "Cache invalidation exceeded its budget"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use core_cache::CacheError;
    use core_metadata::{MetadataError, SongDetail};
    use mockall::{mock, predicate::eq, Sequence};

    mock! {
        pub Repo {}

        #[async_trait]
        impl SongRepository for Repo {
            async fn find_by_id(&self, id: &str) -> core_library::Result<Option<Song>>;
            async fn find_all(&self) -> core_library::Result<Vec<Song>>;
            async fn find_filtered(&self, filter: &SongFilter, page: PageRequest) -> core_library::Result<Page<Song>>;
            async fn find_lyrics_verses(&self, id: &str, page: PageRequest) -> core_library::Result<Page<String>>;
            async fn insert(&self, song: &Song) -> core_library::Result<()>;
            async fn update(&self, id: &str, song: &Song) -> core_library::Result<()>;
            async fn delete(&self, id: &str) -> core_library::Result<()>;
        }
    }

    mock! {
        pub Cache {}

        #[async_trait]
        impl SongCache for Cache {
            async fn get(&self, key: &str) -> CacheLookup;
            async fn put(&self, key: &str, value: String, ttl: Duration) -> core_cache::Result<()>;
            async fn invalidate(&self, key: &str) -> core_cache::Result<()>;
        }
    }

    mock! {
        pub Enrichment {}

        #[async_trait]
        impl EnrichmentSource for Enrichment {
            async fn fetch_details(&self, group: &str, song: &str) -> core_metadata::Result<SongDetail>;
        }
    }

    fn sample_song(id: &str) -> Song {
        Song {
            id: id.to_string(),
            group_name: "Muse".to_string(),
            song_name: "Supermassive Black Hole".to_string(),
            release_date: NaiveDate::from_ymd_opt(2006, 7, 16).unwrap(),
            text: "Ooh baby\n\nOoh".to_string(),
            link: "https://example.com/smbh".to_string(),
        }
    }

    fn service(repo: MockRepo, cache: MockCache) -> SongService {
        service_with(repo, cache, MockEnrichment::new())
    }

    fn service_with(repo: MockRepo, cache: MockCache, enrichment: MockEnrichment) -> SongService {
        SongService::new(Arc::new(repo), Arc::new(cache), Arc::new(enrichment))
    }

    fn not_found(id: &str) -> LibraryError {
        LibraryError::NotFound {
            entity_type: "Song".to_string(),
            id: id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_cache_hit_skips_store() {
        let song = sample_song("s1");
        let json = serde_json::to_string(&song).unwrap();

        let mut repo = MockRepo::new();
        repo.expect_find_by_id().times(0);

        let mut cache = MockCache::new();
        cache
            .expect_get()
            .with(eq("song:s1"))
            .times(1)
            .returning(move |_| CacheLookup::Hit(json.clone()));
        cache.expect_put().times(0);

        let found = service(repo, cache).get_song("s1").await.unwrap();
        assert_eq!(found, song);
    }

    #[tokio::test]
    async fn test_cache_miss_reads_store_and_populates() {
        let song = sample_song("s1");
        let stored = song.clone();
        let expected_json = serde_json::to_string(&song).unwrap();

        let mut repo = MockRepo::new();
        repo.expect_find_by_id()
            .with(eq("s1"))
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let mut cache = MockCache::new();
        cache.expect_get().returning(|_| CacheLookup::Miss);
        cache
            .expect_put()
            .withf(move |key, value, ttl| {
                key == "song:s1" && *value == expected_json && *ttl == Duration::from_secs(600)
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let found = service(repo, cache).get_song("s1").await.unwrap();
        assert_eq!(found, song);
    }

    #[tokio::test]
    async fn test_unavailable_cache_degrades_to_store() {
        let song = sample_song("s1");
        let stored = song.clone();

        let mut repo = MockRepo::new();
        repo.expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let mut cache = MockCache::new();
        cache.expect_get().returning(|_| CacheLookup::Unavailable);
        cache
            .expect_put()
            .returning(|_, _, _| Err(CacheError::Unavailable("down".to_string())));

        let found = service(repo, cache).get_song("s1").await.unwrap();
        assert_eq!(found, song);
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_falls_back_and_overwrites() {
        let song = sample_song("s1");
        let stored = song.clone();

        let mut repo = MockRepo::new();
        repo.expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let mut cache = MockCache::new();
        cache
            .expect_get()
            .returning(|_| CacheLookup::Hit("{not json".to_string()));
        cache.expect_put().times(1).returning(|_, _, _| Ok(()));

        let found = service(repo, cache).get_song("s1").await.unwrap();
        assert_eq!(found, song);
    }

    #[tokio::test]
    async fn test_missing_song_is_not_cached() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let mut cache = MockCache::new();
        cache.expect_get().returning(|_| CacheLookup::Miss);
        cache.expect_put().times(0);

        let err = service(repo, cache).get_song("nope").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_store_failure_is_store_unavailable() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_id()
            .returning(|_| Err(LibraryError::Database(sqlx::Error::PoolTimedOut)));

        let mut cache = MockCache::new();
        cache.expect_get().returning(|_| CacheLookup::Miss);

        let err = service(repo, cache).get_song("s1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    }

    #[tokio::test]
    async fn test_update_invalidates_then_writes_then_repopulates() {
        let mut seq = Sequence::new();
        let mut repo = MockRepo::new();
        let mut cache = MockCache::new();

        cache
            .expect_invalidate()
            .with(eq("song:s1"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        repo.expect_update()
            .withf(|id, song| id == "s1" && song.id == "s1" && song.text == "new")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        cache
            .expect_put()
            .withf(|key, value, _| key == "song:s1" && value.contains("\"text\":\"new\""))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let mut changed = sample_song("ignored-body-id");
        changed.text = "new".to_string();

        let updated = service(repo, cache).update_song("s1", changed).await.unwrap();
        assert_eq!(updated.id, "s1");
        assert_eq!(updated.text, "new");
    }

    #[tokio::test]
    async fn test_update_missing_song_only_invalidates() {
        let mut repo = MockRepo::new();
        repo.expect_update()
            .times(1)
            .returning(|id, _| Err(not_found(id)));

        let mut cache = MockCache::new();
        cache.expect_invalidate().times(1).returning(|_| Ok(()));
        cache.expect_put().times(0);

        let err = service(repo, cache)
            .update_song("nope", sample_song("nope"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_with_blank_names_touches_nothing() {
        let mut repo = MockRepo::new();
        repo.expect_update().times(0);

        let mut cache = MockCache::new();
        cache.expect_invalidate().times(0);
        cache.expect_put().times(0);

        let mut invalid = sample_song("s1");
        invalid.song_name = " ".to_string();

        let err = service(repo, cache)
            .update_song("s1", invalid)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_update_still_succeeds_when_invalidation_fails() {
        let mut repo = MockRepo::new();
        repo.expect_update().returning(|_, _| Ok(()));

        let mut cache = MockCache::new();
        cache
            .expect_invalidate()
            .returning(|_| Err(CacheError::Unavailable("down".to_string())));
        cache.expect_put().times(1).returning(|_, _, _| Ok(()));

        let result = service(repo, cache)
            .update_song("s1", sample_song("s1"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_conflict_is_reported() {
        let mut repo = MockRepo::new();
        repo.expect_update().returning(|_, _| {
            Err(LibraryError::Conflict {
                entity_type: "Song".to_string(),
                message: "exists".to_string(),
            })
        });

        let mut cache = MockCache::new();
        cache.expect_invalidate().returning(|_| Ok(()));
        cache.expect_put().times(0);

        let err = service(repo, cache)
            .update_song("s1", sample_song("s1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_delete_invalidates_before_and_after() {
        let mut seq = Sequence::new();
        let mut repo = MockRepo::new();
        let mut cache = MockCache::new();

        cache
            .expect_invalidate()
            .with(eq("song:s1"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        repo.expect_delete()
            .with(eq("s1"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        cache
            .expect_invalidate()
            .with(eq("song:s1"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        service(repo, cache).delete_song("s1").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_song_only_invalidates_once() {
        let mut repo = MockRepo::new();
        repo.expect_delete().returning(|id| Err(not_found(id)));

        let mut cache = MockCache::new();
        cache.expect_invalidate().times(1).returning(|_| Ok(()));
        cache.expect_put().times(0);

        let err = service(repo, cache).delete_song("nope").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_pagination_bypasses_cache() {
        let mut repo = MockRepo::new();
        repo.expect_find_filtered()
            .withf(|filter, page| {
                filter.group.as_deref() == Some("Muse") && *page == PageRequest::new(2, 5)
            })
            .times(1)
            .returning(|_, page| Ok(Page::new(vec![], 0, page)));
        repo.expect_find_lyrics_verses()
            .withf(|id, page| id == "s1" && *page == PageRequest::new(1, 2))
            .times(1)
            .returning(|_, page| Ok(Page::new(vec!["A".to_string()], 1, page)));

        let mut cache = MockCache::new();
        cache.expect_get().times(0);
        cache.expect_put().times(0);
        cache.expect_invalidate().times(0);

        let service = service(repo, cache);
        let filter = SongFilter::new().with(core_library::FilterKey::Group, "Muse");
        let songs = service
            .get_songs_paginated(&filter, PageRequest::new(2, 5))
            .await
            .unwrap();
        assert!(songs.items.is_empty());

        let verses = service
            .get_lyrics_paginated("s1", PageRequest::new(1, 2))
            .await
            .unwrap();
        assert_eq!(verses.items, vec!["A"]);
    }

    #[tokio::test]
    async fn test_add_song_uses_enrichment_details() {
        let mut enrichment = MockEnrichment::new();
        enrichment
            .expect_fetch_details()
            .withf(|group, song| group == "Muse" && song == "Uprising")
            .times(1)
            .returning(|_, _| {
                Ok(SongDetail {
                    release_date: NaiveDate::from_ymd_opt(2009, 9, 7).unwrap(),
                    text: "Paranoia is in bloom".to_string(),
                    link: "https://example.com/uprising".to_string(),
                })
            });

        let mut repo = MockRepo::new();
        repo.expect_insert()
            .withf(|song| {
                song.group_name == "Muse"
                    && song.song_name == "Uprising"
                    && song.text == "Paranoia is in bloom"
                    && !song.id.is_empty()
            })
            .times(1)
            .returning(|_| Ok(()));

        let created = service_with(repo, MockCache::new(), enrichment)
            .add_song("  Muse ", "Uprising")
            .await
            .unwrap();

        assert_eq!(created.group_name, "Muse");
        assert_eq!(created.link, "https://example.com/uprising");
    }

    #[tokio::test]
    async fn test_add_song_enrichment_failure_writes_nothing() {
        let mut enrichment = MockEnrichment::new();
        enrichment
            .expect_fetch_details()
            .returning(|_, _| Err(MetadataError::UpstreamStatus(502)));

        let mut repo = MockRepo::new();
        repo.expect_insert().times(0);

        let err = service_with(repo, MockCache::new(), enrichment)
            .add_song("Muse", "Uprising")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EnrichmentUnavailable);
    }

    #[tokio::test]
    async fn test_add_song_rejects_blank_names() {
        let mut enrichment = MockEnrichment::new();
        enrichment.expect_fetch_details().times(0);

        let service = service_with(MockRepo::new(), MockCache::new(), enrichment);
        assert_eq!(
            service.add_song("", "Uprising").await.unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            service.add_song("Muse", "  ").await.unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }

    #[tokio::test]
    async fn test_add_duplicate_song_conflicts() {
        let mut enrichment = MockEnrichment::new();
        enrichment.expect_fetch_details().returning(|_, _| {
            Ok(SongDetail {
                release_date: NaiveDate::from_ymd_opt(2009, 9, 7).unwrap(),
                text: String::new(),
                link: String::new(),
            })
        });

        let mut repo = MockRepo::new();
        repo.expect_insert().returning(|_| {
            Err(LibraryError::Conflict {
                entity_type: "Song".to_string(),
                message: "exists".to_string(),
            })
        });

        let err = service_with(repo, MockCache::new(), enrichment)
            .add_song("Muse", "Uprising")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    /// Cache whose every call stalls past any reasonable budget.
    struct StalledCache;

    #[async_trait]
    impl SongCache for StalledCache {
        async fn get(&self, _key: &str) -> CacheLookup {
            tokio::time::sleep(Duration::from_secs(30)).await;
            CacheLookup::Miss
        }

        async fn put(&self, _key: &str, _value: String, _ttl: Duration) -> core_cache::Result<()> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        }

        async fn invalidate(&self, _key: &str) -> core_cache::Result<()> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_stalled_cache_counts_as_unavailable() {
        let song = sample_song("s1");
        let stored = song.clone();

        let mut repo = MockRepo::new();
        repo.expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = SongService::new(
            Arc::new(repo),
            Arc::new(StalledCache),
            Arc::new(MockEnrichment::new()),
        )
        .with_cache_timeout(Duration::from_millis(20));

        let found = tokio::time::timeout(Duration::from_secs(5), service.get_song("s1"))
            .await
            .expect("stalled cache must not stall the caller")
            .unwrap();
        assert_eq!(found, song);
    }

    /// Repository whose reads never complete in time.
    struct StalledRepo;

    #[async_trait]
    impl SongRepository for StalledRepo {
        async fn find_by_id(&self, _id: &str) -> core_library::Result<Option<Song>> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(None)
        }

        async fn find_all(&self) -> core_library::Result<Vec<Song>> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Vec::new())
        }

        async fn find_filtered(
            &self,
            _filter: &SongFilter,
            page: PageRequest,
        ) -> core_library::Result<Page<Song>> {
            Ok(Page::new(Vec::new(), 0, page))
        }

        async fn find_lyrics_verses(
            &self,
            _id: &str,
            page: PageRequest,
        ) -> core_library::Result<Page<String>> {
            Ok(Page::new(Vec::new(), 0, page))
        }

        async fn insert(&self, _song: &Song) -> core_library::Result<()> {
            Ok(())
        }

        async fn update(&self, _id: &str, _song: &Song) -> core_library::Result<()> {
            Ok(())
        }

        async fn delete(&self, _id: &str) -> core_library::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_stalled_store_is_store_unavailable() {
        let mut cache = MockCache::new();
        cache.expect_get().returning(|_| CacheLookup::Miss);

        let service = SongService::new(
            Arc::new(StalledRepo),
            Arc::new(cache),
            Arc::new(MockEnrichment::new()),
        )
        .with_store_timeout(Duration::from_millis(20));

        let err = service.get_song("s1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);

        let err = service.get_all_songs().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    }
}
