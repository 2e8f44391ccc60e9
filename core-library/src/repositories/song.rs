//! Song repository trait and SQLite implementation

use crate::error::{LibraryError, Result};
use crate::models::Song;
use crate::query::{build_song_query_plan, paginate_verses, BindValue, SongFilter};
use crate::repositories::{Page, PageRequest};
use async_trait::async_trait;
use sqlx::{query_as, SqlitePool};
use tracing::{debug, instrument};

const SONG_ENTITY: &str = "Song";

/// Song repository interface for data access operations
#[async_trait]
pub trait SongRepository: Send + Sync {
    /// Find a song by ID
    ///
    /// # Returns
    /// - `Ok(Some(song))` if found
    /// - `Ok(None)` if not found
    /// - `Err` if database error occurs
    async fn find_by_id(&self, id: &str) -> Result<Option<Song>>;

    /// All songs in insertion order
    async fn find_all(&self) -> Result<Vec<Song>>;

    /// Query songs matching `filter`, newest release first
    ///
    /// `total` on the returned page counts every match, not just this window.
    async fn find_filtered(&self, filter: &SongFilter, page: PageRequest) -> Result<Page<Song>>;

    /// One window of a song's verses
    ///
    /// An unknown ID yields an empty page rather than `NotFound`.
    async fn find_lyrics_verses(&self, id: &str, page: PageRequest) -> Result<Page<String>>;

    /// Insert a new song
    ///
    /// # Errors
    /// Returns error if:
    /// - Song validation fails (`InvalidInput`)
    /// - The ID or the (group, song) pair already exists (`Conflict`)
    /// - Database error occurs
    async fn insert(&self, song: &Song) -> Result<()>;

    /// Replace every field of the song stored under `id`
    ///
    /// The stored ID is kept; `song.id` is ignored.
    ///
    /// # Errors
    /// Returns error if:
    /// - No song has this ID (`NotFound`)
    /// - Song validation fails (`InvalidInput`)
    /// - Another song already has the new (group, song) pair (`Conflict`)
    async fn update(&self, id: &str, song: &Song) -> Result<()>;

    /// Delete a song by ID
    ///
    /// # Errors
    /// Returns `NotFound` if no song has this ID.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// SQLite implementation of SongRepository
pub struct SqliteSongRepository {
    pool: SqlitePool,
}

impl SqliteSongRepository {
    /// Create a new SQLite song repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn validate(song: &Song) -> Result<()> {
        song.validate().map_err(|msg| LibraryError::InvalidInput {
            field: "song".to_string(),
            message: msg,
        })
    }

    fn duplicate_message(song: &Song) -> String {
        format!(
            "song '{}' by '{}' already exists",
            song.song_name, song.group_name
        )
    }

    fn not_found(id: &str) -> LibraryError {
        LibraryError::NotFound {
            entity_type: SONG_ENTITY.to_string(),
            id: id.to_string(),
        }
    }
}

#[async_trait]
impl SongRepository for SqliteSongRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> Result<Option<Song>> {
        let song = query_as::<_, Song>(
            "SELECT id, group_name, song_name, release_date, text, link FROM songs WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(song)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Song>> {
        let songs = query_as::<_, Song>(
            "SELECT id, group_name, song_name, release_date, text, link FROM songs ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = songs.len(), "Loaded all songs");
        Ok(songs)
    }

    #[instrument(skip(self))]
    async fn find_filtered(&self, filter: &SongFilter, page: PageRequest) -> Result<Page<Song>> {
        let plan = build_song_query_plan(filter, page);

        let mut count_query = sqlx::query_scalar::<_, i64>(&plan.count_sql);
        for bind in &plan.binds[..plan.count_binds] {
            count_query = match bind {
                BindValue::Text(value) => count_query.bind(value.as_str()),
                BindValue::I64(value) => count_query.bind(*value),
            };
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let mut select_query = query_as::<_, Song>(&plan.select_sql);
        for bind in &plan.binds {
            select_query = match bind {
                BindValue::Text(value) => select_query.bind(value.as_str()),
                BindValue::I64(value) => select_query.bind(*value),
            };
        }
        let songs = select_query.fetch_all(&self.pool).await?;

        debug!(total, returned = songs.len(), "Filtered songs");
        Ok(Page::new(songs, total.max(0) as u64, page))
    }

    #[instrument(skip(self))]
    async fn find_lyrics_verses(&self, id: &str, page: PageRequest) -> Result<Page<String>> {
        let text = sqlx::query_scalar::<_, String>("SELECT text FROM songs WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(paginate_verses(text.as_deref().unwrap_or_default(), page))
    }

    #[instrument(skip(self, song), fields(id = %song.id))]
    async fn insert(&self, song: &Song) -> Result<()> {
        Self::validate(song)?;

        let now = chrono::Utc::now().timestamp();
        sqlx::query(
            r#"
            INSERT INTO songs (
                id, group_name, song_name, normalized_group, normalized_song,
                release_date, text, link, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
            "#,
        )
        .bind(&song.id)
        .bind(&song.group_name)
        .bind(&song.song_name)
        .bind(Song::normalize(&song.group_name))
        .bind(Song::normalize(&song.song_name))
        .bind(song.release_date)
        .bind(&song.text)
        .bind(&song.link)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| LibraryError::from_write(e, SONG_ENTITY, Self::duplicate_message(song)))?;

        Ok(())
    }

    #[instrument(skip(self, song))]
    async fn update(&self, id: &str, song: &Song) -> Result<()> {
        Self::validate(song)?;

        let result = sqlx::query(
            r#"
            UPDATE songs SET
                group_name = ?1, song_name = ?2,
                normalized_group = ?3, normalized_song = ?4,
                release_date = ?5, text = ?6, link = ?7, updated_at = ?8
            WHERE id = ?9
            "#,
        )
        .bind(&song.group_name)
        .bind(&song.song_name)
        .bind(Song::normalize(&song.group_name))
        .bind(Song::normalize(&song.song_name))
        .bind(song.release_date)
        .bind(&song.text)
        .bind(&song.link)
        .bind(chrono::Utc::now().timestamp())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| LibraryError::from_write(e, SONG_ENTITY, Self::duplicate_message(song)))?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM songs WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(id));
        }

        Ok(())
    }
}
