//! Wiring of configured store, cache and enrichment into a [`SongService`].

use crate::error::{CoreError, Result};
use crate::service::SongService;
use bridge_desktop::ReqwestHttpClient;
use core_cache::{DisabledSongCache, InMemorySongCache, SongCache};
use core_library::db::{create_pool, DatabaseConfig};
use core_library::{SongRepository, SqliteSongRepository};
use core_metadata::{EnrichmentSource, HttpEnrichmentClient, UnconfiguredEnrichment};
use core_runtime::config::{CacheConfig, DatabaseSettings, EnrichmentConfig, ServiceConfig};
use std::sync::Arc;
use tracing::{info, warn};

/// Aggregated handle to the collaborators the service requires.
pub struct CoreDependencies {
    pub repository: Arc<dyn SongRepository>,
    pub cache: Arc<dyn SongCache>,
    pub enrichment: Arc<dyn EnrichmentSource>,
}

impl CoreDependencies {
    pub fn new(
        repository: Arc<dyn SongRepository>,
        cache: Arc<dyn SongCache>,
        enrichment: Arc<dyn EnrichmentSource>,
    ) -> Self {
        Self {
            repository,
            cache,
            enrichment,
        }
    }

    /// Build the service with the timing knobs from `config`.
    pub fn into_service(self, config: &ServiceConfig) -> SongService {
        SongService::new(self.repository, self.cache, self.enrichment)
            .with_cache_ttl(config.cache.ttl)
            .with_cache_timeout(config.cache.operation_timeout)
            .with_store_timeout(config.store_timeout)
    }
}

/// Open the database, run migrations and assemble the service.
///
/// # Errors
/// `InitializationFailed` when the configuration is invalid, the database
/// cannot be opened or migrated, or a collaborator cannot be constructed.
pub async fn bootstrap(config: &ServiceConfig) -> Result<SongService> {
    config.validate()?;
    let dependencies = build_dependencies(config).await?;
    info!(
        cache_enabled = config.cache.enabled,
        enrichment_configured = config.enrichment.base_url.is_some(),
        "Song service ready"
    );
    Ok(dependencies.into_service(config))
}

pub async fn build_dependencies(config: &ServiceConfig) -> Result<CoreDependencies> {
    let repository = build_repository(&config.database).await?;
    let cache = build_cache(&config.cache)?;
    let enrichment = build_enrichment(&config.enrichment)?;
    Ok(CoreDependencies::new(repository, cache, enrichment))
}

/// In-memory URLs are pinned to one connection; the URL itself is kept as given.
fn database_config(settings: &DatabaseSettings) -> DatabaseConfig {
    let database =
        DatabaseConfig::new(settings.url.clone()).acquire_timeout(settings.acquire_timeout);
    if database.is_in_memory() {
        database.max_connections(1)
    } else {
        database.max_connections(settings.max_connections)
    }
}

async fn build_repository(settings: &DatabaseSettings) -> Result<Arc<dyn SongRepository>> {
    let pool = create_pool(database_config(settings))
        .await
        .map_err(|e| CoreError::InitializationFailed(format!("database: {}", e)))?;

    Ok(Arc::new(SqliteSongRepository::new(pool)))
}

fn build_cache(config: &CacheConfig) -> Result<Arc<dyn SongCache>> {
    if !config.enabled {
        info!("Song cache disabled");
        return Ok(Arc::new(DisabledSongCache));
    }

    let cache = InMemorySongCache::with_capacity(config.capacity)
        .map_err(|e| CoreError::InitializationFailed(format!("cache: {}", e)))?;
    info!(capacity = config.capacity, ttl_secs = config.ttl.as_secs(), "Song cache enabled");
    Ok(Arc::new(cache))
}

fn build_enrichment(config: &EnrichmentConfig) -> Result<Arc<dyn EnrichmentSource>> {
    let Some(base_url) = config.base_url.as_deref() else {
        warn!("EXTERNAL_API_URL not set, adding songs is disabled");
        return Ok(Arc::new(UnconfiguredEnrichment));
    };

    let http_client = ReqwestHttpClient::with_timeout(config.timeout)
        .map_err(|e| CoreError::InitializationFailed(format!("enrichment: {}", e)))?;

    Ok(Arc::new(HttpEnrichmentClient::new(
        Arc::new(http_client),
        base_url,
        config.timeout,
    )))
}
