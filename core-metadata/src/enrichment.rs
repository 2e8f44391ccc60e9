//! # Enrichment Source
//!
//! Looks up release date, lyrics and link for a (group, song) pair.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use core_metadata::{EnrichmentSource, HttpEnrichmentClient};
//!
//! let client = HttpEnrichmentClient::new(http_client, "http://localhost:4000/info", timeout);
//! let detail = client.fetch_details("Muse", "Supermassive Black Hole").await?;
//! println!("released {}", detail.release_date);
//! ```

use crate::error::{MetadataError, Result};
use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpRequest};
use chrono::NaiveDate;
use core_library::models::release_date;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Details returned by the song-detail API
///
/// `releaseDate` may be written `DD.MM.YYYY` or `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDetail {
    #[serde(alias = "releaseDate", with = "release_date")]
    pub release_date: NaiveDate,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
}

/// Source of details for songs being added to the catalog
#[async_trait]
pub trait EnrichmentSource: Send + Sync {
    /// Fetch details for `song` by `group`
    ///
    /// # Errors
    /// Any failure, including an unknown song, means the song cannot be added.
    async fn fetch_details(&self, group: &str, song: &str) -> Result<SongDetail>;
}

/// HTTP client for the external song-detail API
pub struct HttpEnrichmentClient {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout: Duration,
}

impl HttpEnrichmentClient {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            timeout,
        }
    }

    fn request_url(&self, group: &str, song: &str) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}group={}&song={}",
            self.base_url,
            separator,
            urlencoding::encode(group),
            urlencoding::encode(song)
        )
    }
}

#[async_trait]
impl EnrichmentSource for HttpEnrichmentClient {
    #[instrument(skip(self))]
    async fn fetch_details(&self, group: &str, song: &str) -> Result<SongDetail> {
        let url = self.request_url(group, song);
        let request = HttpRequest::get(&url)
            .header("Accept", "application/json")
            .timeout(self.timeout);

        let response = self.http_client.execute(request).await.map_err(|e| {
            warn!(error = %e, "Enrichment request failed");
            MetadataError::Bridge(e)
        })?;

        if response.status == 404 {
            return Err(MetadataError::NotFound {
                group: group.to_string(),
                song: song.to_string(),
            });
        }

        if !response.is_success() {
            warn!(status = response.status, "Enrichment API returned an error");
            return Err(MetadataError::UpstreamStatus(response.status));
        }

        let detail: SongDetail = response
            .json()
            .map_err(|e| MetadataError::InvalidResponse(e.to_string()))?;

        debug!(release_date = %detail.release_date, "Fetched song details");
        Ok(detail)
    }
}

/// Enrichment source used when no API URL is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredEnrichment;

#[async_trait]
impl EnrichmentSource for UnconfiguredEnrichment {
    async fn fetch_details(&self, _group: &str, _song: &str) -> Result<SongDetail> {
        Err(MetadataError::NotConfigured("EXTERNAL_API_URL is not set".to_string()))
    }
}
