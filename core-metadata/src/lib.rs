//! # Song Enrichment
//!
//! Fetches the details a new song is created from (release date, lyrics and
//! link) from an external song-detail API.
//!
//! ## Overview
//!
//! - [`EnrichmentSource`] is the seam the service layer depends on
//! - [`HttpEnrichmentClient`] queries `GET {base_url}?group=..&song=..`
//!   through the host [`bridge_traits::HttpClient`]
//! - [`UnconfiguredEnrichment`] stands in when no API URL is configured
//!
//! Every call is a single attempt. Retry policy belongs to the caller.

pub mod enrichment;
pub mod error;

pub use enrichment::{EnrichmentSource, HttpEnrichmentClient, SongDetail, UnconfiguredEnrichment};
pub use error::{MetadataError, Result};
