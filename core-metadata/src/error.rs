use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Enrichment source not configured: {0}")]
    NotConfigured(String),

    #[error("Song details not found for '{song}' by '{group}'")]
    NotFound { group: String, song: String },

    #[error("Enrichment API error: HTTP {0}")]
    UpstreamStatus(u16),

    #[error("Invalid enrichment response: {0}")]
    InvalidResponse(String),

    #[error("Bridge error: {0}")]
    Bridge(#[from] bridge_traits::error::BridgeError),
}

pub type Result<T> = std::result::Result<T, MetadataError>;
