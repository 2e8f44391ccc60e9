use core_library::LibraryError;
use core_metadata::MetadataError;
use thiserror::Error;

/// Closed set of failure kinds the transport maps to responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidInput,
    StoreUnavailable,
    EnrichmentUnavailable,
    InitializationFailed,
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Core initialization failed: {0}")]
    InitializationFailed(String),

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Enrichment unavailable: {0}")]
    EnrichmentUnavailable(String),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InitializationFailed(_) => ErrorKind::InitializationFailed,
            CoreError::NotFound { .. } => ErrorKind::NotFound,
            CoreError::Conflict(_) => ErrorKind::Conflict,
            CoreError::InvalidInput { .. } => ErrorKind::InvalidInput,
            CoreError::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
            CoreError::EnrichmentUnavailable(_) => ErrorKind::EnrichmentUnavailable,
        }
    }

    pub fn song_not_found(id: &str) -> Self {
        CoreError::NotFound {
            entity_type: "Song".to_string(),
            id: id.to_string(),
        }
    }

    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<LibraryError> for CoreError {
    fn from(error: LibraryError) -> Self {
        match error {
            LibraryError::NotFound { entity_type, id } => CoreError::NotFound { entity_type, id },
            LibraryError::Conflict { message, .. } => CoreError::Conflict(message),
            LibraryError::InvalidInput { field, message } => {
                CoreError::InvalidInput { field, message }
            }
            unavailable @ (LibraryError::Database(_)
            | LibraryError::Migration(_)
            | LibraryError::Timeout(_)) => CoreError::StoreUnavailable(unavailable.to_string()),
        }
    }
}

impl From<MetadataError> for CoreError {
    fn from(error: MetadataError) -> Self {
        CoreError::EnrichmentUnavailable(error.to_string())
    }
}

impl From<core_runtime::Error> for CoreError {
    fn from(error: core_runtime::Error) -> Self {
        CoreError::InitializationFailed(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
