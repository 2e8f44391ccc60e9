use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Conflict: {entity_type} - {message}")]
    Conflict { entity_type: String, message: String },

    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),
}

impl LibraryError {
    /// Classifies a failed write: unique-constraint violations become
    /// `Conflict`, everything else stays a database error.
    pub fn from_write(error: sqlx::Error, entity_type: &str, message: impl Into<String>) -> Self {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => LibraryError::Conflict {
                entity_type: entity_type.to_string(),
                message: message.into(),
            },
            _ => LibraryError::Database(error),
        }
    }

    /// True for transport, pool and timeout failures.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            LibraryError::Database(_) | LibraryError::Migration(_) | LibraryError::Timeout(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;
