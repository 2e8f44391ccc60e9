use thiserror::Error;

/// Failures reported by host capability adapters
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The capability could not be reached at all (no route, refused, DNS)
    #[error("Capability not available: {0}")]
    NotAvailable(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("Timed out: {0}")]
    Timeout(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
