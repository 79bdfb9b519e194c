/// Errors raised by a [`DocumentStore`](crate::store::DocumentStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An insert hit an existing key. Carries the store-provided detail.
    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored document could not be decoded into its model.
    #[error("Document {key} is malformed: {reason}")]
    Corrupt { key: String, reason: String },
}

/// Errors from a data-access operation: either a domain rule was violated
/// (missing referenced document, bad credentials) or the store failed.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] taskboard_core::error::CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type RepoResult<T> = Result<T, RepoError>;
