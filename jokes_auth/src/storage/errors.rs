use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("Unsupported data store type: {0}")]
    UnsupportedBackend(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
