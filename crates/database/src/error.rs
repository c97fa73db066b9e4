// In crates/database/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to connect to the database")]
    ConnectionError(#[from] sqlx::Error),
    #[error("Database migration failed: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
    #[error("Database operation failed")]
    OperationFailed(sqlx::Error),
    /// A write would have broken a unique index. `field` is the document key.
    #[error("Duplicate value for unique field `{field}`")]
    DuplicateKey { field: String },
    #[error("Stored document does not match its schema: {0}")]
    MalformedDocument(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
