use sea_orm::DbErr;
use thiserror::Error;

/// Errors raised while reading the ledger store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Type alias for Result with StoreError
pub type Result<T> = std::result::Result<T, StoreError>;
