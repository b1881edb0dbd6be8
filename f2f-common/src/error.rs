//! Common error types for fridge2fork

use thiserror::Error;

/// Common result type for fridge2fork operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the fridge2fork crates
#[derive(Error, Debug)]
pub enum Error {
    /// Rejected user input (e.g. blank ingredient name)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Store used before hydration from the key-value store completed
    #[error("Store not ready: {0}")]
    NotReady(&'static str),

    /// Key-value store rejected a get/set/remove
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite backend error (wraps sqlx::Error)
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored JSON value could not be decoded
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Login attempted with unknown credentials
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures of the persistence layer, which are always
    /// degraded to defaults rather than surfaced to the user.
    pub fn is_storage(&self) -> bool {
        match self {
            Error::Storage(_) => true,
            #[cfg(feature = "sqlx")]
            Error::Database(_) => true,
            _ => false,
        }
    }
}
