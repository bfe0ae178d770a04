//! Error types for the query engine

use crate::family::Family;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error raised by a [`QueryStore`](crate::store::QueryStore) implementation.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied filter or paging value is malformed.
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),

    /// The store could not execute a composed statement.
    #[error("Store execution failure: {0}")]
    StoreExecution(StoreError),

    /// A returned row does not match the family's projection.
    #[error("Malformed {family} row: {reason}")]
    MalformedRow { family: Family, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    pub fn invalid_criteria(message: impl Into<String>) -> Self {
        Error::InvalidCriteria(message.into())
    }

    pub fn store(err: impl Into<StoreError>) -> Self {
        Error::StoreExecution(err.into())
    }

    /// Whether the caller layer should report this as a client-side failure.
    ///
    /// Everything except invalid criteria is a server-side failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidCriteria(_))
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::StoreExecution(Box::new(err))
    }
}
