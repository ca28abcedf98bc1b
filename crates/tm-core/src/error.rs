//! Error taxonomy shared across the TaskMatch crates

use thiserror::Error;

/// Errors raised by the TaskMatch system
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure: the service could not be reached at all
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status. The payload is the
    /// server-supplied `detail` message when present, so it renders verbatim.
    #[error("{0}")]
    Service(String),

    /// Rejected locally before any network call
    #[error("validation error: {0}")]
    Validation(String),

    /// Hard CSV failure (missing header column, unreadable input).
    /// Malformed individual rows are `ParseIssue`s, not errors.
    #[error("csv error: {0}")]
    Csv(String),

    /// Bad environment or flag values
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
