//! Common error types for the movie popularity service

use thiserror::Error;

/// Common result type for mpop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the pipeline and the service
///
/// Data-quality problems in upstream responses are not represented here:
/// malformed rows are skipped and empty responses become zero-valued facts.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid call-time argument (e.g. an inverted year range)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
