//! Error types for the request-level API

use thiserror::Error;

/// Errors that can occur before a request reaches the resolver
///
/// The resolver itself never fails; these only cover reading requests.
/// Configuration problems are reported as [`crate::ConfigError`].
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("invalid placement request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("request has neither a candidate nor a raw suggestion")]
    MissingCandidate,
}
