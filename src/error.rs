//! Error types for cotejar operations
//!
//! Every failure in a benchmark run is terminal: there are no retries
//! anywhere in the pipeline. Errors carry enough context (endpoint, HTTP
//! status, response body) to print a useful diagnostic before exiting.

use thiserror::Error;

/// Result type for cotejar operations
pub type Result<T> = std::result::Result<T, CotejarError>;

/// Error type for benchmark comparison operations
#[derive(Debug, Error)]
pub enum CotejarError {
    /// Local model could not produce output for the sample
    #[error("Inference failed: {0}")]
    Inference(String),

    /// Liveness probe against the remote service failed
    #[error("Benchmark service unavailable at {endpoint}: {reason}")]
    ServiceUnavailable {
        /// Base URL that did not respond
        endpoint: String,
        /// Transport-level failure description
        reason: String,
    },

    /// Benchmark call returned non-200 or failed in transit
    #[error("Benchmark request failed: {reason}")]
    RequestFailed {
        /// Status code and body, or the transport exception message
        reason: String,
    },

    /// Malformed weights, payload, or response data
    #[error("Format error: {reason}")]
    Format {
        /// Description of the malformation
        reason: String,
    },

    /// Invalid run configuration (e.g. zero iterations)
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error
        reason: String,
    },

    /// I/O failure reading weights or payload files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
