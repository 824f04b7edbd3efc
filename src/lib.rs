//! # Cotejar
//!
//! Side-by-side inference latency benchmarking: a local digit classifier
//! against a remote benchmark service.
//!
//! Cotejar (Spanish: "to collate, to compare side by side") runs a local
//! inference loop for one fixed input, computes descriptive statistics on
//! the measured latencies, fetches equivalent pre-aggregated statistics
//! from a remote benchmark endpoint, and produces a structured comparison.
//!
//! ## Pipeline
//!
//! ```text
//! run_local_benchmark -> fetch_remote_benchmark -> compare -> render
//! ```
//!
//! Strictly sequential by design: interleaving local and remote measurement
//! would bias the comparison through CPU contention. Every failure is
//! terminal for the run; there are no retries.
//!
//! ## Example
//!
//! ```rust
//! use cotejar::bench::BenchmarkSummary;
//! use cotejar::compare::{compare, FasterSide};
//!
//! let local = BenchmarkSummary::from_timings(&[5.0; 10], 7, 0.99, 10);
//! let remote = BenchmarkSummary::from_timings(&[10.0; 10], 7, 0.98, 10);
//!
//! let report = compare(&local, &remote);
//! assert_eq!(report.faster, FasterSide::Local);
//! assert!(report.predictions_match);
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
// Clippy allows (MUST come after deny/warn to override them)
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)] // usize -> f64 for statistics is acceptable
#![allow(clippy::cast_possible_truncation)] // argmax index fits in u8 (10 classes)
#![allow(clippy::must_use_candidate)]
#![allow(clippy::uninlined_format_args)] // Prefer explicit format args
#![allow(clippy::float_cmp)] // Allow float comparisons in tests

pub mod bench;
pub mod compare;
pub mod error;
pub mod http_client;
pub mod model;
pub mod payload;
pub mod report;

// Re-exports for convenience
pub use error::{CotejarError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.starts_with("0."));
        assert!(VERSION.contains('.'));
    }
}
