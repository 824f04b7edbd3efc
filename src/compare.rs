//! Pure comparison of two benchmark summaries
//!
//! No I/O; total on any two well-formed summaries. The ratio is always
//! reported relative to the slower side, so "faster by 2.00x" reads the
//! same whichever side won.

use serde::{Deserialize, Serialize};

use crate::bench::BenchmarkSummary;

/// Which side produced the lower average latency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FasterSide {
    /// Local inference was faster
    Local,
    /// Remote inference was faster (including exact ties)
    Remote,
}

/// Terminal output of a comparison run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Locally measured summary
    pub local: BenchmarkSummary,
    /// Remotely fetched summary
    pub remote: BenchmarkSummary,
    /// `remote.average_ms / local.average_ms`; > 1 means local is faster
    pub speed_ratio: f64,
    /// The faster side
    pub faster: FasterSide,
    /// Speed advantage of the faster side, always >= 1
    pub speedup: f64,
    /// `remote.average_ms - local.average_ms`
    pub difference_ms: f64,
    /// Whether both sides predicted the same digit (exact equality)
    pub predictions_match: bool,
}

/// Compare a local summary against a remote one
#[must_use]
pub fn compare(local: &BenchmarkSummary, remote: &BenchmarkSummary) -> ComparisonReport {
    let speed_ratio = remote.average_ms / local.average_ms;
    let (faster, speedup) = if speed_ratio > 1.0 {
        (FasterSide::Local, speed_ratio)
    } else {
        (FasterSide::Remote, 1.0 / speed_ratio)
    };

    ComparisonReport {
        local: local.clone(),
        remote: remote.clone(),
        speed_ratio,
        faster,
        speedup,
        difference_ms: remote.average_ms - local.average_ms,
        predictions_match: local.predicted_digit == remote.predicted_digit,
    }
}
