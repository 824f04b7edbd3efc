//! Local latency benchmarking and descriptive statistics
//!
//! Implements the measurement loop: warmup calls whose results are
//! discarded, then a fixed number of timed calls against a monotonic clock,
//! then one extra call to capture the predicted class for correctness
//! reporting.
//!
//! Percentiles use the nearest-rank method (`ceil(n * p / 100) - 1` index
//! into the sorted samples), the same convention the remote benchmark
//! service applies, so the two sides are directly comparable. Standard
//! deviation is the sample standard deviation (n-1 divisor), reported as 0
//! for a single sample.

#![allow(clippy::cast_precision_loss)] // Statistical functions need usize->f64

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{CotejarError, Result};
use crate::model::InferenceModel;
use crate::payload::PixelSample;

/// Default number of measured iterations
pub const DEFAULT_ITERATIONS: usize = 100;

/// Default number of warmup iterations
pub const DEFAULT_WARMUP_ITERATIONS: usize = 10;

/// Configuration for a local benchmark run
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Number of timed inference calls
    pub iterations: usize,
    /// Discarded calls before measurement begins (excludes cold-start cost)
    pub warmup_iterations: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            warmup_iterations: DEFAULT_WARMUP_ITERATIONS,
        }
    }
}

impl BenchConfig {
    /// Create a config with explicit iteration counts
    #[must_use]
    pub fn new(iterations: usize, warmup_iterations: usize) -> Self {
        Self {
            iterations,
            warmup_iterations,
        }
    }

    /// Validate that both iteration counts are positive
    ///
    /// # Errors
    /// Returns `CotejarError::InvalidConfig` if either count is zero.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(CotejarError::InvalidConfig {
                reason: "iterations must be > 0".to_string(),
            });
        }
        if self.warmup_iterations == 0 {
            return Err(CotejarError::InvalidConfig {
                reason: "warmup iterations must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Aggregate latency and prediction summary for one benchmark run
///
/// Read-only once constructed. Field names map to the remote service's
/// camelCase wire format (`averageMs`, `predictedDigit`, ...), so the same
/// type covers both the locally computed and the remotely fetched case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkSummary {
    /// Class predicted for the benchmark sample
    pub predicted_digit: u8,
    /// Probability of the predicted class (0-1)
    pub confidence: f32,
    /// Arithmetic mean latency (ms)
    pub average_ms: f64,
    /// Median latency (ms)
    pub median_ms: f64,
    /// Minimum latency (ms)
    pub min_ms: f64,
    /// Maximum latency (ms)
    pub max_ms: f64,
    /// Sample standard deviation (ms), 0 for a single sample
    pub std_dev_ms: f64,
    /// 95th percentile latency (ms), nearest-rank
    pub p95_ms: f64,
    /// 99th percentile latency (ms), nearest-rank
    pub p99_ms: f64,
    /// Inferences per second (1000 / average)
    pub throughput_per_sec: f64,
    /// Number of timed iterations behind these statistics
    pub iterations: usize,
    /// Number of warmup iterations that preceded measurement
    pub warmup_iterations: usize,
}

impl BenchmarkSummary {
    /// Compute a summary from raw per-iteration timings (ms)
    ///
    /// Returns an all-zero summary for an empty timing sequence.
    #[must_use]
    pub fn from_timings(
        timings_ms: &[f64],
        predicted_digit: u8,
        confidence: f32,
        warmup_iterations: usize,
    ) -> Self {
        if timings_ms.is_empty() {
            return Self {
                predicted_digit,
                confidence,
                average_ms: 0.0,
                median_ms: 0.0,
                min_ms: 0.0,
                max_ms: 0.0,
                std_dev_ms: 0.0,
                p95_ms: 0.0,
                p99_ms: 0.0,
                throughput_per_sec: 0.0,
                iterations: 0,
                warmup_iterations,
            };
        }

        let mut sorted = timings_ms.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let average_ms = mean(timings_ms);
        let throughput_per_sec = if average_ms > 0.0 {
            1000.0 / average_ms
        } else {
            0.0
        };

        Self {
            predicted_digit,
            confidence,
            average_ms,
            median_ms: median_sorted(&sorted),
            min_ms: sorted[0],
            max_ms: sorted[sorted.len() - 1],
            std_dev_ms: sample_std_dev(timings_ms),
            p95_ms: percentile_sorted(&sorted, 95.0),
            p99_ms: percentile_sorted(&sorted, 99.0),
            throughput_per_sec,
            iterations: timings_ms.len(),
            warmup_iterations,
        }
    }
}

/// Run the local benchmark loop against a loaded model
///
/// Executes `warmup_iterations` discarded calls, then `iterations` timed
/// calls at millisecond resolution, then one additional call to extract the
/// predicted class and confidence.
///
/// # Errors
/// Returns `CotejarError::InvalidConfig` if an iteration count is zero, or
/// `CotejarError::Inference` if any call fails. Inference failures abort
/// the run immediately; nothing is retried.
pub fn run_local_benchmark(
    model: &dyn InferenceModel,
    sample: &PixelSample,
    config: &BenchConfig,
) -> Result<BenchmarkSummary> {
    config.validate()?;

    for _ in 0..config.warmup_iterations {
        model.evaluate(sample)?;
    }

    let mut timings_ms = Vec::with_capacity(config.iterations);
    for _ in 0..config.iterations {
        let start = Instant::now();
        model.evaluate(sample)?;
        timings_ms.push(start.elapsed().as_secs_f64() * 1000.0);
    }

    // One extra call for correctness reporting, outside the timed window
    let eval = model.evaluate(sample)?;

    Ok(BenchmarkSummary::from_timings(
        &timings_ms,
        eval.predicted_digit,
        eval.confidence,
        config.warmup_iterations,
    ))
}

fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Sample standard deviation (n-1 divisor), 0 for fewer than two samples
fn sample_std_dev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let n = data.len() as f64;
    let m = mean(data);
    let variance = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Nearest-rank percentile over pre-sorted samples
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let idx = ((sorted.len() as f64 * p / 100.0).ceil() as usize)
        .saturating_sub(1)
        .min(sorted.len() - 1);
    sorted[idx]
}
