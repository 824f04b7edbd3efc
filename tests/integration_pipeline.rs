//! Integration tests for the benchmark pipeline (no network required)
//!
//! Drives the local benchmark through the public API with a stub model,
//! pairs it with a synthetic remote summary, and checks the comparison
//! end to end. The network leg is covered separately by the error-path
//! tests in `http_client`.

use cotejar::bench::{run_local_benchmark, BenchConfig, BenchmarkSummary};
use cotejar::compare::{compare, FasterSide};
use cotejar::error::Result;
use cotejar::model::{DenseClassifier, Evaluation, InferenceModel, ModelWeights, CLASS_COUNT};
use cotejar::payload::{PixelSample, PIXEL_COUNT};

/// Stub model with a fixed prediction
struct FixedModel {
    digit: u8,
}

impl InferenceModel for FixedModel {
    fn evaluate(&self, _sample: &PixelSample) -> Result<Evaluation> {
        let mut scores = vec![0.0_f32; CLASS_COUNT];
        scores[self.digit as usize] = 1.0;
        Ok(Evaluation {
            scores,
            predicted_digit: self.digit,
            confidence: 1.0,
        })
    }
}

fn sample() -> PixelSample {
    PixelSample::new(vec![0.0; PIXEL_COUNT]).expect("valid sample")
}

/// Remote summary as the service would report it
fn remote_summary(average_ms: f64, digit: u8) -> BenchmarkSummary {
    let json = format!(
        r#"{{
            "predictedDigit": {digit},
            "confidence": 0.98,
            "averageMs": {average_ms},
            "medianMs": {average_ms},
            "minMs": {average_ms},
            "maxMs": {average_ms},
            "stdDevMs": 0.0,
            "p95Ms": {average_ms},
            "p99Ms": {average_ms},
            "throughputPerSec": {throughput},
            "iterations": 100,
            "warmupIterations": 10
        }}"#,
        throughput = 1000.0 / average_ms,
    );
    serde_json::from_str(&json).expect("wire-format summary")
}

#[test]
fn test_local_benchmark_through_public_api() {
    let model = FixedModel { digit: 7 };
    let config = BenchConfig::new(50, 5);

    let local = run_local_benchmark(&model, &sample(), &config).expect("benchmark");

    assert_eq!(local.iterations, 50);
    assert_eq!(local.warmup_iterations, 5);
    assert_eq!(local.predicted_digit, 7);
    assert!(local.average_ms >= 0.0);
    assert!(local.min_ms <= local.max_ms);
    assert!(local.throughput_per_sec > 0.0);
}

#[test]
fn test_pipeline_local_vs_synthetic_remote() {
    let model = FixedModel { digit: 7 };
    let local = run_local_benchmark(&model, &sample(), &BenchConfig::new(20, 2))
        .expect("local benchmark");

    // A stub evaluation is far below a millisecond; 1000ms remote average
    // guarantees the local side wins deterministically
    let remote = remote_summary(1000.0, 7);
    let report = compare(&local, &remote);

    assert_eq!(report.faster, FasterSide::Local);
    assert!(report.speedup >= 1.0);
    assert!(report.predictions_match);
    assert!(report.difference_ms > 0.0);
}

#[test]
fn test_pipeline_detects_prediction_mismatch() {
    let model = FixedModel { digit: 3 };
    let local = run_local_benchmark(&model, &sample(), &BenchConfig::new(5, 1))
        .expect("local benchmark");

    let remote = remote_summary(1.0, 8);
    let report = compare(&local, &remote);

    assert!(!report.predictions_match);
}

#[test]
fn test_dense_classifier_runs_under_benchmark_loop() {
    // Minimal valid dense model: one hidden unit, class 0 dominant
    let weights = ModelWeights {
        hidden_weights: vec![vec![0.0; PIXEL_COUNT]],
        hidden_bias: vec![1.0],
        output_weights: {
            let mut rows = vec![vec![0.0]; CLASS_COUNT];
            rows[0] = vec![3.0];
            rows
        },
        output_bias: vec![0.0; CLASS_COUNT],
    };
    let model = DenseClassifier::new(weights).expect("valid weights");

    let summary = run_local_benchmark(&model, &sample(), &BenchConfig::new(10, 2))
        .expect("benchmark over dense model");

    assert_eq!(summary.predicted_digit, 0);
    assert!(summary.confidence > 0.5);
    assert_eq!(summary.iterations, 10);
}

#[test]
fn test_comparison_report_round_trips_as_json() {
    let local = remote_summary(5.0, 7);
    let remote = remote_summary(10.0, 7);
    let report = compare(&local, &remote);

    let json = serde_json::to_string_pretty(&report).expect("serialize");
    let parsed: cotejar::compare::ComparisonReport =
        serde_json::from_str(&json).expect("deserialize");

    assert_eq!(parsed.faster, FasterSide::Local);
    assert!((parsed.speed_ratio - 2.0).abs() < 1e-12);
    assert!(parsed.predictions_match);
}
