//! Cotejar CLI - inference latency benchmark comparator
//!
//! Benchmarks a local digit classifier against a remote benchmark service
//! and renders a side-by-side comparison.
//!
//! # Commands
//!
//! - `run` - Full comparison pipeline (local benchmark, remote fetch, compare)
//! - `local` - Local benchmark only
//! - `classify` - Single prediction for a payload
//! - `probe` - Liveness probe against the remote service
//! - `info` - Show version and configuration info

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cotejar::bench::{run_local_benchmark, BenchConfig};
use cotejar::compare::compare;
use cotejar::error::{CotejarError, Result};
use cotejar::http_client::{RemoteBenchClient, RemoteConfig};
use cotejar::model::{DenseClassifier, InferenceModel};
use cotejar::payload::PixelSample;
use cotejar::report;

/// Cotejar - side-by-side inference latency benchmarking
///
/// Runs a local inference loop over one fixed sample, fetches equivalent
/// statistics from a remote benchmark endpoint, and compares the two.
#[derive(Parser)]
#[command(name = "cotejar")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full comparison pipeline
    ///
    /// Examples:
    ///   cotejar run
    ///   cotejar run --endpoint http://bench-host:8080 --iterations 200
    ///   cotejar run --output comparison.json
    Run {
        /// Path to the classifier weight dump (JSON)
        #[arg(long, default_value = "mnist_weights.json")]
        weights: PathBuf,

        /// Path to the fixed input sample (JSON)
        #[arg(long, default_value = "payload.json")]
        payload: PathBuf,

        /// Base URL of the remote benchmark service
        #[arg(short, long, default_value = "http://localhost:8080")]
        endpoint: String,

        /// Number of timed iterations (both sides)
        #[arg(short, long, default_value = "100")]
        iterations: usize,

        /// Number of warmup iterations (both sides)
        #[arg(short, long, default_value = "10")]
        warmup: usize,

        /// Benchmark request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,

        /// Liveness probe timeout in seconds
        #[arg(long, default_value = "2")]
        probe_timeout: u64,

        /// Output file for the JSON comparison report
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the local benchmark only
    Local {
        /// Path to the classifier weight dump (JSON)
        #[arg(long, default_value = "mnist_weights.json")]
        weights: PathBuf,

        /// Path to the fixed input sample (JSON)
        #[arg(long, default_value = "payload.json")]
        payload: PathBuf,

        /// Number of timed iterations
        #[arg(short, long, default_value = "100")]
        iterations: usize,

        /// Number of warmup iterations
        #[arg(short, long, default_value = "10")]
        warmup: usize,
    },
    /// Classify a payload once and print the prediction
    Classify {
        /// Path to the classifier weight dump (JSON)
        #[arg(long, default_value = "mnist_weights.json")]
        weights: PathBuf,

        /// Path to the input sample (JSON)
        #[arg(long, default_value = "payload.json")]
        payload: PathBuf,
    },
    /// Probe the remote service for liveness
    Probe {
        /// Base URL of the remote benchmark service
        #[arg(short, long, default_value = "http://localhost:8080")]
        endpoint: String,

        /// Probe timeout in seconds
        #[arg(long, default_value = "2")]
        probe_timeout: u64,
    },
    /// Show version and configuration info
    Info,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = dispatch(cli.command) {
        eprintln!();
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            weights,
            payload,
            endpoint,
            iterations,
            warmup,
            timeout,
            probe_timeout,
            output,
        } => run_comparison(
            &weights,
            &payload,
            endpoint,
            iterations,
            warmup,
            timeout,
            probe_timeout,
            output.as_deref(),
        ),
        Commands::Local {
            weights,
            payload,
            iterations,
            warmup,
        } => run_local_only(&weights, &payload, iterations, warmup),
        Commands::Classify { weights, payload } => run_classify(&weights, &payload),
        Commands::Probe {
            endpoint,
            probe_timeout,
        } => run_probe(endpoint, probe_timeout),
        Commands::Info => {
            print_info();
            Ok(())
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn run_comparison(
    weights: &std::path::Path,
    payload: &std::path::Path,
    endpoint: String,
    iterations: usize,
    warmup: usize,
    timeout: u64,
    probe_timeout: u64,
    output: Option<&std::path::Path>,
) -> Result<()> {
    println!("Cotejar v{} - local vs remote inference benchmark", cotejar::VERSION);
    println!();
    println!("Configuration:");
    println!("  Weights:    {}", weights.display());
    println!("  Payload:    {}", payload.display());
    println!("  Endpoint:   {endpoint}");
    println!("  Iterations: {iterations} ({warmup} warmup)");
    println!();

    let sample = PixelSample::from_json_file(payload)?;
    let model = DenseClassifier::from_json_file(weights)?;
    println!("✓ Loaded classifier ({} hidden units)", model.hidden_units());

    println!("Running local benchmark...");
    let local = run_local_benchmark(&model, &sample, &BenchConfig::new(iterations, warmup))?;
    println!("✓ Local benchmark complete");

    println!("Fetching remote benchmark from {endpoint}...");
    let client = RemoteBenchClient::new(RemoteConfig {
        base_url: endpoint,
        probe_timeout_secs: probe_timeout,
        request_timeout_secs: timeout,
        ..Default::default()
    });
    let remote = client.fetch_benchmark(&sample, iterations, warmup)?;
    println!("✓ Remote benchmark complete");
    println!();

    let report = compare(&local, &remote);
    report::print_comparison(&report);

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&report).map_err(|e| CotejarError::Format {
            reason: format!("Failed to serialize report: {e}"),
        })?;
        std::fs::write(path, json)?;
        println!();
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn run_local_only(
    weights: &std::path::Path,
    payload: &std::path::Path,
    iterations: usize,
    warmup: usize,
) -> Result<()> {
    let sample = PixelSample::from_json_file(payload)?;
    let model = DenseClassifier::from_json_file(weights)?;

    println!("Running local benchmark ({iterations} iterations, {warmup} warmup)...");
    let summary = run_local_benchmark(&model, &sample, &BenchConfig::new(iterations, warmup))?;
    println!();
    report::print_summary("LOCAL", &summary);
    Ok(())
}

fn run_classify(weights: &std::path::Path, payload: &std::path::Path) -> Result<()> {
    let sample = PixelSample::from_json_file(payload)?;
    let model = DenseClassifier::from_json_file(weights)?;

    let eval = model.evaluate(&sample)?;
    println!(
        "Predicted digit: {} (confidence {:.6})",
        eval.predicted_digit, eval.confidence
    );
    Ok(())
}

fn run_probe(endpoint: String, probe_timeout: u64) -> Result<()> {
    let client = RemoteBenchClient::new(RemoteConfig {
        base_url: endpoint,
        probe_timeout_secs: probe_timeout,
        ..Default::default()
    });
    client.probe()?;
    println!("✓ Service is up at {}", client.config().base_url);
    Ok(())
}

fn print_info() {
    println!("Cotejar v{}", cotejar::VERSION);
    println!("Side-by-side inference latency benchmarking");
    println!();
    println!("Defaults:");
    println!("  Endpoint:        http://localhost:8080");
    println!("  Benchmark path:  /api/mnist/benchmark");
    println!("  Iterations:      100 (10 warmup)");
    println!("  Probe timeout:   2s");
    println!("  Request timeout: 30s");
    println!();
    println!("Pipeline: local benchmark -> remote fetch -> compare -> render");
    println!("Sequential by design; every failure is terminal (no retries).");
}
