//! Terminal rendering for benchmark summaries and comparisons
//!
//! All console output lives here and in the CLI handlers; library modules
//! never print.

use crate::bench::BenchmarkSummary;
use crate::compare::{ComparisonReport, FasterSide};

const RULE_WIDTH: usize = 70;

fn heading(title: &str) {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{title}");
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Print a single summary as a labelled statistics table
pub fn print_summary(label: &str, summary: &BenchmarkSummary) {
    heading(&format!("{label} BENCHMARK"));
    println!("{:<14} {:>10.3} ms", "Average", summary.average_ms);
    println!("{:<14} {:>10.3} ms", "Median", summary.median_ms);
    println!("{:<14} {:>10.3} ms", "Min", summary.min_ms);
    println!("{:<14} {:>10.3} ms", "Max", summary.max_ms);
    println!("{:<14} {:>10.3} ms", "Std Dev", summary.std_dev_ms);
    println!("{:<14} {:>10.3} ms", "P95", summary.p95_ms);
    println!("{:<14} {:>10.3} ms", "P99", summary.p99_ms);
    println!(
        "{:<14} {:>10.0} pred/sec",
        "Throughput", summary.throughput_per_sec
    );
    println!(
        "{:<14} digit {} (confidence {:.6})",
        "Prediction", summary.predicted_digit, summary.confidence
    );
    println!(
        "{:<14} {} iterations, {} warmup",
        "Measured", summary.iterations, summary.warmup_iterations
    );
}

/// Print the full side-by-side comparison
pub fn print_comparison(report: &ComparisonReport) {
    heading("LATENCY COMPARISON (pure inference)");
    println!("{:<12} {:>15} {:>15}", "Metric", "Local", "Remote");
    println!("{}", "-".repeat(RULE_WIDTH));

    let rows = [
        ("Average", report.local.average_ms, report.remote.average_ms),
        ("Median", report.local.median_ms, report.remote.median_ms),
        ("Min", report.local.min_ms, report.remote.min_ms),
        ("Max", report.local.max_ms, report.remote.max_ms),
        ("Std Dev", report.local.std_dev_ms, report.remote.std_dev_ms),
        ("P95", report.local.p95_ms, report.remote.p95_ms),
        ("P99", report.local.p99_ms, report.remote.p99_ms),
    ];
    for (name, local, remote) in rows {
        println!("{name:<12} {local:>12.3} ms {remote:>12.3} ms");
    }

    println!("{}", "-".repeat(RULE_WIDTH));
    println!(
        "{:<12} {:>9.0} pred/sec {:>6.0} pred/sec",
        "Throughput", report.local.throughput_per_sec, report.remote.throughput_per_sec
    );
    println!();
    println!("{:<12} {}", "Performance", performance_line(report));
    println!(
        "{:<12} {:+.3} ms per inference (remote - local)",
        "Difference", report.difference_ms
    );

    heading("PREDICTION VERIFICATION");
    println!(
        "{:<12} digit {} (confidence {:.6})",
        "Local", report.local.predicted_digit, report.local.confidence
    );
    println!(
        "{:<12} digit {} (confidence {:.6})",
        "Remote", report.remote.predicted_digit, report.remote.confidence
    );
    if report.predictions_match {
        println!("✓ Both sides predict the same digit");
    } else {
        println!("✗ Predictions differ");
    }

    println!();
    println!(
        "Remote verified: {} iterations, {} warmup",
        report.remote.iterations, report.remote.warmup_iterations
    );
}

fn performance_line(report: &ComparisonReport) -> String {
    match report.faster {
        FasterSide::Local => format!("Local is {:.2}x FASTER than remote", report.speedup),
        FasterSide::Remote => format!("Remote is {:.2}x FASTER than local", report.speedup),
    }
}
