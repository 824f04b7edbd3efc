//! HTTP client for the remote benchmark service
//!
//! The remote side runs its own warmup and measurement loop server-side and
//! returns pre-aggregated statistics; individual timings never cross the
//! wire, which keeps network overhead out of the comparison.
//!
//! A lightweight liveness probe (GET against the service root, short
//! timeout) gates the benchmark call. Any HTTP response counts as "service
//! up" regardless of status or body; only a transport failure marks the
//! service unavailable.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;

use crate::bench::BenchmarkSummary;
use crate::error::{CotejarError, Result};
use crate::payload::PixelSample;

/// Default base URL of the benchmark service
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default path of the server-side benchmark endpoint
pub const DEFAULT_BENCH_PATH: &str = "/api/mnist/benchmark";

/// Default liveness probe timeout (seconds)
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 2;

/// Default benchmark request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration for the remote benchmark service
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the service (probed for liveness)
    pub base_url: String,
    /// Path of the benchmark endpoint, joined onto the base URL
    pub bench_path: String,
    /// Timeout for the liveness probe (seconds)
    pub probe_timeout_secs: u64,
    /// Timeout for the benchmark call (seconds); the server runs its full
    /// measurement loop before responding, so this is the long one
    pub request_timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bench_path: DEFAULT_BENCH_PATH.to_string(),
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl RemoteConfig {
    /// Create a config for a service base URL with default paths and timeouts
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Full URL of the benchmark endpoint
    #[must_use]
    pub fn bench_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.bench_path.trim_start_matches('/')
        )
    }
}

/// JSON body for the benchmark call
#[derive(Debug, Clone, Serialize)]
struct BenchmarkRequest<'a> {
    pixels: &'a [f32],
}

/// Blocking HTTP client for the remote benchmark service
pub struct RemoteBenchClient {
    probe_client: Client,
    bench_client: Client,
    config: RemoteConfig,
}

impl RemoteBenchClient {
    /// Create a client for the given service configuration
    #[must_use]
    pub fn new(config: RemoteConfig) -> Self {
        let probe_client = Client::builder()
            .timeout(Duration::from_secs(config.probe_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");
        let bench_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            probe_client,
            bench_client,
            config,
        }
    }

    /// The service configuration this client was built with
    #[must_use]
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Liveness probe: GET against the service root
    ///
    /// Any HTTP response counts as "service up", regardless of status code
    /// or body.
    ///
    /// # Errors
    /// Returns `CotejarError::ServiceUnavailable` with the transport failure
    /// reason if no response arrives within the probe timeout.
    pub fn probe(&self) -> Result<()> {
        self.probe_client
            .get(&self.config.base_url)
            .send()
            .map(|_| ())
            .map_err(|e| CotejarError::ServiceUnavailable {
                endpoint: self.config.base_url.clone(),
                reason: e.to_string(),
            })
    }

    /// Run the server-side benchmark and fetch its aggregate statistics
    ///
    /// Probes for liveness first, then issues one POST with the sample as
    /// JSON body and the iteration counts as query parameters. The response
    /// echoes the counts for audit.
    ///
    /// # Errors
    /// - `CotejarError::ServiceUnavailable` if the probe or the POST fails
    ///   at the transport level
    /// - `CotejarError::RequestFailed` on a non-200 response, with the
    ///   status and response body captured
    /// - `CotejarError::Format` if the response body does not parse
    ///
    /// Every failure is terminal for the comparison; nothing is retried.
    pub fn fetch_benchmark(
        &self,
        sample: &PixelSample,
        iterations: usize,
        warmup: usize,
    ) -> Result<BenchmarkSummary> {
        self.probe()?;

        let url = self.config.bench_url();
        let response = self
            .bench_client
            .post(&url)
            .query(&[("iterations", iterations), ("warmup", warmup)])
            .json(&BenchmarkRequest {
                pixels: sample.pixels(),
            })
            .send()
            .map_err(|e| CotejarError::ServiceUnavailable {
                endpoint: url.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(CotejarError::RequestFailed {
                reason: format!("HTTP {status} from {url}: {body}"),
            });
        }

        response.json().map_err(|e| CotejarError::Format {
            reason: format!("Failed to parse benchmark response: {e}"),
        })
    }
}
