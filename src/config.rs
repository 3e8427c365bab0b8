// src/config.rs

use std::time::Duration;

/// Everything one batch run needs, constructed once in `main` and passed
/// down. Dropped when the run ends; nothing survives across runs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Exact header name of the input column holding product-page URLs.
    pub url_column: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retries after the first attempt, transient failures only.
    pub max_retries: u32,
    /// First retry delay; doubles on each subsequent retry.
    pub initial_backoff: Duration,
    /// Concurrent fetches.
    pub concurrency: usize,
    /// Write a checkpoint spreadsheet every N completed rows. 0 disables.
    pub checkpoint_every: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            url_column: "URL".to_string(),
            timeout: Duration::from_secs(20),
            max_retries: 2,
            initial_backoff: Duration::from_millis(500),
            concurrency: 10,
            checkpoint_every: 100,
        }
    }
}
