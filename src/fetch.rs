// src/fetch.rs

use std::time::Duration;

use reqwest::Client;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::RunConfig;
use crate::error::RowError;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Run-scoped HTTP client. Built once per batch from the run configuration
/// and shared by every fetch task; dropped when the run ends.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    timeout: Duration,
    max_retries: u32,
    initial_backoff: Duration,
}

impl Fetcher {
    pub fn new(cfg: &RunConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(cfg.timeout)
            .cookie_store(true)
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            timeout: cfg.timeout,
            max_retries: cfg.max_retries,
            initial_backoff: cfg.initial_backoff,
        })
    }

    /// GET `url` and return the response body. Transient failures (timeout,
    /// connection error, HTTP 429/5xx) are retried with doubling backoff up
    /// to the configured limit; other non-2xx statuses fail immediately.
    /// Failures come back as row markers, never as batch aborts.
    pub async fn fetch_page(&self, url: &str) -> Result<String, RowError> {
        if !url.starts_with("http") {
            return Err(RowError::InvalidUrl(url.to_string()));
        }

        let mut attempts = 0;
        loop {
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempts < self.max_retries && is_transient(&e) => {
                    attempts += 1;
                    let backoff = self.initial_backoff * 2u32.pow(attempts - 1);
                    warn!(
                        %url,
                        attempt = attempts,
                        delay_ms = backoff.as_millis() as u64,
                        error = %e,
                        "retrying"
                    );
                    sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String, RowError> {
        debug!(%url, "GET");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RowError::Status(status.as_u16()));
        }
        resp.text().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, e: reqwest::Error) -> RowError {
        if e.is_timeout() {
            RowError::Timeout(self.timeout.as_secs())
        } else if let Some(status) = e.status() {
            RowError::Status(status.as_u16())
        } else {
            RowError::Connect(e.to_string())
        }
    }
}

fn is_transient(e: &RowError) -> bool {
    match e {
        RowError::Timeout(_) | RowError::Connect(_) => true,
        RowError::Status(code) => *code == 429 || *code >= 500,
        _ => false,
    }
}
