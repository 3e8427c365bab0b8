// src/pipeline.rs

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::{mpsc, Semaphore};
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::extract;
use crate::fetch::Fetcher;
use crate::sheet::write;
use crate::types::{NormalizedRow, RowResult};

/// Counts reported after a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub parts_found: usize,
    pub codes_found: usize,
    pub elapsed: Duration,
}

impl RunStats {
    pub fn rows_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total as f64 / secs
        } else {
            0.0
        }
    }
}

pub fn summarize(results: &[RowResult], elapsed: Duration) -> RunStats {
    RunStats {
        total: results.len(),
        succeeded: results.iter().filter(|r| r.is_success()).count(),
        failed: results.iter().filter(|r| !r.is_success()).count(),
        parts_found: results.iter().filter(|r| r.part_number.is_some()).count(),
        codes_found: results.iter().filter(|r| r.code.is_some()).count(),
        elapsed,
    }
}

/// Fetch and extract every normalized row on a bounded worker pool,
/// reassembling results into input order before returning. Per-row failures
/// become failure markers in the results; only task plumbing aborts the run.
pub async fn run(
    cfg: &RunConfig,
    rows: Vec<NormalizedRow>,
    checkpoint: Option<&Path>,
) -> anyhow::Result<Vec<RowResult>> {
    let fetcher = Fetcher::new(cfg)?;
    let total = rows.len();
    let semaphore = Arc::new(Semaphore::new(cfg.concurrency));
    let (tx, mut rx) = mpsc::channel::<(usize, RowResult)>(cfg.concurrency * 2);

    for (idx, row) in rows.into_iter().enumerate() {
        let fetcher = fetcher.clone();
        let sem = Arc::clone(&semaphore);
        let tx = tx.clone();
        tokio::spawn(async move {
            let _permit = sem.acquire().await.expect("semaphore closed");
            let result = process_row(&fetcher, &row.url).await;
            let _ = tx.send((idx, result)).await;
        });
    }
    // drop the original sender so `rx.recv()` ends once all tasks finish
    drop(tx);

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let mut slots: Vec<Option<RowResult>> = vec![None; total];
    let mut completed = 0usize;
    while let Some((idx, result)) = rx.recv().await {
        if let Some(err) = &result.error {
            warn!(url = %result.url, error = %err, "row failed");
        }
        slots[idx] = Some(result);
        completed += 1;
        pb.inc(1);

        if cfg.checkpoint_every > 0 && completed % cfg.checkpoint_every == 0 && completed < total {
            if let Some(path) = checkpoint {
                let done: Vec<RowResult> = slots.iter().flatten().cloned().collect();
                if let Err(e) = write::write_results(path, &done) {
                    warn!(error = %e, "checkpoint write failed");
                }
            }
        }
    }
    pb.finish_and_clear();

    let results: Vec<RowResult> = slots
        .into_iter()
        .map(|s| s.expect("every spawned row sends exactly one result"))
        .collect();
    info!(
        total,
        failed = results.iter().filter(|r| !r.is_success()).count(),
        "batch complete"
    );
    Ok(results)
}

async fn process_row(fetcher: &Fetcher, url: &str) -> RowResult {
    match fetcher.fetch_page(url).await {
        Ok(html) => extract::extract_fields(url, &html),
        Err(err) => RowResult::failed(url, err),
    }
}
