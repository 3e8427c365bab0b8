use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use unspscraper::{config::RunConfig, normalize, pipeline, sheet};

#[derive(Parser)]
#[command(
    name = "unspscraper",
    about = "Extract UNSPSC codes from vendor product pages listed in a spreadsheet"
)]
struct Cli {
    /// Input spreadsheet (.csv, .xlsx or .xls) with one product-page URL per row
    input: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = "results.csv")]
    output: PathBuf,

    /// Exact name of the input column holding the URLs
    #[arg(long, default_value = "URL")]
    url_column: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 20)]
    timeout: u64,

    /// Retries per URL after the first attempt (transient failures only)
    #[arg(long, default_value_t = 2)]
    retries: u32,

    /// Concurrent fetches
    #[arg(short = 'j', long, default_value_t = 10)]
    concurrency: usize,

    /// Write a checkpoint spreadsheet every N completed rows (0 disables)
    #[arg(long, default_value_t = 100)]
    checkpoint_every: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    let cli = Cli::parse();
    let cfg = RunConfig {
        url_column: cli.url_column,
        timeout: Duration::from_secs(cli.timeout),
        max_retries: cli.retries,
        concurrency: cli.concurrency.max(1),
        checkpoint_every: cli.checkpoint_every,
        ..RunConfig::default()
    };

    let start = Instant::now();
    let raw = sheet::read::load_rows(&cli.input, &cfg.url_column)?;
    let rows = normalize::normalize(raw);
    info!(unique = rows.len(), "normalized input");

    let checkpoint = sheet::write::checkpoint_path(&cli.output);
    let results = pipeline::run(&cfg, rows, Some(&checkpoint)).await?;
    sheet::write::write_results(&cli.output, &results)?;

    let stats = pipeline::summarize(&results, start.elapsed());
    println!(
        "Processed {} rows in {:.1}s ({:.1}/s): {} ok, {} failed | parts found: {} | codes found: {}",
        stats.total,
        stats.elapsed.as_secs_f64(),
        stats.rows_per_sec(),
        stats.succeeded,
        stats.failed,
        stats.parts_found,
        stats.codes_found,
    );
    println!("Results written to {}", cli.output.display());

    Ok(())
}
