//! Crawler module for listing page fetching and extraction
//!
//! This module contains the scrape pipeline:
//! - HTTP transport through the Tor proxy with circuit rotation
//! - Resilient fetching with block detection and bounded retry
//! - Record extraction with configurable selectors
//! - Pagination planning and run coordination

mod coordinator;
mod extract;
mod fetch;
mod pagination;
mod transport;

pub use coordinator::{scrape, ScrapeOutcome};
pub use extract::{ExtractError, PageExtractor};
pub use fetch::{FetchError, ResilientFetcher};
pub use pagination::{page_url, PagePlan};
pub use transport::{TorTransport, Transport, TransportError};

use crate::config::Config;
use crate::output::{report_path, ReportSink, XlsxSink};
use crate::{listing, ScrapeError};
use std::path::PathBuf;

/// Scrapes with the given transport and writes the report through the given
/// sink
///
/// The report is only written once the whole walk has succeeded; a run that
/// fails mid-way produces no file at all.
pub async fn run_with<T, S>(
    config: &Config,
    transport: T,
    sink: &S,
) -> Result<PathBuf, ScrapeError>
where
    T: Transport,
    S: ReportSink,
{
    let outcome = scrape(config, transport).await?;

    std::fs::create_dir_all(&config.output.dir)?;
    let path = report_path(&config.output, chrono::Local::now());

    let rows: Vec<Vec<String>> = outcome.listings.iter().map(|l| l.to_row()).collect();
    sink.write(&listing::HEADER, &rows, &path)?;

    tracing::info!(
        "saved {} records to {}",
        outcome.listings.len(),
        path.display()
    );

    Ok(path)
}

/// Runs a complete scrape with the production transport and sink
///
/// This is the main entry point. It builds the Tor-backed transport from
/// configuration and writes the .xlsx report.
///
/// # Example
///
/// ```no_run
/// use autoru_dump::config::default_config;
/// use autoru_dump::crawler::run_scrape;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = default_config()?;
/// let report = run_scrape(&config).await?;
/// println!("report at {}", report.display());
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: &Config) -> Result<PathBuf, ScrapeError> {
    let transport = TorTransport::new(&config.proxy, &config.fetch.user_agent)?;
    let sink = XlsxSink::new();
    run_with(config, transport, &sink).await
}
