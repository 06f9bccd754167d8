use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use thiserror::Error;
use volby_model::{AggregatedTable, MunicipalityRef};

use crate::fetch::{FetchConfig, PageFetcher};
use crate::{municipality, output, region};

/// Prefix every detail link on a region page is relative to.
pub const DEFAULT_BASE_URL: &str = "https://www.volby.cz/pls/ps2017nss/";

/// Pause after each municipality, successful or not.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to load region page: {url}")]
    RegionUnavailable { url: String },
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Joined verbatim with each municipality link's `href`.
    pub base_url: String,
    pub request_delay: Duration,
    pub fetch: FetchConfig,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_delay: DEFAULT_REQUEST_DELAY,
            fetch: FetchConfig::default(),
        }
    }
}

/// Everything a region scrape produced.
#[derive(Debug)]
pub struct ScrapeReport {
    /// Municipalities listed on the region page.
    pub found: usize,
    pub table: AggregatedTable,
    /// Municipalities whose page could not be fetched or parsed.
    pub skipped: Vec<MunicipalityRef>,
}

/// How a completed run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Written {
        path: PathBuf,
        rows: usize,
        columns: usize,
    },
    /// No municipality produced a row; nothing was written.
    NoData,
}

/// Scrape every municipality listed on a region page.
///
/// Municipalities are processed one at a time in page order, pausing
/// `request_delay` after each. A municipality whose page fails to load or
/// parse is logged and skipped. Only a failure to load the region page
/// itself is an error.
pub async fn scrape_region(region_url: &str, config: &ScrapeConfig) -> Result<ScrapeReport> {
    let fetcher = PageFetcher::new(&config.fetch)?;

    tracing::info!(url = %region_url, "Loading list of municipalities");
    let Some(page) = fetcher.fetch(region_url).await else {
        return Err(ScrapeError::RegionUnavailable {
            url: region_url.to_string(),
        }
        .into());
    };

    let municipalities = region::extract_municipalities(&page.document, &config.base_url);
    let found = municipalities.len();
    tracing::info!(count = found, "Found municipalities");

    let mut table = AggregatedTable::new();
    let mut skipped = Vec::new();

    for (index, municipality) in municipalities.into_iter().enumerate() {
        tracing::info!(
            code = %municipality.code,
            name = %municipality.name,
            "[{}/{}] Processing",
            index + 1,
            found
        );

        match municipality::fetch_result(&fetcher, &municipality.detail_url).await {
            Some(result) => table.push(&municipality, result),
            None => {
                tracing::warn!(
                    code = %municipality.code,
                    name = %municipality.name,
                    "Skipped due to error"
                );
                skipped.push(municipality);
            }
        }

        tokio::time::sleep(config.request_delay).await;
    }

    Ok(ScrapeReport {
        found,
        table,
        skipped,
    })
}

/// Scrape a region and write its results to `output_path`.
///
/// When no municipality yields a row the file is not touched and
/// [`RunOutcome::NoData`] is returned.
pub async fn run(region_url: &str, output_path: &Path, config: &ScrapeConfig) -> Result<RunOutcome> {
    let report = scrape_region(region_url, config).await?;

    if report.table.is_empty() {
        tracing::warn!(
            found = report.found,
            skipped = report.skipped.len(),
            "No data was processed"
        );
        return Ok(RunOutcome::NoData);
    }

    let columns = output::write_csv(&report.table, output_path)?;
    tracing::info!(
        path = %output_path.display(),
        found = report.found,
        rows = report.table.len(),
        skipped = report.skipped.len(),
        "Data saved as CSV"
    );

    Ok(RunOutcome::Written {
        path: output_path.to_path_buf(),
        rows: report.table.len(),
        columns,
    })
}
