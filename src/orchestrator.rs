use std::path::PathBuf;

use log::{info, warn};

use crate::{
    browser::{Browser, WebDriverSession},
    config::RunConfig,
    dedup::dedup_by_link,
    export::export_csv,
    record::{Platform, Record},
    requests::{Fetcher, RequestClient},
    scraping_context::ScrapingContext,
    sites,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Records produced by all sites, duplicates included.
    pub scraped: usize,
    /// Rows written after deduplication.
    pub exported: usize,
    pub output: PathBuf,
}

/// Runs every platform in turn. A failing platform is logged and contributes
/// nothing; it never stops the others.
pub async fn collect<B: Browser, F: Fetcher>(
    ctx: &mut ScrapingContext<B, F>,
    platforms: &[Platform],
    query: &str,
    per_site: usize,
) -> Vec<Record> {
    let mut all_records = Vec::new();
    for &platform in platforms {
        match sites::scrape(ctx, platform, query, per_site).await {
            Ok(records) => {
                info!("{platform}: {} record(s)", records.len());
                all_records.extend(records);
            }
            Err(e) => warn!("{platform} scraping failed: {e:#}"),
        }
    }
    all_records
}

/// Scrapes with an already opened context, releases the browser, then
/// deduplicates and exports.
pub async fn run_with<B: Browser, F: Fetcher>(
    mut ctx: ScrapingContext<B, F>,
    config: &RunConfig,
) -> anyhow::Result<RunSummary> {
    let records = collect(&mut ctx, &config.platforms, &config.query, config.per_site).await;
    if let Err(e) = ctx.close().await {
        warn!("Browser did not shut down cleanly: {e:#}");
    }

    let scraped = records.len();
    let unique = dedup_by_link(records);
    let exported = export_csv(&config.out, &unique)?;
    info!("Saved {exported} records to {}", config.out.display());
    Ok(RunSummary {
        scraped,
        exported,
        output: config.out.clone(),
    })
}

pub async fn run(config: &RunConfig) -> anyhow::Result<RunSummary> {
    let fetcher = RequestClient::new(&config.user_agent)?;
    let browser = WebDriverSession::launch(&config.browser).await?;
    let ctx = ScrapingContext::new(browser, fetcher, config.pacing.clone());
    run_with(ctx, config).await
}
