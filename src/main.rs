use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::Parser;
use coursecrawl::{LoadFromEnv, Platform, RunConfig, ScrapingEnv};
use log::{LevelFilter, error, info};

/// Scrape IT courses (and job listings) from multiple platforms with a real
/// browser.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Search query keyword(s)
    #[arg(long, default_value = "information technology")]
    query: String,

    /// Max items per platform
    #[arg(long, default_value_t = 40)]
    per_site: usize,

    /// Output CSV path
    #[arg(long, default_value = "it_courses.csv")]
    out: PathBuf,

    /// Run Chrome in headless mode
    #[arg(long)]
    headless: bool,

    /// Platforms to scrape, in order
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = Platform::COURSES
    )]
    sites: Vec<Platform>,

    /// WebDriver endpoint (falls back to WEBDRIVER_URL)
    #[arg(long)]
    webdriver_url: Option<String>,

    /// Pause between scrolls while loading lazy content
    #[arg(long, default_value_t = 1200)]
    scroll_pause_ms: u64,

    /// Listing pages visited per job board
    #[arg(long, default_value_t = 3)]
    max_pages: usize,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    let env = match ScrapingEnv::load_from_env() {
        Ok(env) => env,
        Err(e) => {
            error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };
    let config = RunConfig::new(
        cli.query,
        cli.per_site,
        cli.out,
        cli.sites,
        cli.headless,
        cli.webdriver_url,
        env,
    )
    .with_pacing(Duration::from_millis(cli.scroll_pause_ms), cli.max_pages);

    match coursecrawl::run(&config).await {
        Ok(summary) => {
            info!(
                "Done: {} scraped, {} unique",
                summary.scraped, summary.exported
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
