pub mod browser;
pub mod config;
pub mod dedup;
pub mod export;
pub mod orchestrator;
pub mod page;
pub mod probe;
mod ratelimit;
pub mod record;
pub mod requests;
pub mod scraping_context;
pub mod sites;
mod text_manipulators;

pub use browser::{Browser, BrowserOptions, WebDriverSession};
pub use config::{LoadFromEnv, RunConfig, ScrapingEnv};
pub use orchestrator::{RunSummary, collect, run, run_with};
pub use page::Pacing;
pub use record::{LearningMode, Platform, Record};
pub use requests::{Fetcher, RequestClient};
pub use scraping_context::ScrapingContext;
