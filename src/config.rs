use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    browser::BrowserOptions,
    page::Pacing,
    record::Platform,
    requests::DEFAULT_USER_AGENT,
};

/// The env vars that tune a scraping run.
#[derive(Debug, Default, Deserialize)]
pub struct ScrapingEnv {
    pub webdriver_url: Option<String>,
    pub chrome_binary: Option<String>,
    pub browser_lang: Option<String>,
    pub scraper_user_agent: Option<String>,
}

/// Everything a run needs, merged from the command line and the environment.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub query: String,
    pub per_site: usize,
    pub out: PathBuf,
    pub platforms: Vec<Platform>,
    pub browser: BrowserOptions,
    pub pacing: Pacing,
    pub user_agent: String,
}

impl RunConfig {
    pub fn new(
        query: String,
        per_site: usize,
        out: PathBuf,
        platforms: Vec<Platform>,
        headless: bool,
        webdriver_url: Option<String>,
        env: ScrapingEnv,
    ) -> Self {
        let defaults = BrowserOptions::default();
        let browser = BrowserOptions {
            // The flag beats the environment, which beats the default.
            webdriver_url: webdriver_url
                .or(env.webdriver_url)
                .unwrap_or(defaults.webdriver_url.clone()),
            headless,
            lang: env.browser_lang,
            chrome_binary: env.chrome_binary,
            ..defaults
        };
        Self {
            query,
            per_site,
            out,
            platforms,
            browser,
            pacing: Pacing::default(),
            user_agent: env
                .scraper_user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }

    pub fn with_pacing(mut self, scroll_pause: Duration, max_listing_pages: usize) -> Self {
        self.pacing.scroll_pause = scroll_pause;
        self.pacing.max_listing_pages = max_listing_pages;
        self
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
