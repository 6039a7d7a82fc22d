use std::time::Duration;

use anyhow::Context;
use fantoccini::{Client, ClientBuilder, Locator, wd::TimeoutConfiguration};
use log::{debug, info};
use serde_json::{Map, Value, json};

/// The slice of browser automation the extractors rely on.
///
/// Implemented by [`WebDriverSession`] for real runs and by in-memory fakes in
/// tests.
#[allow(async_fn_in_trait)]
pub trait Browser {
    async fn goto(&mut self, url: &str) -> anyhow::Result<()>;

    /// Waits for `css` to appear. A timeout is reported as `Ok(false)`.
    async fn wait_for(&mut self, css: &str, timeout: Duration) -> anyhow::Result<bool>;

    async fn execute(&mut self, script: &str) -> anyhow::Result<Value>;

    /// Markup of the page as currently rendered.
    async fn source(&mut self) -> anyhow::Result<String>;

    async fn current_url(&mut self) -> anyhow::Result<String>;

    async fn quit(self) -> anyhow::Result<()>;
}

#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub webdriver_url: String,
    pub headless: bool,
    pub window_size: (u32, u32),
    pub page_load_timeout: Duration,
    pub lang: Option<String>,
    pub chrome_binary: Option<String>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            headless: false,
            window_size: (1600, 1200),
            page_load_timeout: Duration::from_secs(40),
            lang: None,
            chrome_binary: None,
        }
    }
}

impl BrowserOptions {
    pub fn chrome_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.headless {
            args.push("--headless=new".to_string());
        }
        args.extend(
            [
                "--no-sandbox",
                "--disable-gpu",
                "--disable-dev-shm-usage",
                "--disable-blink-features=AutomationControlled",
            ]
            .map(String::from),
        );
        let (width, height) = self.window_size;
        args.push(format!("--window-size={width},{height}"));
        if let Some(lang) = &self.lang {
            args.push(format!("--lang={lang}"));
        }
        args
    }

    fn capabilities(&self) -> Map<String, Value> {
        let mut chrome_options = json!({
            "args": self.chrome_args(),
            "excludeSwitches": ["enable-automation"],
        });
        if let Some(binary) = &self.chrome_binary {
            chrome_options["binary"] = json!(binary);
        }
        let mut caps = Map::new();
        caps.insert("browserName".to_string(), json!("chrome"));
        caps.insert("goog:chromeOptions".to_string(), chrome_options);
        caps
    }
}

/// A Chrome session driven over WebDriver.
pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Opens the session. Failing here is fatal for a run.
    pub async fn launch(options: &BrowserOptions) -> anyhow::Result<Self> {
        info!(
            "Connecting to WebDriver at {} (headless: {})",
            options.webdriver_url, options.headless
        );
        let client = ClientBuilder::native()
            .capabilities(options.capabilities())
            .connect(&options.webdriver_url)
            .await
            .with_context(|| {
                format!(
                    "failed to start a browser session via {}",
                    options.webdriver_url
                )
            })?;
        client
            .update_timeouts(TimeoutConfiguration::new(
                None,
                Some(options.page_load_timeout),
                None,
            ))
            .await
            .context("failed to set the page load timeout")?;
        Ok(Self { client })
    }
}

impl Browser for WebDriverSession {
    async fn goto(&mut self, url: &str) -> anyhow::Result<()> {
        self.client
            .goto(url)
            .await
            .with_context(|| format!("failed to navigate to {url}"))
    }

    async fn wait_for(&mut self, css: &str, timeout: Duration) -> anyhow::Result<bool> {
        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(css))
            .await
        {
            Ok(_) => Ok(true),
            Err(fantoccini::error::CmdError::WaitTimeout) => Ok(false),
            Err(e) => {
                debug!("Waiting for {css:?} failed: {e}");
                Ok(false)
            }
        }
    }

    async fn execute(&mut self, script: &str) -> anyhow::Result<Value> {
        self.client
            .execute(script, Vec::new())
            .await
            .context("script execution failed")
    }

    async fn source(&mut self) -> anyhow::Result<String> {
        self.client
            .source()
            .await
            .context("failed to read the page source")
    }

    async fn current_url(&mut self) -> anyhow::Result<String> {
        let url = self
            .client
            .current_url()
            .await
            .context("failed to read the current url")?;
        Ok(url.to_string())
    }

    async fn quit(self) -> anyhow::Result<()> {
        self.client
            .close()
            .await
            .context("failed to close the browser session")
    }
}
