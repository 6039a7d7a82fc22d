use crate::{browser::Browser, page::Pacing, requests::Fetcher};

/// Everything an extractor needs to talk to the outside world.
pub struct ScrapingContext<B, F> {
    pub browser: B,
    pub fetcher: F,
    pub pacing: Pacing,
}

impl<B: Browser, F: Fetcher> ScrapingContext<B, F> {
    pub fn new(browser: B, fetcher: F, pacing: Pacing) -> Self {
        ScrapingContext {
            browser,
            fetcher,
            pacing,
        }
    }

    /// Releases the browser session.
    pub async fn close(self) -> anyhow::Result<()> {
        self.browser.quit().await
    }
}
