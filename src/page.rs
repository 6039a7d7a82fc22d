use std::time::Duration;

use log::debug;
use serde_json::Value;

use crate::browser::Browser;

const HEIGHT_SCRIPT: &str = "return document.body.scrollHeight";
const SCROLL_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Sleep durations and page bounds of a run.
#[derive(Debug, Clone)]
pub struct Pacing {
    /// Pause after each scroll so lazy content can load.
    pub scroll_pause: Duration,
    /// Extra settle time after a job board listing was scrolled.
    pub settle: Duration,
    pub max_listing_pages: usize,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            scroll_pause: Duration::from_millis(1200),
            settle: Duration::from_secs(4),
            max_listing_pages: 3,
        }
    }
}

impl Pacing {
    /// No sleeping at all, for tests and replays of saved pages.
    pub fn immediate() -> Self {
        Self {
            scroll_pause: Duration::ZERO,
            settle: Duration::ZERO,
            max_listing_pages: Pacing::default().max_listing_pages,
        }
    }
}

/// How a listing page is brought into a fully rendered state.
#[derive(Debug, Clone, Copy)]
pub struct Readiness {
    pub marker: &'static str,
    pub timeout: Duration,
    pub max_scrolls: usize,
}

async fn page_height<B: Browser>(browser: &mut B) -> anyhow::Result<Option<u64>> {
    let value = browser.execute(HEIGHT_SCRIPT).await?;
    Ok(match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)),
        _ => None,
    })
}

/// Scrolls to the bottom until the page stops growing or `max_scrolls` is hit.
/// Returns the number of scrolls performed.
pub async fn scroll_to_load<B: Browser>(
    browser: &mut B,
    max_scrolls: usize,
    pause: Duration,
) -> anyhow::Result<usize> {
    let mut last_height = page_height(browser).await?;
    for scroll in 1..=max_scrolls {
        browser.execute(SCROLL_SCRIPT).await?;
        tokio::time::sleep(pause).await;
        let new_height = page_height(browser).await?;
        if new_height == last_height {
            return Ok(scroll);
        }
        last_height = new_height;
    }
    Ok(max_scrolls)
}

/// Navigates, waits for the readiness marker (best-effort) and scrolls.
/// Returns the rendered markup together with the url it was rendered at.
pub async fn render_listing<B: Browser>(
    browser: &mut B,
    url: &str,
    readiness: &Readiness,
    pacing: &Pacing,
) -> anyhow::Result<(String, String)> {
    browser.goto(url).await?;
    if !browser.wait_for(readiness.marker, readiness.timeout).await? {
        debug!(
            "No {:?} on {url} after {:?}, continuing",
            readiness.marker, readiness.timeout
        );
    }
    let scrolls = scroll_to_load(browser, readiness.max_scrolls, pacing.scroll_pause).await?;
    debug!("Scrolled {url} {scrolls} time(s)");
    let html = browser.source().await?;
    let rendered_at = browser.current_url().await?;
    Ok((html, rendered_at))
}
