use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, ClientBuilder, Response};

use crate::ratelimit::RateLimiter;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Plain HTTP access to pages that do not need a browser to render.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch_url_body(&self, url: &str) -> anyhow::Result<String>;
}

pub struct RequestClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RequestClient {
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let client = ClientBuilder::new()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build the http client")?;
        let rate_limiter = RateLimiter::new()?;
        Ok(Self {
            client,
            rate_limiter,
        })
    }

    pub async fn fetch_url_response(&self, url: &str) -> anyhow::Result<Response> {
        // Wait (non-blocking) until the politeness policy allows a request.
        self.rate_limiter.wait_until_ready().await;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()?;
        Ok(response)
    }
}

impl Fetcher for RequestClient {
    async fn fetch_url_body(&self, url: &str) -> anyhow::Result<String> {
        let response = self.fetch_url_response(url).await?;
        let body = response.text().await?;
        Ok(body)
    }
}
