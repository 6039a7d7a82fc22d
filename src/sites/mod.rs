//! Per-platform extractors.
//!
//! Course catalogues are described declaratively as [`CourseSite`]s and share
//! one extractor; job boards follow listing pages to detail pages and share
//! another.

pub mod course;
pub mod coursera;
pub mod datacamp;
pub mod edumall;
pub mod edx;
pub mod fptjobs;
pub mod jobs;
pub mod vietnamworks;

use crate::{
    browser::Browser,
    record::{Platform, Record},
    requests::Fetcher,
    scraping_context::ScrapingContext,
};

pub use course::CourseSite;
pub use jobs::JobBoard;

pub enum Site {
    Course(&'static CourseSite),
    Jobs(&'static JobBoard),
}

impl Platform {
    pub fn site(&self) -> Site {
        match self {
            Platform::Edumall => Site::Course(&edumall::SITE),
            Platform::Coursera => Site::Course(&coursera::SITE),
            Platform::Edx => Site::Course(&edx::SITE),
            Platform::DataCamp => Site::Course(&datacamp::SITE),
            Platform::VietnamWorks => Site::Jobs(&vietnamworks::BOARD),
            Platform::FptJobs => Site::Jobs(&fptjobs::BOARD),
        }
    }
}

/// Runs one platform's extractor to completion. Job boards ignore the query:
/// their listings are browsed, not searched.
pub async fn scrape<B: Browser, F: Fetcher>(
    ctx: &mut ScrapingContext<B, F>,
    platform: Platform,
    query: &str,
    limit: usize,
) -> anyhow::Result<Vec<Record>> {
    match platform.site() {
        Site::Course(site) => {
            course::scrape(&mut ctx.browser, site, query, limit, &ctx.pacing).await
        }
        Site::Jobs(board) => {
            jobs::scrape(&mut ctx.browser, &ctx.fetcher, board, limit, &ctx.pacing).await
        }
    }
}
