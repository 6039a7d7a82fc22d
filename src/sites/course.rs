use std::collections::HashSet;

use anyhow::Context;
use log::info;
use scraper::{ElementRef, Html};
use url::Url;

use crate::{
    browser::Browser,
    page::{Pacing, Readiness, render_listing},
    probe::{Card, Probe, card_for, first_of, parse_selector},
    record::{ModeRule, Platform, Record},
    text_manipulators::{canonical_link, extract_text, normalize_whitespace},
};

/// Where a listing's title is read from.
#[derive(Debug, Clone, Copy)]
pub enum TitleSource {
    Text,
    /// `aria-label` when present, the anchor text otherwise.
    AriaLabelOrText,
}

impl TitleSource {
    fn read(&self, anchor: ElementRef) -> String {
        match self {
            TitleSource::Text => extract_text(anchor),
            TitleSource::AriaLabelOrText => anchor
                .value()
                .attr("aria-label")
                .map(normalize_whitespace)
                .filter(|label| !label.is_empty())
                .unwrap_or_else(|| extract_text(anchor)),
        }
    }
}

/// A course catalogue with a search page.
#[derive(Debug, Clone, Copy)]
pub struct CourseSite {
    pub platform: Platform,
    pub search_url: &'static str,
    pub query_param: &'static str,
    pub readiness: Readiness,
    /// Candidate anchors, as one selector group.
    pub links: &'static str,
    pub title: TitleSource,
    pub cards: &'static [Card],
    pub instructor: &'static [Probe],
    pub time_info: &'static [Probe],
    pub outcomes: &'static [Probe],
    pub mode: ModeRule,
}

impl CourseSite {
    pub fn search_url(&self, query: &str) -> anyhow::Result<Url> {
        Url::parse_with_params(self.search_url, &[(self.query_param, query)])
            .with_context(|| format!("invalid search url for {}", self.platform))
    }
}

/// Turns a rendered search page into at most `limit` records.
pub fn extract_courses(
    html: &str,
    page_url: &str,
    site: &CourseSite,
    limit: usize,
) -> anyhow::Result<Vec<Record>> {
    let page_url =
        Url::parse(page_url).with_context(|| format!("invalid page url {page_url:?}"))?;
    let links = parse_selector(site.links)
        .with_context(|| format!("invalid link selector for {}", site.platform))?;
    let document = Html::parse_document(html);

    let mut records = Vec::new();
    let mut seen = HashSet::new();
    for anchor in document.select(&links) {
        if records.len() >= limit {
            break;
        }
        let link = anchor
            .value()
            .attr("href")
            .and_then(|href| canonical_link(&page_url, href))
            .unwrap_or_default();
        let title = site.title.read(anchor);
        if link.is_empty() || seen.contains(&link) || title.is_empty() {
            continue;
        }
        seen.insert(link.clone());

        let card = card_for(anchor, site.cards);
        let instructor = first_of(card, site.instructor);
        let time_info = first_of(card, site.time_info);
        let outcomes = first_of(card, site.outcomes);
        let learning_mode = site.mode.infer(&time_info, &outcomes);

        records.push(Record {
            platform: site.platform,
            course_name: title,
            instructor,
            time_info,
            outcomes,
            course_link: link,
            learning_mode,
        });
    }
    Ok(records)
}

pub async fn scrape<B: Browser>(
    browser: &mut B,
    site: &CourseSite,
    query: &str,
    limit: usize,
    pacing: &Pacing,
) -> anyhow::Result<Vec<Record>> {
    if limit == 0 {
        return Ok(Vec::new());
    }
    let url = site.search_url(query)?;
    info!("Scraping {} for '{query}'...", site.platform);
    let (html, rendered_at) = render_listing(browser, url.as_str(), &site.readiness, pacing).await?;
    extract_courses(&html, &rendered_at, site, limit)
}
