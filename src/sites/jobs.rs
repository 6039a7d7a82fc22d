//! Job boards: a rendered listing page links to detail pages, which are
//! fetched over plain HTTP and only rendered in the browser when the static
//! markup carries no title.

use std::{collections::HashSet, time::Duration};

use anyhow::Context;
use log::{debug, info, warn};
use scraper::Html;
use url::Url;

use crate::{
    browser::Browser,
    page::{Pacing, Readiness, render_listing},
    probe::{Probe, first_of, parse_selector},
    record::{LearningMode, ModeRule, Platform, Record},
    requests::Fetcher,
    text_manipulators::{canonical_link, extract_text},
};

pub const JOB_MODES: ModeRule = ModeRule::Keywords(&[
    ("part[- ]?time|bán thời gian", LearningMode::PartTime),
    ("remote|từ xa", LearningMode::Remote),
    ("full[- ]?time|toàn thời gian", LearningMode::FullTime),
]);

const DETAIL_READINESS: Readiness = Readiness {
    marker: "h1",
    timeout: Duration::from_secs(4),
    max_scrolls: 0,
};

/// One way of picking job detail links out of a listing page.
#[derive(Debug, Clone, Copy)]
pub enum LinkStrategy {
    /// Resolved links on `host` whose path contains one of the markers.
    OnHost {
        host: &'static str,
        markers: &'static [&'static str],
    },
    /// hrefs of every anchor matching the selector.
    Css(&'static str),
    /// Site-relative `/<slug>-<digits>` hrefs.
    SlugWithId,
    /// Any href containing one of the markers.
    HrefContains(&'static [&'static str]),
}

impl LinkStrategy {
    fn accepts(&self, href: &str, resolved: &Url) -> bool {
        match *self {
            LinkStrategy::OnHost { host, markers } => {
                resolved.host_str().is_some_and(|h| h.ends_with(host))
                    && markers.iter().any(|m| resolved.path().contains(m))
            }
            LinkStrategy::Css(_) => true,
            LinkStrategy::SlugWithId => {
                href.starts_with('/')
                    && href.rsplit_once('-').is_some_and(|(_, id)| {
                        !id.is_empty() && id.chars().all(|c| c.is_ascii_digit())
                    })
            }
            LinkStrategy::HrefContains(markers) => markers.iter().any(|m| href.contains(m)),
        }
    }

    fn candidates(&self) -> &'static str {
        match *self {
            LinkStrategy::Css(css) => css,
            _ => "a[href]",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct JobBoard {
    pub platform: Platform,
    pub listing_url: &'static str,
    pub readiness: Readiness,
    /// Tried in order; the first strategy yielding any link wins.
    pub links: &'static [LinkStrategy],
    /// hrefs containing any of these are never job pages.
    pub excluded: &'static [&'static str],
    pub title: &'static [Probe],
    pub company: &'static [Probe],
    pub salary: &'static [Probe],
    pub location: &'static [Probe],
    pub deadline: &'static [Probe],
    pub description: &'static [Probe],
}

/// Job links and the next listing page found on one rendered listing.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub job_links: Vec<String>,
    pub next_page: Option<String>,
}

pub fn parse_listing(html: &str, page_url: &str, board: &JobBoard) -> anyhow::Result<ListingPage> {
    let page_url =
        Url::parse(page_url).with_context(|| format!("invalid listing url {page_url:?}"))?;
    let document = Html::parse_document(html);

    let mut job_links = Vec::new();
    for strategy in board.links {
        let Some(selector) = parse_selector(strategy.candidates()) else {
            continue;
        };
        let mut seen = HashSet::new();
        for anchor in document.select(&selector) {
            let Some(href) = anchor.value().attr("href").map(str::trim) else {
                continue;
            };
            if href.is_empty() || board.excluded.iter().any(|x| href.contains(x)) {
                continue;
            }
            let Some(link) = canonical_link(&page_url, href) else {
                continue;
            };
            let Ok(resolved) = Url::parse(&link) else {
                continue;
            };
            if strategy.accepts(href, &resolved) && seen.insert(link.clone()) {
                job_links.push(link);
            }
        }
        if !job_links.is_empty() {
            break;
        }
    }

    Ok(ListingPage {
        job_links,
        next_page: next_page(&document, &page_url),
    })
}

fn next_page(document: &Html, page_url: &Url) -> Option<String> {
    let rel_next = parse_selector("a[rel='next']")?;
    let anchors = parse_selector("a[href]")?;
    let by_rel = document
        .select(&rel_next)
        .find_map(|a| a.value().attr("href"));
    let by_text = || {
        document
            .select(&anchors)
            .find(|a| {
                let text = extract_text(*a);
                ["Next", "Sau", "›"].iter().any(|n| text.contains(n))
            })
            .and_then(|a| a.value().attr("href"))
    };
    let href = by_rel.or_else(by_text)?;
    canonical_link(page_url, href).filter(|next| next.as_str() != page_url.as_str())
}

/// Reads a job detail page. `None` when the page has no title.
pub fn parse_detail(html: &str, link: &str, board: &JobBoard) -> Option<Record> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let title = first_of(root, board.title);
    if title.is_empty() {
        return None;
    }
    let company = first_of(root, board.company);
    let time_info = [
        first_of(root, board.salary),
        first_of(root, board.location),
        first_of(root, board.deadline),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" | ");
    let description = first_of(root, board.description);
    let learning_mode = JOB_MODES.infer(&time_info, &description);

    Some(Record {
        platform: board.platform,
        course_name: title,
        instructor: company,
        time_info,
        outcomes: description,
        course_link: link.to_string(),
        learning_mode,
    })
}

async fn scrape_detail<B: Browser, F: Fetcher>(
    browser: &mut B,
    fetcher: &F,
    board: &JobBoard,
    link: &str,
    pacing: &Pacing,
) -> Option<Record> {
    match fetcher.fetch_url_body(link).await {
        Ok(body) => {
            if let Some(record) = parse_detail(&body, link, board) {
                return Some(record);
            }
            debug!("No title in static markup of {link}, rendering it");
        }
        Err(e) => debug!("Fetching {link} failed ({e:#}), rendering it"),
    }

    match render_listing(browser, link, &DETAIL_READINESS, pacing).await {
        Ok((html, _)) => {
            let record = parse_detail(&html, link, board);
            if record.is_none() {
                debug!("Skipping {link}: no title after rendering");
            }
            record
        }
        Err(e) => {
            warn!("Skipping {link}: {e:#}");
            None
        }
    }
}

pub async fn scrape<B: Browser, F: Fetcher>(
    browser: &mut B,
    fetcher: &F,
    board: &JobBoard,
    limit: usize,
    pacing: &Pacing,
) -> anyhow::Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut seen = HashSet::new();
    let mut visited = HashSet::new();
    let mut next = Some(board.listing_url.to_string());
    let mut pages = 0;

    while let Some(listing_url) = next.take() {
        if records.len() >= limit || pages >= pacing.max_listing_pages {
            break;
        }
        pages += 1;
        visited.insert(listing_url.clone());
        info!("Scraping {} listing page {pages}: {listing_url}", board.platform);

        let listing: anyhow::Result<ListingPage> = async {
            let (html, rendered_at) =
                render_listing(browser, &listing_url, &board.readiness, pacing).await?;
            tokio::time::sleep(pacing.settle).await;
            parse_listing(&html, &rendered_at, board)
        }
        .await;
        let listing = match listing {
            Ok(listing) => listing,
            // Losing a later page keeps what was already gathered.
            Err(e) if pages > 1 => {
                warn!("Stopping {} pagination at page {pages}: {e:#}", board.platform);
                break;
            }
            Err(e) => return Err(e),
        };
        debug!("{} job link(s) on {listing_url}", listing.job_links.len());

        for link in listing.job_links {
            if records.len() >= limit {
                break;
            }
            if !seen.insert(link.clone()) {
                continue;
            }
            if let Some(record) = scrape_detail(browser, fetcher, board, &link, pacing).await {
                records.push(record);
            }
        }
        next = listing.next_page.filter(|url| !visited.contains(url));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::{fptjobs, vietnamworks};

    #[test]
    fn vietnamworks_listing_keeps_job_paths_on_host() {
        let html = r#"
            <a href="/rust-engineer-123-jv">Rust engineer</a>
            <a href="https://www.vietnamworks.com/viec-lam/backend-dev-9">Backend</a>
            <a href="https://www.vietnamworks.com/jobs/qa-1">QA</a>
            <a href="https://www.vietnamworks.com/about">About</a>
            <a href="https://other.com/job/x">Elsewhere</a>
            <a href="https://www.vietnamworks.com/job/devops-7">DevOps</a>
            <a rel="next" href="?page=2">2</a>"#;
        let page = parse_listing(
            html,
            "https://www.vietnamworks.com/tim-viec-lam/tim-tat-ca-viec-lam",
            &vietnamworks::BOARD,
        )
        .unwrap();
        assert_eq!(
            page.job_links,
            [
                "https://www.vietnamworks.com/viec-lam/backend-dev-9",
                "https://www.vietnamworks.com/jobs/qa-1",
                "https://www.vietnamworks.com/job/devops-7",
            ]
        );
        assert_eq!(
            page.next_page.as_deref(),
            Some("https://www.vietnamworks.com/tim-viec-lam/tim-tat-ca-viec-lam?page=2")
        );
    }

    #[test]
    fn fptjobs_prefers_overlay_links_then_falls_back_to_slugs() {
        let with_overlay = r#"
            <a class="link-overlay" href="/lap-trinh-vien-java-23273"></a>
            <a href="/tester-111">Tester</a>"#;
        let page = parse_listing(with_overlay, "https://fptjobs.com/tuyen-dung", &fptjobs::BOARD)
            .unwrap();
        assert_eq!(page.job_links, ["https://fptjobs.com/lap-trinh-vien-java-23273"]);
        assert_eq!(page.next_page, None);

        let slugs_only = r#"
            <a href="/tester-111">Tester</a>
            <a href="/Error-404">Broken</a>
            <a href="/gioi-thieu">About</a>
            <a href="/ba-analyst-222">BA</a>
            <a href="/tuyen-dung?page=2">Trang Sau</a>"#;
        let page =
            parse_listing(slugs_only, "https://fptjobs.com/tuyen-dung", &fptjobs::BOARD).unwrap();
        assert_eq!(
            page.job_links,
            ["https://fptjobs.com/tester-111", "https://fptjobs.com/ba-analyst-222"]
        );
        assert_eq!(
            page.next_page.as_deref(),
            Some("https://fptjobs.com/tuyen-dung?page=2")
        );
    }

    #[test]
    fn detail_page_fields_and_mode() {
        let html = r#"
            <html><head><meta property="og:site_name" content="VietnamWorks"></head>
            <body>
              <h1> Senior Rust Engineer </h1>
              <div class="employer"><a>Acme Software</a></div>
              <span class="salary">$2000 - $3000</span>
              <div class="place"><i class="svg-icon-location"></i><span>Ho Chi Minh</span></div>
              <span>Hạn nộp: 30/11/2026</span>
              <div class="job-description"><p>Full-time role.</p><p>Tokio experience.</p></div>
            </body></html>"#;
        let record = parse_detail(
            html,
            "https://www.vietnamworks.com/job/rust-1",
            &vietnamworks::BOARD,
        )
        .unwrap();
        assert_eq!(record.platform, Platform::VietnamWorks);
        assert_eq!(record.course_name, "Senior Rust Engineer");
        assert_eq!(record.instructor, "Acme Software");
        assert_eq!(
            record.time_info,
            "$2000 - $3000 | Ho Chi Minh | Hạn nộp: 30/11/2026"
        );
        assert_eq!(record.outcomes, "Full-time role. Tokio experience.");
        assert_eq!(record.learning_mode, LearningMode::FullTime);
    }

    #[test]
    fn detail_page_without_title_is_skipped() {
        let html = "<p>Loading…</p>";
        assert!(parse_detail(html, "https://fptjobs.com/x-1", &fptjobs::BOARD).is_none());
    }
}
