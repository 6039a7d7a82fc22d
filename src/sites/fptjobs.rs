use std::time::Duration;

use crate::{
    page::Readiness,
    probe::Probe,
    record::Platform,
    sites::jobs::{JobBoard, LinkStrategy},
};

pub const BOARD: JobBoard = JobBoard {
    platform: Platform::FptJobs,
    listing_url: "https://fptjobs.com/tuyen-dung",
    readiness: Readiness {
        marker: "a[href]",
        timeout: Duration::from_secs(4),
        max_scrolls: 3,
    },
    links: &[
        LinkStrategy::Css("a.link-overlay[href]"),
        LinkStrategy::SlugWithId,
        LinkStrategy::HrefContains(&["/viec-lam/"]),
    ],
    excluded: &["Error"],
    title: &[Probe::Css("h1"), Probe::Css("h1, h2")],
    company: &[
        Probe::Css(".company-title a"),
        Probe::Css("a[href*='company']"),
    ],
    salary: &[
        Probe::Css(".job-salary"),
        Probe::OwnText("*", &["VND", "$", "USD"]),
    ],
    location: &[
        Probe::All(".job-location span", ", "),
        Probe::Css("[class*='location']"),
    ],
    deadline: &[
        Probe::Css(".expire-date"),
        Probe::OwnText("*", &["Hạn nộp", "Deadline"]),
    ],
    description: &[
        Probe::Css(".job-description"),
        Probe::Containing("section", &["Mô tả", "Description"]),
    ],
};
