use std::time::Duration;

use crate::{
    page::Readiness,
    probe::Probe,
    record::Platform,
    sites::jobs::{JobBoard, LinkStrategy},
};

pub const BOARD: JobBoard = JobBoard {
    platform: Platform::VietnamWorks,
    listing_url: "https://www.vietnamworks.com/tim-viec-lam/tim-tat-ca-viec-lam",
    readiness: Readiness {
        marker: "a[href]",
        timeout: Duration::from_secs(4),
        max_scrolls: 3,
    },
    // Detail urls come in several shapes.
    links: &[LinkStrategy::OnHost {
        host: "vietnamworks.com",
        markers: &["/job/", "/viec-lam/", "/jobs/"],
    }],
    excluded: &[],
    title: &[Probe::Css("h1"), Probe::Css("h1, h2")],
    company: &[
        Probe::Css(".employer a"),
        Probe::Attr("meta[property='og:site_name']", "content"),
    ],
    salary: &[
        Probe::Css("span.salary"),
        Probe::OwnText("span", &["$", "VND", "USD"]),
    ],
    location: &[Probe::All(".svg-icon-location ~ span", ", ")],
    deadline: &[Probe::OwnText("span", &["Hạn nộp"])],
    description: &[
        Probe::Css(".job-description"),
        Probe::Containing("section", &["Mô tả", "Description"]),
    ],
};
