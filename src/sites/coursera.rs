use std::time::Duration;

use crate::{
    page::Readiness,
    probe::{Card, Probe},
    record::{LearningMode, ModeRule, Platform},
    sites::course::{CourseSite, TitleSource},
};

pub const SITE: CourseSite = CourseSite {
    platform: Platform::Coursera,
    search_url: "https://www.coursera.org/search",
    query_param: "query",
    readiness: Readiness {
        marker: "main",
        timeout: Duration::from_secs(25),
        max_scrolls: 10,
    },
    links: "a[href*='/learn/'], a[href*='/specializations/'], \
            a[href*='/professional-certificates/']",
    title: TitleSource::AriaLabelOrText,
    cards: &[
        Card::Ancestor("div[data-e2e*='SearchCard']"),
        Card::Ancestor("li"),
        Card::Ancestor("div"),
    ],
    instructor: &[
        Probe::Css("[data-e2e*='ProductCard-instructor']"),
        Probe::Css("[class*='partnerNames']"),
        Probe::OwnText("*", &["by "]),
    ],
    time_info: &[Probe::OwnText(
        "*",
        &["weeks", "hours", "Self-paced", "months"],
    )],
    outcomes: &[
        Probe::Css("[data-e2e*='ProductCard-description']"),
        Probe::Css("p"),
    ],
    mode: ModeRule::Keywords(&[("Self-paced|Flexible", LearningMode::SelfPaced)]),
};
