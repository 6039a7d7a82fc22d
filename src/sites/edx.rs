use std::time::Duration;

use crate::{
    page::Readiness,
    probe::{Card, Probe},
    record::{LearningMode, ModeRule, Platform},
    sites::course::{CourseSite, TitleSource},
};

pub const SITE: CourseSite = CourseSite {
    platform: Platform::Edx,
    search_url: "https://www.edx.org/search",
    query_param: "q",
    readiness: Readiness {
        marker: "main",
        timeout: Duration::from_secs(25),
        max_scrolls: 10,
    },
    links: "a[href*='/course/'], a[href*='/professional-certificate/'], a[href*='/program/']",
    title: TitleSource::AriaLabelOrText,
    cards: &[
        Card::Ancestor("article"),
        Card::Ancestor("li"),
        Card::Ancestor("div"),
    ],
    instructor: &[
        Probe::OwnText("*", &["Instructor"]),
        Probe::Css("[class*='instructor']"),
        Probe::Css("[class*='provider']"),
    ],
    time_info: &[Probe::OwnText(
        "*",
        &["weeks", "hours per", "Self-Paced", "Paced"],
    )],
    outcomes: &[Probe::Css("p"), Probe::Css("[class*='description']")],
    mode: ModeRule::Keywords(&[("Self|Paced|self-paced", LearningMode::SelfPaced)]),
};
