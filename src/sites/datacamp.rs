use std::time::Duration;

use crate::{
    page::Readiness,
    probe::{Card, Probe},
    record::{LearningMode, ModeRule, Platform},
    sites::course::{CourseSite, TitleSource},
};

pub const SITE: CourseSite = CourseSite {
    platform: Platform::DataCamp,
    search_url: "https://www.datacamp.com/search",
    query_param: "q",
    readiness: Readiness {
        marker: "main",
        timeout: Duration::from_secs(25),
        max_scrolls: 10,
    },
    links: "a[href*='/courses/'], a[href*='/tracks/'], a[href*='/skills/']",
    title: TitleSource::AriaLabelOrText,
    cards: &[
        Card::Ancestor("article"),
        Card::Ancestor("li"),
        Card::Ancestor("div"),
    ],
    instructor: &[Probe::OwnText("*", &["Instructor", "by "])],
    time_info: &[Probe::OwnText("*", &["hours", "chapters", "exercise"])],
    outcomes: &[Probe::Css("p"), Probe::Css("[class*='description']")],
    // DataCamp only sells self-paced content.
    mode: ModeRule::Fixed(LearningMode::SelfPaced),
};
