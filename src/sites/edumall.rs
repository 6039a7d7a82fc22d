use std::time::Duration;

use crate::{
    page::Readiness,
    probe::{Card, Probe},
    record::{LearningMode, ModeRule, Platform},
    sites::course::{CourseSite, TitleSource},
};

const COURSE_LINKS: &str = "a[href*='/course/'], a[href*='/khoa-hoc/']";

/// Vietnamese catalogue; cards are bare anchors so metadata is read from the
/// anchor's own subtree. Every course is self-paced video.
pub const SITE: CourseSite = CourseSite {
    platform: Platform::Edumall,
    search_url: "https://edumall.vn/search",
    query_param: "query",
    readiness: Readiness {
        marker: COURSE_LINKS,
        timeout: Duration::from_secs(20),
        max_scrolls: 8,
    },
    links: COURSE_LINKS,
    title: TitleSource::Text,
    cards: &[Card::SelfOnly],
    instructor: &[Probe::After(&["Giảng viên"])],
    time_info: &[Probe::OwnText("*", &["giờ", "buổi", "tuần"])],
    outcomes: &[Probe::Css("p"), Probe::Css("div[class*='description']")],
    mode: ModeRule::Fixed(LearningMode::SelfPaced),
};
