use std::{
    collections::HashMap,
    fmt,
    sync::{LazyLock, Mutex},
};

use clap::ValueEnum;
use log::warn;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// Column order of the exported table.
pub const COLUMNS: [&str; 7] = [
    "platform",
    "course_name",
    "instructor",
    "time_info",
    "outcomes",
    "course_link",
    "learning_mode",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
pub enum Platform {
    Edumall,
    Coursera,
    #[serde(rename = "edX")]
    Edx,
    #[value(name = "datacamp")]
    DataCamp,
    #[value(name = "vietnamworks")]
    VietnamWorks,
    #[serde(rename = "FPTJobs")]
    #[value(name = "fptjobs")]
    FptJobs,
}

impl Platform {
    pub const COURSES: [Platform; 4] = [
        Platform::Edumall,
        Platform::Coursera,
        Platform::Edx,
        Platform::DataCamp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Edumall => "Edumall",
            Platform::Coursera => "Coursera",
            Platform::Edx => "edX",
            Platform::DataCamp => "DataCamp",
            Platform::VietnamWorks => "VietnamWorks",
            Platform::FptJobs => "FPTJobs",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LearningMode {
    #[serde(rename = "Self-paced")]
    SelfPaced,
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Remote,
    Unknown,
}

/// How a site's learning mode is derived from a listing's free text.
#[derive(Debug, Clone, Copy)]
pub enum ModeRule {
    Fixed(LearningMode),
    /// Case-insensitive patterns, first match decides.
    Keywords(&'static [(&'static str, LearningMode)]),
}

impl ModeRule {
    pub fn infer(&self, time_info: &str, outcomes: &str) -> LearningMode {
        match *self {
            ModeRule::Fixed(mode) => mode,
            ModeRule::Keywords(patterns) => {
                let haystack = format!("{time_info} {outcomes}");
                patterns
                    .iter()
                    .find(|&&(pattern, _)| {
                        compiled(pattern).is_some_and(|re| re.is_match(&haystack))
                    })
                    .map_or(LearningMode::Unknown, |&(_, mode)| mode)
            }
        }
    }
}

// Mode patterns are built once per process; a bad one is cached as `None`.
static COMPILED_PATTERNS: LazyLock<Mutex<HashMap<&'static str, Option<Regex>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn compiled(pattern: &'static str) -> Option<Regex> {
    let mut cache = match COMPILED_PATTERNS.lock() {
        Ok(cache) => cache,
        Err(poisoned) => poisoned.into_inner(),
    };
    cache
        .entry(pattern)
        .or_insert_with(|| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .inspect_err(|e| warn!("Ignoring invalid mode pattern {pattern:?}: {e}"))
                .ok()
        })
        .clone()
}

/// One scraped course or job listing. Field names double as CSV headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub platform: Platform,
    pub course_name: String,
    pub instructor: String,
    pub time_info: String,
    pub outcomes: String,
    pub course_link: String,
    pub learning_mode: LearningMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELF_PACED: ModeRule =
        ModeRule::Keywords(&[("Self-paced|Flexible", LearningMode::SelfPaced)]);

    #[test]
    fn keyword_rule_is_case_insensitive_over_both_fields() {
        assert_eq!(SELF_PACED.infer("", "flexible schedule"), LearningMode::SelfPaced);
        assert_eq!(SELF_PACED.infer("SELF-PACED", ""), LearningMode::SelfPaced);
        assert_eq!(SELF_PACED.infer("6 weeks", "Live cohort"), LearningMode::Unknown);
    }

    #[test]
    fn keyword_rule_takes_first_matching_pattern() {
        let rule = ModeRule::Keywords(&[
            ("part[- ]?time", LearningMode::PartTime),
            ("full[- ]?time", LearningMode::FullTime),
        ]);
        assert_eq!(rule.infer("Full-time or part time", ""), LearningMode::PartTime);
        assert_eq!(rule.infer("", "Fulltime"), LearningMode::FullTime);
    }

    #[test]
    fn invalid_pattern_is_compiled_once_and_skipped() {
        let rule = ModeRule::Keywords(&[
            ("remote(", LearningMode::Remote),
            ("remote", LearningMode::PartTime),
        ]);
        assert_eq!(rule.infer("Remote", ""), LearningMode::PartTime);
        assert_eq!(rule.infer("remote", ""), LearningMode::PartTime);
        assert!(compiled("remote(").is_none());

        let cache = COMPILED_PATTERNS.lock().unwrap();
        assert!(cache.get("remote(").is_some_and(Option::is_none));
        assert!(cache.get("remote").is_some_and(Option::is_some));
    }

    #[test]
    fn fixed_rule_ignores_text() {
        let rule = ModeRule::Fixed(LearningMode::SelfPaced);
        assert_eq!(rule.infer("", ""), LearningMode::SelfPaced);
    }

    #[test]
    fn platform_display_matches_exported_name() {
        assert_eq!(Platform::Edx.to_string(), "edX");
        assert_eq!(Platform::FptJobs.to_string(), "FPTJobs");
        assert_eq!(Platform::COURSES.len(), 4);
    }
}
