//! Ordered selector strategies with silent fallback.
//!
//! Listing sites change their markup often, so every field is looked up with
//! a chain of [`Probe`]s. The first probe yielding a non-empty value wins and
//! a chain that misses entirely yields an empty string.

use log::warn;
use scraper::{ElementRef, Selector};

use crate::text_manipulators::{extract_text, normalize_whitespace, own_text};

#[derive(Debug, Clone, Copy)]
pub enum Probe {
    /// Text of the first match with non-empty text.
    Css(&'static str),
    /// Attribute of the first match that carries a non-empty value for it.
    Attr(&'static str, &'static str),
    /// First match whose own text contains one of the needles.
    OwnText(&'static str, &'static [&'static str]),
    /// The element following (in document order, skipping descendants) the
    /// first element whose own text contains one of the needles.
    After(&'static [&'static str]),
    /// Full text of the first match whose full text contains a needle.
    Containing(&'static str, &'static [&'static str]),
    /// Every non-empty match, joined with the separator.
    All(&'static str, &'static str),
}

/// Where a listing's metadata lives relative to its anchor.
#[derive(Debug, Clone, Copy)]
pub enum Card {
    SelfOnly,
    /// Nearest ancestor matching the selector.
    Ancestor(&'static str),
}

pub fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!("Ignoring invalid selector {css:?}: {e}");
            None
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

impl Probe {
    pub fn run(&self, scope: ElementRef) -> Option<String> {
        let value = match *self {
            Probe::Css(css) => {
                let selector = parse_selector(css)?;
                scope
                    .select(&selector)
                    .map(extract_text)
                    .find(|text| !text.is_empty())
            }
            Probe::Attr(css, attr) => {
                let selector = parse_selector(css)?;
                scope
                    .select(&selector)
                    .filter_map(|el| el.value().attr(attr))
                    .map(normalize_whitespace)
                    .find(|value| !value.is_empty())
            }
            Probe::OwnText(css, needles) => {
                let selector = parse_selector(css)?;
                scope
                    .select(&selector)
                    .find(|el| contains_any(&own_text(*el), needles))
                    .map(extract_text)
            }
            Probe::After(needles) => {
                let any = parse_selector("*")?;
                let label = scope
                    .select(&any)
                    .find(|el| contains_any(&own_text(*el), needles))?;
                following_element(label).map(extract_text)
            }
            Probe::Containing(css, needles) => {
                let selector = parse_selector(css)?;
                scope
                    .select(&selector)
                    .map(extract_text)
                    .find(|text| contains_any(text, needles))
            }
            Probe::All(css, separator) => {
                let selector = parse_selector(css)?;
                let parts = scope
                    .select(&selector)
                    .map(extract_text)
                    .filter(|text| !text.is_empty())
                    .collect::<Vec<_>>();
                Some(parts.join(separator))
            }
        };
        value.filter(|v| !v.is_empty())
    }
}

/// Runs the chain and falls back to an empty field.
pub fn first_of(scope: ElementRef, chain: &[Probe]) -> String {
    chain
        .iter()
        .find_map(|probe| probe.run(scope))
        .unwrap_or_default()
}

fn following_element(node: ElementRef) -> Option<ElementRef> {
    let mut current = Some(*node);
    while let Some(at) = current {
        if let Some(next) = at.next_siblings().find_map(ElementRef::wrap) {
            return Some(next);
        }
        current = at.parent();
    }
    None
}

impl Card {
    fn locate<'a>(&self, anchor: ElementRef<'a>) -> Option<ElementRef<'a>> {
        match *self {
            Card::SelfOnly => Some(anchor),
            Card::Ancestor(css) => {
                let selector = parse_selector(css)?;
                anchor
                    .ancestors()
                    .filter_map(ElementRef::wrap)
                    .find(|el| selector.matches(el))
            }
        }
    }
}

/// Picks the metadata scope for an anchor, falling back to the anchor itself.
// Strategies are tried in listed order, nearest match first, not in document order.
pub fn card_for<'a>(anchor: ElementRef<'a>, strategies: &[Card]) -> ElementRef<'a> {
    strategies
        .iter()
        .find_map(|card| card.locate(anchor))
        .unwrap_or(anchor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const CARD: &str = r#"
        <ul>
          <li class="result">
            <div class="card" data-e2e="SearchCard">
              <a href="/learn/rust">Rust Basics</a>
              <p></p>
              <p class="partner">by Mozilla</p>
              <span>Giảng viên</span><span>Nguyen Van A</span>
              <div class="meta"><span>Beginner</span> · <span>4 weeks</span></div>
              <div class="description">Ownership, borrowing and traits.</div>
            </div>
          </li>
        </ul>"#;

    fn with_card<T>(f: impl FnOnce(ElementRef) -> T) -> T {
        let document = Html::parse_document(CARD);
        let selector = Selector::parse("div.card").unwrap();
        let card = document.select(&selector).next().unwrap();
        f(card)
    }

    #[test]
    fn css_probe_skips_empty_matches() {
        with_card(|card| {
            assert_eq!(Probe::Css("p").run(card).as_deref(), Some("by Mozilla"));
        });
    }

    #[test]
    fn own_text_probe_matches_direct_text_only() {
        with_card(|card| {
            assert_eq!(
                Probe::OwnText("*", &["weeks"]).run(card).as_deref(),
                Some("4 weeks")
            );
        });
    }

    #[test]
    fn after_probe_returns_following_element() {
        with_card(|card| {
            assert_eq!(
                Probe::After(&["Giảng viên"]).run(card).as_deref(),
                Some("Nguyen Van A")
            );
        });
    }

    #[test]
    fn all_probe_joins_non_empty_matches() {
        with_card(|card| {
            assert_eq!(
                Probe::All("div.meta span", ", ").run(card).as_deref(),
                Some("Beginner, 4 weeks")
            );
        });
    }

    #[test]
    fn chain_falls_through_to_later_probes_and_then_to_empty() {
        with_card(|card| {
            let chain = [
                Probe::Css("[data-e2e*='ProductCard-description']"),
                Probe::Css(".description"),
            ];
            assert_eq!(first_of(card, &chain), "Ownership, borrowing and traits.");
            assert_eq!(first_of(card, &[Probe::Css(".instructor")]), "");
        });
    }

    #[test]
    fn invalid_selector_is_a_miss() {
        with_card(|card| {
            assert_eq!(first_of(card, &[Probe::Css("p[[["), Probe::Css("a")]), "Rust Basics");
        });
    }

    #[test]
    fn card_strategies_are_tried_in_order() {
        let document = Html::parse_document(CARD);
        let selector = Selector::parse("a").unwrap();
        let anchor = document.select(&selector).next().unwrap();

        let card = card_for(anchor, &[Card::Ancestor("article"), Card::Ancestor("li")]);
        assert_eq!(card.value().name(), "li");

        let card = card_for(anchor, &[Card::Ancestor("div[data-e2e*='SearchCard']")]);
        assert_eq!(card.value().attr("class"), Some("card"));

        let card = card_for(anchor, &[Card::Ancestor("article")]);
        assert_eq!(card.value().name(), "a");
    }
}
