use scraper::ElementRef;
use url::Url;

/// Rendered text of a node with whitespace runs collapsed, the way a browser
/// reports `innerText` for a single line of content.
pub fn extract_text(node: ElementRef) -> String {
    normalize_whitespace(&node.text().collect::<Vec<_>>().join(" "))
}

/// Text held directly by the node, ignoring its descendants.
pub fn own_text(node: ElementRef) -> String {
    let raw = node
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| &**text)
        .collect::<Vec<_>>()
        .join(" ");
    normalize_whitespace(&raw)
}

pub fn normalize_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves an anchor href against the page it was found on.
///
/// Fragments are dropped so that `/course/x` and `/course/x#reviews` collapse
/// onto one record. Anything that is not http(s) after resolution is treated
/// as no link at all.
pub fn canonical_link(page_url: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let mut resolved = page_url.join(href).ok()?;
    if !matches!(resolved.scheme(), "http" | "https") {
        return None;
    }
    resolved.set_fragment(None);
    Some(resolved.to_string())
}
