use crate::parsers::ParseResult;
use scraper::{Html, Selector};

/// Parses HTML content to extract body text and anchor targets
pub fn parse(html: &str) -> ParseResult {
    let doc = Html::parse_document(html);

    // Extract text content
    let content_selector = Selector::parse("body").unwrap();
    let text = doc
        .select(&content_selector)
        .flat_map(|n| n.text())
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    // Extract links
    let link_selector = Selector::parse("a[href]").unwrap();
    let links = doc
        .select(&link_selector)
        .filter_map(|e| e.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(|s| s.to_string())
        .collect::<Vec<String>>();

    ::log::debug!("HTML parser found {} links", links.len());
    if !links.is_empty() {
        ::log::trace!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    ParseResult::new(text, links)
}
