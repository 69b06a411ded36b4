// src/page/html.rs
// =============================================================================
// This module extracts the title and the links from a parsed HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
//
// And the `url` crate to resolve relative hrefs the way a browser does.
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

// Returns the page title
//
// Uses <title> when present and non-empty, otherwise the first <h1>.
// Whitespace is collapsed so multi-line titles print on one line.
pub fn extract_title(document: &Html) -> String {
    // Constant selectors, known to be valid
    let title_selector = Selector::parse("title").unwrap();
    let h1_selector = Selector::parse("h1").unwrap();

    document
        .select(&title_selector)
        .chain(document.select(&h1_selector))
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

// Extracts every distinct http(s) link on the page
//
// Parameters:
//   document: the parsed page
//   page_url: the URL of the page (for resolving relative links)
//
// Returns: absolute URLs in document order, without fragments
//
// Example:
//   <a href="/docs/a#setup">  on http://localhost:3000/docs/intro
//   -> http://localhost:3000/docs/a
pub fn extract_links(document: &Html, page_url: &Url) -> Vec<Url> {
    let selector = Selector::parse("a[href]").unwrap();

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(url) = resolve_link(page_url, href) {
                if seen.insert(url.clone()) {
                    links.push(url);
                }
            }
        }
    }

    links
}

// Resolves a link (possibly relative) to an absolute http(s) URL
//
// Returns None for in-page anchors, special protocols and anything that
// does not resolve to http/https. The fragment is always dropped: two links
// to different sections of one page are the same page.
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
