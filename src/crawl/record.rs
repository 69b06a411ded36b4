// src/crawl/record.rs
// =============================================================================
// The data a crawl produces: one PageRecord per page that loaded, one
// BrokenLink per page that did not.
//
// #[derive(Serialize, Deserialize)] lets these go straight into the JSON
// report without any conversion step.
// =============================================================================

use crate::page::SidebarItem;
use serde::{Deserialize, Serialize};

/// A documentation page that was navigated to and answered 200.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub has_sidebar: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sidebar: Vec<SidebarItem>,
    /// Distinct outgoing http(s) links, internal and external
    pub link_count: usize,
    /// Hops from the seed URL (seed = 0)
    pub depth: usize,
    /// The URL that was requested when the server redirected to `url`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirected_from: Option<String>,
}

/// Why a page counts as broken
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum BrokenReason {
    /// The server answered with something other than 200
    HttpStatus { status: u16 },
    /// A redirect pointing outside the crawl scope; it is not followed
    Redirect { status: u16, location: String },
    /// Navigation failed: timeout, refused connection, unreadable body...
    Error { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokenLink {
    pub url: String,
    /// Page on which the link was discovered; None for the seed URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_on: Option<String>,
    #[serde(flatten)]
    pub reason: BrokenReason,
}

impl BrokenLink {
    /// Short human-readable description, e.g. "HTTP 404"
    pub fn describe(&self) -> String {
        match &self.reason {
            BrokenReason::HttpStatus { status } => format!("HTTP {}", status),
            BrokenReason::Redirect { status, location } => {
                format!("HTTP {} -> {} (outside scope)", status, location)
            }
            BrokenReason::Error { message } => message.clone(),
        }
    }
}

/// A 200 response under the docs scope that is not an HTML page
/// (PDF, archive, image...). Listed in the report but never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonHtmlResource {
    pub url: String,
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_on: Option<String>,
}

/// Result of one crawl invocation.
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    /// Every URL navigated to, in visit order, each exactly once
    pub visited: Vec<String>,
    pub pages: Vec<PageRecord>,
    pub broken_links: Vec<BrokenLink>,
    pub non_html: Vec<NonHtmlResource>,
}
