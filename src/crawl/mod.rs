// src/crawl/mod.rs
// =============================================================================
// This module handles crawling the documentation site.
//
// Features:
// - Breadth-first crawl starting from a seed URL
// - Only follows same-origin links under the docs prefix
// - Each page visited exactly once, even with cyclic links
// - Failed pages become broken-link records instead of aborting the run
// =============================================================================

mod queue;
mod record;
mod scope;

pub use queue::crawl_site;
pub use record::{BrokenLink, BrokenReason, CrawlOutcome, NonHtmlResource, PageRecord};
