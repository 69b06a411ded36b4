// src/report/mod.rs
// =============================================================================
// This module turns a finished crawl into the two output artifacts:
//
// - docs-sitemap-report.json: summary counts, page records, broken links
// - docs-sitemap-visual.md:   human-readable summary and sidebar tree
//
// Both files are overwritten on every run.
// =============================================================================

mod json;
mod markdown;

pub use json::to_json;
pub use markdown::render_markdown;

use crate::config::CrawlConfig;
use crate::crawl::{BrokenLink, CrawlOutcome, NonHtmlResource, PageRecord};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub visited_urls: usize,
    pub total_pages: usize,
    pub pages_with_sidebar: usize,
    pub pages_without_sidebar: usize,
    pub broken_links: usize,
    pub non_html_resources: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub seed_url: String,
    pub scope_prefix: String,
    pub summary: Summary,
    pub pages: Vec<PageRecord>,
    pub broken_links: Vec<BrokenLink>,
    #[serde(default)]
    pub non_html_resources: Vec<NonHtmlResource>,
}

impl Report {
    pub fn from_outcome(config: &CrawlConfig, outcome: &CrawlOutcome) -> Self {
        let pages_with_sidebar = outcome.pages.iter().filter(|p| p.has_sidebar).count();

        Report {
            generated_at: Utc::now(),
            seed_url: config.seed_url.to_string(),
            scope_prefix: config.scope_prefix.clone(),
            summary: Summary {
                visited_urls: outcome.visited.len(),
                total_pages: outcome.pages.len(),
                pages_with_sidebar,
                pages_without_sidebar: outcome.pages.len() - pages_with_sidebar,
                broken_links: outcome.broken_links.len(),
                non_html_resources: outcome.non_html.len(),
            },
            pages: outcome.pages.clone(),
            broken_links: outcome.broken_links.clone(),
            non_html_resources: outcome.non_html.clone(),
        }
    }

    /// The page whose sidebar is shown as "the" site tree: the first one
    /// crawled that has a non-empty sidebar.
    pub fn sidebar_source(&self) -> Option<&PageRecord> {
        self.pages.iter().find(|p| !p.sidebar.is_empty())
    }
}

// Writes both report files into the configured output directory
//
// Returns: the paths written (json, markdown)
pub fn write_reports(report: &Report, config: &CrawlConfig) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(&config.output_dir)?;

    let json_path = config.json_path();
    fs::write(&json_path, to_json(report)?)?;

    let markdown_path = config.markdown_path();
    fs::write(&markdown_path, render_markdown(report))?;

    info!(json = %json_path.display(), markdown = %markdown_path.display(), "reports written");
    Ok((json_path, markdown_path))
}
