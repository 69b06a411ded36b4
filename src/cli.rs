// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every argument is optional: running `docs-sitemap` with no arguments
// crawls a docs site served locally on port 3000 and writes both reports
// into the current directory.
// =============================================================================

use crate::config::{
    CrawlConfig, DEFAULT_MAX_PAGE_BYTES, DEFAULT_SEED_URL, DEFAULT_SIDEBAR_SELECTOR,
};
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "docs-sitemap",
    version,
    about = "Crawl a documentation site and report its pages, sidebar tree and broken links",
    long_about = "docs-sitemap visits every documentation page reachable from a seed URL, \
                  records each page's title and sidebar, and writes docs-sitemap-report.json \
                  and docs-sitemap-visual.md."
)]
pub struct Cli {
    /// Page to start crawling from
    #[arg(default_value = DEFAULT_SEED_URL)]
    pub seed_url: String,

    /// Directory the two report files are written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Per-page navigation timeout, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Pause between two pages, in milliseconds
    #[arg(long, default_value_t = 100)]
    pub delay_ms: u64,

    /// Stop after this many pages
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Do not follow links more than this many hops from the seed
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Only follow links whose path starts with this prefix
    /// (default: the seed's first path segment, e.g. /docs/ for /docs/intro;
    /// a single-segment seed such as /intro scopes the whole site, /)
    #[arg(long)]
    pub scope_prefix: Option<String>,

    /// Larger pages are reported as broken instead of parsed
    #[arg(long, default_value_t = DEFAULT_MAX_PAGE_BYTES)]
    pub max_page_bytes: u64,

    /// CSS selector of the sidebar element
    #[arg(long, default_value = DEFAULT_SIDEBAR_SELECTOR)]
    pub sidebar_selector: String,

    /// Also print the JSON report to stdout
    #[arg(long)]
    pub json: bool,

    /// Exit with code 1 when broken links are found
    #[arg(long)]
    pub fail_on_broken: bool,
}

impl Cli {
    pub fn to_config(&self) -> Result<CrawlConfig> {
        let mut config = CrawlConfig::new(&self.seed_url)?
            .with_output_dir(&self.out_dir)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_delay(Duration::from_millis(self.delay_ms))
            .with_max_pages(self.max_pages)
            .with_max_depth(self.max_depth)
            .with_max_page_bytes(self.max_page_bytes)
            .with_sidebar_selector(&self.sidebar_selector);

        if let Some(prefix) = &self.scope_prefix {
            config = config.with_scope_prefix(prefix);
        }

        Ok(config)
    }
}
