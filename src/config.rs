// src/config.rs
// =============================================================================
// Crawl settings, built from the command line (see cli.rs) or directly in
// tests.
//
// Every field has a default that matches the usual setup: a documentation
// site served locally on port 3000 with its pages under /docs/.
// =============================================================================

use crate::error::{Result, SitemapError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_SEED_URL: &str = "http://localhost:3000/docs/intro";
pub const DEFAULT_SIDEBAR_SELECTOR: &str = "nav.menu, .theme-doc-sidebar-menu";
pub const JSON_REPORT_FILE: &str = "docs-sitemap-report.json";
pub const MARKDOWN_REPORT_FILE: &str = "docs-sitemap-visual.md";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_MAX_PAGE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed_url: Url,
    /// Path prefix a link must start with to be crawled, e.g. "/docs/"
    pub scope_prefix: String,
    /// Per-navigation timeout
    pub timeout: Duration,
    /// Pause between two navigations
    pub delay: Duration,
    pub max_pages: Option<usize>,
    /// Maximum number of hops from the seed (seed = depth 0)
    pub max_depth: Option<usize>,
    /// Pages with a larger body are reported as broken instead of parsed
    pub max_page_bytes: u64,
    pub output_dir: PathBuf,
    pub sidebar_selector: String,
    pub user_agent: String,
}

impl CrawlConfig {
    /// Validates the seed URL and fills in the defaults.
    pub fn new(seed_url: &str) -> Result<Self> {
        let seed = Url::parse(seed_url).map_err(|e| SitemapError::InvalidUrl {
            url: seed_url.to_string(),
            reason: e.to_string(),
        })?;

        if seed.scheme() != "http" && seed.scheme() != "https" {
            return Err(SitemapError::InvalidUrl {
                url: seed_url.to_string(),
                reason: format!("unsupported scheme '{}'", seed.scheme()),
            });
        }
        if seed.host_str().is_none() {
            return Err(SitemapError::InvalidUrl {
                url: seed_url.to_string(),
                reason: "missing host".to_string(),
            });
        }

        let scope_prefix = default_scope_prefix(&seed);

        Ok(Self {
            seed_url: seed,
            scope_prefix,
            timeout: DEFAULT_TIMEOUT,
            delay: DEFAULT_DELAY,
            max_pages: None,
            max_depth: None,
            max_page_bytes: DEFAULT_MAX_PAGE_BYTES,
            output_dir: PathBuf::from("."),
            sidebar_selector: DEFAULT_SIDEBAR_SELECTOR.to_string(),
            user_agent: format!("docs-sitemap/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    pub fn with_scope_prefix(mut self, prefix: &str) -> Self {
        self.scope_prefix = normalize_prefix(prefix);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_page_bytes(mut self, max_page_bytes: u64) -> Self {
        self.max_page_bytes = max_page_bytes;
        self
    }

    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_sidebar_selector(mut self, selector: &str) -> Self {
        self.sidebar_selector = selector.to_string();
        self
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join(JSON_REPORT_FILE)
    }

    pub fn markdown_path(&self) -> PathBuf {
        self.output_dir.join(MARKDOWN_REPORT_FILE)
    }
}

// "/docs/intro" -> "/docs/", "/docs/" -> "/docs/"
// A seed with a single segment ("/intro") is a page at the site root, so the
// whole origin is in scope: "/intro" -> "/", "/" -> "/"
fn default_scope_prefix(seed: &Url) -> String {
    let segments: Vec<&str> = seed
        .path_segments()
        .map(|segments| segments.collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [first, _, ..] if !first.is_empty() => format!("/{}/", first),
        _ => "/".to_string(),
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scope_from_seed() {
        let config = CrawlConfig::new("http://localhost:3000/docs/intro").unwrap();
        assert_eq!(config.scope_prefix, "/docs/");
    }

    #[test]
    fn test_root_seed_scopes_whole_site() {
        let config = CrawlConfig::new("http://localhost:3000/").unwrap();
        assert_eq!(config.scope_prefix, "/");
    }

    #[test]
    fn test_single_segment_seed_scopes_whole_site() {
        let config = CrawlConfig::new("http://localhost:3000/intro").unwrap();
        assert_eq!(config.scope_prefix, "/");
    }

    #[test]
    fn test_directory_seed_keeps_its_segment() {
        let config = CrawlConfig::new("http://localhost:3000/docs/").unwrap();
        assert_eq!(config.scope_prefix, "/docs/");
    }

    #[test]
    fn test_scope_prefix_is_normalized() {
        let config = CrawlConfig::new(DEFAULT_SEED_URL)
            .unwrap()
            .with_scope_prefix("guides");
        assert_eq!(config.scope_prefix, "/guides/");
    }

    #[test]
    fn test_rejects_non_http_seed() {
        let err = CrawlConfig::new("ftp://example.com/docs").unwrap_err();
        assert!(matches!(err, SitemapError::InvalidUrl { .. }));
    }

    #[test]
    fn test_rejects_garbage_seed() {
        assert!(CrawlConfig::new("not a url").is_err());
    }

    #[test]
    fn test_output_paths() {
        let config = CrawlConfig::new(DEFAULT_SEED_URL)
            .unwrap()
            .with_output_dir("out");
        assert_eq!(config.json_path(), PathBuf::from("out").join(JSON_REPORT_FILE));
        assert_eq!(config.markdown_path(), PathBuf::from("out").join(MARKDOWN_REPORT_FILE));
    }
}
