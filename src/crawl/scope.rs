// src/crawl/scope.rs
// =============================================================================
// Decides which discovered links the crawler is allowed to follow.
//
// A link is in scope when:
// 1. It has the same origin (scheme, host, port) as the seed URL
// 2. Its path lives under the documentation prefix (e.g. /docs/)
//
// Everything else (external sites, the blog, the landing page) is counted
// in the page's link total but never navigated.
// =============================================================================

use url::{Origin, Url};

#[derive(Debug, Clone)]
pub struct CrawlScope {
    origin: Origin,
    prefix: String,
}

impl CrawlScope {
    pub fn new(seed: &Url, prefix: &str) -> Self {
        Self {
            origin: seed.origin(),
            prefix: prefix.to_string(),
        }
    }

    pub fn contains(&self, url: &Url) -> bool {
        if url.origin() != self.origin {
            return false;
        }

        let path = url.path();
        // "/docs" itself belongs to "/docs/"
        path.starts_with(&self.prefix) || path == self.prefix.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> CrawlScope {
        let seed = Url::parse("http://localhost:3000/docs/intro").unwrap();
        CrawlScope::new(&seed, "/docs/")
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_same_origin_docs_page() {
        assert!(scope().contains(&url("http://localhost:3000/docs/a")));
        assert!(scope().contains(&url("http://localhost:3000/docs")));
    }

    #[test]
    fn test_other_section_is_out_of_scope() {
        assert!(!scope().contains(&url("http://localhost:3000/blog/post")));
        assert!(!scope().contains(&url("http://localhost:3000/docsearch")));
    }

    #[test]
    fn test_other_origin_is_out_of_scope() {
        assert!(!scope().contains(&url("https://localhost:3000/docs/a")));
        assert!(!scope().contains(&url("http://localhost:4000/docs/a")));
        assert!(!scope().contains(&url("https://github.com/docs/a")));
    }

    #[test]
    fn test_root_prefix_covers_whole_origin() {
        let seed = url("http://localhost:3000/");
        let scope = CrawlScope::new(&seed, "/");
        assert!(scope.contains(&url("http://localhost:3000/blog/post")));
    }
}
