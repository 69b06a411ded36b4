// src/page/mod.rs
// =============================================================================
// This module turns the HTML of one documentation page into the metadata the
// report needs.
//
// Submodules:
// - html: page title and outgoing links
// - sidebar: the nested navigation menu rendered by the docs theme
//
// Rust concepts:
// - Option<T>: a page may or may not have a sidebar
// - Re-exports: callers only see `page::extract_page` and the data types
// =============================================================================

mod html;
mod sidebar;

use html::{extract_links, extract_title};
pub use sidebar::{SidebarItem, SidebarSelector};
use sidebar::extract_sidebar;

use scraper::Html;
use url::Url;

/// Everything scraped from a single page.
#[derive(Debug, Clone)]
pub struct PageData {
    pub title: String,
    /// Distinct absolute http(s) links, in document order, fragments removed
    pub links: Vec<Url>,
    /// `None` when the page has no sidebar at all
    pub sidebar: Option<Vec<SidebarItem>>,
}

impl PageData {
    pub fn has_sidebar(&self) -> bool {
        self.sidebar.is_some()
    }
}

/// Parses a page once and pulls out its title, links and sidebar tree.
pub fn extract_page(html: &str, page_url: &Url, sidebar_selector: &SidebarSelector) -> PageData {
    let document = Html::parse_document(html);

    PageData {
        title: extract_title(&document),
        links: extract_links(&document, page_url),
        sidebar: extract_sidebar(&document, page_url, sidebar_selector),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC_PAGE: &str = r##"
        <html>
          <head><title>Intro | My Docs</title></head>
          <body>
            <aside class="theme-doc-sidebar-container">
              <nav class="menu">
                <ul class="theme-doc-sidebar-menu menu__list">
                  <li class="menu__list-item"><a class="menu__link" href="/docs/intro">Intro</a></li>
                  <li class="menu__list-item"><a class="menu__link" href="/docs/a">A</a></li>
                </ul>
              </nav>
            </aside>
            <main>
              <h1>Intro</h1>
              <a href="/docs/b">B</a>
              <a href="https://github.com/example">GitHub</a>
            </main>
          </body>
        </html>
    "##;

    #[test]
    fn test_extract_full_page() {
        let url = Url::parse("http://localhost:3000/docs/intro").unwrap();
        let selector = SidebarSelector::default();
        let page = extract_page(DOC_PAGE, &url, &selector);

        assert_eq!(page.title, "Intro | My Docs");
        assert!(page.has_sidebar());
        assert_eq!(page.sidebar.as_ref().unwrap().len(), 2);
        // intro, a, b, github
        assert_eq!(page.links.len(), 4);
    }

    #[test]
    fn test_page_without_sidebar() {
        let url = Url::parse("http://localhost:3000/docs/plain").unwrap();
        let page = extract_page(
            "<html><head><title>Plain</title></head><body><p>hi</p></body></html>",
            &url,
            &SidebarSelector::default(),
        );
        assert!(!page.has_sidebar());
        assert!(page.links.is_empty());
    }
}
