// src/page/sidebar.rs
// =============================================================================
// Reads the sidebar navigation tree out of a documentation page.
//
// The docs theme renders its sidebar as nested lists:
//
//   <nav class="menu">
//     <ul class="menu__list">
//       <li><a href="/docs/intro">Intro</a></li>
//       <li>
//         <div class="menu__list-item-collapsible"><a href="/docs/guides">Guides</a></div>
//         <ul class="menu__list">
//           <li><a href="/docs/guides/setup">Setup</a></li>
//         </ul>
//       </li>
//     </ul>
//   </nav>
//
// Each <li> becomes a SidebarItem; a nested <ul> becomes its children.
// =============================================================================

use super::html::{collapse_whitespace, resolve_link};
use crate::config::DEFAULT_SIDEBAR_SELECTOR;
use crate::error::{Result, SitemapError};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

/// One entry of the sidebar menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarItem {
    pub label: String,
    /// Absolute link target. Categories that only expand have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SidebarItem>,
}

impl SidebarItem {
    /// Number of items in this subtree, this one included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(SidebarItem::count).sum::<usize>()
    }
}

/// Selectors used to read the sidebar, compiled once per crawl: the
/// configurable root plus the fixed `ul` and `a` lookups.
#[derive(Debug, Clone)]
pub struct SidebarSelector {
    root: Selector,
    list: Selector,
    anchor: Selector,
}

impl SidebarSelector {
    pub fn parse(css: &str) -> Result<Self> {
        let root =
            Selector::parse(css).map_err(|_| SitemapError::InvalidSelector(css.to_string()))?;
        Ok(Self::with_root(root))
    }

    fn with_root(root: Selector) -> Self {
        // Constant selectors, known to be valid
        SidebarSelector {
            root,
            list: Selector::parse("ul").unwrap(),
            anchor: Selector::parse("a").unwrap(),
        }
    }
}

impl Default for SidebarSelector {
    fn default() -> Self {
        // The default selector is a constant known to be valid
        Self::with_root(Selector::parse(DEFAULT_SIDEBAR_SELECTOR).unwrap())
    }
}

// Returns None when the page has no sidebar, otherwise its top-level items
// (possibly empty if the sidebar holds no list).
pub fn extract_sidebar(
    document: &Html,
    page_url: &Url,
    selector: &SidebarSelector,
) -> Option<Vec<SidebarItem>> {
    let root = document.select(&selector.root).next()?;

    let list = if root.value().name() == "ul" {
        Some(root)
    } else {
        root.select(&selector.list).next()
    };

    Some(
        list.map(|ul| parse_list(ul, page_url, selector))
            .unwrap_or_default(),
    )
}

fn parse_list(
    list: ElementRef<'_>,
    page_url: &Url,
    selector: &SidebarSelector,
) -> Vec<SidebarItem> {
    let mut items = Vec::new();

    for li in child_elements(list).filter(|e| e.value().name() == "li") {
        let mut link: Option<(String, Option<String>)> = None;
        let mut children = Vec::new();

        for part in child_elements(li) {
            match part.value().name() {
                "ul" => children.extend(parse_list(part, page_url, selector)),
                "a" if link.is_none() => link = Some(read_link(part, page_url)),
                // Collapsible categories wrap their link in a <div>
                _ if link.is_none() => {
                    if let Some(anchor) = part.select(&selector.anchor).next() {
                        link = Some(read_link(anchor, page_url));
                    }
                }
                _ => {}
            }
        }

        match link {
            Some((label, href)) if !label.is_empty() => items.push(SidebarItem {
                label,
                href,
                children,
            }),
            _ => {}
        }
    }

    items
}

fn read_link(anchor: ElementRef<'_>, page_url: &Url) -> (String, Option<String>) {
    let label = collapse_whitespace(&anchor.text().collect::<String>());
    let href = anchor
        .value()
        .attr("href")
        .and_then(|href| resolve_link(page_url, href))
        .map(|url| url.to_string());
    (label, href)
}

fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("http://localhost:3000/docs/intro").unwrap()
    }

    const NESTED: &str = r##"
        <html><body>
          <nav class="menu">
            <ul class="theme-doc-sidebar-menu menu__list">
              <li class="menu__list-item"><a class="menu__link" href="/docs/intro">Intro</a></li>
              <li class="menu__list-item">
                <div class="menu__list-item-collapsible">
                  <a class="menu__link menu__link--sublist" href="/docs/guides">Guides</a>
                  <button aria-label="Toggle"></button>
                </div>
                <ul class="menu__list">
                  <li class="menu__list-item"><a class="menu__link" href="/docs/guides/setup">Setup</a></li>
                  <li class="menu__list-item"><a class="menu__link" href="/docs/guides/deploy#top">Deploy</a></li>
                </ul>
              </li>
              <li class="menu__list-item">
                <a class="menu__link menu__link--sublist" href="#">Reference</a>
                <ul class="menu__list">
                  <li class="menu__list-item"><a class="menu__link" href="/docs/api">API</a></li>
                </ul>
              </li>
            </ul>
          </nav>
        </body></html>
    "##;

    #[test]
    fn test_nested_sidebar_tree() {
        let document = Html::parse_document(NESTED);
        let items = extract_sidebar(&document, &page_url(), &SidebarSelector::default()).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].label, "Intro");
        assert_eq!(items[0].href.as_deref(), Some("http://localhost:3000/docs/intro"));

        let guides = &items[1];
        assert_eq!(guides.label, "Guides");
        assert_eq!(guides.children.len(), 2);
        assert_eq!(
            guides.children[1].href.as_deref(),
            Some("http://localhost:3000/docs/guides/deploy")
        );

        // "#" is not a navigable link
        let reference = &items[2];
        assert_eq!(reference.href, None);
        assert_eq!(reference.children[0].label, "API");

        let total: usize = items.iter().map(SidebarItem::count).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn test_no_sidebar() {
        let document = Html::parse_document("<html><body><main>content</main></body></html>");
        assert_eq!(
            extract_sidebar(&document, &page_url(), &SidebarSelector::default()),
            None
        );
    }

    #[test]
    fn test_sidebar_without_list_is_empty() {
        let document = Html::parse_document(r#"<nav class="menu"><p>loading</p></nav>"#);
        let items = extract_sidebar(&document, &page_url(), &SidebarSelector::default());
        assert_eq!(items, Some(Vec::new()));
    }

    #[test]
    fn test_custom_selector() {
        let document = Html::parse_document(
            r#"<div id="toc"><ul><li><a href="/docs/x">X</a></li></ul></div>"#,
        );
        let selector = SidebarSelector::parse("#toc").unwrap();
        let items = extract_sidebar(&document, &page_url(), &selector).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "X");
    }

    #[test]
    fn test_selector_reused_across_pages() {
        let selector = SidebarSelector::default();
        for (path, count) in [("/docs/intro", 3), ("/docs/guides/setup", 3)] {
            let url = Url::parse(&format!("http://localhost:3000{}", path)).unwrap();
            let document = Html::parse_document(NESTED);
            let items = extract_sidebar(&document, &url, &selector).unwrap();
            assert_eq!(items.len(), count);
        }
    }

    #[test]
    fn test_invalid_selector() {
        assert!(matches!(
            SidebarSelector::parse("nav[["),
            Err(SitemapError::InvalidSelector(_))
        ));
    }
}
