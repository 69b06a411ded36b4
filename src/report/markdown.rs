// src/report/markdown.rs
// =============================================================================
// Renders the report as Markdown for humans.
//
// Layout:
//   # Documentation Sitemap
//   ## Summary              (table of counts)
//   ## Sidebar Tree         (nested bullet list, from one page's sidebar)
//   ## Pages                (every page crawled, with its title)
//   ## Pages Without Sidebar
//   ## Non-HTML Resources
//   ## Broken Links
// =============================================================================

use super::Report;
use crate::page::SidebarItem;

pub fn render_markdown(report: &Report) -> String {
    let mut out = String::new();

    out.push_str("# Documentation Sitemap\n\n");
    out.push_str(&format!(
        "Generated: {}  \n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("Seed URL: {}  \n", report.seed_url));
    out.push_str(&format!("Scope: `{}`\n\n", report.scope_prefix));

    let summary = &report.summary;
    out.push_str("## Summary\n\n");
    out.push_str("| Metric | Count |\n");
    out.push_str("|--------|-------|\n");
    out.push_str(&format!("| URLs visited | {} |\n", summary.visited_urls));
    out.push_str(&format!("| Pages crawled | {} |\n", summary.total_pages));
    out.push_str(&format!("| Pages with sidebar | {} |\n", summary.pages_with_sidebar));
    out.push_str(&format!(
        "| Pages without sidebar | {} |\n",
        summary.pages_without_sidebar
    ));
    out.push_str(&format!(
        "| Non-HTML resources | {} |\n",
        summary.non_html_resources
    ));
    out.push_str(&format!("| Broken links | {} |\n\n", summary.broken_links));

    out.push_str("## Sidebar Tree\n\n");
    match report.sidebar_source() {
        Some(page) => {
            let entries: usize = page.sidebar.iter().map(SidebarItem::count).sum();
            out.push_str(&format!("_Taken from {} ({} entries)_\n\n", page.url, entries));
            render_tree(&mut out, &page.sidebar, 0);
            out.push('\n');
        }
        None => out.push_str("_No sidebar found on any page._\n\n"),
    }

    out.push_str("## Pages\n\n");
    if report.pages.is_empty() {
        out.push_str("_None_\n");
    }
    for page in &report.pages {
        out.push_str(&format!(
            "- {} (depth {}, {} links)",
            link(page_label(&page.title, &page.url), Some(page.url.as_str())),
            page.depth,
            page.link_count
        ));
        if let Some(from) = &page.redirected_from {
            out.push_str(&format!(", redirected from {}", from));
        }
        out.push('\n');
    }
    out.push('\n');

    out.push_str("## Pages Without Sidebar\n\n");
    let mut without_sidebar = report.pages.iter().filter(|p| !p.has_sidebar).peekable();
    if without_sidebar.peek().is_none() {
        out.push_str("_None_\n");
    }
    for page in without_sidebar {
        out.push_str(&format!("- {}\n", page.url));
    }
    out.push('\n');

    out.push_str("## Non-HTML Resources\n\n");
    if report.non_html_resources.is_empty() {
        out.push_str("_None_\n");
    }
    for resource in &report.non_html_resources {
        out.push_str(&format!("- {} ({})\n", resource.url, resource.content_type));
    }
    out.push('\n');

    out.push_str("## Broken Links\n\n");
    if report.broken_links.is_empty() {
        out.push_str("_None_\n");
    }
    for broken in &report.broken_links {
        match &broken.found_on {
            Some(source) => out.push_str(&format!(
                "- `{}`: {} (found on {})\n",
                broken.url,
                broken.describe(),
                source
            )),
            None => out.push_str(&format!("- `{}`: {}\n", broken.url, broken.describe())),
        }
    }

    out
}

fn render_tree(out: &mut String, items: &[SidebarItem], level: usize) {
    for item in items {
        out.push_str(&"  ".repeat(level));
        out.push_str(&format!("- {}\n", link(&item.label, item.href.as_deref())));
        render_tree(out, &item.children, level + 1);
    }
}

fn page_label<'a>(title: &'a str, url: &'a str) -> &'a str {
    if title.is_empty() {
        url
    } else {
        title
    }
}

// Hrefs go in <...> so parentheses inside a URL do not end the link
fn link(label: &str, href: Option<&str>) -> String {
    let label = escape_inline(label);
    match href {
        Some(href) => format!("[{}](<{}>)", label, href),
        None => label,
    }
}

fn escape_inline(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']' | '*' | '_' | '`' | '<' | '>') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_report;

    #[test]
    fn test_sidebar_tree_is_nested() {
        let markdown = render_markdown(&sample_report());
        assert!(markdown.contains("_Taken from http://localhost:3000/docs/intro (3 entries)_"));
        assert!(markdown.contains("- [Intro](<http://localhost:3000/docs/intro>)\n"));
        assert!(markdown.contains("- Guides\n  - [Setup](<http://localhost:3000/docs/guides/setup>)\n"));
    }

    #[test]
    fn test_pages_and_broken_links_listed() {
        let markdown = render_markdown(&sample_report());
        assert!(markdown.contains("| Pages crawled | 2 |"));
        // untitled page falls back to its url
        assert!(markdown.contains(
            "- [http://localhost:3000/docs/guides/setup](<http://localhost:3000/docs/guides/setup>) (depth 1, 1 links), redirected from http://localhost:3000/docs/setup\n"
        ));
        assert!(markdown.contains("| Non-HTML resources | 1 |"));
        assert!(markdown.contains("- http://localhost:3000/docs/guide.pdf (application/pdf)\n"));
        assert!(markdown.contains(
            "- `http://localhost:3000/docs/old`: HTTP 404 (found on http://localhost:3000/docs/intro)"
        ));
    }

    #[test]
    fn test_empty_report() {
        let mut report = sample_report();
        report.pages.clear();
        report.broken_links.clear();
        report.non_html_resources.clear();

        let markdown = render_markdown(&report);
        assert!(markdown.contains("_No sidebar found on any page._"));
        assert!(markdown.contains("## Broken Links\n\n_None_\n"));
    }

    #[test]
    fn test_brackets_in_labels_are_escaped() {
        assert_eq!(link("[beta] API", None), "\\[beta\\] API");
    }

    #[test]
    fn test_emphasis_characters_in_labels_are_escaped() {
        assert_eq!(
            link("*new* `config_file`", None),
            "\\*new\\* \\`config\\_file\\`"
        );
    }

    #[test]
    fn test_parentheses_in_href_stay_inside_link() {
        assert_eq!(
            link("Rust (lang)", Some("http://localhost:3000/docs/rust_(lang)")),
            "[Rust (lang)](<http://localhost:3000/docs/rust_(lang)>)"
        );
    }
}
