// src/crawl/queue.rs
// =============================================================================
// This module implements the documentation crawl with a breadth-first queue.
//
// How it works:
// 1. Start with the seed URL in the queue (depth 0) and mark it scheduled
// 2. Pop a page, navigate to it
// 3. 200 HTML -> record its metadata, queue in-scope links not yet scheduled
//    200 other -> list it as a non-HTML resource
//    anything else -> record a broken link and move on
// 4. Repeat until the queue is empty (or a page/depth cap is reached)
//
// Redirects are only followed while they stay inside the crawl scope, and a
// page reached through a redirect is recorded under its final URL, once.
//
// One page at a time: a single client, sequential awaits, no retries.
// A failing page never stops the crawl.
//
// Rust concepts:
// - HashSet: URLs already scheduled, so every page is visited once
// - VecDeque: FIFO queue for breadth-first traversal
// =============================================================================

use super::record::{BrokenLink, BrokenReason, CrawlOutcome, NonHtmlResource, PageRecord};
use super::scope::CrawlScope;
use crate::config::CrawlConfig;
use crate::error::Result;
use crate::page::{extract_page, SidebarSelector};
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, warn};
use url::Url;

const MAX_REDIRECTS: usize = 10;

// Represents a page waiting in the crawl queue
#[derive(Debug, Clone)]
struct CrawlItem {
    url: Url,
    depth: usize,
    found_on: Option<String>,
}

// What happened when we navigated to a page
enum Visit {
    Loaded { final_url: Url, html: String },
    NotHtml { content_type: String },
    Failed(BrokenReason),
}

// Crawls the documentation site described by `config`
//
// Returns: every navigated URL, the page records, the broken links and the
// non-HTML resources. Errors only for setup problems (bad sidebar selector,
// HTTP client); page failures are part of the outcome.
pub async fn crawl_site(config: &CrawlConfig) -> Result<CrawlOutcome> {
    let sidebar_selector = SidebarSelector::parse(&config.sidebar_selector)?;
    let scope = CrawlScope::new(&config.seed_url, &config.scope_prefix);

    let client = Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.as_str())
        .redirect(redirect_policy(scope.clone()))
        .build()?;

    let mut seed = config.seed_url.clone();
    seed.set_fragment(None);

    info!(seed = %seed, prefix = %config.scope_prefix, "starting docs crawl");

    let mut queue = VecDeque::new();
    let mut scheduled = HashSet::new();
    // Final URLs that already produced a page record
    let mut recorded = HashSet::new();
    scheduled.insert(seed.to_string());
    queue.push_back(CrawlItem {
        url: seed,
        depth: 0,
        found_on: None,
    });

    let mut outcome = CrawlOutcome::default();

    while let Some(item) = queue.pop_front() {
        // Already reached earlier through a redirect
        if recorded.contains(item.url.as_str()) {
            debug!(url = %item.url, "already recorded, skipping");
            continue;
        }

        if let Some(max_pages) = config.max_pages {
            if outcome.visited.len() >= max_pages {
                info!(max_pages, remaining = queue.len() + 1, "page limit reached, stopping");
                break;
            }
        }

        // Polite crawling: small pause between navigations
        if !outcome.visited.is_empty() && !config.delay.is_zero() {
            tokio::time::sleep(config.delay).await;
        }

        println!("  Crawling [depth {}]: {}", item.depth, item.url);
        outcome.visited.push(item.url.to_string());

        match navigate(&client, &item.url, config.max_page_bytes).await {
            Visit::Loaded { final_url, html } => {
                scheduled.insert(final_url.to_string());
                if !recorded.insert(final_url.to_string()) {
                    debug!(url = %item.url, target = %final_url, "redirects to a page already recorded");
                    continue;
                }

                let data = extract_page(&html, &final_url, &sidebar_selector);

                let can_descend = config.max_depth.map_or(true, |max| item.depth < max);
                if can_descend {
                    for link in data.links.iter().filter(|link| scope.contains(link)) {
                        if scheduled.insert(link.to_string()) {
                            debug!(from = %final_url, to = %link, "queued");
                            queue.push_back(CrawlItem {
                                url: link.clone(),
                                depth: item.depth + 1,
                                found_on: Some(final_url.to_string()),
                            });
                        }
                    }
                }

                let redirected_from = (final_url != item.url).then(|| item.url.to_string());
                outcome.pages.push(PageRecord {
                    url: final_url.to_string(),
                    has_sidebar: data.has_sidebar(),
                    title: data.title,
                    sidebar: data.sidebar.unwrap_or_default(),
                    link_count: data.links.len(),
                    depth: item.depth,
                    redirected_from,
                });
            }
            Visit::NotHtml { content_type } => {
                debug!(url = %item.url, content_type = %content_type, "not an HTML page");
                outcome.non_html.push(NonHtmlResource {
                    url: item.url.to_string(),
                    content_type,
                    found_on: item.found_on,
                });
            }
            Visit::Failed(reason) => {
                let broken = BrokenLink {
                    url: item.url.to_string(),
                    found_on: item.found_on,
                    reason,
                };
                warn!(url = %broken.url, reason = %broken.describe(), "broken link");
                outcome.broken_links.push(broken);
            }
        }
    }

    info!(
        pages = outcome.pages.len(),
        broken = outcome.broken_links.len(),
        non_html = outcome.non_html.len(),
        "crawl finished"
    );

    Ok(outcome)
}

// Follows redirects only while they stay inside the crawl scope.
// A hop leaving it is not requested: the 3xx response comes back as is.
fn redirect_policy(scope: CrawlScope) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() > MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if scope.contains(attempt.url()) {
            attempt.follow()
        } else {
            attempt.stop()
        }
    })
}

// Navigates to one page and reads its HTML
async fn navigate(client: &Client, url: &Url, max_bytes: u64) -> Visit {
    let response = match client.get(url.as_str()).send().await {
        Ok(response) => response,
        Err(e) => return Visit::Failed(describe_error(e)),
    };

    let status = response.status();
    if status.is_redirection() {
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|raw| {
                response
                    .url()
                    .join(raw)
                    .map(|target| target.to_string())
                    .unwrap_or_else(|_| raw.to_string())
            })
            .unwrap_or_else(|| "unknown".to_string());

        return Visit::Failed(BrokenReason::Redirect {
            status: status.as_u16(),
            location,
        });
    }

    if status != StatusCode::OK {
        return Visit::Failed(BrokenReason::HttpStatus {
            status: status.as_u16(),
        });
    }

    // A missing Content-Type is treated as HTML
    if let Some(content_type) = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    {
        if !is_html(content_type) {
            return Visit::NotHtml {
                content_type: content_type.to_string(),
            };
        }
    }

    // Relative links resolve against where we landed after redirects
    let mut final_url = response.url().clone();
    final_url.set_fragment(None);

    match read_body(response, max_bytes).await {
        Ok(html) => Visit::Loaded { final_url, html },
        Err(reason) => Visit::Failed(reason),
    }
}

fn is_html(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}

// Reads the body chunk by chunk, giving up once it grows past `max_bytes`
async fn read_body(
    mut response: Response,
    max_bytes: u64,
) -> std::result::Result<String, BrokenReason> {
    let too_large = || BrokenReason::Error {
        message: format!("Page larger than {} bytes", max_bytes),
    };

    if response.content_length().is_some_and(|len| len > max_bytes) {
        return Err(too_large());
    }

    let mut body = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                if (body.len() + chunk.len()) as u64 > max_bytes {
                    return Err(too_large());
                }
                body.extend_from_slice(&chunk);
            }
            Ok(None) => break,
            Err(e) => return Err(describe_error(e)),
        }
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}

// Turns a reqwest error into a readable message
fn describe_error(error: reqwest::Error) -> BrokenReason {
    let message = if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else {
        error.to_string()
    };

    BrokenReason::Error { message }
}
