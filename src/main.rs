// src/main.rs
// =============================================================================
// This is the entry point of the docs-sitemap CLI.
//
// What happens here:
// 1. Parse command-line arguments into a CrawlConfig
// 2. Crawl the documentation site, one page at a time
// 3. Write the JSON report and the Markdown tree
// 4. Print a summary and exit (0 = done, 1 = broken links with
//    --fail-on-broken, 2 = error)
// =============================================================================

mod cli;
mod config;
mod crawl;
mod error;
mod page;
mod report;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use report::Report;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr, filtered with RUST_LOG (default: warnings)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = cli.to_config()?;

    println!("🔍 Crawling documentation from: {}", config.seed_url);
    println!("📂 Scope: {}", config.scope_prefix);

    let outcome = crawl::crawl_site(&config).await?;
    let report = Report::from_outcome(&config, &outcome);
    let (json_path, markdown_path) = report::write_reports(&report, &config)?;

    if cli.json {
        println!("{}", report::to_json(&report)?);
    }

    print_summary(&report);
    println!("\n📝 Wrote {}", json_path.display());
    println!("📝 Wrote {}", markdown_path.display());

    if cli.fail_on_broken && !report.broken_links.is_empty() {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn print_summary(report: &Report) {
    let summary = &report.summary;

    println!("\n📊 Summary:");
    println!("   📄 Pages crawled: {}", summary.total_pages);
    println!("   🧭 With sidebar: {}", summary.pages_with_sidebar);
    println!("   ⚠️  Without sidebar: {}", summary.pages_without_sidebar);
    println!("   📎 Non-HTML resources: {}", summary.non_html_resources);
    println!("   ❌ Broken links: {}", summary.broken_links);

    for broken in &report.broken_links {
        println!("      {} ({})", broken.url, broken.describe());
    }
}
