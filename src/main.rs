// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Validate them into a CrawlConfig (bad URL or regex = fatal error)
// 3. Crawl the site, printing one line per fetched page
// 4. Print the run report and exit (0 = crawl finished, 2 = error)
//
// Rust concepts used:
// - async/await: Pages are fetched with an async HTTP client
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - validated crawl settings
mod crawl;         // src/crawl/ - the breadth-first crawl loop
mod extract;       // src/extract/ - finding routes in HTML
mod fetch;         // src/fetch/ - downloading pages
mod logging;       // src/logging.rs - tracing setup

use clap::Parser;
use cli::Cli;
use config::CrawlConfig;
use crawl::{CrawlReport, Crawler};
use fetch::HttpFetcher;
use std::time::Duration;

use anyhow::{Context, Result};

#[tokio::main]
async fn main() {
    // Every normal way a crawl ends (no more routes, depth reached,
    // time budget used up) exits with 0
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level);

    let config = CrawlConfig::from_settings(&cli.settings())
        .context("invalid crawl configuration")?;

    if !cli.json {
        print_settings(&config, &cli);
    }

    let fetcher = HttpFetcher::new(Duration::from_secs(cli.timeout_secs), &cli.user_agent)
        .context("failed to create HTTP client")?;

    let crawler = Crawler::new(config, fetcher)
        .context("invalid crawl configuration")?
        .show_progress(!cli.quiet && !cli.json);

    let report = crawler.crawl().await;

    print_report(&report, cli.json)
}

// Echoes the resolved settings before the crawl starts
fn print_settings(config: &CrawlConfig, cli: &Cli) {
    let max_depth = config
        .max_depth
        .map(|depth| depth.to_string())
        .unwrap_or_else(|| "unlimited".to_string());
    let abort_after = config
        .time_budget
        .map(|budget| format!("{} sec", budget.as_secs()))
        .unwrap_or_else(|| "never".to_string());

    println!("🔥 Warming cache for: {}", config.base_url);
    println!("   Delay: {} ms", config.delay.as_millis());
    println!("   Max depth: {}", max_depth);
    println!("   Skip matched regex: {}", cli.skip_matched_regex);
    println!("   Abort after: {}", abort_after);
    println!("   Concurrency: {}", config.concurrency);
    println!();
}

// Prints the report either as a summary or JSON
fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
        return Ok(());
    }

    println!();
    println!("📊 Summary:");
    println!("   📄 Pages fetched: {}", report.pages_fetched);
    println!("   ❌ Failed: {}", report.pages_failed);
    println!("   🔗 Routes discovered: {}", report.routes_discovered);
    println!("   🧭 Deepest depth: {}", report.deepest_depth);
    println!("   ⏱️  Elapsed: {:.2} seconds", report.elapsed_secs);
    println!("   🏁 Stopped: {}", report.termination.describe());
    Ok(())
}
