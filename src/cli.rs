// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is a single command: crawl the site at --url and warm its cache.
// Every option has a default, so `cache-warmer` alone works as long as
// CACHE_WARMER_BASE_URL is set (the store's configured base URL).
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct
// - Option<T>: Options that may be left out entirely
// =============================================================================

use clap::Parser;

use crate::config::{RawSettings, DEFAULT_SKIP_REGEX};
use crate::logging::LogLevel;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "cache-warmer",
    version,
    about = "Warms a site's full-page cache by crawling every same-origin page",
    long_about = "cache-warmer starts at the base URL and visits every page it can reach on the same site, \
                  depth by depth, so a caching layer in front of the site stores each response."
)]
pub struct Cli {
    /// Base URL of the site (e.g., https://shop.example.com)
    ///
    /// Falls back to the CACHE_WARMER_BASE_URL environment variable
    #[arg(long, env = "CACHE_WARMER_BASE_URL")]
    pub url: Option<String>,

    /// Maximum crawl depth (default: unlimited)
    ///
    /// Depth 0 = only the base URL
    /// Depth 1 = base URL + every page it links to
    /// etc.
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Milliseconds to sleep after every request
    #[arg(long, default_value_t = 0)]
    pub delay: u64,

    /// Routes matching this regular expression are never crawled
    ///
    /// Pass an empty string to crawl everything
    #[arg(long, default_value = DEFAULT_SKIP_REGEX)]
    pub skip_matched_regex: String,

    /// Stop starting new requests after this many seconds (0 = never)
    #[arg(long, default_value_t = 0)]
    pub abort_after_sec: u64,

    /// How many requests may be in flight at once
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[arg(long, default_value = concat!("cache-warmer/", env!("CARGO_PKG_VERSION")))]
    pub user_agent: String,

    /// Print the final report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Don't print a line for every fetched page
    #[arg(long)]
    pub quiet: bool,

    /// Diagnostic log level (RUST_LOG overrides this)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,
}

impl Cli {
    // The crawl-related values, ready for CrawlConfig::from_settings
    pub fn settings(&self) -> RawSettings {
        RawSettings {
            url: self.url.clone(),
            max_depth: self.max_depth,
            delay_ms: self.delay,
            skip_matched_regex: self.skip_matched_regex.clone(),
            abort_after_sec: self.abort_after_sec,
            concurrency: self.concurrency,
        }
    }
}
