// src/crawl/mod.rs
// =============================================================================
// This module handles crawling a site to warm its cache.
//
// Features:
// - Breadth-first crawling, one depth level at a time, starting at the root
// - Same-origin only (routes are suffixes of the base URL)
// - Optional depth limit and time budget
// - Polite crawling with a delay after each request
// - Optional bounded worker pool sharing one rate limiter
//
// Rust concepts:
// - Async programming: Fetches are futures driven by tokio
// - Collections: HashSet for visited routes, Vec for each frontier
// =============================================================================

mod driver;
mod limiter;
mod report;

// Re-export what main needs
pub use driver::Crawler;
pub use report::CrawlReport;
