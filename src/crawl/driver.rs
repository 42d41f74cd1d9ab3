// src/crawl/driver.rs
// =============================================================================
// This module implements the crawl itself, one depth level at a time.
//
// How it works:
// 1. Start with the root route ("") as the only route at depth 0
// 2. Fetch every route of the current depth
// 3. Extract new same-origin routes from each page into the next frontier
// 4. Move to the next depth and repeat
//
// The crawl stops when, checked in this order:
// - the next depth is past --max-depth (that frontier is never fetched)
// - the time budget ran out (checked after every single fetch)
// - a depth discovered no new routes
//
// Politeness:
// - Every fetch is followed by --delay milliseconds of sleep
// - With --concurrency > 1, a shared rate limiter also spaces fetch starts
//
// Rust concepts:
// - Generics: Crawler<F: Fetch> works with any fetcher (HTTP or a test fake)
// - buffer_unordered: Runs up to N fetch futures at the same time
// - tokio::time::Instant: A clock that tests can pause and fast-forward
// =============================================================================

use futures::future;
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::time::{sleep, Duration, Instant};
use tracing::{debug, info, warn};

use super::limiter::RateLimiter;
use super::report::{budget_used, format_progress, CrawlReport, PageProgress, Termination};
use crate::config::{ConfigError, CrawlConfig};
use crate::extract::{LinkExtractor, VisitedSet};
use crate::fetch::{Fetch, FetchError};

// The route of the site's front page
const ROOT_ROUTE: &str = "";

// Everything that changes during one run
//
// A fresh RunContext is created by every call to Crawler::crawl and dropped
// when it returns, so nothing leaks from one run into the next.
#[derive(Debug)]
struct RunContext {
    started: Instant,
    pages_fetched: usize,
    pages_failed: usize,
    depth: usize,
    deepest_depth: usize,
    visited: VisitedSet,
}

impl RunContext {
    fn new() -> Self {
        let mut visited = VisitedSet::new();
        visited.insert(ROOT_ROUTE.to_string());

        Self {
            started: Instant::now(),
            pages_fetched: 0,
            pages_failed: 0,
            depth: 0,
            deepest_depth: 0,
            visited,
        }
    }
}

// Result of one fetch task
struct PageOutcome {
    url: String,
    // Time since run start when the fetch began
    began_at: Duration,
    took: Duration,
    result: Result<String, FetchError>,
}

// True once more time than the budget allows has passed since `started`
fn budget_exceeded(started: Instant, budget: Option<Duration>) -> bool {
    budget
        .map(|budget| started.elapsed() > budget)
        .unwrap_or(false)
}

pub struct Crawler<F> {
    config: CrawlConfig,
    fetcher: F,
    extractor: LinkExtractor,
    show_progress: bool,
}

impl<F: Fetch> Crawler<F> {
    pub fn new(config: CrawlConfig, fetcher: F) -> Result<Self, ConfigError> {
        let extractor = LinkExtractor::new(&config.base_url, config.skip_pattern.clone())
            .map_err(ConfigError::BaseUrlTooLong)?;

        Ok(Self {
            config,
            fetcher,
            extractor,
            show_progress: true,
        })
    }

    // Turns the per-page progress lines on or off
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    // Crawls the whole site and returns what happened
    //
    // Never fails: a page that can't be fetched is logged and treated as
    // a page without links.
    pub async fn crawl(&self) -> CrawlReport {
        let mut run = RunContext::new();
        let limiter = RateLimiter::new(self.config.delay);
        let mut frontier = vec![ROOT_ROUTE.to_string()];

        let termination = loop {
            if let Some(max_depth) = self.config.max_depth {
                if run.depth > max_depth {
                    info!(depth = run.depth, max_depth, "maximum depth reached");
                    break Termination::MaxDepthReached;
                }
            }

            info!(depth = run.depth, routes = frontier.len(), "crawling depth");
            let (next, budget_hit) = self.crawl_frontier(&mut run, &limiter, &frontier).await;

            if budget_hit {
                info!(pages = run.pages_fetched, "time budget exceeded");
                break Termination::TimeBudgetExceeded;
            }

            if next.is_empty() {
                info!(depth = run.depth, "no new routes discovered");
                break Termination::FrontierExhausted;
            }

            frontier = next;
            run.depth += 1;
        };

        CrawlReport {
            base_url: self.config.base_url.clone(),
            pages_fetched: run.pages_fetched,
            pages_failed: run.pages_failed,
            routes_discovered: run.visited.len(),
            deepest_depth: run.deepest_depth,
            elapsed_secs: run.started.elapsed().as_secs_f64(),
            termination,
        }
    }

    // Fetches every route of one depth level
    //
    // Returns: (routes for the next depth, whether the time budget ran out)
    async fn crawl_frontier(
        &self,
        run: &mut RunContext,
        limiter: &RateLimiter,
        frontier: &[String],
    ) -> (Vec<String>, bool) {
        let fetcher = &self.fetcher;
        let base_url = self.config.base_url.as_str();
        let delay = self.config.delay;
        let budget = self.config.time_budget;
        let started = run.started;

        // Set once the budget is gone; no further route is pulled after that
        let stop = AtomicBool::new(false);
        let stop_flag = &stop;

        // Each future refuses to start if the budget is already gone, both
        // before and after waiting for its rate-limit slot
        let fetches = stream::iter(frontier)
            .take_while(move |_| future::ready(!stop_flag.load(Ordering::Relaxed)))
            .map(move |route| {
                let url = format!("{}{}", base_url, route);
                async move {
                    if budget_exceeded(started, budget) {
                        return None;
                    }
                    limiter.acquire().await;
                    if budget_exceeded(started, budget) {
                        return None;
                    }

                    let began = Instant::now();
                    let result = fetcher.fetch(&url).await;
                    let took = began.elapsed();

                    if !delay.is_zero() {
                        sleep(delay).await;
                    }

                    Some(PageOutcome {
                        url,
                        began_at: began.duration_since(started),
                        took,
                        result,
                    })
                }
            });

        let mut outcomes = fetches.buffer_unordered(self.config.concurrency);
        let mut next = Vec::new();
        let mut budget_hit = false;

        // Only fetches already in flight are awaited once the budget is gone
        while let Some(outcome) = outcomes.next().await {
            let Some(outcome) = outcome else {
                budget_hit = true;
                stop.store(true, Ordering::Relaxed);
                continue;
            };

            let count = run.pages_fetched;
            run.pages_fetched += 1;
            run.deepest_depth = run.depth;

            let error = match outcome.result {
                Ok(body) => {
                    let routes = self.extractor.extract(&body, &mut run.visited);
                    debug!(url = %outcome.url, new_routes = routes.len(), "page fetched");
                    next.extend(routes);
                    None
                }
                Err(e) => {
                    run.pages_failed += 1;
                    warn!(url = %outcome.url, error = %e, "fetch failed, treating as empty page");
                    Some(e.to_string())
                }
            };

            if self.show_progress {
                println!(
                    "{}",
                    format_progress(&PageProgress {
                        count,
                        budget_used: budget_used(outcome.began_at, budget),
                        depth: run.depth,
                        max_depth: self.config.max_depth,
                        url: &outcome.url,
                        took: outcome.took,
                        error,
                    })
                );
            }

            if budget_exceeded(started, budget) {
                budget_hit = true;
                stop.store(true, Ordering::Relaxed);
            }
        }

        (next, budget_hit)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does crawl_frontier return a tuple?
//    - The caller needs two things: the next frontier and a stop signal
//    - (Vec<String>, bool) is the lightest way to return both
//
// 2. What does `move` do on the closure and the async block?
//    - It copies the captured references (&F, &RateLimiter, &str) into the future
//    - References are Copy, so every future gets its own copy
//
// 3. Why `let ... else { continue; }`?
//    - A fetch task returns None when it refused to start (budget gone)
//    - We still keep polling so any fetch already in flight can finish
//    - take_while() stops handing out new routes once `stop` is set
//
// 4. Why tokio::time::Instant instead of std::time::Instant?
//    - tokio's clock can be paused in tests (start_paused = true)
//    - Sleeps then complete instantly while the clock still "moves"
// -----------------------------------------------------------------------------
