// src/crawl/report.rs
// =============================================================================
// Progress lines and the final run report.
//
// For every fetched page the driver prints one line like:
//   Count: 3, Done: 12.50%, Depth: 1/2, Fetching: https://shop.test/a, Took: 0.231 seconds
//
// "Done" only appears when a time budget is set, and "/2" only when a
// maximum depth is set.
// =============================================================================

use serde::Serialize;
use std::time::Duration;

// Why the crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// A fetch phase discovered no new routes
    FrontierExhausted,
    /// The next depth was past --max-depth
    MaxDepthReached,
    /// Elapsed time went past --abort-after-sec
    TimeBudgetExceeded,
}

impl Termination {
    pub fn describe(&self) -> &'static str {
        match self {
            Termination::FrontierExhausted => "no more routes to crawl",
            Termination::MaxDepthReached => "maximum depth reached",
            Termination::TimeBudgetExceeded => "time budget exceeded",
        }
    }
}

// Summary of one crawl run
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub base_url: String,
    /// Pages fetched, failed ones included
    pub pages_fetched: usize,
    /// Pages whose fetch failed (counted in pages_fetched)
    pub pages_failed: usize,
    /// Distinct routes enqueued, the root included
    pub routes_discovered: usize,
    /// Deepest depth at which a page was fetched
    pub deepest_depth: usize,
    pub elapsed_secs: f64,
    pub termination: Termination,
}

// What the progress line needs to know about one fetched page
#[derive(Debug)]
pub struct PageProgress<'a> {
    pub count: usize,
    pub budget_used: Option<f64>,
    pub depth: usize,
    pub max_depth: Option<usize>,
    pub url: &'a str,
    pub took: Duration,
    pub error: Option<String>,
}

// Percentage of the time budget consumed, if there is a budget
pub fn budget_used(elapsed: Duration, budget: Option<Duration>) -> Option<f64> {
    budget.map(|budget| 100.0 * elapsed.as_secs_f64() / budget.as_secs_f64())
}

pub fn format_progress(page: &PageProgress<'_>) -> String {
    let mut line = format!("Count: {}, ", page.count);

    if let Some(percent) = page.budget_used {
        line.push_str(&format!("Done: {:.2}%, ", percent));
    }

    line.push_str(&format!("Depth: {}", page.depth));
    if let Some(max_depth) = page.max_depth {
        line.push_str(&format!("/{}", max_depth));
    }

    line.push_str(&format!(
        ", Fetching: {}, Took: {:.3} seconds",
        page.url,
        page.took.as_secs_f64()
    ));

    if let Some(error) = &page.error {
        line.push_str(&format!(", Failed: {}", error));
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(budget_used: Option<f64>, max_depth: Option<usize>) -> PageProgress<'static> {
        PageProgress {
            count: 3,
            budget_used,
            depth: 1,
            max_depth,
            url: "http://shop.test/a",
            took: Duration::from_millis(250),
            error: None,
        }
    }

    #[test]
    fn test_progress_without_limits() {
        assert_eq!(
            format_progress(&page(None, None)),
            "Count: 3, Depth: 1, Fetching: http://shop.test/a, Took: 0.250 seconds"
        );
    }

    #[test]
    fn test_progress_with_budget_and_depth() {
        assert_eq!(
            format_progress(&page(Some(12.5), Some(2))),
            "Count: 3, Done: 12.50%, Depth: 1/2, Fetching: http://shop.test/a, Took: 0.250 seconds"
        );
    }

    #[test]
    fn test_progress_with_failure() {
        let mut failed = page(None, None);
        failed.error = Some("HTTP 404".to_string());
        assert!(format_progress(&failed).ends_with(", Failed: HTTP 404"));
    }

    #[test]
    fn test_budget_used() {
        let used = budget_used(Duration::from_secs(15), Some(Duration::from_secs(60)));
        assert_eq!(used, Some(25.0));
        assert_eq!(budget_used(Duration::from_secs(15), None), None);
    }

    #[test]
    fn test_report_serializes_termination_in_snake_case() {
        let report = CrawlReport {
            base_url: "http://shop.test".to_string(),
            pages_fetched: 1,
            pages_failed: 0,
            routes_discovered: 1,
            deepest_depth: 0,
            elapsed_secs: 0.5,
            termination: Termination::FrontierExhausted,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["termination"], "frontier_exhausted");
        assert_eq!(json["pages_fetched"], 1);
    }
}
