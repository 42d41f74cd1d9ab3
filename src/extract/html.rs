// src/extract/html.rs
// =============================================================================
// This module extracts same-origin routes from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Decodes HTML entities in attribute values (&amp; -> &)
//
// Then a regex keeps only href values that start with the base URL and
// captures what comes after it. That suffix is the route.
//
// Rust concepts:
// - &mut borrows: extraction updates the visited set in place
// - Iterators: For walking the selected elements
// =============================================================================

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use super::VisitedSet;

// Turns page HTML into routes that haven't been seen yet
//
// Built once per crawl run because the base URL and skip pattern
// never change during a run.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    route_pattern: Regex,
    skip_pattern: Option<Regex>,
    selector: Selector,
}

impl LinkExtractor {
    // Parameters:
    //   base_url: absolute base URL without a trailing slash
    //   skip_pattern: routes matching this are dropped (None = keep all)
    pub fn new(base_url: &str, skip_pattern: Option<Regex>) -> Result<Self, regex::Error> {
        // The route must start at a path or query boundary, otherwise
        // "http://shop.test" would also claim "http://shop.testing.com/"
        let route_pattern = Regex::new(&format!(
            r#"^{}([/?][^"' ]*)"#,
            regex::escape(base_url)
        ))?;

        // "[href]" means "any element that has an href attribute" (<a>, <link>, ...)
        // Selector::parse only fails on invalid CSS and this one is constant
        let selector = Selector::parse("[href]").unwrap();

        Ok(Self {
            route_pattern,
            skip_pattern,
            selector,
        })
    }

    // Extracts all new routes from HTML content
    //
    // Parameters:
    //   html: the fetched page body
    //   visited: every route already fetched or enqueued in this run
    //
    // Returns: new routes, in the order they appear in the HTML
    //
    // Side effect: every returned route is inserted into `visited`, so the
    // same route is never returned twice within a run.
    //
    // Example:
    //   html = r#"<a href="https://shop.test/a">A</a>"#
    //   base_url = "https://shop.test"
    //   result = ["/a"]
    pub fn extract(&self, html: &str, visited: &mut VisitedSet) -> Vec<String> {
        let document = Html::parse_document(html);
        let mut routes = Vec::new();

        for element in document.select(&self.selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            let Some(route) = self.route_from_href(href) else {
                continue;
            };

            if visited.contains(route) || self.is_skipped(route) {
                continue;
            }

            visited.insert(route.to_string());
            routes.push(route.to_string());
        }

        debug!(found = routes.len(), "extracted new routes");
        routes
    }

    // Returns the part of href after the base URL, if href is same-origin
    fn route_from_href<'a>(&self, href: &'a str) -> Option<&'a str> {
        self.route_pattern
            .captures(href.trim())
            .and_then(|captures| captures.get(1))
            .map(|route| route.as_str())
    }

    fn is_skipped(&self, route: &str) -> bool {
        self.skip_pattern
            .as_ref()
            .map(|pattern| pattern.is_match(route))
            .unwrap_or(false)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is regex::escape?
//    - A base URL contains characters that mean something in a regex ('.', '?')
//    - escape() turns them into literals so "shop.test" only matches "shop.test"
//
// 2. What is let-else?
//    - let Some(x) = value else { continue; };
//    - Binds x if the pattern matches, otherwise runs the else block
//    - The else block must leave the current scope (continue, return, break)
//
// 3. Why does route_from_href have a lifetime 'a?
//    - The returned &str points into href, not into self
//    - 'a tells the compiler the result lives as long as href does
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://shop.test";

    fn extractor(skip: Option<&str>) -> LinkExtractor {
        let skip = skip.map(|pattern| Regex::new(pattern).unwrap());
        LinkExtractor::new(BASE, skip).unwrap()
    }

    #[test]
    fn test_extract_same_origin_routes_in_order() {
        let html = r#"<a href="http://shop.test/a">A</a><a href="http://shop.test/b">B</a>"#;
        let mut visited = VisitedSet::new();
        let routes = extractor(None).extract(html, &mut visited);
        assert_eq!(routes, vec!["/a", "/b"]);
        assert!(visited.contains("/a"));
        assert!(visited.contains("/b"));
    }

    #[test]
    fn test_skip_external_and_relative_links() {
        let html = r#"
            <a href="https://www.rust-lang.org/">Rust</a>
            <a href="http://shop.testing.com/x">Lookalike</a>
            <a href="/relative">Relative</a>
            <a href="http://shop.test">Root without slash</a>
        "#;
        let mut visited = VisitedSet::new();
        let routes = extractor(None).extract(html, &mut visited);
        assert!(routes.is_empty());
        assert!(visited.is_empty());
    }

    #[test]
    fn test_skip_matched_pattern() {
        let html = r#"
            <img src="x"><a href="http://shop.test/media/logo.png">Logo</a>
            <a href="http://shop.test/about">About</a>
        "#;
        let mut visited = VisitedSet::new();
        let routes = extractor(Some("/media/")).extract(html, &mut visited);
        assert_eq!(routes, vec!["/about"]);
        assert!(!visited.contains("/media/logo.png"));
    }

    #[test]
    fn test_duplicates_within_one_page() {
        let html = r#"
            <a href="http://shop.test/a">A</a>
            <a href="http://shop.test/a">A again</a>
        "#;
        let mut visited = VisitedSet::new();
        let routes = extractor(None).extract(html, &mut visited);
        assert_eq!(routes, vec!["/a"]);
    }

    #[test]
    fn test_second_pass_yields_nothing() {
        let html = r#"<a href="http://shop.test/a">A</a><link href="http://shop.test/b">"#;
        let extractor = extractor(None);
        let mut visited = VisitedSet::new();

        let first = extractor.extract(html, &mut visited);
        assert_eq!(first.len(), 2);

        let second = extractor.extract(html, &mut visited);
        assert!(second.is_empty());
    }

    #[test]
    fn test_entities_are_decoded() {
        let html = r#"<a href="http://shop.test/list?page=2&amp;sort=price">Next</a>"#;
        let mut visited = VisitedSet::new();
        let routes = extractor(None).extract(html, &mut visited);
        assert_eq!(routes, vec!["/list?page=2&sort=price"]);
    }

    #[test]
    fn test_route_stops_at_space() {
        let html = r#"<a href="http://shop.test/a b">Broken</a>"#;
        let mut visited = VisitedSet::new();
        let routes = extractor(None).extract(html, &mut visited);
        assert_eq!(routes, vec!["/a"]);
    }

    #[test]
    fn test_trailing_slash_is_its_own_route() {
        // "/" is not the root route "", so the front page is fetched again under it
        let html = r#"<a href="http://shop.test/">Home</a>"#;
        let mut visited = VisitedSet::new();
        visited.insert(String::new());
        let routes = extractor(None).extract(html, &mut visited);
        assert_eq!(routes, vec!["/"]);
    }

    #[test]
    fn test_query_only_route() {
        let html = r#"<a href="http://shop.test?___store=en">English</a>"#;
        let mut visited = VisitedSet::new();
        let routes = extractor(None).extract(html, &mut visited);
        assert_eq!(routes, vec!["?___store=en"]);
    }
}
