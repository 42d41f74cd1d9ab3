// src/fetch/mod.rs
// =============================================================================
// This module downloads pages for the crawler.
//
// Submodules:
// - http: The real HTTP implementation built on reqwest
//
// The crawl driver only talks to the `Fetch` trait, so tests can swap the
// network for an in-memory site.
//
// Rust concepts:
// - Traits: A shared interface that several types can implement
// - impl Future in traits: async methods without boxing
// =============================================================================

mod http;

use std::future::Future;

pub use http::{FetchError, HttpFetcher};

// Anything that can turn an absolute URL into a page body
pub trait Fetch {
    // Fetches one page
    //
    // Returns: the body on a 2xx response, or why the fetch failed
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}
