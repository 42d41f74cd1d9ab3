// src/extract/mod.rs
// =============================================================================
// This module finds new same-origin routes in a fetched page.
//
// Submodules:
// - html: Reads href values out of HTML and turns them into routes
//
// A "route" is the part of a URL that comes after the base URL,
// e.g. "/women/dresses.html?p=2" for "https://shop.test/women/dresses.html?p=2".
// =============================================================================

mod html;

use std::collections::HashSet;

pub use html::LinkExtractor;

// Every route ever enqueued during one crawl run
//
// Once a route is in here it is never fetched again.
pub type VisitedSet = HashSet<String>;
