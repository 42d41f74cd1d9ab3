// src/config.rs
// =============================================================================
// This module turns raw command-line values into a validated CrawlConfig.
//
// What gets checked here (before any page is fetched):
// - The base URL is present, parses, and uses http or https
// - The exclusion pattern compiles as a regular expression
// - The concurrency is at least 1
//
// Once built, a CrawlConfig is never mutated for the rest of the run.
//
// Rust concepts:
// - thiserror: Derive std::error::Error for our own error enum
// - Option<T>: "unlimited" is represented as None instead of a magic 0
// - Duration: Typed time values instead of raw integers
// =============================================================================

use regex::Regex;
use std::time::Duration;
use thiserror::Error;
use url::Url;

// The pattern used when the user doesn't pass --skip-matched-regex
pub const DEFAULT_SKIP_REGEX: &str = "static|customer|checkout|cart|media";

/// Fatal problems with the crawl configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no base URL given (pass --url or set CACHE_WARMER_BASE_URL)")]
    EmptyBaseUrl,
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported scheme '{0}' in base URL (expected http or https)")]
    UnsupportedScheme(String),
    #[error("invalid skip pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("concurrency must be at least 1")]
    InvalidConcurrency,
    /// Only an absurdly long base URL can trip the regex size limit here
    #[error("base URL is too long to match links against: {0}")]
    BaseUrlTooLong(#[source] regex::Error),
}

// Everything the crawl driver needs to know, fixed for the whole run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Absolute base URL without a trailing slash
    pub base_url: String,
    /// Routes matching this are never enqueued (None = exclude nothing)
    pub skip_pattern: Option<Regex>,
    /// None = unlimited, Some(0) = only the root route
    pub max_depth: Option<usize>,
    /// Sleep after every fetch
    pub delay: Duration,
    /// None = unlimited
    pub time_budget: Option<Duration>,
    /// Number of fetches allowed in flight at once (1 = sequential)
    pub concurrency: usize,
}

// Raw values as they come from the CLI, before validation
#[derive(Debug, Clone)]
pub struct RawSettings {
    pub url: Option<String>,
    pub max_depth: Option<usize>,
    pub delay_ms: u64,
    pub skip_matched_regex: String,
    pub abort_after_sec: u64,
    pub concurrency: usize,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_depth: None,
            delay_ms: 0,
            skip_matched_regex: DEFAULT_SKIP_REGEX.to_string(),
            abort_after_sec: 0,
            concurrency: 1,
        }
    }
}

impl CrawlConfig {
    // Validates raw settings and builds the run configuration
    //
    // Returns: CrawlConfig, or the first ConfigError found
    pub fn from_settings(raw: &RawSettings) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(raw.url.as_deref().unwrap_or(""))?;

        let skip_pattern = if raw.skip_matched_regex.is_empty() {
            None
        } else {
            let regex = Regex::new(&raw.skip_matched_regex).map_err(|source| {
                ConfigError::InvalidPattern {
                    pattern: raw.skip_matched_regex.clone(),
                    source,
                }
            })?;
            Some(regex)
        };

        if raw.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency);
        }

        let time_budget = match raw.abort_after_sec {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(Self {
            base_url,
            skip_pattern,
            max_depth: raw.max_depth,
            delay: Duration::from_millis(raw.delay_ms),
            time_budget,
            concurrency: raw.concurrency,
        })
    }
}

// Trims whitespace and trailing slashes, then checks the URL is usable
fn normalize_base_url(input: &str) -> Result<String, ConfigError> {
    let trimmed = input.trim().trim_end_matches('/');

    if trimmed.is_empty() {
        return Err(ConfigError::EmptyBaseUrl);
    }

    let parsed = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
        url: trimmed.to_string(),
        source,
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(url: &str) -> RawSettings {
        RawSettings {
            url: Some(url.to_string()),
            ..RawSettings::default()
        }
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = CrawlConfig::from_settings(&settings("http://shop.test/")).unwrap();
        assert_eq!(config.base_url, "http://shop.test");
    }

    #[test]
    fn test_empty_base_url_is_rejected() {
        let result = CrawlConfig::from_settings(&settings("   "));
        assert!(matches!(result, Err(ConfigError::EmptyBaseUrl)));

        let result = CrawlConfig::from_settings(&RawSettings::default());
        assert!(matches!(result, Err(ConfigError::EmptyBaseUrl)));
    }

    #[test]
    fn test_malformed_base_url_is_rejected() {
        let result = CrawlConfig::from_settings(&settings("not a url"));
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));

        let result = CrawlConfig::from_settings(&settings("ftp://shop.test"));
        assert!(matches!(result, Err(ConfigError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_malformed_pattern_is_rejected() {
        let mut raw = settings("http://shop.test");
        raw.skip_matched_regex = "(unclosed".to_string();
        let result = CrawlConfig::from_settings(&raw);
        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn test_default_pattern_skips_shop_internals() {
        let config = CrawlConfig::from_settings(&settings("http://shop.test")).unwrap();
        let pattern = config.skip_pattern.unwrap();
        assert!(pattern.is_match("/checkout/cart/"));
        assert!(pattern.is_match("/media/logo.png"));
        assert!(pattern.is_match("/static/version1/app.js"));
        assert!(!pattern.is_match("/women/dresses.html"));
    }

    #[test]
    fn test_empty_pattern_skips_nothing() {
        let mut raw = settings("http://shop.test");
        raw.skip_matched_regex = String::new();
        let config = CrawlConfig::from_settings(&raw).unwrap();
        assert!(config.skip_pattern.is_none());
    }

    #[test]
    fn test_base_url_too_long_names_the_base_url() {
        let source = Regex::new("(").unwrap_err();
        let message = ConfigError::BaseUrlTooLong(source).to_string();
        assert!(message.starts_with("base URL is too long"));
    }

    #[test]
    fn test_zero_budget_means_unlimited() {
        let mut raw = settings("http://shop.test");
        raw.abort_after_sec = 0;
        let config = CrawlConfig::from_settings(&raw).unwrap();
        assert_eq!(config.time_budget, None);

        raw.abort_after_sec = 30;
        let config = CrawlConfig::from_settings(&raw).unwrap();
        assert_eq!(config.time_budget, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let mut raw = settings("http://shop.test");
        raw.concurrency = 0;
        let result = CrawlConfig::from_settings(&raw);
        assert!(matches!(result, Err(ConfigError::InvalidConcurrency)));
    }
}
