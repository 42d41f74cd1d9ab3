// src/fetch/http.rs
// =============================================================================
// This module fetches pages over HTTP.
//
// Key functionality:
// - Makes plain GET requests (no cookies, no authentication)
// - Follows redirects with reqwest's default policy (up to 10)
// - Turns every failure mode (non-2xx, timeout, DNS, etc.) into a FetchError
//
// The crawler never aborts on a FetchError. A failed page simply contributes
// no links, so the error type only exists to log a useful reason.
//
// Rust concepts:
// - thiserror: Display messages for error variants via #[error(...)]
// - Client reuse: one reqwest::Client keeps a connection pool for the whole run
// =============================================================================

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use super::Fetch;

// Why a single page could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a non-2xx status
    #[error("HTTP {0}")]
    Status(u16),
    /// Request timed out
    #[error("request timed out")]
    Timeout,
    /// Could not connect (refused, DNS failure, unreachable host)
    #[error("connection failed: {0}")]
    Connect(String),
    /// Redirect loop or redirect limit hit
    #[error("too many redirects")]
    TooManyRedirects,
    /// Anything else reqwest reports (body decode, protocol errors, ...)
    #[error("{0}")]
    Transport(String),
}

// Fetches pages with a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Parameters:
    //   timeout: per-request timeout
    //   user_agent: value for the User-Agent header
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(categorize_error)
    }
}

// Categorizes different error types from reqwest
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure or refused connection
// - Too many redirects
// - A body that fails to decode
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::TooManyRedirects
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Transport(error.to_string())
    }
}
