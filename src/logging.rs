// src/logging.rs
// =============================================================================
// Diagnostic logging setup.
//
// Progress lines and the final report go to stdout with println!.
// Everything else (fetch failures, depth changes) goes through `tracing`
// and is written to stderr, so the two never mix.
//
// RUST_LOG wins over --log-level when it is set, e.g.
//   RUST_LOG=cache_warmer=debug cache-warmer --url https://shop.test
// =============================================================================

use clap::ValueEnum;
use std::fmt;
use tracing_subscriber::EnvFilter;

/// Log severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Installs the global tracing subscriber
//
// Call once, at the start of main.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
