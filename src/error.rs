//! Error types for scraping, persistence and export.

use thiserror::Error;

/// Failures raised while acquiring level pages.
///
/// These never end the process: the scrape phase logs them, releases the
/// session and hands over to export/report with whatever was collected.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Socket or file-system failure while fetching a page.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server answered with something other than 200.
    #[error("HTTP error: {status} ({url})")]
    Http { status: String, url: String },

    /// Response without a header/body separator.
    #[error("malformed HTTP response from {0}")]
    MalformedResponse(String),

    /// The level page never showed its "All Characters" entries.
    #[error("level {level} not ready after {secs}s")]
    Timeout { level: u32, secs: u64 },

    /// The acquisition resource could not be opened at all.
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}

/// The primary error type for the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Persisted entities could not be decoded. Fatal at startup.
    #[error("corrupt snapshot ({blob}): {reason}")]
    CorruptSnapshot { blob: &'static str, reason: String },

    #[error("lexicon error: {0}")]
    Lexicon(String),

    #[error("invalid option: {0}")]
    Config(String),
}

/// A convenience `Result` type alias using the crate's `Error` type.
pub type Result<T> = std::result::Result<T, Error>;
