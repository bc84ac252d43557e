use thiserror::Error;

/// Errors produced by the crawl and keyword collaborators.
///
/// Inside the pipeline none of these are fatal: fetch errors end a crawl
/// branch and extraction errors become an empty keyword list. They only
/// surface to callers from the configuration and fixture helpers.
#[derive(Debug, Error)]
pub enum Error {
    /// Could not open a WebDriver session for a fetch
    #[error("failed to open WebDriver session at {endpoint}: {reason}")]
    WebDriver { endpoint: String, reason: String },

    /// The browser failed to navigate to or read back a page
    #[error("failed to render {url}: {reason}")]
    Navigation { url: String, reason: String },

    /// The fetch did not complete within the configured timeout
    #[error("timed out after {secs}s fetching {url}")]
    Timeout { url: String, secs: u64 },

    /// Keyword service transport error
    #[error("keyword request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyword service answered with something other than `{ "keywords": [...] }`
    #[error("malformed keyword response: {0}")]
    MalformedResponse(String),

    /// Unusable configuration value
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid URL pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
