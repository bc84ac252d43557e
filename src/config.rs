use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// User agent presented by the renderer on every fetch
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";

/// How candidate links are matched against the seed's host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainScope {
    /// The normalized candidate only has to contain the seed host somewhere.
    /// This admits `notexample.com` for a seed on `example.com`.
    #[default]
    Contains,
    /// The candidate host must equal the seed host
    Strict,
}

/// Configuration for the site crawler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// URL to start crawling from
    #[serde(default)]
    pub start_url: String,

    /// Maximum number of pages to record (unbounded when absent)
    #[serde(default)]
    pub max_pages: Option<usize>,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// User agent the browser reports
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-page fetch timeout
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    #[serde(default)]
    pub domain_scope: DomainScope,

    /// Regex patterns for URLs to include
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns for URLs to exclude
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Configuration for keyword extraction and its batching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// OpenAI-compatible chat completions endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// API key; `OPENAI_API_KEY` is used when unset
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Pages sent to the extractor concurrently
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between batches, to stay under the service's rate limit
    #[serde(default = "default_batch_cooldown_secs")]
    pub batch_cooldown_secs: u64,
}

/// Top level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub keywords: KeywordConfig,
}

impl PipelineConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.apply_env();
        Ok(config)
    }

    /// Let `WEBDRIVER_URL` and `OPENAI_API_KEY` override the file
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.crawler.webdriver_url = webdriver_url;
            }
        }
        if self.keywords.api_key.is_none() {
            self.keywords.api_key = std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty());
        }
    }
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    6
}

fn default_headless() -> bool {
    true
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo-1106".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_batch_size() -> usize {
    5
}

fn default_batch_cooldown_secs() -> u64 {
    20
}

impl CrawlerConfig {
    /// Create a new configuration with default values
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            max_pages: None,
            webdriver_url: default_webdriver_url(),
            user_agent: default_user_agent(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            headless: default_headless(),
            domain_scope: DomainScope::default(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
            batch_size: default_batch_size(),
            batch_cooldown_secs: default_batch_cooldown_secs(),
        }
    }
}
