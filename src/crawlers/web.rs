use crate::config::CrawlerConfig;
use crate::crawlers::Renderer;
use crate::error::{Error, Result};
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;

/// Renders pages through a WebDriver server (ChromeDriver, geckodriver, ...).
///
/// A fresh browser session is opened for every fetch and closed before
/// `render` returns.
#[derive(Debug, Clone)]
pub struct WebDriverRenderer {
    webdriver_url: String,
    user_agent: String,
    headless: bool,
    fetch_timeout: Duration,
}

impl WebDriverRenderer {
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            user_agent: config.user_agent.clone(),
            headless: config.headless,
            fetch_timeout: Duration::from_secs(config.fetch_timeout_secs),
        }
    }

    /// Browser capabilities carrying the user agent and headless flag
    fn capabilities(&self) -> Capabilities {
        let user_agent = format!("--user-agent={}", self.user_agent);
        let mut chrome_args = vec![user_agent.clone()];
        let mut firefox_args = Vec::new();
        if self.headless {
            chrome_args.push("--headless=new".to_string());
            firefox_args.push("-headless".to_string());
        }

        let mut caps = Capabilities::new();
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": chrome_args }));
        caps.insert(
            "moz:firefoxOptions".to_string(),
            json!({
                "args": firefox_args,
                "prefs": { "general.useragent.override": self.user_agent },
            }),
        );
        caps
    }

    /// Opens a new WebDriver session
    async fn connect(&self) -> Result<Client> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(self.capabilities());

        match builder.connect(&self.webdriver_url).await {
            Ok(client) => {
                ::log::trace!("Connected to WebDriver at {}", self.webdriver_url);
                Ok(client)
            }
            Err(e) => {
                ::log::error!(
                    "Make sure a WebDriver server is running at {} or set the WEBDRIVER_URL environment variable",
                    self.webdriver_url
                );
                Err(Error::WebDriver {
                    endpoint: self.webdriver_url.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

impl Renderer for WebDriverRenderer {
    async fn render(&self, url: &str) -> Result<String> {
        let client = self.connect().await?;

        let fetched = timeout(self.fetch_timeout, async {
            client.goto(url).await?;
            client.source().await
        })
        .await;

        // Release the session whatever happened above
        if let Err(e) = client.close().await {
            ::log::warn!("Failed to close WebDriver session for {}: {}", url, e);
        }

        match fetched {
            Ok(Ok(source)) => Ok(source),
            Ok(Err(e)) => Err(navigation_error(url, e)),
            Err(_) => Err(Error::Timeout {
                url: url.to_string(),
                secs: self.fetch_timeout.as_secs(),
            }),
        }
    }
}

/// Maps a WebDriver command failure onto a crawl error
fn navigation_error(url: &str, error: fantoccini::error::CmdError) -> Error {
    if error.to_string().contains("Unable to find session") {
        ::log::warn!("Lost WebDriver session while fetching {}", url);
    }
    Error::Navigation {
        url: url.to_string(),
        reason: error.to_string(),
    }
}
