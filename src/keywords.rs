//! Keyword extraction and the batched enrichment stage.
//!
//! Extraction is best effort. Whatever goes wrong with a call (transport,
//! status, response shape) the page simply ends up with no keywords.

use crate::config::KeywordConfig;
use crate::error::{Error, Result};
use crate::results::PageRecord;
use futures::future::join_all;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Upper bound on keywords kept per page
pub const MAX_KEYWORDS: usize = 5;

/// Turns page text into a handful of keywords.
///
/// Implementations never fail: an unusable answer is an empty list.
#[allow(async_fn_in_trait)]
pub trait KeywordExtractor {
    async fn extract(&self, text: &str) -> Vec<String>;
}

/// Trims, drops blanks and duplicates, and caps the list at [`MAX_KEYWORDS`]
pub fn sanitize_keywords(raw: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.clone()))
        .take(MAX_KEYWORDS)
        .collect()
}

/// Expected shape of the model's JSON answer
#[derive(Debug, Deserialize)]
struct KeywordPayload {
    #[serde(default)]
    keywords: Vec<String>,
}

/// Parses the message content returned by the model
fn parse_keyword_payload(content: &str) -> Result<Vec<String>> {
    let payload: KeywordPayload = serde_json::from_str(content)
        .map_err(|e| Error::MalformedResponse(format!("{}: {:?}", e, content)))?;
    Ok(sanitize_keywords(payload.keywords))
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

const SYSTEM_PROMPT: &str = "You are a helpful assistant designed to output JSON.";
const INSTRUCTION_PROMPT: &str =
    "If you give me a HTML text, I will give you the five keywords to array of string.";

/// Keyword extractor backed by an OpenAI-compatible chat completions API
#[derive(Debug, Clone)]
pub struct OpenAiKeywordExtractor {
    client: Client,
    endpoint: String,
    model: String,
}

impl OpenAiKeywordExtractor {
    pub fn new(config: &KeywordConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        match &config.api_key {
            Some(key) => {
                let auth_value = HeaderValue::from_str(&format!("Bearer {}", key))
                    .map_err(|e| Error::Config(format!("invalid API key: {}", e)))?;
                headers.insert(AUTHORIZATION, auth_value);
            }
            None => ::log::warn!("No API key configured for {}", config.endpoint),
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .default_headers(headers)
            .build()?;

        ::log::info!(
            "Keyword extractor using model {} at {}",
            config.model,
            config.endpoint
        );

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        })
    }

    /// Single request to the model, with every failure reported
    pub async fn try_extract(&self, text: &str) -> Result<Vec<String>> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "assistant",
                    content: INSTRUCTION_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::MalformedResponse("response has no message content".to_string()))?;

        parse_keyword_payload(&content)
    }
}

impl KeywordExtractor for OpenAiKeywordExtractor {
    async fn extract(&self, text: &str) -> Vec<String> {
        match self.try_extract(text).await {
            Ok(keywords) => {
                ::log::debug!("Extracted keywords {:?}", keywords);
                keywords
            }
            Err(e) => {
                ::log::warn!("Keyword extraction failed, using no keywords: {}", e);
                Vec::new()
            }
        }
    }
}

/// Batching parameters for [`enrich_pages`]
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    pub batch_size: usize,
    pub cooldown: Duration,
}

impl From<&KeywordConfig> for BatchOptions {
    fn from(config: &KeywordConfig) -> Self {
        Self {
            batch_size: config.batch_size,
            cooldown: Duration::from_secs(config.batch_cooldown_secs),
        }
    }
}

/// Attaches keywords to every page, preserving crawl order.
///
/// Pages are processed `batch_size` at a time: the calls of one batch run
/// concurrently and the next batch starts only after all of them finished
/// and `cooldown` has passed.
pub async fn enrich_pages<E: KeywordExtractor>(
    pages: Vec<PageRecord>,
    extractor: &E,
    options: BatchOptions,
) -> Vec<PageRecord> {
    let batch_size = options.batch_size.max(1);
    let total_batches = pages.len().div_ceil(batch_size);
    let mut enriched = Vec::with_capacity(pages.len());

    for (index, batch) in pages.chunks(batch_size).enumerate() {
        ::log::info!(
            "Extracting keywords for batch {} of {} ({} pages)",
            index + 1,
            total_batches,
            batch.len()
        );

        let keywords = join_all(batch.iter().map(|page| extractor.extract(&page.text))).await;
        enriched.extend(
            batch
                .iter()
                .cloned()
                .zip(keywords)
                .map(|(page, keywords)| page.with_keywords(sanitize_keywords(keywords))),
        );

        if index + 1 < total_batches && !options.cooldown.is_zero() {
            ::log::debug!("Cooling down for {:?} before next batch", options.cooldown);
            tokio::time::sleep(options.cooldown).await;
        }
    }

    enriched
}
