//! Ares internet search (Traversaal Ares API)

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use super::{Tool, ToolError};
use crate::parser::ActionInput;

const DEFAULT_URL: &str = "https://api-ares.traversaal.ai/live/predict";
const API_KEY_ENV: &str = "TRAVERSAAL_ARES_API_KEY";
const PREVIEW_CHARS: usize = 200;

/// Real-time web search returning a synthesized answer text
pub struct AresInternetTool {
    client: reqwest::Client,
    api_key: String,
    url: String,
    timeout: Duration,
}

impl AresInternetTool {
    /// Create with an explicit key, falling back to `TRAVERSAAL_ARES_API_KEY`
    pub fn new(api_key: Option<String>) -> Result<Self, ToolError> {
        let api_key = api_key
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ToolError::Config(format!("{} environment variable not set", API_KEY_ENV)))?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            url: DEFAULT_URL.to_string(),
            timeout: Duration::from_secs(45),
        })
    }

    /// Create from config
    pub fn from_config(config: &reagent_config::Config) -> Result<Self, ToolError> {
        let ares = &config.tools.ares;
        Ok(Self::new(config.ares_api_key())?
            .with_url(ares.url.clone())
            .with_timeout(Duration::from_secs(ares.timeout_secs)))
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Query text from any input shape, with wrapping quotes removed
fn query_text(input: &ActionInput) -> String {
    input
        .as_text()
        .trim_matches(|c| c == '\'' || c == '"')
        .to_string()
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

#[async_trait]
impl Tool for AresInternetTool {
    fn name(&self) -> &str {
        "ares_internet_search_tool"
    }

    fn description(&self) -> &str {
        "Tool to search real-time relevant content from the internet. Use this tool for any factual information or recent events."
    }

    fn arg(&self) -> &str {
        "A single string parameter that will be searched on the internet to find relevant content"
    }

    async fn run(&self, input: ActionInput) -> Result<String, ToolError> {
        let query = query_text(&input);
        if query.trim().is_empty() {
            return Err(ToolError::InvalidInput("empty search query".to_string()));
        }
        debug!("Ares search: {}", query);

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&json!({ "query": [query] }))
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        debug!("Ares response status: {}", status);
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let result: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            ToolError::UnexpectedResponse(format!(
                "could not parse API response - {}. Raw response preview: {}",
                e,
                preview(&body)
            ))
        })?;

        let Some(text) = result
            .get("data")
            .and_then(|data| data.get("response_text"))
            .and_then(|text| text.as_str())
        else {
            let keys = match result.get("data").and_then(|d| d.as_object()) {
                Some(data) => format!("Data keys: {:?}", data.keys().collect::<Vec<_>>()),
                None => format!(
                    "Response keys: {:?}",
                    result
                        .as_object()
                        .map(|o| o.keys().collect::<Vec<_>>())
                        .unwrap_or_default()
                ),
            };
            warn!("Ares returned an unexpected structure. {}", keys);
            return Err(ToolError::UnexpectedResponse(format!(
                "unexpected API response structure. {}",
                keys
            )));
        };

        if text.trim().is_empty() {
            return Ok(
                "No information found for this query. Please try a different search term."
                    .to_string(),
            );
        }

        debug!("Ares response_text: {} chars", text.len());
        Ok(text.to_string())
    }
}
