use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument, trace};

use crate::ai::config::AiConfig;
use crate::error::UpstreamError;
use crate::utils::{send_with_retry, RetryPolicy};

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Client for the OpenAI chat completions endpoint.
///
/// The credential is handed over once at construction; nothing reads it from
/// the environment afterwards.
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
    retry: RetryPolicy,
}

impl ChatClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        url: Option<&str>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            url: url.unwrap_or(OPENAI_CHAT_URL).to_string(),
            retry,
        })
    }

    pub fn from_config(config: &AiConfig) -> Result<Self, UpstreamError> {
        Self::new(
            config.api_key.clone(),
            config.gpt_model.clone(),
            config.openai_chat_url.as_deref(),
            config.timeout,
            config.retry,
        )
    }

    /// Send a system + user message pair and return the trimmed reply text.
    #[instrument(level = "trace", skip(self, system, user), fields(model = %self.model))]
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, UpstreamError> {
        let body = build_text_chat_body(&self.model, system, user);

        debug!(url = %self.url, "sending chat completion request");

        let resp = send_with_retry(&self.retry, "openai", || {
            self.http
                .post(&self.url)
                .bearer_auth(&self.api_key)
                .json(&body)
        })
        .await?;

        let raw = resp.text().await?;
        let snippet: String = raw.chars().take(200).collect();
        debug!(snippet = %snippet, "chat response body");
        trace!(raw = %raw, "chat response");
        parse_chat_content(&raw)
    }
}

pub fn build_text_chat_body(model: &str, system: &str, user: &str) -> Value {
    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": system },
            { "role": "user", "content": user },
        ]
    })
}

/// Pull `choices[0].message.content` out of a chat completion envelope.
pub fn parse_chat_content(raw: &str) -> Result<String, UpstreamError> {
    let chat: ChatResponse =
        serde_json::from_str(raw).map_err(|e| UpstreamError::Malformed(e.to_string()))?;
    chat.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| UpstreamError::Malformed("missing chat choice".to_string()))
}
