use std::env;
use std::time::Duration;

use crate::utils::RetryPolicy;

pub const DEFAULT_GPT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Clone, Debug)]
pub struct AiConfig {
    pub api_key: String,
    pub gpt_model: String,
    pub openai_chat_url: Option<String>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl AiConfig {
    pub fn from_env() -> Option<Self> {
        let api_key = match env::var("OPENAI_API_KEY") {
            Ok(k) if !k.trim().is_empty() => k,
            _ => return None,
        };
        Some(Self {
            api_key,
            gpt_model: env::var("OPENAI_GPT_MODEL").unwrap_or_else(|_| DEFAULT_GPT_MODEL.to_string()),
            openai_chat_url: env::var("OPENAI_CHAT_URL").ok(),
            timeout: http_timeout_from_env(),
            retry: retry_policy_from_env(),
        })
    }
}

/// `HTTP_TIMEOUT_SECS`, shared by every outbound client.
pub fn http_timeout_from_env() -> Duration {
    let secs = env::var("HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(20);
    Duration::from_secs(secs)
}

/// `HTTP_MAX_ATTEMPTS`, shared by every outbound client.
pub fn retry_policy_from_env() -> RetryPolicy {
    env::var("HTTP_MAX_ATTEMPTS")
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
        .map(RetryPolicy::with_attempts)
        .unwrap_or_default()
}
