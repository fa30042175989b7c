use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};

use crate::error::UpstreamError;

/// Bounded retry with exponential backoff for outbound API calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn with_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Policy for tests: same attempt budget, almost no waiting.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(1),
        }
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn is_retryable_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

/// Send the request built by `build`, retrying transient failures.
///
/// Connection errors, timeouts, 429 and 5xx responses are retried until the
/// policy's attempt budget is used up. Any other non-success status fails
/// immediately.
pub async fn send_with_retry<F>(
    policy: &RetryPolicy,
    api: &str,
    build: F,
) -> Result<Response, UpstreamError>
where
    F: Fn() -> RequestBuilder,
{
    let attempts = policy.max_attempts.max(1);
    let mut delay = policy.initial_delay;
    let mut attempt = 1;

    loop {
        match build().send().await {
            Ok(resp) if resp.status().is_success() => {
                debug!(api, attempt, "Request succeeded");
                return Ok(resp);
            }
            Ok(resp) => {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                warn!(api, attempt, %status, "API returned an error status");
                if attempt >= attempts || !is_retryable_status(status) {
                    return Err(UpstreamError::Status { status, body });
                }
            }
            Err(err) => {
                warn!(api, attempt, error = %err, "Request failed");
                if attempt >= attempts || !is_retryable_error(&err) {
                    return Err(err.into());
                }
            }
        }

        debug!(api, attempt, delay_ms = delay.as_millis() as u64, "Retrying request");
        tokio::time::sleep(delay).await;
        delay = (delay * 2).min(policy.max_delay);
        attempt += 1;
    }
}
