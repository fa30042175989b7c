//! Error taxonomy for the inventory pipeline.
//!
//! Only [`ValidationError`] ever reaches the presentation layer. Upstream and
//! extraction failures are caught inside [`crate::inventory`] and turned into
//! the fallback listing set.

use reqwest::StatusCode;
use thiserror::Error;

/// The requested city or category is not one of the supported values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown city: {0:?}")]
    UnknownCity(String),
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
}

/// A remote API could not be reached or answered with something unusable.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("API is not configured")]
    NotConfigured,
}

/// The model's reply did not contain a parseable JSON array.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no JSON array found in response")]
    NoArray,
    #[error("invalid JSON array: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Any reason the live listing fetch produced nothing usable.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("model returned no listings")]
    NoListings,
    #[error("no listing could be verified")]
    NoneVerified,
    #[error("quality reply has {got} labels for {expected} listings")]
    LabelCountMismatch { expected: usize, got: usize },
}
