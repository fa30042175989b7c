use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::ai::common::ChatClient;
use crate::ai::extract::extract_json_array;
use crate::ai::prompts::{
    intro_prompt, listings_prompt, quality_prompt, ListingSchema, INTRO_SYSTEM_PROMPT,
    LISTINGS_SYSTEM_PROMPT, QUALITY_SYSTEM_PROMPT,
};
use crate::catalog::InventoryQuery;
use crate::error::{PipelineError, UpstreamError};
use crate::listing::{ListingRecord, Quality, RawListing};

/// Ask the model for store listings and pull the JSON array out of its reply.
#[instrument(level = "debug", skip(chat))]
pub async fn request_listings(
    chat: &ChatClient,
    query: &InventoryQuery,
    schema: ListingSchema,
) -> Result<Vec<RawListing>, PipelineError> {
    let prompt = listings_prompt(query, schema);
    debug!(%prompt, "Requesting listings");
    let reply = chat.complete(LISTINGS_SYSTEM_PROMPT, &prompt).await?;
    let items: Vec<Value> = extract_json_array(&reply)?;
    let total = items.len();
    let listings: Vec<RawListing> = items.into_iter().filter_map(RawListing::from_value).collect();
    if listings.len() < total {
        warn!(skipped = total - listings.len(), "Ignoring listing elements that are not objects");
    }
    debug!(count = listings.len(), "Extracted listings");
    Ok(listings)
}

/// Ask the model to rate each record. The returned labels line up with
/// `records` by position.
#[instrument(level = "debug", skip(chat, records), fields(count = records.len()))]
pub async fn request_quality(
    chat: &ChatClient,
    query: &InventoryQuery,
    records: &[ListingRecord],
) -> Result<Vec<Quality>, PipelineError> {
    let records_json = serde_json::to_string(records)
        .map_err(|e| UpstreamError::Malformed(e.to_string()))?;
    let prompt = quality_prompt(query, &records_json);
    let reply = chat.complete(QUALITY_SYSTEM_PROMPT, &prompt).await?;
    let labels: Vec<Value> = extract_json_array(&reply)?;
    if labels.len() != records.len() {
        return Err(PipelineError::LabelCountMismatch {
            expected: records.len(),
            got: labels.len(),
        });
    }
    Ok(labels
        .into_iter()
        .map(|l| {
            l.get("quality")
                .and_then(Value::as_str)
                .map_or(Quality::Unknown, Quality::from_label)
        })
        .collect())
}

#[instrument(level = "debug", skip(chat))]
pub async fn request_intro(chat: &ChatClient, query: &InventoryQuery) -> Result<String, UpstreamError> {
    let prompt = intro_prompt(query);
    debug!(%prompt, "Requesting intro");
    let intro = chat.complete(INTRO_SYSTEM_PROMPT, &prompt).await?;
    if intro.is_empty() {
        return Err(UpstreamError::Malformed("empty intro".to_string()));
    }
    Ok(intro)
}
