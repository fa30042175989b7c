//! System prompts and prompt builders for the generative API.
//!
//! Centralizing these strings makes it easy to tweak how listings, quality
//! labels and intros are requested without digging through multiple modules.

use crate::catalog::InventoryQuery;

/// System prompt for listing generation.
pub const LISTINGS_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that returns clean JSON arrays for local retail inventory.";

/// System prompt for the quality labeling pass.
pub const QUALITY_SYSTEM_PROMPT: &str =
    "You are a retail analyst who rates store listings and returns clean JSON arrays.";

/// System prompt for the introductory paragraph.
pub const INTRO_SYSTEM_PROMPT: &str = "You are a helpful assistant who writes local shopping advice.";

/// Which fields the model is asked to fill for each store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingSchema {
    #[default]
    Priced,
    Status,
}

impl ListingSchema {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "priced" | "price" => Some(Self::Priced),
            "status" => Some(Self::Status),
            _ => None,
        }
    }

    fn field_list(self) -> &'static str {
        match self {
            Self::Priced => "'store', 'address', 'price' (in US dollars, e.g. \"$12.99\"), 'quantity', and 'notes'",
            Self::Status => "'store', 'address', 'status' (In Stock, Low Stock, Out of Stock), and 'notes'",
        }
    }
}

pub fn listings_prompt(query: &InventoryQuery, schema: ListingSchema) -> String {
    format!(
        "Return only a valid JSON array. List 3 stores in {}, Georgia that currently sell {}. Each object should include: {}.",
        query.city.display_name(),
        query.category.phrase(),
        schema.field_list()
    )
}

/// Ask the model to label `records_json` (a serialized array) with quality
/// ratings.
pub fn quality_prompt(query: &InventoryQuery, records_json: &str) -> String {
    format!(
        "Return only a valid JSON array. Here are store listings for {} in {}, Georgia: {records_json}. Return the same array in the same order, adding a 'quality' field to each object rated as one of Excellent, Good, Fair, or Poor based on how reliable the store is for this product.",
        query.category.phrase(),
        query.city.display_name(),
    )
}

pub fn intro_prompt(query: &InventoryQuery) -> String {
    format!(
        "Write a short and informative paragraph (3-4 sentences) about where to find {} in {}, Georgia, including tips for locals.",
        query.category.phrase(),
        query.city.display_name()
    )
}
