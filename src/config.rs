use std::env;

use crate::ai::config::AiConfig;
use crate::ai::prompts::ListingSchema;
use crate::inventory::{PipelineOptions, DEFAULT_INTRO_CACHE_CAPACITY};
use crate::places::PlacesConfig;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    pub ai: Option<AiConfig>,
    pub places: Option<PlacesConfig>,
    pub pipeline: PipelineOptions,
    pub rate_limit_per_second: Option<u64>,
}

impl Config {
    /// Read settings from the process environment. Loading `.env` is left
    /// to the caller.
    pub fn from_env() -> Self {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let pipeline = PipelineOptions {
            schema: env::var("LISTING_SCHEMA")
                .ok()
                .and_then(|v| ListingSchema::from_name(&v))
                .unwrap_or_default(),
            quality_labels: env::var("QUALITY_LABELS")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(true),
            intro_cache_capacity: env::var("INTRO_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_INTRO_CACHE_CAPACITY),
        };
        let rate_limit_per_second = env::var("RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0);
        Self {
            bind_addr,
            ai: AiConfig::from_env(),
            places: PlacesConfig::from_env(),
            pipeline,
            rate_limit_per_second,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
