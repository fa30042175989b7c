use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;

pub mod ai;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fallback;
pub mod inventory;
pub mod listing;
pub mod messages;
pub mod places;
pub mod system_info;
pub mod templates;
pub mod text_utils;
pub mod utils;
pub mod web;

pub use catalog::{Category, City, InventoryQuery};
pub use config::Config;
pub use error::{ExtractionError, PipelineError, UpstreamError, ValidationError};
pub use inventory::{InventoryPage, InventoryService, ListingSource, PipelineOptions};
pub use listing::{Availability, ListingRecord, Price, Quality};
pub use system_info::get_system_info;
pub use web::{router, WebConfig};

use crate::ai::common::ChatClient;
use crate::places::PlacesClient;

/// Build the pipeline from configuration. Missing credentials switch the
/// corresponding stage off instead of failing startup.
pub fn build_service(config: &Config) -> Result<InventoryService> {
    let chat = match &config.ai {
        Some(ai) => {
            tracing::info!(model = %ai.gpt_model, "Generative API enabled");
            Some(ChatClient::from_config(ai).context("building chat client")?)
        }
        None => {
            tracing::warn!("OPENAI_API_KEY not set; every lookup will use fallback listings");
            None
        }
    };

    let places = match &config.places {
        Some(places) => {
            tracing::info!("Store verification enabled");
            Some(PlacesClient::from_config(places).context("building places client")?)
        }
        None => {
            tracing::debug!("GOOGLE_PLACES_API_KEY not set; store verification disabled");
            None
        }
    };

    Ok(InventoryService::new(chat, places, config.pipeline))
}

// ──────────────────────────────────────────────────────────────
// Main application setup
// ──────────────────────────────────────────────────────────────

pub async fn run() -> Result<()> {
    // Load .env file if it exists (for local development)
    dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting inventory finder...");
    tracing::info!("{}", get_system_info());

    let config = Config::from_env();
    let service = build_service(&config)?;

    let app = router(
        Arc::new(service),
        WebConfig {
            rate_limit_per_second: config.rate_limit_per_second,
        },
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
