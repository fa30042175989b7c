//! The listing pipeline: generate, extract, normalize, enrich, verify, sort,
//! and fall back to placeholder data when any of that comes up empty.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::ai::common::ChatClient;
use crate::ai::gpt::{request_intro, request_listings, request_quality};
use crate::ai::prompts::ListingSchema;
use crate::cache::LruCache;
use crate::catalog::InventoryQuery;
use crate::error::{PipelineError, UpstreamError, ValidationError};
use crate::fallback::fallback_inventory;
use crate::listing::{sort_by_price, ListingRecord, Quality};
use crate::messages::intro_fallback;
use crate::places::PlacesClient;

pub const DEFAULT_INTRO_CACHE_CAPACITY: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub schema: ListingSchema,
    pub quality_labels: bool,
    pub intro_cache_capacity: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            schema: ListingSchema::default(),
            quality_labels: true,
            intro_cache_capacity: DEFAULT_INTRO_CACHE_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingSource {
    Live,
    Fallback,
}

/// Everything the presentation layer needs for one inventory page.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryPage {
    pub city: String,
    pub category: String,
    pub intro: String,
    pub listings: Vec<ListingRecord>,
    pub source: ListingSource,
}

pub struct InventoryService {
    chat: Option<ChatClient>,
    places: Option<PlacesClient>,
    options: PipelineOptions,
    intro_cache: LruCache<InventoryQuery, String>,
}

impl InventoryService {
    pub fn new(
        chat: Option<ChatClient>,
        places: Option<PlacesClient>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            chat,
            places,
            options,
            intro_cache: LruCache::new(options.intro_cache_capacity),
        }
    }

    /// Validate raw input and build the full page. Unknown cities or
    /// categories are rejected before any API is called.
    pub async fn lookup(&self, city: &str, category: &str) -> Result<InventoryPage, ValidationError> {
        let query = InventoryQuery::parse(city, category)?;
        Ok(self.page(&query).await)
    }

    #[instrument(level = "info", skip(self), fields(city = query.city.slug(), category = query.category.slug()))]
    pub async fn page(&self, query: &InventoryQuery) -> InventoryPage {
        let (listings, source) = self.listings(query).await;
        let intro = self.intro(query).await;
        InventoryPage {
            city: query.city.display_name().to_string(),
            category: query.category.label(),
            intro,
            listings,
            source,
        }
    }

    /// Live listings, or the fallback set if the live fetch fails. Never
    /// returns an empty list.
    pub async fn listings(&self, query: &InventoryQuery) -> (Vec<ListingRecord>, ListingSource) {
        let now = Utc::now();
        match self.live_listings(query, now).await {
            Ok(records) => {
                info!(count = records.len(), "Serving live listings");
                (records, ListingSource::Live)
            }
            Err(err) => {
                warn!(error = %err, "AI inventory fetch failed, serving fallback listings");
                (fallback_inventory(query, now), ListingSource::Fallback)
            }
        }
    }

    /// Run the live pipeline. Any error here means the caller should fall
    /// back.
    pub async fn live_listings(
        &self,
        query: &InventoryQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<ListingRecord>, PipelineError> {
        let chat = self.chat.as_ref().ok_or(UpstreamError::NotConfigured)?;

        let raw = request_listings(chat, query, self.options.schema).await?;
        let mut records: Vec<ListingRecord> = raw
            .into_iter()
            .map(|r| ListingRecord::from_raw(r, now))
            .collect();
        if records.is_empty() {
            return Err(PipelineError::NoListings);
        }

        if self.options.quality_labels {
            self.label_quality(chat, query, &mut records).await;
        }

        if let Some(places) = &self.places {
            records = verify_records(places, query, records).await;
            if records.is_empty() {
                return Err(PipelineError::NoneVerified);
            }
        }

        sort_by_price(&mut records);
        Ok(records)
    }

    async fn label_quality(
        &self,
        chat: &ChatClient,
        query: &InventoryQuery,
        records: &mut [ListingRecord],
    ) {
        match request_quality(chat, query, records).await {
            Ok(labels) => {
                for (record, label) in records.iter_mut().zip(labels) {
                    record.quality = Some(label);
                }
            }
            Err(err) => {
                warn!(error = %err, "Quality labeling failed, marking listings Unknown");
                for record in records.iter_mut() {
                    record.quality = Some(Quality::Unknown);
                }
            }
        }
    }

    /// The introductory paragraph for `query`. Served from the cache when
    /// possible; a failed generation yields a fixed sentence and is not cached.
    pub async fn intro(&self, query: &InventoryQuery) -> String {
        if let Some(cached) = self.intro_cache.get(query).await {
            debug!("Serving cached intro");
            return cached;
        }

        let Some(chat) = &self.chat else {
            return intro_fallback(query);
        };

        match request_intro(chat, query).await {
            Ok(intro) => {
                self.intro_cache.insert(*query, intro.clone()).await;
                intro
            }
            Err(err) => {
                warn!(error = %err, "AI intro generation failed");
                intro_fallback(query)
            }
        }
    }
}

/// Keep only the records the lookup API confirms as operating businesses.
/// A failed lookup drops the record.
async fn verify_records(
    places: &PlacesClient,
    query: &InventoryQuery,
    records: Vec<ListingRecord>,
) -> Vec<ListingRecord> {
    let mut verified = Vec::with_capacity(records.len());
    for record in records {
        match places.verify(&record.store, query.city).await {
            Ok(true) => verified.push(record),
            Ok(false) => debug!(store = %record.store, "Store not operational, dropping"),
            Err(err) => warn!(store = %record.store, error = %err, "Store lookup failed, dropping"),
        }
    }
    verified
}
