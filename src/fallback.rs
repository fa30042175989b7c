//! Placeholder listings served whenever the live pipeline has nothing usable.

use chrono::{DateTime, Utc};

use crate::catalog::InventoryQuery;
use crate::listing::{Availability, ListingRecord};
use crate::messages::fallback_note;

const PLACEHOLDERS: [(&str, &str, &str); 3] = [
    ("Example Supply Co.", "123 Main St", "In Stock"),
    ("Demo Hardware", "456 Broad Ave", "Low Stock"),
    ("Mock Market", "789 River Rd", "Out of Stock"),
];

/// Build the fallback set for `query`, stamped with `now`.
pub fn fallback_inventory(query: &InventoryQuery, now: DateTime<Utc>) -> Vec<ListingRecord> {
    let city = query.city.display_name();
    let notes = fallback_note(query);
    PLACEHOLDERS
        .iter()
        .map(|(store, street, status)| ListingRecord {
            store: store.to_string(),
            address: format!("{street}, {city}, GA"),
            availability: Availability::Status {
                status: status.to_string(),
            },
            notes: notes.clone(),
            quality: None,
            last_checked: now,
        })
        .collect()
}
