//! Shared text shown to users.
//!
//! Keep all user-facing strings in this module so they stay in one place and are
//! easy to update.

use crate::catalog::InventoryQuery;

pub const SITE_TITLE: &str = "Central Georgia Inventory Finder";
pub const SITE_TAGLINE: &str = "Find everyday essentials in stores across Central Georgia.";

pub const NOT_FOUND_TITLE: &str = "Not found";
pub const FALLBACK_BANNER: &str =
    "Live results are unavailable right now. The listings below are examples only.";
pub const SEARCH_PROMPT: &str = "Pick a city and a product to see where it is in stock.";

pub fn intro_fallback(query: &InventoryQuery) -> String {
    format!(
        "Check back soon for more tips about finding {} in {}.",
        query.category.phrase(),
        query.city.display_name()
    )
}

pub fn fallback_note(query: &InventoryQuery) -> String {
    format!(
        "Illustrative listing for {}; live data is unavailable.",
        query.category.phrase()
    )
}

pub fn not_found_text(city: &str, category: &str) -> String {
    format!("We don't cover {category:?} in {city:?} yet.")
}

pub fn inventory_title(city: &str, category: &str) -> String {
    format!("{category} in {city}, GA")
}
