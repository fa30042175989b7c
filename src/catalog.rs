//! The fixed set of cities and product categories the finder serves.

use crate::error::ValidationError;
use crate::text_utils::{humanize_slug, title_case};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Macon,
    WarnerRobins,
    Perry,
    Milledgeville,
    Byron,
}

impl City {
    pub const ALL: [City; 5] = [
        City::Macon,
        City::WarnerRobins,
        City::Perry,
        City::Milledgeville,
        City::Byron,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            City::Macon => "macon",
            City::WarnerRobins => "warner-robins",
            City::Perry => "perry",
            City::Milledgeville => "milledgeville",
            City::Byron => "byron",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            City::Macon => "Macon",
            City::WarnerRobins => "Warner Robins",
            City::Perry => "Perry",
            City::Milledgeville => "Milledgeville",
            City::Byron => "Byron",
        }
    }

    /// Case-insensitive lookup by slug.
    pub fn from_slug(raw: &str) -> Option<Self> {
        let wanted = raw.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(wanted))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Firewood,
    Propane,
    ColdMedicine,
    DistilledWater,
    Ammo,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Firewood,
        Category::Propane,
        Category::ColdMedicine,
        Category::DistilledWater,
        Category::Ammo,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Category::Firewood => "firewood",
            Category::Propane => "propane",
            Category::ColdMedicine => "cold-medicine",
            Category::DistilledWater => "distilled-water",
            Category::Ammo => "ammo",
        }
    }

    /// The category as it reads inside a sentence: `cold medicine`.
    pub fn phrase(self) -> String {
        humanize_slug(self.slug())
    }

    /// The category as a heading: `Cold Medicine`.
    pub fn label(self) -> String {
        title_case(&self.phrase())
    }

    pub fn from_slug(raw: &str) -> Option<Self> {
        let wanted = raw.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(wanted))
    }
}

/// A validated (city, category) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InventoryQuery {
    pub city: City,
    pub category: Category,
}

impl InventoryQuery {
    pub fn new(city: City, category: Category) -> Self {
        Self { city, category }
    }

    /// Validate raw user input against the supported cities and categories.
    pub fn parse(city: &str, category: &str) -> Result<Self, ValidationError> {
        let Some(c) = City::from_slug(city) else {
            debug!(city, "Rejected unknown city");
            return Err(ValidationError::UnknownCity(city.to_string()));
        };
        let Some(cat) = Category::from_slug(category) else {
            debug!(category, "Rejected unknown category");
            return Err(ValidationError::UnknownCategory(category.to_string()));
        };
        Ok(Self::new(c, cat))
    }
}
