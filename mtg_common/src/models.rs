//! Marketplace data model: catalog entries, listings and derived quotes

use serde::{Deserialize, Serialize};

/// Canonical definition of one card printing (a CardTrader "blueprint")
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub expansion_id: Option<u64>,
    #[serde(default)]
    pub game_id: Option<u64>,
    #[serde(default)]
    pub category_id: Option<u64>,
}

impl CatalogEntry {
    /// Slug as sent by the marketplace, or one derived from the name when absent
    pub fn effective_slug(&self) -> String {
        if !self.slug.trim().is_empty() {
            return self.slug.to_lowercase();
        }
        slugify(&self.name)
    }
}

/// Lowercase the name and collapse runs of non-alphanumerics into single dashes
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Seller-declared properties of a listing
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ListingProperties {
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub mtg_language: Option<String>,
    #[serde(default)]
    pub mtg_foil: Option<bool>,
}

/// One seller's offer of a catalog entry
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Listing {
    pub id: u64,
    #[serde(default)]
    pub blueprint_id: u64,
    #[serde(default)]
    pub name_en: Option<String>,
    /// Minor currency units; kept raw so a malformed value only excludes this listing
    #[serde(default)]
    pub price_cents: Option<serde_json::Value>,
    #[serde(default = "default_currency")]
    pub price_currency: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub on_vacation: bool,
    #[serde(default)]
    pub properties_hash: ListingProperties,
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl Listing {
    /// Price in major currency units, `None` when the upstream value is not an integer amount
    pub fn price(&self) -> Option<f64> {
        self.price_cents.as_ref().and_then(minor_to_major)
    }

    pub fn condition(&self) -> Option<&str> {
        self.properties_hash.condition.as_deref()
    }
}

/// Convert integer minor units (cents) into major units.
///
/// Accepts JSON integers and strings holding an integer; anything else yields `None`.
pub fn minor_to_major(value: &serde_json::Value) -> Option<f64> {
    let cents = match value {
        serde_json::Value::Number(n) => n.as_i64()?,
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    Some(cents as f64 / 100.0)
}

/// Condition grades in order of preference, best first
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionRank(Vec<String>);

impl ConditionRank {
    pub fn new<I, S>(grades: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(grades.into_iter().map(Into::into).collect())
    }

    pub fn grades(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ConditionRank {
    fn default() -> Self {
        Self::new([
            "Near Mint",
            "Slightly Played",
            "Moderately Played",
            "Played",
            "Poor",
        ])
    }
}

/// The listing chosen for a run, with the condition it was selected under
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub listing: Listing,
    pub condition: String,
    pub price: f64,
}

impl PriceQuote {
    pub fn currency(&self) -> &str {
        &self.listing.price_currency
    }
}

/// Entry of the marketplace games catalog
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Game {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Game {
    /// Case-insensitive substring match on either name
    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.name.to_lowercase().contains(&keyword)
            || self
                .display_name
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&keyword))
    }
}

/// One line of the Cardmarket daily ranking
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPrice {
    pub name: String,
    pub price: f64,
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
