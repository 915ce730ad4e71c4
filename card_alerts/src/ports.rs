//! Narrow interfaces the jobs depend on, so flows can run against fakes

use crate::cardmarket::CardmarketProduct;
use mtg_common::{CatalogEntry, Game, Listing, Result};

/// Delivers one formatted message to the configured chat
pub trait NotificationPort {
    fn send(&self, text: &str) -> Result<()>;
}

/// Bearer-token marketplace with a blueprint catalog (CardTrader)
pub trait MarketplacePort {
    /// Credential check; fails with `AuthExpired` on 401/403
    fn info(&self) -> Result<serde_json::Value>;

    fn games(&self) -> Result<Vec<Game>>;

    fn search_blueprints(&self, name: &str, game_id: u64, category_id: u64)
        -> Result<Vec<CatalogEntry>>;

    fn marketplace_products(&self, blueprint_id: u64) -> Result<Vec<Listing>>;
}

/// Cardmarket product search and article lookup
pub trait CardmarketPort {
    fn find_products(&self, name: &str) -> Result<Vec<CardmarketProduct>>;

    /// Lowest parseable article price in euros, `None` when nothing is priced
    fn lowest_price(&self, product_id: u64) -> Result<Option<f64>>;
}
