//! CardTrader API v2 client (bearer token)

use crate::config::CardTraderCredentials;
use crate::http::{build_client, marketplace_json, MARKETPLACE_TIMEOUT};
use crate::ports::MarketplacePort;
use mtg_common::{CatalogEntry, Game, Listing, Result};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

const CARDTRADER_API: &str = "https://api.cardtrader.com/api/v2";

pub const PROVIDER: &str = "CardTrader";

/// Authenticated CardTrader client
pub struct CardTraderClient {
    pub(crate) client: Client,
    pub(crate) token: String,
    pub(crate) base_url: String,
}

impl CardTraderClient {
    pub fn new(credentials: CardTraderCredentials) -> Result<Self> {
        log::debug!("Creating CardTrader client");
        Ok(Self {
            client: build_client(MARKETPLACE_TIMEOUT)?,
            token: credentials.token,
            base_url: CARDTRADER_API.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Authenticated GET returning the decoded JSON body
    pub fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        log::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()?;

        marketplace_json(PROVIDER, response)
    }
}

/// Lists come back either bare or wrapped as `{"array": [...]}`
fn list_of<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    let items = match value {
        Value::Object(mut map) => map.remove("array").unwrap_or(Value::Array(Vec::new())),
        other => other,
    };
    Ok(serde_json::from_value(items)?)
}

/// Marketplace products are keyed by blueprint id
fn listings_for(value: Value, blueprint_id: u64) -> Result<Vec<Listing>> {
    match value {
        Value::Object(mut map) => match map.remove(&blueprint_id.to_string()) {
            Some(listings) => Ok(serde_json::from_value(listings)?),
            None => Ok(Vec::new()),
        },
        other => list_of(other),
    }
}

impl MarketplacePort for CardTraderClient {
    fn info(&self) -> Result<Value> {
        let info = self.get("info", &[])?;
        log::info!(
            "CardTrader token accepted for app {}",
            info.get("name").and_then(Value::as_str).unwrap_or("?")
        );
        Ok(info)
    }

    fn games(&self) -> Result<Vec<Game>> {
        let games: Vec<Game> = list_of(self.get("games", &[])?)?;
        log::info!("Fetched {} games", games.len());
        Ok(games)
    }

    fn search_blueprints(
        &self,
        name: &str,
        game_id: u64,
        category_id: u64,
    ) -> Result<Vec<CatalogEntry>> {
        let query = [
            ("name", name.to_string()),
            ("game_id", game_id.to_string()),
            ("category_id", category_id.to_string()),
        ];
        let entries: Vec<CatalogEntry> = list_of(self.get("blueprints/export", &query)?)?;
        log::info!("Blueprint search for '{}' returned {} entries", name, entries.len());
        Ok(entries)
    }

    fn marketplace_products(&self, blueprint_id: u64) -> Result<Vec<Listing>> {
        let query = [("blueprint_id", blueprint_id.to_string())];
        let listings = listings_for(self.get("marketplace/products", &query)?, blueprint_id)?;
        log::info!(
            "Fetched {} listings for blueprint {}",
            listings.len(),
            blueprint_id
        );
        Ok(listings)
    }
}

#[cfg(test)]
#[path = "cardtrader_tests.rs"]
mod tests;
