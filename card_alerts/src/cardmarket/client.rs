//! Signed Cardmarket API v2.0 client

use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde_json::Value;

use super::oauth::OAuthSigner;
use super::products::{
    lowest_article_price, ArticleList, CardmarketArticle, CardmarketProduct, ProductSearch,
};
use crate::config::CardmarketCredentials;
use crate::http::{build_client, marketplace_json, CARDMARKET_TIMEOUT};
use crate::ports::CardmarketPort;
use mtg_common::Result;

const CARDMARKET_API: &str = "https://api.cardmarket.com/ws/v2.0/output.json";

pub const PROVIDER: &str = "Cardmarket";

/// Magic: The Gathering
const GAME_ID: &str = "1";
/// English
const LANGUAGE_ID: &str = "1";
const SEARCH_RESULTS: &str = "3";
const ARTICLE_RESULTS: &str = "50";

pub struct CardmarketClient {
    pub(crate) client: Client,
    pub(crate) signer: OAuthSigner,
    pub(crate) base_url: String,
}

impl CardmarketClient {
    pub fn new(credentials: CardmarketCredentials) -> Result<Self> {
        log::debug!("Creating Cardmarket client");
        Ok(Self {
            client: build_client(CARDMARKET_TIMEOUT)?,
            signer: OAuthSigner::new(credentials),
            base_url: CARDMARKET_API.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Signed GET; the OAuth realm is the URL without its query string
    pub fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let authorization = self.signer.authorization("GET", &url, query)?;
        log::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, HeaderValue::from_str(&authorization)?)
            .query(query)
            .send()?;

        marketplace_json(PROVIDER, response)
    }
}

impl CardmarketPort for CardmarketClient {
    fn find_products(&self, name: &str) -> Result<Vec<CardmarketProduct>> {
        let query = [
            ("search", name.to_string()),
            ("idGame", GAME_ID.to_string()),
            ("idLanguage", LANGUAGE_ID.to_string()),
            ("maxResults", SEARCH_RESULTS.to_string()),
            ("exact", "true".to_string()),
        ];
        let search: ProductSearch = serde_json::from_value(self.get("products/find", &query)?)?;
        let products: Vec<CardmarketProduct> = search.product.into();
        log::info!("Cardmarket search for '{}' returned {} products", name, products.len());
        Ok(products)
    }

    fn lowest_price(&self, product_id: u64) -> Result<Option<f64>> {
        let query = [("maxResults", ARTICLE_RESULTS.to_string())];
        let list: ArticleList =
            serde_json::from_value(self.get(&format!("articles/{product_id}"), &query)?)?;
        let articles: Vec<CardmarketArticle> = list.article.into();
        let lowest = lowest_article_price(&articles);
        log::info!(
            "{} articles for product {}, lowest price {:?}",
            articles.len(),
            product_id,
            lowest
        );
        Ok(lowest)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
