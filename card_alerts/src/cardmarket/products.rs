//! Cardmarket product and article payloads

use serde::Deserialize;
use serde_json::Value;

/// Cardmarket product (one printing of a card)
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardmarketProduct {
    pub id_product: u64,
    pub en_name: String,
    #[serde(default)]
    pub expansion_name: Option<String>,
}

/// One seller's article; only the price matters here
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CardmarketArticle {
    #[serde(default)]
    pub id_article: Option<u64>,
    #[serde(default)]
    pub price: Option<Value>,
}

impl CardmarketArticle {
    /// Price in euros; numbers and numeric strings are accepted
    pub fn price_eur(&self) -> Option<f64> {
        match self.price.as_ref()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

/// The API sends a single object instead of a one-element list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// `products/find` response body
#[derive(Debug, Deserialize)]
pub struct ProductSearch {
    #[serde(default)]
    pub product: OneOrMany<CardmarketProduct>,
}

/// `articles/{idProduct}` response body
#[derive(Debug, Deserialize)]
pub struct ArticleList {
    #[serde(default)]
    pub article: OneOrMany<CardmarketArticle>,
}

/// Minimum over the articles that carry a usable price
pub fn lowest_article_price(articles: &[CardmarketArticle]) -> Option<f64> {
    articles
        .iter()
        .filter_map(CardmarketArticle::price_eur)
        .min_by(|a, b| a.total_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_search_accepts_list() {
        let json = r#"{
            "product": [
                { "idProduct": 1, "enName": "Sol Ring", "expansionName": "Commander" },
                { "idProduct": 2, "enName": "Sol Ring" }
            ]
        }"#;
        let search: ProductSearch = serde_json::from_str(json).unwrap();
        let products: Vec<CardmarketProduct> = search.product.into();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].expansion_name.as_deref(), Some("Commander"));
    }

    #[test]
    fn product_search_accepts_single_object() {
        let json = r#"{ "product": { "idProduct": 7, "enName": "The One Ring" } }"#;
        let search: ProductSearch = serde_json::from_str(json).unwrap();
        let products: Vec<CardmarketProduct> = search.product.into();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id_product, 7);
    }

    #[test]
    fn product_search_without_key_is_empty() {
        let search: ProductSearch = serde_json::from_str("{}").unwrap();
        let products: Vec<CardmarketProduct> = search.product.into();
        assert!(products.is_empty());
    }

    #[test]
    fn lowest_price_skips_unparseable_articles() {
        let json = r#"{
            "article": [
                { "idArticle": 1, "price": 12.5 },
                { "idArticle": 2, "price": "9.99" },
                { "idArticle": 3, "price": "ask" },
                { "idArticle": 4 }
            ]
        }"#;
        let list: ArticleList = serde_json::from_str(json).unwrap();
        let articles: Vec<CardmarketArticle> = list.article.into();
        let lowest = lowest_article_price(&articles).unwrap();
        assert!((lowest - 9.99).abs() < 0.001);
    }

    #[test]
    fn lowest_price_of_nothing_is_none() {
        assert!(lowest_article_price(&[]).is_none());
    }
}
