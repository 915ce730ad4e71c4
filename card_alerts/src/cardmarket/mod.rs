//! Cardmarket API client for product search and lowest article prices

mod client;
mod oauth;
mod products;

pub use client::{CardmarketClient, PROVIDER};
pub use oauth::{percent_encode, OAuthSigner};
pub use products::{CardmarketArticle, CardmarketProduct};
