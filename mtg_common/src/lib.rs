//! Shared types for MTG price alerts
//!
//! Catalog entries, marketplace listings, the selection rules that turn a set
//! of listings into one quote, and the Telegram message templates.

pub mod error;
pub mod formatters;
pub mod models;
pub mod resolver;
pub mod selector;

pub use error::{Error, Result};
pub use models::{
    minor_to_major, CatalogEntry, ConditionRank, Game, Listing, ListingProperties, PriceQuote,
    RankedPrice,
};
pub use resolver::{resolve, resolve_named};
pub use selector::{select, ListingFilter, Selection};
