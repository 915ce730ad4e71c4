//! Card Alerts - MTG marketplace price notifications
//!
//! Short-lived jobs meant for an external scheduler: look up a card on
//! CardTrader or Cardmarket, pick a price, and relay the result to Telegram.

pub mod cardmarket;
pub mod cardtrader;
pub mod config;
pub mod http;
pub mod jobs;
pub mod ports;
pub mod telegram;

pub use cardmarket::CardmarketClient;
pub use cardtrader::CardTraderClient;
pub use jobs::{run_job, JobOutcome, PriceRequest};
pub use ports::{CardmarketPort, MarketplacePort, NotificationPort};
pub use telegram::TelegramNotifier;
