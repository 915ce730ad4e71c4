//! Blocking HTTP helpers shared by the marketplace and Telegram clients

use mtg_common::{Error, Result};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde_json::{Map, Value};
use std::time::Duration;

pub const USER_AGENT: &str = concat!("card_alerts/", env!("CARGO_PKG_VERSION"));

/// Timeout for CardTrader calls
pub const MARKETPLACE_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for Cardmarket calls
pub const CARDMARKET_TIMEOUT: Duration = Duration::from_secs(20);

/// Timeout for Telegram calls
pub const TELEGRAM_TIMEOUT: Duration = Duration::from_secs(20);

pub fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// Decode a marketplace response; 401/403 become `AuthExpired` for `provider`
pub fn marketplace_json(provider: &'static str, response: Response) -> Result<Value> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        log::warn!("{} rejected the credential: {}", provider, status);
        return Err(Error::AuthExpired { provider, status });
    }
    let text = ensure_success(response)?.text()?;
    if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
        // "no results" comes back as 204 with an empty body
        log::debug!("{} answered {} without a body", provider, status);
        return Ok(Value::Object(Map::new()));
    }
    Ok(serde_json::from_str(&text)?)
}

/// Pass 2xx responses through, turn anything else into `HttpStatus` with the body kept
pub fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    log::error!(
        "HTTP {}: {}",
        status,
        body.chars().take(200).collect::<String>()
    );
    Err(Error::HttpStatus { status, body })
}
