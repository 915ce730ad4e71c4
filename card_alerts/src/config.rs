//! Credentials read from the process environment

use mtg_common::{Error, Result};

pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const CARDTRADER_TOKEN: &str = "CARDTRADER_TOKEN";
pub const CM_APP_TOKEN: &str = "CM_APP_TOKEN";
pub const CM_APP_SECRET: &str = "CM_APP_SECRET";
pub const CM_ACCESS_TOKEN: &str = "CM_ACCESS_TOKEN";
pub const CM_ACCESS_TOKEN_SECRET: &str = "CM_ACCESS_TOKEN_SECRET";

/// Looks up a required value; absent and empty values are both errors
fn require<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => {
            log::debug!("{} loaded ({} chars)", name, value.len());
            Ok(value)
        }
        _ => {
            log::error!("Required environment variable {} is not set", name);
            Err(Error::MissingCredential(name.to_string()))
        }
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Telegram bot token and destination chat
#[derive(Debug, Clone)]
pub struct TelegramCredentials {
    pub bot_token: String,
    pub chat_id: String,
}

impl TelegramCredentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            bot_token: require(&lookup, TELEGRAM_BOT_TOKEN)?,
            chat_id: require(&lookup, TELEGRAM_CHAT_ID)?,
        })
    }
}

/// CardTrader bearer token
#[derive(Debug, Clone)]
pub struct CardTraderCredentials {
    pub token: String,
}

impl CardTraderCredentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            token: require(&lookup, CARDTRADER_TOKEN)?,
        })
    }
}

/// Cardmarket OAuth 1.0a application and access tokens
#[derive(Debug, Clone)]
pub struct CardmarketCredentials {
    pub app_token: String,
    pub app_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl CardmarketCredentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            app_token: require(&lookup, CM_APP_TOKEN)?,
            app_secret: require(&lookup, CM_APP_SECRET)?,
            access_token: require(&lookup, CM_ACCESS_TOKEN)?,
            access_token_secret: require(&lookup, CM_ACCESS_TOKEN_SECRET)?,
        })
    }
}
