//! Telegram Bot API notifier

use crate::config::TelegramCredentials;
use crate::http::{build_client, ensure_success, TELEGRAM_TIMEOUT};
use crate::ports::NotificationPort;
use mtg_common::formatters::{truncate, MAX_MESSAGE_CHARS};
use mtg_common::Result;
use reqwest::blocking::Client;

const TELEGRAM_API: &str = "https://api.telegram.org";

/// Posts HTML messages to one chat through `sendMessage`
pub struct TelegramNotifier {
    pub(crate) client: Client,
    pub(crate) credentials: TelegramCredentials,
    pub(crate) base_url: String,
}

impl TelegramNotifier {
    pub fn new(credentials: TelegramCredentials) -> Result<Self> {
        Ok(Self {
            client: build_client(TELEGRAM_TIMEOUT)?,
            credentials,
            base_url: TELEGRAM_API.to_string(),
        })
    }

    /// Same notifier pointed at another API host (mock servers in tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn send_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.base_url, self.credentials.bot_token
        )
    }
}

impl NotificationPort for TelegramNotifier {
    fn send(&self, text: &str) -> Result<()> {
        let text = truncate(text, MAX_MESSAGE_CHARS);
        log::info!("Sending Telegram message ({} chars)", text.chars().count());

        let params = [
            ("chat_id", self.credentials.chat_id.as_str()),
            ("text", text.as_str()),
            ("parse_mode", "HTML"),
            ("disable_web_page_preview", "true"),
        ];
        let response = self.client.post(self.send_url()).form(&params).send()?;
        ensure_success(response)?;

        log::debug!("Telegram message delivered");
        Ok(())
    }
}

#[cfg(test)]
#[path = "telegram_tests.rs"]
mod tests;
