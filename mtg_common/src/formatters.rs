//! Telegram message templates (HTML parse mode)

use crate::error::Error;
use crate::models::{CatalogEntry, Game, PriceQuote, RankedPrice};
use crate::selector::ListingFilter;

/// Longest message we hand to the notifier, in characters
pub const MAX_MESSAGE_CHARS: usize = 3500;

/// Appended to a message cut at [`MAX_MESSAGE_CHARS`]
pub const TRUNCATION_MARKER: &str = "\n… (truncated)";

/// Entries shown in the daily ranking
pub const DAILY_TOP_SIZE: usize = 5;

/// Longest upstream response body quoted in an error message
const ERROR_BODY_CHARS: usize = 800;

/// Escape text for Telegram's HTML parse mode
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Cut `text` to `limit` characters and append the marker; shorter text is returned as is.
///
/// The cut never lands inside a tag or an entity, and tags left open are closed
/// before the marker, so the result still parses as Telegram HTML.
pub fn truncate(text: &str, limit: usize) -> String {
    let Some((byte_index, _)) = text.char_indices().nth(limit) else {
        return text.to_string();
    };

    let mut head = &text[..byte_index];
    loop {
        let tag = head.rfind('<').filter(|&i| !head[i..].contains('>'));
        let entity = head.rfind('&').filter(|&i| !head[i..].contains(';'));
        match tag.into_iter().chain(entity).min() {
            Some(i) => head = &head[..i],
            None => break,
        }
    }

    let mut cut = head.to_string();
    for name in open_tags(head).iter().rev() {
        cut.push_str(&format!("</{name}>"));
    }
    cut.push_str(TRUNCATION_MARKER);
    cut
}

/// Names of the tags opened in `html` and not closed yet, outermost first
fn open_tags(html: &str) -> Vec<&str> {
    let mut stack: Vec<&str> = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start..].find('>') else {
            break;
        };
        let inner = &rest[start + 1..start + len];
        if let Some(closing) = inner.strip_prefix('/') {
            if stack.last() == Some(&closing.trim()) {
                stack.pop();
            }
        } else if !inner.ends_with('/') {
            if let Some(name) = inner.split_whitespace().next() {
                stack.push(name);
            }
        }
        rest = &rest[start + len + 1..];
    }
    stack
}

fn foil_label(foil: bool) -> &'static str {
    if foil {
        "foil"
    } else {
        "non-foil"
    }
}

pub fn price_quote(
    card_name: &str,
    entry: &CatalogEntry,
    quote: &PriceQuote,
    filter: &ListingFilter,
) -> String {
    format!(
        "✅ <b>CardTrader · {}</b>\n\n\
        Blueprint: <code>{}</code> {}\n\
        Condition: {}\n\
        Language: {} · {}\n\
        Price: <b>{:.2} {}</b>\n\
        Available: {}",
        escape_html(card_name),
        entry.id,
        escape_html(&entry.name),
        escape_html(&quote.condition),
        escape_html(&filter.language),
        foil_label(filter.foil),
        quote.price,
        escape_html(quote.currency()),
        quote.listing.quantity
    )
}

pub fn card_not_found(card_name: &str) -> String {
    format!(
        "ℹ️ <b>Card not found</b>\n\n\
        No blueprint matches <code>{}</code>.",
        escape_html(card_name)
    )
}

pub fn no_matching_listing(
    card_name: &str,
    entry: &CatalogEntry,
    filter: &ListingFilter,
) -> String {
    format!(
        "ℹ️ <b>No matching listing</b>\n\n\
        {} (blueprint <code>{}</code>)\n\
        Nothing on sale for language {} · {}.",
        escape_html(card_name),
        entry.id,
        escape_html(&filter.language),
        foil_label(filter.foil)
    )
}

pub fn auth_expired(provider: &str, status: reqwest::StatusCode) -> String {
    format!(
        "⚠️ <b>{} credential expired</b>\n\n\
        The API answered <code>{}</code>. Renew the token and update the environment.",
        escape_html(provider),
        status
    )
}

/// Diagnostic message for a failed run
pub fn upstream_error(err: &Error) -> String {
    match err {
        Error::HttpStatus { status, body } => {
            let body = truncate(&escape_html(body.trim()), ERROR_BODY_CHARS);
            format!(
                "❌ <b>Request failed</b>\n\n\
                Status: <code>{}</code>\n\
                <code>{}</code>",
                status, body
            )
        }
        other => format!(
            "❌ <b>Request failed</b>\n\n<code>{}</code>",
            escape_html(&other.to_string())
        ),
    }
}

pub fn game_found(game: &Game) -> String {
    let label = game.display_name.as_deref().unwrap_or(&game.name);
    format!(
        "✅ <b>Game found</b>\n\n\
        {} · id <code>{}</code>",
        escape_html(label),
        game.id
    )
}

pub fn game_missing(keyword: &str, games_seen: usize) -> String {
    format!(
        "ℹ️ <b>Game not listed</b>\n\n\
        None of {} games matches <code>{}</code>.",
        games_seen,
        escape_html(keyword)
    )
}

/// Cheapest-first ranking of the Cardmarket lookups
pub fn daily_top(rows: &[RankedPrice]) -> String {
    let mut lines = vec!["<b>📈 Cardmarket · Daily top</b>".to_string(), String::new()];
    if rows.is_empty() {
        lines.push("No prices available today.".to_string());
    }
    for (i, row) in rows.iter().take(DAILY_TOP_SIZE).enumerate() {
        lines.push(format!(
            "{}. <b>{}</b> — {:.2} €",
            i + 1,
            escape_html(&row.name),
            row.price
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
#[path = "formatters_tests.rs"]
mod tests;
