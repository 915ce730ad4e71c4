//! One-shot jobs: look something up, send one message, report an exit status

use crate::ports::{CardmarketPort, MarketplacePort, NotificationPort};
use mtg_common::formatters::{self, DAILY_TOP_SIZE};
use mtg_common::{resolve_named, select, Error, ListingFilter, RankedPrice, Result, Selection};

/// How a job that did not fail ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// The result message was sent
    Delivered,
    /// Nothing to report; an informational message was sent
    NothingFound,
}

impl JobOutcome {
    pub fn exit_code(self) -> u8 {
        0
    }
}

/// What the `price` job looks up
#[derive(Debug, Clone)]
pub struct PriceRequest {
    pub card_name: String,
    pub game_id: u64,
    pub category_id: u64,
    pub filter: ListingFilter,
}

/// Blueprint search, listing fetch and minimum-price selection for one card
pub fn price_check(
    market: &dyn MarketplacePort,
    notifier: &dyn NotificationPort,
    request: &PriceRequest,
) -> Result<JobOutcome> {
    market.info()?;

    let entries =
        market.search_blueprints(&request.card_name, request.game_id, request.category_id)?;
    let Some(entry) = resolve_named(&entries, &request.card_name) else {
        log::info!("No blueprint found for '{}'", request.card_name);
        deliver(notifier, &formatters::card_not_found(&request.card_name))?;
        return Ok(JobOutcome::NothingFound);
    };
    log::info!(
        "Resolved '{}' to blueprint {} ({})",
        request.card_name,
        entry.id,
        entry.effective_slug()
    );

    let listings = market.marketplace_products(entry.id)?;
    match select(&listings, &request.filter) {
        Selection::Quote(quote) => {
            log::info!(
                "Cheapest listing {}: {:.2} {} ({})",
                quote.listing.id,
                quote.price,
                quote.currency(),
                quote.condition
            );
            let text = formatters::price_quote(&request.card_name, entry, &quote, &request.filter);
            deliver(notifier, &text)?;
            Ok(JobOutcome::Delivered)
        }
        Selection::NoMatchingListing => {
            log::info!("No listing of blueprint {} passes the filters", entry.id);
            let text = formatters::no_matching_listing(&request.card_name, entry, &request.filter);
            deliver(notifier, &text)?;
            Ok(JobOutcome::NothingFound)
        }
    }
}

/// Check whether the marketplace lists a game matching `keyword`
pub fn find_game(
    market: &dyn MarketplacePort,
    notifier: &dyn NotificationPort,
    keyword: &str,
) -> Result<JobOutcome> {
    market.info()?;

    let games = market.games()?;
    match games.iter().find(|game| game.matches(keyword)) {
        Some(game) => {
            log::info!("Game '{}' has id {}", game.name, game.id);
            deliver(notifier, &formatters::game_found(game))?;
            Ok(JobOutcome::Delivered)
        }
        None => {
            log::info!("No game among {} matches '{}'", games.len(), keyword);
            deliver(notifier, &formatters::game_missing(keyword, games.len()))?;
            Ok(JobOutcome::NothingFound)
        }
    }
}

/// Look up each card on Cardmarket and send the cheapest-first ranking
pub fn cardmarket_daily_top(
    market: &dyn CardmarketPort,
    notifier: &dyn NotificationPort,
    cards: &[String],
) -> Result<JobOutcome> {
    let mut rows = Vec::new();

    for name in cards {
        let products = market.find_products(name)?;
        let Some(product) = products.first() else {
            log::info!("'{}' not found on Cardmarket, skipping", name);
            continue;
        };
        match market.lowest_price(product.id_product)? {
            Some(price) => rows.push(RankedPrice {
                name: product.en_name.clone(),
                price,
            }),
            None => log::info!("No priced articles for '{}', skipping", product.en_name),
        }
    }

    rows.sort_by(|a, b| a.price.total_cmp(&b.price));
    rows.truncate(DAILY_TOP_SIZE);

    deliver(notifier, &formatters::daily_top(&rows))?;
    Ok(if rows.is_empty() {
        JobOutcome::NothingFound
    } else {
        JobOutcome::Delivered
    })
}

/// Send one message; a failure here ends the run without another attempt
fn deliver(notifier: &dyn NotificationPort, text: &str) -> Result<()> {
    notifier.send(text).map_err(Error::notification)
}

/// Tell the chat why a run failed; missing credentials and failed sends are only logged
pub fn report_failure(notifier: &dyn NotificationPort, err: &Error) {
    let text = match err {
        Error::MissingCredential(_) | Error::Notification(_) => return,
        Error::AuthExpired { provider, status } => formatters::auth_expired(provider, *status),
        other => formatters::upstream_error(other),
    };
    if let Err(send_err) = notifier.send(&text) {
        log::error!("Failed to send failure notification: {}", send_err);
    }
}

/// Run a job and turn its result into a process exit status
pub fn run_job<F>(notifier: &dyn NotificationPort, job: F) -> u8
where
    F: FnOnce() -> Result<JobOutcome>,
{
    match job() {
        Ok(outcome) => {
            log::info!("Job finished: {:?}", outcome);
            outcome.exit_code()
        }
        Err(err) => {
            log::error!("Job failed: {}", err);
            report_failure(notifier, &err);
            err.exit_code()
        }
    }
}
