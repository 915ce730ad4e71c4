//! Card Alerts - MTG marketplace price notifications
//!
//! Runs one lookup per invocation and relays the result to Telegram.
//! Exit status 0 means the run completed (including "nothing found"),
//! 1 means a credential or upstream failure.

use card_alerts::config::{CardTraderCredentials, CardmarketCredentials, TelegramCredentials};
use card_alerts::jobs::{self, PriceRequest};
use card_alerts::{run_job, CardTraderClient, CardmarketClient, TelegramNotifier};
use clap::{Parser, Subcommand};
use mtg_common::{ConditionRank, ListingFilter};
use std::process::ExitCode;

/// MTG price alerts - looks up marketplace prices and relays them to Telegram
#[derive(Parser, Debug)]
#[command(name = "card_alerts")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cheapest CardTrader listing for one card
    Price {
        /// Card name to search for
        #[arg(long, default_value = "The One Ring")]
        card: String,

        /// Listing language code
        #[arg(long, default_value = "en")]
        language: String,

        /// Look for foil copies instead of non-foil
        #[arg(long, default_value_t = false)]
        foil: bool,

        /// Acceptable conditions, best first (repeatable)
        #[arg(long = "condition")]
        conditions: Vec<String>,

        /// CardTrader game id (1 = Magic)
        #[arg(long, default_value_t = 1)]
        game_id: u64,

        /// CardTrader category id (1 = singles)
        #[arg(long, default_value_t = 1)]
        category_id: u64,
    },

    /// Check that CardTrader lists a game
    Games {
        /// Case-insensitive part of the game name
        #[arg(long, default_value = "magic")]
        keyword: String,
    },

    /// Cheapest-first Cardmarket ranking for a list of cards
    CardmarketTop {
        /// Cards to look up (repeatable)
        #[arg(long = "card")]
        cards: Vec<String>,
    },
}

const DEFAULT_TOP_CARDS: [&str; 4] = [
    "The One Ring",
    "Orcish Bowmasters",
    "Ragavan, Nimble Pilferer",
    "Sol Ring",
];

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting card_alerts...");

    let notifier = match TelegramCredentials::from_env().and_then(TelegramNotifier::new) {
        Ok(notifier) => notifier,
        Err(e) => {
            log::error!("Cannot set up Telegram: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    let status = match args.command {
        Command::Price {
            card,
            language,
            foil,
            conditions,
            game_id,
            category_id,
        } => {
            let conditions = if conditions.is_empty() {
                ConditionRank::default()
            } else {
                ConditionRank::new(conditions)
            };
            let request = PriceRequest {
                card_name: card,
                game_id,
                category_id,
                filter: ListingFilter {
                    language,
                    foil,
                    conditions,
                },
            };
            run_job(&notifier, || {
                let market = CardTraderClient::new(CardTraderCredentials::from_env()?)?;
                jobs::price_check(&market, &notifier, &request)
            })
        }
        Command::Games { keyword } => run_job(&notifier, || {
            let market = CardTraderClient::new(CardTraderCredentials::from_env()?)?;
            jobs::find_game(&market, &notifier, &keyword)
        }),
        Command::CardmarketTop { cards } => {
            let cards = if cards.is_empty() {
                DEFAULT_TOP_CARDS.iter().map(|c| c.to_string()).collect()
            } else {
                cards
            };
            run_job(&notifier, || {
                let market = CardmarketClient::new(CardmarketCredentials::from_env()?)?;
                jobs::cardmarket_daily_top(&market, &notifier, &cards)
            })
        }
    };

    ExitCode::from(status)
}
