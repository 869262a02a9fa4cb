//! # Health News Bot
//!
//! A Telegram bot that scrapes the health sections of Vietnamese news sites
//! and reports the latest headlines and the most frequent health keywords.
//!
//! ## Commands
//!
//! - `/start`, `/help`: static usage text
//! - `/news`: latest headlines grouped by source
//! - `/keywords`: top phrases from the cached headlines
//!
//! ## Usage
//!
//! ```sh
//! TELEGRAM_TOKEN=123:ABC health_news_bot
//! health_news_bot --print news
//! ```
//!
//! ## Architecture
//!
//! 1. **Scraping**: each registered source is downloaded and parsed in turn,
//!    one second apart
//! 2. **Caching**: results are kept for 24 hours and refreshed on demand
//! 3. **Analysis**: keyword counts are recomputed from cached titles on every
//!    `/keywords` request
//! 4. **Transport**: Telegram long polling, one command at a time

use clap::Parser;
use std::error::Error;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod bot;
mod cache;
mod cli;
mod keywords;
mod models;
mod outputs;
mod scrapers;
mod sources;
mod telegram;
mod utils;
mod vocabulary;

use bot::{NewsBot, Reply};
use cli::Cli;
use scrapers::page::HttpPageFetch;
use sources::NEWS_SOURCES;
use telegram::{TelegramClient, run_polling};
use vocabulary::{DEFAULT_VOCABULARY, Vocabulary};

/// Writes replies to stdout, one block per reply.
struct StdoutReply;

impl Reply for StdoutReply {
    async fn reply(&self, text: &str) -> Result<(), Box<dyn Error>> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{text}\n")?;
        Ok(())
    }
}

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load .env: {e}");
        }
    }

    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("health_news_bot starting up");

    let args = Cli::parse();
    debug!(api_base = %args.api_base, poll_timeout = args.poll_timeout, vocabulary = ?args.vocabulary, "Parsed CLI arguments");

    let vocabulary = match &args.vocabulary {
        Some(path) => Vocabulary::load(path).await?,
        None => DEFAULT_VOCABULARY.clone(),
    };

    let fetch = HttpPageFetch::new()?;
    let mut bot = NewsBot::new(fetch, NEWS_SOURCES.to_vec(), vocabulary);

    if let Some(command) = args.print {
        info!(?command, "Running single command");
        bot.handle(command, &StdoutReply).await;
        return Ok(());
    }

    let Some(token) = args.telegram_token.as_deref() else {
        return Err("TELEGRAM_TOKEN is not set (or pass --telegram-token)".into());
    };
    let poll_timeout = Duration::from_secs(args.poll_timeout);
    let client = TelegramClient::new(&args.api_base, token, poll_timeout)?;

    tokio::select! {
        _ = run_polling(&client, &mut bot, poll_timeout) => {}
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                warn!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown requested");
        }
    }

    Ok(())
}
