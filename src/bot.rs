//! Chat command handling.
//!
//! [`NewsBot`] owns the news cache and turns each [`Command`] into replies.
//! Commands are processed one at a time; a `/news` or `/keywords` arriving
//! while the cache is stale performs the whole crawl before answering.
//!
//! # Error boundary
//!
//! Nothing a command does can escape [`NewsBot::handle`]: scraping failures
//! already degrade to fewer items, and any error left (typically a failed
//! reply) is logged and answered with a generic apology.

use crate::cache::NewsCache;
use crate::keywords::extract_keywords;
use crate::models::SourceConfig;
use crate::outputs::keywords::format_keywords;
use crate::outputs::news::format_digest;
use crate::outputs::{
    GENERIC_FAILURE, HELP_TEXT, KEYWORDS_SEARCHING, NEWS_SEARCHING, NO_KEYWORDS_FOUND,
    NO_NEWS_FOUND, WELCOME_TEXT,
};
use crate::scrapers::aggregate::{PACING_DELAY, crawl_all};
use crate::scrapers::page::PageFetch;
use crate::vocabulary::Vocabulary;
use chrono::{DateTime, Local};
use clap::ValueEnum;
use std::error::Error;
use std::time::Duration;
use tracing::{error, info, instrument};

/// A bot command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Command {
    Start,
    Help,
    News,
    Keywords,
}

impl Command {
    /// Recognize a command at the start of a chat message.
    ///
    /// Accepts `/news`, `/news@SomeBot` and trailing arguments; matching is
    /// case-insensitive. Anything else is `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?.strip_prefix('/')?;
        let name = word.split('@').next()?.to_lowercase();
        match name.as_str() {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            "news" => Some(Self::News),
            "keywords" => Some(Self::Keywords),
            _ => None,
        }
    }
}

/// Destination for the replies to one command.
pub trait Reply {
    async fn reply(&self, text: &str) -> Result<(), Box<dyn Error>>;
}

/// Command handler holding the scraping configuration and the cache.
#[derive(Debug)]
pub struct NewsBot<F> {
    fetch: F,
    sources: Vec<SourceConfig>,
    vocabulary: Vocabulary,
    cache: NewsCache,
    pacing: Duration,
}

impl<F: PageFetch> NewsBot<F> {
    /// Create a bot with an empty cache and the default [`PACING_DELAY`].
    ///
    /// # Arguments
    ///
    /// * `fetch` - Page downloader used for every scrape
    /// * `sources` - Sources crawled on refresh, in order
    /// * `vocabulary` - Keyword lists for `/keywords`
    pub fn new(fetch: F, sources: Vec<SourceConfig>, vocabulary: Vocabulary) -> Self {
        Self {
            fetch,
            sources,
            vocabulary,
            cache: NewsCache::new(),
            pacing: PACING_DELAY,
        }
    }

    /// Override the pause between source requests.
    #[cfg(test)]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Handle `command`, sending every reply through `reply`.
    pub async fn handle<R: Reply>(&mut self, command: Command, reply: &R) {
        self.handle_at(command, reply, Local::now()).await
    }

    /// [`NewsBot::handle`] with an explicit notion of "now" for cache checks.
    #[instrument(level = "info", skip(self, reply, now))]
    pub async fn handle_at<R: Reply>(&mut self, command: Command, reply: &R, now: DateTime<Local>) {
        if let Err(e) = self.dispatch(command, reply, now).await {
            error!(?command, error = %e, "Command failed");
            if let Err(e) = reply.reply(GENERIC_FAILURE).await {
                error!(error = %e, "Failed to send failure notice");
            }
        }
    }

    async fn dispatch<R: Reply>(
        &mut self,
        command: Command,
        reply: &R,
        now: DateTime<Local>,
    ) -> Result<(), Box<dyn Error>> {
        match command {
            Command::Start => reply.reply(WELCOME_TEXT).await,
            Command::Help => reply.reply(HELP_TEXT).await,
            Command::News => self.news(reply, now).await,
            Command::Keywords => self.keywords(reply, now).await,
        }
    }

    async fn news<R: Reply>(&mut self, reply: &R, now: DateTime<Local>) -> Result<(), Box<dyn Error>> {
        reply.reply(NEWS_SEARCHING).await?;
        self.ensure_fresh(now).await;

        let (items, last_refresh) = self.cache.get();
        let Some(updated_at) = last_refresh.filter(|_| !items.is_empty()) else {
            return reply.reply(NO_NEWS_FOUND).await;
        };
        reply.reply(&format_digest(items, updated_at)).await
    }

    async fn keywords<R: Reply>(
        &mut self,
        reply: &R,
        now: DateTime<Local>,
    ) -> Result<(), Box<dyn Error>> {
        reply.reply(KEYWORDS_SEARCHING).await?;
        self.ensure_fresh(now).await;

        let (items, _) = self.cache.get();
        if items.is_empty() {
            return reply.reply(NO_NEWS_FOUND).await;
        }

        let titles: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
        let keywords = extract_keywords(&titles, &self.vocabulary);
        if keywords.is_empty() {
            return reply.reply(NO_KEYWORDS_FOUND).await;
        }
        reply.reply(&format_keywords(&keywords, &self.vocabulary)).await
    }

    /// Re-crawl every source if the cache is stale at `now`.
    async fn ensure_fresh(&mut self, now: DateTime<Local>) {
        if !self.cache.is_stale(now) {
            return;
        }
        info!(sources = self.sources.len(), "Cache stale; crawling sources");
        let items = crawl_all(&self.fetch, &self.sources, self.pacing).await;
        self.cache.refresh(items, now);
    }
}
