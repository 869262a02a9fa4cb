//! Headline scraping for the configured news sources.
//!
//! Scraping runs in three layers:
//!
//! 1. [`page`]: downloads a page's HTML through the [`page::PageFetch`] trait
//! 2. [`source`]: parses up to five headlines out of one source's page
//! 3. [`aggregate`]: walks the whole registry one source at a time with a
//!    pause between requests
//!
//! # Failure isolation
//!
//! A source that cannot be downloaded or whose markup no longer matches its
//! selectors contributes zero items. Errors are logged at the source boundary
//! and never abort the rest of the batch.

pub mod aggregate;
pub mod page;
pub mod source;
