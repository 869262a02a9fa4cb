//! Data models shared by the scraping pipeline and the command handlers.
//!
//! - [`SourceConfig`]: static description of one news site
//! - [`NewsItem`]: a scraped headline, produced only by the source fetcher
//! - [`KeywordCount`]: one ranked phrase from keyword extraction

use chrono::{DateTime, Local};

/// Fetch and parse configuration for one news site.
///
/// Selectors are CSS queries understood by [`scraper::Selector`]. The
/// article selector locates the container of each story, the title selector
/// is evaluated inside that container and should point at the link whose
/// text is the headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceConfig {
    /// Unique identifier, also used as the section header in digests.
    pub id: &'static str,
    /// Section page listing the latest articles.
    pub page_url: &'static str,
    /// Selector matching one node per article.
    pub article_selector: &'static str,
    /// Selector for the headline link inside an article node.
    pub title_selector: &'static str,
}

/// A headline scraped from a news source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    /// Headline text with whitespace collapsed and trimmed.
    pub title: String,
    /// Identifier of the [`SourceConfig`] this came from.
    pub source: String,
    /// Absolute article URL, or empty when the link had no target.
    pub url: String,
    /// When the page was parsed.
    pub fetched_at: DateTime<Local>,
}

/// A phrase of one to three words and the number of times it was counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCount {
    pub phrase: String,
    pub count: usize,
}

impl KeywordCount {
    /// Number of space separated words in the phrase.
    pub fn word_count(&self) -> usize {
        self.phrase.split(' ').count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_word_count() {
        let kw = KeywordCount {
            phrase: "sốt xuất huyết".to_string(),
            count: 3,
        };
        assert_eq!(kw.word_count(), 3);

        let kw = KeywordCount {
            phrase: "bệnh".to_string(),
            count: 1,
        };
        assert_eq!(kw.word_count(), 1);
    }
}
