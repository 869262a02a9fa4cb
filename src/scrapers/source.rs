//! Headline extraction for a single source.
//!
//! The page is downloaded through a [`PageFetch`] and parsed with the
//! source's selectors. Only the first [`MAX_ITEMS_PER_SOURCE`] article nodes
//! in document order are considered.

use super::page::PageFetch;
use crate::models::{NewsItem, SourceConfig};
use crate::utils::{collapse_whitespace, resolve_link};
use chrono::{DateTime, Local};
use scraper::{Html, Selector};
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};

/// Article nodes considered per source.
pub const MAX_ITEMS_PER_SOURCE: usize = 5;

/// Scrape one source. Never fails: any error is logged and yields no items.
#[instrument(level = "info", skip_all, fields(source = %source.id))]
pub async fn fetch_source<F: PageFetch>(fetch: &F, source: &SourceConfig) -> Vec<NewsItem> {
    let html = match fetch.fetch_page(source.page_url).await {
        Ok(html) => html,
        Err(e) => {
            error!(error = %e, url = %source.page_url, "Connection error while scraping source");
            return Vec::new();
        }
    };

    match parse_headlines(&html, source, Local::now()) {
        Ok(items) => {
            info!(count = items.len(), "Scraped source");
            items
        }
        Err(e) => {
            error!(error = %e, "Unexpected error while parsing source page");
            Vec::new()
        }
    }
}

/// Parse up to [`MAX_ITEMS_PER_SOURCE`] headlines from a source page.
///
/// Article nodes without a title link, or whose title is blank, are skipped.
/// Returns an empty list (with a warning) when no article node matches, which
/// usually means the site changed its markup.
///
/// # Errors
///
/// Returns an error only if one of the source's selectors is not valid CSS.
pub fn parse_headlines(
    html: &str,
    source: &SourceConfig,
    fetched_at: DateTime<Local>,
) -> Result<Vec<NewsItem>, Box<dyn Error>> {
    let article_selector = Selector::parse(source.article_selector)?;
    let title_selector = Selector::parse(source.title_selector)?;
    let document = Html::parse_document(html);

    let articles: Vec<_> = document.select(&article_selector).collect();
    if articles.is_empty() {
        warn!(
            source = %source.id,
            selector = %source.article_selector,
            "No articles matched selector"
        );
        return Ok(Vec::new());
    }

    let mut items = Vec::new();
    for (i, article) in articles.into_iter().take(MAX_ITEMS_PER_SOURCE).enumerate() {
        let Some(link) = article.select(&title_selector).next() else {
            debug!(source = %source.id, index = i, "Article has no title node");
            continue;
        };

        let title = collapse_whitespace(&link.text().collect::<String>());
        if title.is_empty() {
            debug!(source = %source.id, index = i, "Article title is empty");
            continue;
        }

        items.push(NewsItem {
            title,
            source: source.id.to_string(),
            url: resolve_link(source.page_url, link.value().attr("href")),
            fetched_at,
        });
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VNEXPRESS: SourceConfig = SourceConfig {
        id: "vnexpress",
        page_url: "https://vnexpress.net/suc-khoe",
        article_selector: "article.item-news",
        title_selector: "h3.title-news a",
    };

    struct StaticPage(String);

    impl PageFetch for StaticPage {
        async fn fetch_page(&self, _url: &str) -> Result<String, Box<dyn Error>> {
            Ok(self.0.clone())
        }
    }

    struct FailingPage;

    impl PageFetch for FailingPage {
        async fn fetch_page(&self, url: &str) -> Result<String, Box<dyn Error>> {
            Err(format!("HTTP 503 for {url}").into())
        }
    }

    fn article(title: &str, href: Option<&str>) -> String {
        let href = href.map(|h| format!(" href=\"{h}\"")).unwrap_or_default();
        format!(
            "<article class=\"item-news\"><h3 class=\"title-news\"><a{href}>{title}</a></h3></article>"
        )
    }

    fn page(articles: &[String]) -> String {
        format!("<html><body>{}</body></html>", articles.concat())
    }

    #[test]
    fn test_parse_resolves_and_normalizes() {
        let html = page(&[article("  Cảnh báo\n   sốt xuất huyết  ", Some("/tin-tuc-123"))]);
        let items = parse_headlines(&html, &VNEXPRESS, Local::now()).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Cảnh báo sốt xuất huyết");
        assert_eq!(items[0].url, "https://vnexpress.net/tin-tuc-123");
        assert_eq!(items[0].source, "vnexpress");
    }

    #[test]
    fn test_parse_keeps_absolute_and_missing_links() {
        let html = page(&[
            article("Tin một", Some("https://vnexpress.net/a.html")),
            article("Tin hai", None),
        ]);
        let items = parse_headlines(&html, &VNEXPRESS, Local::now()).unwrap();
        assert_eq!(items[0].url, "https://vnexpress.net/a.html");
        assert_eq!(items[1].url, "");
    }

    #[test]
    fn test_parse_caps_at_five_in_document_order() {
        let articles: Vec<String> = (1..=8)
            .map(|i| article(&format!("Tin {i}"), Some(format!("/{i}").as_str())))
            .collect();
        let items = parse_headlines(&page(&articles), &VNEXPRESS, Local::now()).unwrap();

        assert_eq!(items.len(), MAX_ITEMS_PER_SOURCE);
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Tin 1", "Tin 2", "Tin 3", "Tin 4", "Tin 5"]);
    }

    #[test]
    fn test_parse_skips_missing_and_blank_titles() {
        let html = page(&[
            "<article class=\"item-news\"><p>quảng cáo</p></article>".to_string(),
            article("   ", Some("/blank")),
            article("Tin thật", Some("/that")),
        ]);
        let items = parse_headlines(&html, &VNEXPRESS, Local::now()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Tin thật");
    }

    #[test]
    fn test_skipped_articles_count_toward_cap() {
        let mut articles = vec!["<article class=\"item-news\"></article>".to_string(); 5];
        articles.push(article("Tin thứ sáu", None));
        let items = parse_headlines(&page(&articles), &VNEXPRESS, Local::now()).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_no_articles_matched() {
        let html = "<html><body><div class=\"redesign\">x</div></body></html>";
        let items = parse_headlines(html, &VNEXPRESS, Local::now()).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_invalid_selector_is_error() {
        let broken = SourceConfig {
            article_selector: "article[",
            ..VNEXPRESS
        };
        assert!(parse_headlines("<html></html>", &broken, Local::now()).is_err());
    }

    #[tokio::test]
    async fn test_fetch_source_success() {
        let html = page(&[article("Tiêm chủng   vaccine", Some("/vaccine"))]);
        let items = fetch_source(&StaticPage(html), &VNEXPRESS).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Tiêm chủng vaccine");
    }

    #[tokio::test]
    async fn test_fetch_source_failure_is_empty() {
        let items = fetch_source(&FailingPage, &VNEXPRESS).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_source_titles_are_clean() {
        let html = page(&[
            article("\n\tA  B\n", None),
            article(" C ", None),
            article("D\u{a0} E", None),
        ]);
        let items = fetch_source(&StaticPage(html), &VNEXPRESS).await;
        assert!(items.len() <= MAX_ITEMS_PER_SOURCE);
        for item in items {
            assert_eq!(item.title, item.title.trim());
            assert!(!item.title.contains("  "));
        }
    }
}
