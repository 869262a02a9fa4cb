//! Registry of scraped news sites.
//!
//! Every site is scraped from its health section. Order matters: the
//! aggregator walks the registry front to back and digests list sources in
//! the order they first appear in the results.
//!
//! | Id | Section page |
//! |----|--------------|
//! | vnexpress | <https://vnexpress.net/suc-khoe> |
//! | dantri | <https://dantri.com.vn/suc-khoe.htm> |
//! | thanhnien | <https://thanhnien.vn/suc-khoe.htm> |
//! | nld | <https://nld.com.vn/suc-khoe.htm> |
//! | suckhoedoisong | <https://suckhoedoisong.vn> |
//! | tuoitre | <https://tuoitre.vn/suc-khoe.htm> |
//! | znews | <https://lifestyle.znews.vn/suc-khoe.html> |
//! | vietnamnet | <https://vietnamnet.vn/suc-khoe> |
//! | doisongphapluat | <https://doisongphapluat.com.vn/y-te-167.html> |

use crate::models::SourceConfig;

pub const NEWS_SOURCES: &[SourceConfig] = &[
    SourceConfig {
        id: "vnexpress",
        page_url: "https://vnexpress.net/suc-khoe",
        article_selector: "article.item-news",
        title_selector: "h3.title-news a",
    },
    SourceConfig {
        id: "dantri",
        page_url: "https://dantri.com.vn/suc-khoe.htm",
        article_selector: "article.article-item",
        title_selector: "h3.article-title a",
    },
    SourceConfig {
        id: "thanhnien",
        page_url: "https://thanhnien.vn/suc-khoe.htm",
        article_selector: "div.relative",
        title_selector: "h3.title a",
    },
    SourceConfig {
        id: "nld",
        page_url: "https://nld.com.vn/suc-khoe.htm",
        article_selector: "div.item-news",
        title_selector: "h3.title-news a",
    },
    SourceConfig {
        id: "suckhoedoisong",
        page_url: "https://suckhoedoisong.vn",
        article_selector: "article.item-news",
        title_selector: "h3.title-news a",
    },
    SourceConfig {
        id: "tuoitre",
        page_url: "https://tuoitre.vn/suc-khoe.htm",
        article_selector: "div.news-item",
        title_selector: "h3.title a",
    },
    SourceConfig {
        id: "znews",
        page_url: "https://lifestyle.znews.vn/suc-khoe.html",
        article_selector: "article.article-item",
        title_selector: "h3.article-title a",
    },
    SourceConfig {
        id: "vietnamnet",
        page_url: "https://vietnamnet.vn/suc-khoe",
        article_selector: "div.item-news",
        title_selector: "h3.title a",
    },
    SourceConfig {
        id: "doisongphapluat",
        page_url: "https://doisongphapluat.com.vn/y-te-167.html",
        article_selector: "div.news-item",
        title_selector: "h3.title a",
    },
];
