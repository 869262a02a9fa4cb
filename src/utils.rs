//! Utility functions for text cleanup, URL resolution and message chunking.
//!
//! - Whitespace normalization for scraped headlines
//! - Site-relative link resolution against a source page URL
//! - String truncation for logging
//! - Splitting long replies to fit the chat transport's message limit

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every run of whitespace (newlines included) into one space and
/// trim both ends.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(collapse_whitespace("  Ung thư\n\t phổi  "), "Ung thư phổi");
/// ```
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s.trim(), " ").into_owned()
}

/// Scheme and host portion of a URL: its first three `/`-delimited segments.
///
/// `"https://vnexpress.net/suc-khoe"` becomes `"https://vnexpress.net"`.
pub fn site_root(page_url: &str) -> String {
    page_url.split('/').take(3).collect::<Vec<_>>().join("/")
}

/// Resolve a headline link target against the page it was found on.
///
/// Targets starting with `/` are prefixed with the page's [`site_root`];
/// anything else is kept as-is. A missing target yields an empty string.
pub fn resolve_link(page_url: &str, href: Option<&str>) -> String {
    match href {
        Some(href) if href.starts_with('/') => format!("{}{}", site_root(page_url), href),
        Some(href) => href.to_string(),
        None => String::new(),
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a count of
/// the omitted bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Split `text` into chunks of at most `limit` characters, breaking on line
/// boundaries where possible.
///
/// A single line longer than `limit` is hard-split on character boundaries
/// and loses its trailing newline, so no chunk is ever just `"\n"`. Empty
/// input yields no chunks.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();
        if current_len + line_len > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if line_len > limit {
            // the chunk boundary stands in for the newline
            let chars: Vec<char> = line.trim_end_matches('\n').chars().collect();
            for piece in chars.chunks(limit) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }
        current.push_str(line);
        current_len += line_len;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Ung thư\n\t phổi  "), "Ung thư phổi");
        assert_eq!(collapse_whitespace("Tiêm   chủng"), "Tiêm chủng");
        assert_eq!(collapse_whitespace(" \n "), "");
    }

    #[test]
    fn test_site_root() {
        assert_eq!(site_root("https://vnexpress.net/suc-khoe"), "https://vnexpress.net");
        assert_eq!(site_root("https://suckhoedoisong.vn"), "https://suckhoedoisong.vn");
        assert_eq!(
            site_root("https://lifestyle.znews.vn/suc-khoe.html"),
            "https://lifestyle.znews.vn"
        );
    }

    #[test]
    fn test_resolve_relative_link() {
        assert_eq!(
            resolve_link("https://vnexpress.net/suc-khoe", Some("/tin-tuc-123")),
            "https://vnexpress.net/tin-tuc-123"
        );
    }

    #[test]
    fn test_resolve_absolute_and_missing_link() {
        assert_eq!(
            resolve_link("https://vnexpress.net/suc-khoe", Some("https://cdn.example.com/a")),
            "https://cdn.example.com/a"
        );
        assert_eq!(resolve_link("https://vnexpress.net/suc-khoe", None), "");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let result = truncate_for_log("sức khỏe", 3);
        assert!(result.starts_with("sức"));
        assert!(result.contains("…(+"));
    }

    #[test]
    fn test_split_message_keeps_short_text_whole() {
        assert_eq!(split_message("a\nb\n", 10), vec!["a\nb\n".to_string()]);
        assert!(split_message("", 10).is_empty());
    }

    #[test]
    fn test_split_message_breaks_on_lines() {
        let chunks = split_message("aaaa\nbbbb\ncccc\n", 10);
        assert_eq!(chunks, vec!["aaaa\nbbbb\n".to_string(), "cccc\n".to_string()]);
        assert!(chunks.iter().all(|c| c.chars().count() <= 10));
    }

    #[test]
    fn test_split_message_hard_splits_long_line() {
        let chunks = split_message("ééééééé", 3);
        assert_eq!(chunks, vec!["ééé", "ééé", "é"]);
    }

    #[test]
    fn test_split_message_full_line_no_blank_chunk() {
        let text = "a".repeat(4096) + "\n";
        let chunks = split_message(&text, 4096);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chars().count(), 4096);

        let chunks = split_message(&("b".repeat(7) + "\nok\n"), 3);
        assert_eq!(chunks, vec!["bbb", "bbb", "b", "ok\n"]);
        assert!(chunks.iter().all(|c| !c.trim().is_empty()));
    }
}
