//! `/news` digest formatting.
//!
//! ```text
//! 📰 TIN TỨC SỨC KHỎE MỚI NHẤT
//!
//! 🔹 VNEXPRESS:
//!   1. Headline
//!      👉 https://vnexpress.net/...
//!
//! ⏰ Cập nhật: 16/10/2026 08:30
//! ```

use crate::models::NewsItem;
use crate::scrapers::source::MAX_ITEMS_PER_SOURCE;
use chrono::{DateTime, Local};
use itertools::Itertools;
use std::fmt::Write;

const DIGEST_HEADER: &str = "📰 TIN TỨC SỨC KHỎE MỚI NHẤT";

/// Format cached items as a digest grouped by source in first-seen order.
///
/// At most [`MAX_ITEMS_PER_SOURCE`] headlines are listed per source. The URL
/// line is omitted for items without a link.
pub fn format_digest(items: &[NewsItem], updated_at: DateTime<Local>) -> String {
    let mut message = String::new();
    writeln!(message, "{DIGEST_HEADER}\n").unwrap();

    for source in items.iter().map(|item| item.source.as_str()).unique() {
        writeln!(message, "🔹 {}:", source.to_uppercase()).unwrap();
        let listed = items
            .iter()
            .filter(|item| item.source == source)
            .take(MAX_ITEMS_PER_SOURCE);
        for (idx, item) in listed.enumerate() {
            writeln!(message, "  {}. {}", idx + 1, item.title).unwrap();
            if !item.url.is_empty() {
                writeln!(message, "     👉 {}", item.url).unwrap();
            }
        }
        message.push('\n');
    }

    write!(message, "⏰ Cập nhật: {}", updated_at.format("%d/%m/%Y %H:%M")).unwrap();
    message
}
