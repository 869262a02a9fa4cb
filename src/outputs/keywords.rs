//! `/keywords` ranking formatting.

use crate::models::KeywordCount;
use crate::vocabulary::Vocabulary;
use std::fmt::Write;

const KEYWORDS_HEADER: &str = "🔥 Các từ khóa nổi bật về sức khỏe:";
const COMPOUND_MARKER: &str = "🏥";
const OTHER_MARKER: &str = "📊";

/// One line per phrase, marked by whether it is a compound keyword, followed
/// by a legend explaining the markers.
pub fn format_keywords(keywords: &[KeywordCount], vocabulary: &Vocabulary) -> String {
    let mut response = String::new();
    writeln!(response, "{KEYWORDS_HEADER}\n").unwrap();
    for kw in keywords {
        let marker = if vocabulary.is_compound(&kw.phrase) {
            COMPOUND_MARKER
        } else {
            OTHER_MARKER
        };
        writeln!(response, "{marker} {}: {} lần", kw.phrase, kw.count).unwrap();
    }

    response.push_str("\n💡 Chú thích:\n");
    writeln!(response, "{COMPOUND_MARKER} - Từ khóa y tế quan trọng").unwrap();
    write!(response, "{OTHER_MARKER} - Từ khóa phổ biến khác").unwrap();
    response
}
