//! Keyword frequency extraction over headline text.
//!
//! Headlines are normalized (lowercased, `.,!?:` replaced by spaces) and
//! counted in two passes:
//!
//! 1. **Compound pass**: each compound keyword contained in a headline adds
//!    one to that keyword, at most once per headline.
//! 2. **Token pass**: headlines are split on whitespace and
//!    - every token that is a health keyword and not a stop word adds one,
//!    - every adjacent pair whose text contains a health keyword adds one,
//!      unless either word is a stop word,
//!    - every adjacent triple whose text contains a health keyword adds one,
//!      unless all three words are stop words.
//!
//! Phrases of a single character are dropped. The rest are ranked by count,
//! then by word count (longer phrases first), then by first appearance.

use crate::models::KeywordCount;
use crate::vocabulary::Vocabulary;
use itertools::Itertools;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Maximum number of phrases returned by [`extract_keywords`].
pub const TOP_KEYWORDS: usize = 10;

/// Lowercase `text` and replace sentence punctuation with spaces.
pub fn normalize_title(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            '.' | ',' | '!' | '?' | ':' => ' ',
            other => other,
        })
        .collect()
}

/// Occurrence counter that remembers first-seen order for stable ranking.
#[derive(Debug, Default)]
struct PhraseCounter {
    index: HashMap<String, usize>,
    counts: Vec<(String, usize)>,
}

impl PhraseCounter {
    fn add(&mut self, phrase: &str) {
        match self.index.get(phrase) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(phrase.to_string(), self.counts.len());
                self.counts.push((phrase.to_string(), 1));
            }
        }
    }

    fn len(&self) -> usize {
        self.counts.len()
    }

    fn into_ranked(self) -> Vec<KeywordCount> {
        self.counts
            .into_iter()
            .filter(|(phrase, _)| phrase.chars().count() > 1)
            .map(|(phrase, count)| KeywordCount { phrase, count })
            .enumerate()
            .sorted_by(|(ia, a), (ib, b)| {
                b.count
                    .cmp(&a.count)
                    .then_with(|| b.word_count().cmp(&a.word_count()))
                    .then_with(|| ia.cmp(ib))
            })
            .map(|(_, kw)| kw)
            .collect()
    }
}

/// Extract the top [`TOP_KEYWORDS`] phrases from a set of headlines.
///
/// Deterministic for a given input and vocabulary. Returns an empty list when
/// nothing in the headlines matches the vocabulary.
#[instrument(level = "info", skip_all, fields(titles = titles.len()))]
pub fn extract_keywords<S: AsRef<str>>(titles: &[S], vocabulary: &Vocabulary) -> Vec<KeywordCount> {
    let normalized: Vec<String> = titles.iter().map(|t| normalize_title(t.as_ref())).collect();
    let mut counter = PhraseCounter::default();

    for text in &normalized {
        for compound in vocabulary.compound_keywords() {
            if text.contains(compound.as_str()) {
                counter.add(compound);
            }
        }
    }

    for text in &normalized {
        let words: Vec<&str> = text.split_whitespace().collect();

        for word in &words {
            if vocabulary.is_health_word(word) && !vocabulary.is_stop_word(word) {
                counter.add(word);
            }
        }

        for pair in words.windows(2) {
            let bigram = pair.join(" ");
            if vocabulary.mentions_health(&bigram)
                && !pair.iter().any(|w| vocabulary.is_stop_word(w))
            {
                counter.add(&bigram);
            }
        }

        for triple in words.windows(3) {
            let trigram = triple.join(" ");
            if vocabulary.mentions_health(&trigram)
                && !triple.iter().all(|w| vocabulary.is_stop_word(w))
            {
                counter.add(&trigram);
            }
        }
    }

    let candidates = counter.len();
    let mut ranked = counter.into_ranked();
    ranked.truncate(TOP_KEYWORDS);

    info!(candidates, returned = ranked.len(), "Extracted keywords");
    debug!(keywords = ?ranked, "Top keywords");
    ranked
}
