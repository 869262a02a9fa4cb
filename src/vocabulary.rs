//! Keyword vocabulary used by headline analysis.
//!
//! The vocabulary is plain data: a YAML document with three lists
//! (`compound_keywords`, `health_keywords`, `stop_words`). A default copy is
//! embedded from `config/vocabulary.yaml`; a replacement file can be passed on
//! the command line.

use itertools::Itertools;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashSet;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

const EMBEDDED_VOCABULARY: &str = include_str!("../config/vocabulary.yaml");

/// Vocabulary parsed from the embedded YAML document.
pub static DEFAULT_VOCABULARY: Lazy<Vocabulary> = Lazy::new(|| {
    Vocabulary::from_yaml_str(EMBEDDED_VOCABULARY).expect("embedded vocabulary is valid YAML")
});

#[derive(Debug, Deserialize)]
struct RawVocabulary {
    compound_keywords: Vec<String>,
    health_keywords: Vec<String>,
    #[serde(default)]
    stop_words: Vec<String>,
}

/// Read-only keyword lists, loaded once at startup.
///
/// Compound keywords keep their file order (duplicates dropped) since the
/// compound pass walks them in that order. Entries are lowercased on load so
/// they compare against normalized headline text.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    compound_keywords: Vec<String>,
    compound_set: HashSet<String>,
    health_keywords: Vec<String>,
    health_set: HashSet<String>,
    stop_words: HashSet<String>,
}

impl Vocabulary {
    /// Parse a vocabulary from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid YAML or lacks
    /// `compound_keywords` or `health_keywords`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, Box<dyn Error>> {
        let raw: RawVocabulary = serde_yaml::from_str(yaml)?;
        Ok(Self::new(
            raw.compound_keywords,
            raw.health_keywords,
            raw.stop_words,
        ))
    }

    /// Load a vocabulary file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    #[instrument(level = "info", skip_all, fields(%path))]
    pub async fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let yaml = fs::read_to_string(path).await?;
        let vocabulary = Self::from_yaml_str(&yaml)?;
        info!(
            compound = vocabulary.compound_keywords().len(),
            health = vocabulary.health_keywords().len(),
            stop_words = vocabulary.stop_words.len(),
            "Loaded vocabulary"
        );
        Ok(vocabulary)
    }

    /// Build a vocabulary from in-memory lists.
    ///
    /// # Arguments
    ///
    /// * `compound` - Multi-word phrases counted once per headline, in priority order
    /// * `health` - Single words that qualify as unigram keywords
    /// * `stop_words` - Words excluded from unigrams and bigrams
    ///
    /// Entries are trimmed and lowercased. Blank entries and repeats are
    /// dropped.
    pub fn new<C, H, S>(compound: C, health: H, stop_words: S) -> Self
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        H: IntoIterator,
        H::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let compound_keywords: Vec<String> = normalize_entries(compound);
        let health_keywords: Vec<String> = normalize_entries(health);
        Self {
            compound_set: compound_keywords.iter().cloned().collect(),
            health_set: health_keywords.iter().cloned().collect(),
            compound_keywords,
            health_keywords,
            stop_words: normalize_entries(stop_words).into_iter().collect(),
        }
    }

    /// Compound phrases in file order.
    pub fn compound_keywords(&self) -> &[String] {
        &self.compound_keywords
    }

    /// Health words in file order.
    pub fn health_keywords(&self) -> &[String] {
        &self.health_keywords
    }

    /// Whether `phrase` is exactly one of the compound phrases.
    pub fn is_compound(&self, phrase: &str) -> bool {
        self.compound_set.contains(phrase)
    }

    /// Whether `word` is exactly one of the health words.
    pub fn is_health_word(&self, word: &str) -> bool {
        self.health_set.contains(word)
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Whether `text` contains any health keyword as a substring.
    pub fn mentions_health(&self, text: &str) -> bool {
        self.health_keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

fn normalize_entries<I>(entries: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    entries
        .into_iter()
        .map(|e| e.as_ref().trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .unique()
        .collect()
}
