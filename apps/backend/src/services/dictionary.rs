//! In-memory dictionary, optionally seeded from a JSON file.
//!
//! Seed format:
//! ```json
//! {
//!   "give up": {
//!     "definitions": [{ "index": 1, "gram": "phrasal verb", "text": "to stop trying" }],
//!     "related": ["give in"]
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use flashforge_core::lookup::normalize_key;
use flashforge_core::{DefinitionEntry, DictionaryLookup, LookupPage};
use serde::Deserialize;
use similar::TextDiff;
use thiserror::Error;

/// Minimum character similarity for a key to be suggested.
const SUGGESTION_RATIO: f32 = 0.6;
const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary seed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid dictionary seed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct SeedEntry {
    #[serde(default)]
    definitions: Vec<DefinitionEntry>,
    #[serde(default)]
    related: Vec<String>,
}

#[derive(Debug, Default)]
pub struct StaticDictionary {
    pages: HashMap<String, LookupPage>,
}

impl StaticDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, DictionaryError> {
        let seed: HashMap<String, SeedEntry> = serde_json::from_str(json)?;
        let mut dictionary = Self::new();
        for (key, entry) in seed {
            dictionary.insert(&key, entry.definitions, entry.related);
        }
        Ok(dictionary)
    }

    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let json = std::fs::read_to_string(path)?;
        let dictionary = Self::from_json(&json)?;
        tracing::info!(
            "Loaded {} dictionary entries from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    /// Add or replace the page for `key`.
    pub fn insert(&mut self, key: &str, definitions: Vec<DefinitionEntry>, related: Vec<String>) {
        self.pages.insert(
            normalize_key(key),
            LookupPage {
                definitions,
                alternative_keys: related,
                page_exists: true,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Known keys spelled close to `key`, best match first.
    fn suggestions(&self, key: &str) -> Vec<String> {
        let mut scored: Vec<(f32, &String)> = self
            .pages
            .keys()
            .map(|known| (TextDiff::from_chars(key, known.as_str()).ratio(), known))
            .filter(|(ratio, _)| *ratio >= SUGGESTION_RATIO)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, known)| known.clone())
            .collect()
    }
}

#[async_trait]
impl DictionaryLookup for StaticDictionary {
    async fn lookup(&self, key: &str) -> flashforge_core::Result<LookupPage> {
        let key = normalize_key(key);
        Ok(match self.pages.get(&key) {
            Some(page) => page.clone(),
            None => LookupPage::not_found(self.suggestions(&key)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"{
        "Give Up": {
            "definitions": [{ "index": 1, "gram": "phrasal verb", "text": "to stop trying" }],
            "related": ["give in"]
        },
        "give in": { "definitions": [] },
        "go through": {
            "definitions": [
                { "index": 1, "gram": "phrasal verb", "text": "to experience" },
                { "index": 2, "gram": "phrasal verb", "text": "to examine" }
            ]
        }
    }"#;

    fn dictionary() -> StaticDictionary {
        StaticDictionary::from_json(SEED).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_is_case_and_space_insensitive() {
        let page = dictionary().lookup("  give   UP ").await.unwrap();
        assert!(page.is_usable());
        assert_eq!(page.definitions[0].text, "to stop trying");
        assert_eq!(page.alternative_keys, vec!["give in"]);
    }

    #[tokio::test]
    async fn test_existing_page_without_definitions() {
        let page = dictionary().lookup("give in").await.unwrap();
        assert!(page.page_exists);
        assert!(!page.is_usable());
    }

    #[tokio::test]
    async fn test_missing_key_suggests_close_spellings() {
        let page = dictionary().lookup("gi through").await.unwrap();
        assert!(!page.page_exists);
        assert_eq!(page.alternative_keys.first().map(String::as_str), Some("go through"));
    }

    #[tokio::test]
    async fn test_unrelated_key_has_no_suggestions() {
        let page = dictionary().lookup("xylophone").await.unwrap();
        assert!(page.alternative_keys.is_empty());
    }

    #[test]
    fn test_invalid_seed() {
        let err = StaticDictionary::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, DictionaryError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.json");
        std::fs::write(&path, SEED).unwrap();

        let dictionary = StaticDictionary::load(&path).unwrap();
        assert_eq!(dictionary.len(), 3);
    }
}
