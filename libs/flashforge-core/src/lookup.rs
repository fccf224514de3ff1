//! Dictionary lookup with user-guided retries.
//!
//! A round looks the current key up. When it yields no definitions the user
//! is offered `QUIT`, `KEEP_GOING` and the alternative keys the dictionary
//! suggested, minus the current key. Picking an alternative starts another
//! round with a different key; the two sentinels always end the loop.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{FlowError, Result};
use crate::rendezvous::{Choice, ChoiceRendezvous};
use crate::types::DefinitionEntry;

/// What the dictionary knows about one key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupPage {
    pub definitions: Vec<DefinitionEntry>,
    /// Related terms when the page exists, "did you mean" entries otherwise.
    pub alternative_keys: Vec<String>,
    pub page_exists: bool,
}

impl LookupPage {
    pub fn not_found(suggestions: Vec<String>) -> Self {
        Self {
            definitions: Vec::new(),
            alternative_keys: suggestions,
            page_exists: false,
        }
    }

    pub fn is_usable(&self) -> bool {
        self.page_exists && !self.definitions.is_empty()
    }
}

#[async_trait]
pub trait DictionaryLookup: Send + Sync {
    async fn lookup(&self, key: &str) -> Result<LookupPage>;
}

/// The definitions the flow settled on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupOutcome {
    pub requested_key: String,
    /// Key whose page supplied the definitions.
    pub searched_key: String,
    /// Definitions from the final round only.
    pub definitions: Vec<DefinitionEntry>,
    pub rounds: usize,
}

/// Lowercase with single spaces. Keys equal in this form name the same page.
pub fn normalize_key(key: &str) -> String {
    key.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Choice list for a round that produced nothing usable.
pub fn offered_choices(key: &str, page: &LookupPage) -> Vec<Choice> {
    let mut choices = vec![
        Choice::Quit,
        Choice::KeepGoing {
            key: key.to_string(),
        },
    ];
    let mut seen = HashSet::from([normalize_key(key)]);
    for alternative in &page.alternative_keys {
        let alternative = alternative.trim();
        if alternative.is_empty() || !seen.insert(normalize_key(alternative)) {
            continue;
        }
        choices.push(Choice::Key(alternative.to_string()));
    }
    choices
}

pub struct LookupRetryFlow {
    dictionary: Arc<dyn DictionaryLookup>,
    rendezvous: ChoiceRendezvous,
}

impl LookupRetryFlow {
    pub fn new(dictionary: Arc<dyn DictionaryLookup>, rendezvous: ChoiceRendezvous) -> Self {
        Self {
            dictionary,
            rendezvous,
        }
    }

    pub async fn run(&self, key: &str) -> Result<LookupOutcome> {
        let requested_key = key.to_string();
        let mut key = requested_key.clone();
        let mut rounds = 0;

        loop {
            rounds += 1;
            let page = self.dictionary.lookup(&key).await?;
            tracing::info!(
                key = %key,
                round = rounds,
                page_exists = page.page_exists,
                definitions = page.definitions.len(),
                "dictionary lookup"
            );

            if page.is_usable() {
                return Ok(LookupOutcome {
                    requested_key,
                    searched_key: key,
                    definitions: page.definitions,
                    rounds,
                });
            }

            let choices = offered_choices(&key, &page);
            match self.rendezvous.present(choices).wait().await? {
                Choice::Quit => {
                    tracing::info!(key = %key, "lookup cancelled by user");
                    return Err(FlowError::UserCancelled);
                }
                Choice::KeepGoing { .. } => {
                    return Err(FlowError::NoDefinitionsFound { key });
                }
                Choice::Key(next) => {
                    debug_assert_ne!(normalize_key(&next), normalize_key(&key));
                    key = next;
                }
            }
        }
    }
}
