//! Test fixtures and factory functions for creating request bodies.

use serde_json::{json, Value};

/// Dictionary seed shared by the integration tests.
pub const DICTIONARY_SEED: &str = r#"{
    "give up": {
        "definitions": [
            { "index": 1, "gram": "phrasal verb", "text": "to stop trying to do something" },
            { "index": 2, "gram": "phrasal verb", "text": "to stop a habit" },
            { "index": 3, "gram": "phrasal verb", "text": "to surrender to the police" },
            { "index": 4, "gram": "phrasal verb", "text": "to let someone have something" }
        ],
        "related": ["give in"]
    },
    "go through": {
        "definitions": [
            { "index": 1, "gram": "phrasal verb", "text": "to experience something difficult" }
        ]
    },
    "gave": {
        "definitions": [],
        "related": ["give up", "gave"]
    }
}"#;

pub fn lookup_request(word: &str) -> Value {
    json!({ "word": word })
}

pub fn choice_request(label: &str) -> Value {
    json!({ "label": label })
}

pub fn polish_request(question: &str, answer: &str, note_id: Option<&str>) -> Value {
    json!({
        "question": question,
        "answer": answer,
        "note_id": note_id,
    })
}

pub fn vocab_card_request(paragraph: &str, answer: Option<&str>, note_id: Option<&str>) -> Value {
    json!({
        "paragraph": paragraph,
        "answer": answer,
        "note_id": note_id,
    })
}

pub fn definition(index: usize, text: &str) -> Value {
    json!({ "index": index, "gram": "noun", "text": text })
}
