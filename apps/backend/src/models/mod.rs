//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from flashforge-core
pub use flashforge_core::types::{DefinitionEntry, FlashcardRecord};

// === Lookup Session Types ===

/// Where a lookup session currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupStatus {
    Searching,
    AwaitingChoice {
        choices: Vec<String>,
    },
    Completed {
        searched_word: String,
        definitions: Vec<DefinitionEntry>,
        /// Numbered option list, one definition per line.
        formatted: String,
        rounds: usize,
    },
    Failed {
        /// `cancelled`, `no_definitions` or `internal`
        error: String,
        message: String,
    },
}

// === API Request/Response Types ===

// Card types
#[derive(Debug, Serialize, Deserialize)]
pub struct PolishCardRequest {
    pub question: String,
    /// Raw model output; cleaned before it becomes the answer.
    pub answer: String,
    pub note_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardResponse {
    /// The line appended to the note.
    pub card: String,
    pub record: FlashcardRecord,
    pub note_id: Option<String>,
}

// Definition types
#[derive(Debug, Serialize, Deserialize)]
pub struct RankDefinitionsRequest {
    pub candidates: Vec<DefinitionEntry>,
    pub reference: String,
    pub k: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RankDefinitionsResponse {
    pub definitions: Vec<DefinitionEntry>,
    pub formatted: String,
}

// Lookup types
#[derive(Debug, Serialize, Deserialize)]
pub struct StartLookupRequest {
    pub word: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartLookupResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LookupSessionResponse {
    pub session_id: Uuid,
    pub word: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub status: LookupStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChoiceRequest {
    pub label: String,
}

/// Char offsets of the looked-up word inside the paragraph.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SelectionRange {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VocabCardRequest {
    /// Context sentence. Either already carries the `(((` `)))` markers or
    /// gets them from `selection`.
    pub paragraph: String,
    pub selection: Option<SelectionRange>,
    /// Reference meaning used to rank the definitions. Defaults to the
    /// formatted definitions themselves.
    pub answer: Option<String>,
    pub note_id: Option<String>,
}

// Note types
#[derive(Debug, Serialize, Deserialize)]
pub struct NoteResponse {
    pub note_id: String,
    pub records: Vec<String>,
}
