//! Note storage for generated card lines.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{ApiError, Result};

/// Destination of rendered card lines, one note per id.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Append `text` to the end of the note, creating it if needed.
    async fn append_record(&self, note_id: &str, text: &str) -> Result<()>;

    /// All records of a note in append order, `None` if it was never written.
    async fn records(&self, note_id: &str) -> Result<Option<Vec<String>>>;
}

#[derive(Default)]
pub struct InMemoryNoteStore {
    notes: RwLock<HashMap<String, Vec<String>>>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn append_record(&self, note_id: &str, text: &str) -> Result<()> {
        let note_id = note_id.trim();
        if note_id.is_empty() {
            return Err(ApiError::BadRequest("note_id must not be empty".to_string()));
        }

        let mut notes = self.notes.write().await;
        notes
            .entry(note_id.to_string())
            .or_default()
            .push(text.to_string());
        tracing::debug!(note_id, records = notes[note_id].len(), "appended record");
        Ok(())
    }

    async fn records(&self, note_id: &str) -> Result<Option<Vec<String>>> {
        Ok(self.notes.read().await.get(note_id.trim()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_keeps_order() {
        let store = InMemoryNoteStore::new();
        store.append_record("daily", "- first\n").await.unwrap();
        store.append_record("daily", "- second\n").await.unwrap();

        let records = store.records("daily").await.unwrap().unwrap();
        assert_eq!(records, vec!["- first\n", "- second\n"]);
    }

    #[tokio::test]
    async fn test_unknown_note() {
        let store = InMemoryNoteStore::new();
        assert_eq!(store.records("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_note_id_rejected() {
        let store = InMemoryNoteStore::new();
        let err = store.append_record("  ", "- x\n").await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
