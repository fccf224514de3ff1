//! Core types shared by the diff, highlighting and lookup modules.

use serde::{Deserialize, Serialize};

/// Which side of a diff a segment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Text present in both strings.
    Unchanged,
    /// Text present only in the "after" string.
    Added,
    /// Text present only in the "before" string.
    Removed,
}

/// A maximal run of diff output with a single kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub kind: DiffKind,
    pub text: String,
}

impl DiffSegment {
    pub fn new(kind: DiffKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// True for Added and Removed segments.
    pub fn is_change(&self) -> bool {
        self.kind != DiffKind::Unchanged
    }
}

/// A color token paired with the emphasis markup of the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub color: String,
}

impl ColorSpec {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
        }
    }

    pub fn open_tag(&self) -> String {
        format!("<font color={}>", self.color)
    }

    /// Wrap `text` in this color's emphasis markup.
    pub fn emphasize(&self, text: &str) -> String {
        format!("{}{}{}", self.open_tag(), text, CLOSE_TAG)
    }
}

pub(crate) const CLOSE_TAG: &str = "</font>";

/// Colors used for the two sides of a polish-up card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightPalette {
    /// Phrases the answer introduced.
    pub added: ColorSpec,
    /// Phrases the answer dropped from the question.
    pub removed: ColorSpec,
}

impl Default for HighlightPalette {
    fn default() -> Self {
        Self {
            added: ColorSpec::new("#0096ff"),
            removed: ColorSpec::new("#cc0000"),
        }
    }
}

/// One dictionary definition collected for a lookup target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionEntry {
    /// 1-based position within its lookup round.
    pub index: usize,
    /// Grammatical group, e.g. "countable noun".
    pub gram: String,
    pub text: String,
}

impl DefinitionEntry {
    pub fn new(index: usize, gram: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            index,
            gram: gram.into(),
            text: text.into(),
        }
    }
}

/// A finished card, rendered once and handed to the note store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardRecord {
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}
