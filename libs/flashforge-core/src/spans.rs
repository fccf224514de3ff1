//! Reduce diff output to the phrases worth highlighting.

use serde::{Deserialize, Serialize};

use crate::types::{DiffKind, DiffSegment};

/// Added and removed phrases in order of first appearance.
///
/// Duplicates are kept; each one is matched independently downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignificantSpans {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

/// True when `text` carries at least one alphanumeric character.
pub fn is_significant(text: &str) -> bool {
    text.chars().any(char::is_alphanumeric)
}

/// Keep changed segments that contain alphanumeric content.
pub fn significant_spans(segments: &[DiffSegment]) -> SignificantSpans {
    let mut spans = SignificantSpans::default();
    for segment in segments {
        if !is_significant(&segment.text) {
            continue;
        }
        match segment.kind {
            DiffKind::Added => spans.added.push(segment.text.clone()),
            DiffKind::Removed => spans.removed.push(segment.text.clone()),
            DiffKind::Unchanged => {}
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::word_diff;
    use pretty_assertions::assert_eq;

    #[test]
    fn drops_punctuation_only_changes() {
        let segments = vec![
            DiffSegment::new(DiffKind::Removed, ","),
            DiffSegment::new(DiffKind::Added, "cat"),
        ];
        let spans = significant_spans(&segments);
        assert_eq!(spans.added, vec!["cat".to_string()]);
        assert!(spans.removed.is_empty());
    }

    #[test]
    fn ignores_unchanged_text() {
        let segments = vec![
            DiffSegment::new(DiffKind::Unchanged, "the "),
            DiffSegment::new(DiffKind::Added, " "),
        ];
        assert_eq!(significant_spans(&segments), SignificantSpans::default());
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let segments = vec![
            DiffSegment::new(DiffKind::Added, "very"),
            DiffSegment::new(DiffKind::Unchanged, " big and "),
            DiffSegment::new(DiffKind::Removed, "old"),
            DiffSegment::new(DiffKind::Added, "very"),
        ];
        let spans = significant_spans(&segments);
        assert_eq!(spans.added, vec!["very", "very"]);
        assert_eq!(spans.removed, vec!["old"]);
    }

    #[test]
    fn school_sentence_yields_go_and_went() {
        let spans = significant_spans(&word_diff("I go to school", "I went to school"));
        assert_eq!(spans.removed, vec!["go"]);
        assert_eq!(spans.added, vec!["went"]);
    }
}
