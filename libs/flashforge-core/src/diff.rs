//! Word-level diff between two strings.
//!
//! Inputs are split into alternating runs of word characters and runs of
//! everything else, so spacing and punctuation survive verbatim on both sides.
//! The token sequences are then aligned with a Myers minimal diff.

use similar::{capture_diff_slices, Algorithm, DiffTag};

use crate::types::{DiffKind, DiffSegment};

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split `text` into maximal word and non-word runs.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (idx, c) in text.char_indices() {
        let word = is_word_char(c);
        match current {
            Some(prev) if prev != word => {
                tokens.push(&text[start..idx]);
                start = idx;
            }
            _ => {}
        }
        current = Some(word);
    }

    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Compute the ordered segments that turn `before` into `after`.
pub fn word_diff(before: &str, after: &str) -> Vec<DiffSegment> {
    let old = tokenize(before);
    let new = tokenize(after);

    let mut segments: Vec<DiffSegment> = Vec::new();
    for op in capture_diff_slices(Algorithm::Myers, &old, &new) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => push(&mut segments, DiffKind::Unchanged, &old[old_range]),
            DiffTag::Delete => push(&mut segments, DiffKind::Removed, &old[old_range]),
            DiffTag::Insert => push(&mut segments, DiffKind::Added, &new[new_range]),
            DiffTag::Replace => {
                push(&mut segments, DiffKind::Removed, &old[old_range]);
                push(&mut segments, DiffKind::Added, &new[new_range]);
            }
        }
    }
    segments
}

fn push(segments: &mut Vec<DiffSegment>, kind: DiffKind, tokens: &[&str]) {
    if tokens.is_empty() {
        return;
    }
    let text = tokens.concat();
    match segments.last_mut() {
        Some(last) if last.kind == kind => last.text.push_str(&text),
        _ => segments.push(DiffSegment::new(kind, text)),
    }
}

/// Rebuild the "before" side from a segment list.
pub fn reconstruct_before(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != DiffKind::Added)
        .map(|s| s.text.as_str())
        .collect()
}

/// Rebuild the "after" side from a segment list.
pub fn reconstruct_after(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != DiffKind::Removed)
        .map(|s| s.text.as_str())
        .collect()
}
