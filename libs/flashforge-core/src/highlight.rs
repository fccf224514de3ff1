//! Color highlighting of phrases inside card text.
//!
//! Every occurrence of a phrase is wrapped in the color's emphasis markup when
//! it sits in one of four contexts, checked in this order:
//!
//! 1. at the very start of the text,
//! 2. as a whole inline-code span (`` `phrase` ``),
//! 3. in running text between non-word characters,
//! 4. at the very end of the text.
//!
//! Text already inside emphasis markup is never touched again, and the markup
//! tags themselves are transparent when looking at the characters around a
//! match. Running the injector twice therefore gives the same result as
//! running it once.

use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

use crate::spans::is_significant;
use crate::types::{ColorSpec, CLOSE_TAG};

/// Inline-code delimiter.
pub const CODE_DELIMITER: char = '`';

lazy_static! {
    static ref EMPHASIS_TAG_RE: Regex =
        Regex::new(r"<font\b[^>]*>|</font>").expect("emphasis tag regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Start,
    CodeSpan,
    Running,
    End,
}

/// Emphasis tags and the wrapped ranges they delimit.
struct Markup {
    tags: Vec<Range<usize>>,
    spans: Vec<Range<usize>>,
}

impl Markup {
    fn scan(text: &str) -> Self {
        let mut tags = Vec::new();
        let mut spans = Vec::new();
        let mut open: Vec<usize> = Vec::new();

        for m in EMPHASIS_TAG_RE.find_iter(text) {
            if m.as_str() == CLOSE_TAG {
                if let Some(start) = open.pop() {
                    // Nested spans are covered by their outermost parent.
                    if open.is_empty() {
                        spans.push(start..m.end());
                    }
                }
            } else {
                open.push(m.start());
            }
            tags.push(m.range());
        }

        Self { tags, spans }
    }

    fn is_wrapped(&self, range: &Range<usize>) -> bool {
        self.spans
            .iter()
            .chain(self.tags.iter())
            .any(|r| r.start < range.end && range.start < r.end)
    }

    fn prev_visible(&self, text: &str, mut pos: usize) -> Option<char> {
        while let Some(tag) = self.tags.iter().find(|t| t.end == pos) {
            pos = tag.start;
        }
        text[..pos].chars().next_back()
    }

    fn next_visible(&self, text: &str, mut pos: usize) -> Option<char> {
        while let Some(tag) = self.tags.iter().find(|t| t.start == pos) {
            pos = tag.end;
        }
        text[pos..].chars().next()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_boundary(c: char) -> bool {
    !is_word_char(c) && c != CODE_DELIMITER
}

fn classify(prev: Option<char>, next: Option<char>) -> Option<Context> {
    match (prev, next) {
        (None, _) => Some(Context::Start),
        (Some(CODE_DELIMITER), Some(CODE_DELIMITER)) => Some(Context::CodeSpan),
        (Some(p), Some(n)) if is_boundary(p) && is_boundary(n) => Some(Context::Running),
        (_, None) => Some(Context::End),
        _ => None,
    }
}

/// Normalize a phrase into the literal that gets matched, if any.
fn literal_for(phrase: &str) -> Option<String> {
    let literal = phrase.trim().trim_matches(CODE_DELIMITER).trim();
    // An inner delimiter would put the tags across a code span boundary.
    if literal.contains(CODE_DELIMITER) || !is_significant(literal) {
        return None;
    }
    Some(literal.to_string())
}

/// Wrap every qualifying occurrence of each phrase in `color`'s markup.
pub fn inject<S: AsRef<str>>(text: &str, phrases: &[S], color: &ColorSpec) -> String {
    let mut literals: Vec<String> = phrases
        .iter()
        .filter_map(|p| literal_for(p.as_ref()))
        .collect();
    // Longest first so a short phrase never lands inside a longer one's span.
    literals.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

    let mut out = text.to_string();
    for literal in &literals {
        let pattern = match Regex::new(&regex::escape(literal)) {
            Ok(pattern) => pattern,
            Err(err) => {
                tracing::warn!(phrase = %literal, error = %err, "skipping unmatchable phrase");
                continue;
            }
        };
        out = wrap_phrase(&out, &pattern, color);
    }
    out
}

fn wrap_phrase(text: &str, pattern: &Regex, color: &ColorSpec) -> String {
    let markup = Markup::scan(text);
    let mut accepted: Vec<Range<usize>> = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let Some(m) = pattern.find_at(text, pos) else {
            break;
        };
        let range = m.range();
        if range.is_empty() {
            break;
        }

        let context = if markup.is_wrapped(&range) {
            None
        } else {
            classify(
                markup.prev_visible(text, range.start),
                markup.next_visible(text, range.end),
            )
        };

        match context {
            Some(_) => {
                pos = range.end;
                accepted.push(range);
            }
            None => {
                let step = text[range.start..].chars().next().map_or(1, char::len_utf8);
                pos = range.start + step;
            }
        }
    }

    if accepted.is_empty() {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len() + accepted.len() * 24);
    let mut last = 0;
    for range in accepted {
        result.push_str(&text[last..range.start]);
        result.push_str(&color.emphasize(&text[range.clone()]));
        last = range.end;
    }
    result.push_str(&text[last..]);
    result
}
