//! Flashcard records and the two card layouts built on top of them.
//!
//! # Format
//! ```text
//! %%<br>STARTI [Basic(MD)] <question> Back: <answer> %%%% ENDI %%
//! ```
//! The markers are comments in the note, so the card stays hidden while
//! reading and is picked up by the card importer.

use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::diff::word_diff;
use crate::highlight::inject;
use crate::hint::build_hint_with;
use crate::refine::strip_parens;
use crate::spans::significant_spans;
use crate::types::{FlashcardRecord, HighlightPalette};

pub const CARD_OPEN: &str = "%%<br>STARTI [Basic(MD)]";
pub const CARD_CLOSE: &str = "%%%% ENDI %%";
pub const POLISH_UP_BANNER: &str = "[Polish up this in English]";
pub const VOCAB_BANNER: &str = "<font color=\"green\">**[Predict the definition of highlighted text]**</font>";

const OPTION_COLOR: &str = "#c0c0c0";

lazy_static! {
    static ref SELECTION_RE: Regex = Regex::new(r"\(\(\((.*?)\)\)\)").expect("selection regex");
    static ref OPTIONS_BANNER_RE: Regex =
        Regex::new(r"(\[Random.*?options\])").expect("options banner regex");
    static ref OPTION_LINE_RE: Regex =
        Regex::new(r"<br>(\d+\.\s+\[.*?\])").expect("option line regex");
}

impl FlashcardRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            hint,
        }
    }

    /// The record without its trailing newline.
    pub fn render_body(&self) -> String {
        let question = match &self.hint {
            Some(hint) => format!("{} {}", self.question, hint),
            None => self.question.clone(),
        };
        format!("{CARD_OPEN} {question} Back: {} {CARD_CLOSE}", self.answer)
    }

    pub fn render(&self) -> String {
        format!("{}\n", self.render_body())
    }
}

/// A card that asks to rephrase a sentence the way the answer does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolishUpCard {
    /// Highlighted question shown as the note bullet.
    pub head: String,
    pub record: FlashcardRecord,
}

impl PolishUpCard {
    /// The line appended to the note.
    pub fn to_note_text(&self) -> String {
        format!("- {}{}", self.head, self.record.render())
    }
}

pub fn polish_up_card(question: &str, answer: &str, palette: &HighlightPalette) -> PolishUpCard {
    polish_up_card_with(&mut rand::thread_rng(), question, answer, palette)
}

/// Diff `question` against `answer` and highlight both sides.
pub fn polish_up_card_with<R: Rng + ?Sized>(
    rng: &mut R,
    question: &str,
    answer: &str,
    palette: &HighlightPalette,
) -> PolishUpCard {
    let question = strip_parens(question);
    let answer = strip_parens(answer);

    let spans = significant_spans(&word_diff(&question, &answer));
    let question = inject(&question, &spans.removed, &palette.removed);
    let answer = inject(&answer, &spans.added, &palette.added);
    let hint = build_hint_with(rng, &spans.added, &palette.added);

    PolishUpCard {
        record: FlashcardRecord::new(format!("{POLISH_UP_BANNER} {question}"), answer, hint),
        head: question,
    }
}

/// A card that asks for the meaning of a word inside its sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabCard {
    pub selected: String,
    pub searched: String,
    /// "(Searched by ...)" when the looked-up key differs from the selection.
    pub search_note: String,
    pub record: FlashcardRecord,
}

impl VocabCard {
    pub fn to_note_text(&self) -> String {
        format!(
            "- {}{}^[{}]\n",
            self.selected,
            self.search_note,
            self.record.render_body()
        )
    }
}

fn searched_note(selected: &str, searched: &str, palette: &HighlightPalette) -> String {
    if selected == searched {
        String::new()
    } else {
        format!("(Searched by {})", palette.removed.emphasize(searched))
    }
}

/// Build a vocab card from a question carrying `(((word)))` markers.
pub fn vocab_card(
    selected: &str,
    searched: &str,
    question: &str,
    answer: &str,
    palette: &HighlightPalette,
) -> VocabCard {
    let note = searched_note(selected, searched, palette);
    let question = SELECTION_RE.replace_all(question, |caps: &regex::Captures<'_>| {
        format!("{}{}", palette.added.emphasize(&format!("**{}**", &caps[1])), &note)
    });
    let question = format!("{VOCAB_BANNER}\n{question}").replace('\n', "<br>");
    let question = OPTIONS_BANNER_RE.replace_all(&question, "<font color=\"green\">**$1**</font>");
    let grey = format!("<br><font color={OPTION_COLOR}>$1</font>");
    let question = OPTION_LINE_RE.replace_all(&question, grey.as_str());
    let answer = answer.replace('\n', "<br>");

    VocabCard {
        selected: selected.to_string(),
        searched: searched.to_string(),
        search_note: note,
        record: FlashcardRecord::new(question.into_owned(), answer, None),
    }
}

/// The question body of a vocab card: context sentence plus the options.
pub fn vocab_question(paragraph: &str, options: &str, total: usize) -> String {
    if total > 1 {
        format!(
            "{paragraph}\n\n[Randomly selected options(including the correct option) from original {total} options]\n{options}"
        )
    } else {
        format!("{paragraph}\n\nOptions: \n{options}")
    }
}
