//! Core of the flashcard builder shared by the backend service.
//!
//! Provides:
//! - Word-level diff and significant-phrase extraction
//! - Markup-aware color highlighting and shuffled hint lines
//! - Similarity ranking of dictionary definitions
//! - Flashcard record formatting (polish-up and vocab layouts)
//! - A choice rendezvous and the dictionary lookup retry flow built on it

pub mod card;
pub mod diff;
pub mod error;
pub mod highlight;
pub mod hint;
pub mod lookup;
pub mod ranking;
pub mod refine;
pub mod rendezvous;
pub mod spans;
pub mod types;

pub use card::{polish_up_card, vocab_card, vocab_question, PolishUpCard, VocabCard};
pub use diff::word_diff;
pub use error::{FlowError, RendezvousError, Result};
pub use highlight::inject;
pub use hint::build_hint;
pub use lookup::{DictionaryLookup, LookupOutcome, LookupPage, LookupRetryFlow};
pub use ranking::{format_definitions, rank};
pub use rendezvous::{
    Choice, ChoiceRendezvous, ChoiceResponder, ChoiceWaiter, PendingChoice, SelectionSurface,
};
pub use spans::{significant_spans, SignificantSpans};
pub use types::{
    ColorSpec, DefinitionEntry, DiffKind, DiffSegment, FlashcardRecord, HighlightPalette,
};
