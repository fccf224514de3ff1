//! Clean-up of editor input and chat-completion output before card building.

use lazy_static::lazy_static;
use regex::Regex;

/// Placeholder the model streams in place of backticks.
pub const CODE_PLACEHOLDER: &str = "<|code|>";

/// Markers that wrap the selected word inside its context line.
pub const SELECTION_OPEN: &str = "(((";
pub const SELECTION_CLOSE: &str = ")))";

lazy_static! {
    static ref ALTERNATIVE_RE: Regex =
        Regex::new(r"(?i)(?:\(\()?alternatives?(?:\)\))?[^:\n]*?: (.*)").expect("alternative regex");
    static ref ASIDE_RE: Regex = Regex::new(r"\(\(.*?\)\)").expect("aside regex");
    static ref DASH_JOINER_RE: Regex = Regex::new(r"\s-\s").expect("dash regex");
    static ref LEADING_PARENS_RE: Regex = Regex::new(r"^\({2,3}").expect("leading parens regex");
    static ref TRAILING_PARENS_RE: Regex = Regex::new(r"\){2,3}$").expect("trailing parens regex");
    static ref SENTENCE_BREAK_RE: Regex = Regex::new(r"\. \w").expect("sentence break regex");
    static ref ALIASED_LINK_RE: Regex =
        Regex::new(r"\[\[([^\[\]]*?)\|([^\[\]]*?)\]\]").expect("aliased link regex");
    static ref WIKI_LINK_RE: Regex = Regex::new(r"\[\[(.*?)\]\]").expect("wiki link regex");
    static ref MD_LINK_RE: Regex =
        Regex::new(r"\[([^\[\]]+?)\]\(([^()]+?)\)").expect("markdown link regex");
}

pub fn restore_code_ticks(text: &str) -> String {
    text.replace(CODE_PLACEHOLDER, "`")
}

/// Reduce raw model output to the single rephrased sentence a card needs.
pub fn refine_model_output(raw: &str) -> String {
    let mut text = match ALTERNATIVE_RE.captures(raw).and_then(|c| c.get(1)) {
        Some(rest) => rest.as_str().to_string(),
        None => raw.to_string(),
    };

    // Asides are dropped unless they are all there is.
    let whole_aside = ASIDE_RE
        .find(&text)
        .map_or(false, |m| m.as_str() == text);
    if !whole_aside {
        text = ASIDE_RE.replace_all(&text, "").into_owned();
    }

    text = DASH_JOINER_RE.replace_all(&text, "").into_owned();
    text = text.replacen('\n', " ", 1);

    text = LEADING_PARENS_RE.replace(&text, "").into_owned();
    text = TRAILING_PARENS_RE.replace(&text, "").into_owned();

    for quote in ['"', '\''] {
        if let Some(rest) = text.strip_prefix(quote) {
            text = rest.to_string();
        }
        if let Some(rest) = text.strip_suffix(quote) {
            text = rest.to_string();
        }
    }

    text = restore_code_ticks(&text);

    // A single sentence is used as a bullet, so it loses its full stop.
    if !SENTENCE_BREAK_RE.is_match(&text) {
        if let Some(rest) = text.strip_suffix('.') {
            text = rest.to_string();
        }
    }

    text.trim().to_string()
}

/// Replace note links with their visible text.
pub fn strip_links(text: &str) -> String {
    let text = ALIASED_LINK_RE.replace_all(text, "$2");
    let text = WIKI_LINK_RE.replace_all(&text, "$1");
    MD_LINK_RE.replace_all(&text, "$1").into_owned()
}

/// Literal parentheses would be misread by the card renderer.
pub fn strip_parens(text: &str) -> String {
    text.chars().filter(|c| *c != '(' && *c != ')').collect()
}

/// Wrap the selection `from..to` (char offsets) of `line` in selection markers.
pub fn mark_selection(line: &str, from: usize, to: usize, word: &str) -> String {
    let byte_at = |ch: usize| {
        line.char_indices()
            .nth(ch)
            .map_or(line.len(), |(idx, _)| idx)
    };
    let start = byte_at(from);
    let end = byte_at(to.max(from));
    format!(
        "{}{SELECTION_OPEN}{word}{SELECTION_CLOSE}{}",
        &line[..start],
        &line[end..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn restores_code_ticks_from_placeholder() {
        assert_eq!(restore_code_ticks("use <|code|>map<|code|> here"), "use `map` here");
    }

    #[test]
    fn keeps_text_after_alternative_label() {
        let raw = "((Alternative)): How can I replace all matching tokens without using <|code|>replaceAll<|code|> function?";
        assert_eq!(
            refine_model_output(raw),
            "How can I replace all matching tokens without using `replaceAll` function?"
        );
    }

    #[test]
    fn drops_asides_and_trailing_full_stop() {
        let raw = "\"I went to school ((past tense)).\"";
        assert_eq!(refine_model_output(raw), "I went to school");
    }

    #[test]
    fn keeps_full_stop_between_sentences() {
        let raw = "I went there. It was fun.";
        assert_eq!(refine_model_output(raw), "I went there. It was fun.");
    }

    #[test]
    fn whole_aside_is_unwrapped_not_removed() {
        assert_eq!(refine_model_output("((I went to school))"), "I went to school");
    }

    #[test]
    fn first_newline_becomes_space() {
        assert_eq!(refine_model_output("I went\nto school"), "I went to school");
    }

    #[test]
    fn strips_all_link_forms() {
        assert_eq!(
            strip_links("see [[Notes/Rust|Rust]] and [[Tokio]] or [docs](https://docs.rs)"),
            "see Rust and Tokio or docs"
        );
    }

    #[test]
    fn strips_parentheses() {
        assert_eq!(strip_parens("call f(x) now"), "call fx now");
    }

    #[test]
    fn marks_selected_word() {
        assert_eq!(
            mark_selection("She gave up on it.", 4, 11, "gave up"),
            "She (((gave up))) on it."
        );
    }

    #[test]
    fn marks_selection_with_multibyte_text() {
        assert_eq!(mark_selection("café au lait", 5, 7, "au"), "café (((au))) lait");
        assert_eq!(mark_selection("end", 10, 12, "x"), "end(((x)))");
    }
}
