//! Rank dictionary definitions by how closely they match a reference answer.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::diff::word_diff;
use crate::types::DefinitionEntry;

/// How many definitions a vocab card shows.
pub const DEFAULT_TOP_K: usize = 3;

/// Number of changed segments between `candidate` and `reference`.
pub fn diff_distance(candidate: &str, reference: &str) -> usize {
    word_diff(candidate, reference)
        .iter()
        .filter(|s| s.is_change())
        .count()
}

/// Select the `k` closest candidates, then shuffle them for presentation.
pub fn rank(candidates: &[DefinitionEntry], reference: &str, k: usize) -> Vec<DefinitionEntry> {
    rank_with(&mut rand::thread_rng(), candidates, reference, k)
}

/// [`rank`] with an explicit RNG for the presentation shuffle.
pub fn rank_with<R: Rng + ?Sized>(
    rng: &mut R,
    candidates: &[DefinitionEntry],
    reference: &str,
    k: usize,
) -> Vec<DefinitionEntry> {
    let mut selected = select_closest(candidates, reference, k);
    selected.shuffle(rng);
    selected
}

/// The deterministic half of ranking: closest first, ties by original order.
pub fn select_closest(
    candidates: &[DefinitionEntry],
    reference: &str,
    k: usize,
) -> Vec<DefinitionEntry> {
    let mut scored: Vec<(usize, usize, &DefinitionEntry)> = candidates
        .iter()
        .enumerate()
        .map(|(pos, entry)| (diff_distance(&entry.text, reference), pos, entry))
        .collect();
    scored.sort_by_key(|(distance, pos, _)| (*distance, *pos));

    scored
        .into_iter()
        .take(k)
        .map(|(_, _, entry)| entry.clone())
        .collect()
}

/// Render definitions as the numbered option list shown on cards.
pub fn format_definitions(entries: &[DefinitionEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{}. [{}] {}\n", e.index, e.gram, e.text.replace('\n', "")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn entries(texts: &[&str]) -> Vec<DefinitionEntry> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| DefinitionEntry::new(i + 1, "noun", *t))
            .collect()
    }

    #[test]
    fn identical_text_has_zero_distance() {
        assert_eq!(diff_distance("the cat sat", "the cat sat"), 0);
        assert!(diff_distance("a dog ran", "the cat sat") > 0);
    }

    #[test]
    fn closer_candidate_ranks_first() {
        let candidates = entries(&["a dog ran", "the cat sat"]);
        let selected = select_closest(&candidates, "the cat sat", 2);
        assert_eq!(selected[0].text, "the cat sat");
        assert_eq!(selected[1].text, "a dog ran");
    }

    #[test]
    fn ties_keep_original_order() {
        let candidates = entries(&["red fox", "blue fox", "green fox"]);
        let selected = select_closest(&candidates, "grey fox", 3);
        let indexes: Vec<usize> = selected.iter().map(|e| e.index).collect();
        assert_eq!(indexes, vec![1, 2, 3]);
    }

    #[test]
    fn rank_returns_top_k_in_any_order() {
        let candidates = entries(&[
            "something else entirely different here",
            "the highlights of an event",
            "the most interesting parts of it",
            "the highlights are the most interesting parts",
            "zzz",
        ]);
        let reference = "the highlights are the most interesting parts of it";
        let expected = select_closest(&candidates, reference, DEFAULT_TOP_K);

        let mut rng = SmallRng::seed_from_u64(11);
        let mut ranked = rank_with(&mut rng, &candidates, reference, DEFAULT_TOP_K);
        assert_eq!(ranked.len(), 3);

        ranked.sort_by_key(|e| e.index);
        let mut expected_sorted = expected;
        expected_sorted.sort_by_key(|e| e.index);
        assert_eq!(ranked, expected_sorted);
    }

    #[test]
    fn k_larger_than_candidates_returns_all() {
        let candidates = entries(&["one", "two"]);
        assert_eq!(rank(&candidates, "one", 10).len(), 2);
        assert!(rank(&[], "one", 3).is_empty());
    }

    #[test]
    fn format_numbered_options() {
        let defs = vec![
            DefinitionEntry::new(1, "countable noun", "The highlights of an event\nare its best parts."),
            DefinitionEntry::new(2, "verb", "To highlight is to emphasize."),
        ];
        assert_eq!(
            format_definitions(&defs),
            "1. [countable noun] The highlights of an eventare its best parts.\n\
             2. [verb] To highlight is to emphasize.\n"
        );
    }
}
