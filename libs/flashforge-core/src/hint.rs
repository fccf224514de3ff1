//! Shuffled multiple-choice hint line for polish-up cards.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::highlight::inject;
use crate::types::ColorSpec;

/// Separator between the shuffled phrases.
pub const HINT_SEPARATOR: &str = " / ";

/// Build the hint block using the thread-local RNG.
pub fn build_hint(added: &[String], color: &ColorSpec) -> Option<String> {
    build_hint_with(&mut rand::thread_rng(), added, color)
}

/// Build the hint block with an explicit RNG.
///
/// Returns `None` when there is nothing to hint at.
pub fn build_hint_with<R: Rng + ?Sized>(
    rng: &mut R,
    added: &[String],
    color: &ColorSpec,
) -> Option<String> {
    if added.is_empty() {
        return None;
    }

    let mut shuffled = added.to_vec();
    shuffled.shuffle(rng);
    let joined = shuffled.join(HINT_SEPARATOR);
    let highlighted = inject(&joined, added, color);

    Some(format!("<br>({highlighted})"))
}
