//! Token-set similarity scoring for near-duplicate questions.
//!
//! Two questions that share the same words in a different order ("What
//! voltage does a Level 2 charger use?" vs "What voltage do Level 2 chargers
//! use?") should score high even though a plain edit distance would not.
//! The score is built the token-set way: split both strings into sorted
//! unique word tokens, then compare the shared-token core against each
//! side's core-plus-leftovers with an indel ratio, keeping the best of the
//! three comparisons.

use rapidfuzz::fuzz;
use std::collections::BTreeSet;

/// Order-independent similarity between two strings on a 0–100 scale.
///
/// Callers are expected to lowercase their inputs first when they want a
/// case-insensitive comparison.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() && tokens_b.is_empty() {
        return 100.0;
    }
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !intersection.is_empty() && only_a.is_empty() && only_b.is_empty() {
        return 100.0;
    }

    let core = intersection.join(" ");
    let combined_a = join_tokens(&core, &only_a.join(" "));
    let combined_b = join_tokens(&core, &only_b.join(" "));

    // fuzz::ratio is normalized to 0.0-1.0; every score here is 0-100.
    let core_vs_a = 100.0 * fuzz::ratio(core.chars(), combined_a.chars());
    let core_vs_b = 100.0 * fuzz::ratio(core.chars(), combined_b.chars());
    let a_vs_b = 100.0 * fuzz::ratio(combined_a.chars(), combined_b.chars());

    core_vs_a.max(core_vs_b).max(a_vs_b)
}

fn join_tokens(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{} {}", left, right),
    }
}
