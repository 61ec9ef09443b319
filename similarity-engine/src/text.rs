//! Lexical similarity over word sets.

use std::collections::BTreeSet;

/// Normalizes and tokenizes free text: lowercase, punctuation stripped,
/// split on non-alphanumeric boundaries.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Jaccard similarity of the two word sets, in [0, 1].
///
/// Two empty texts score 0.0, not 1.0: absence of content is not evidence
/// of similarity.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let ta = tokenize(a);
    let tb = tokenize(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }
    let intersection = ta.intersection(&tb).count() as f64;
    let union = ta.union(&tb).count() as f64;
    intersection / union
}
