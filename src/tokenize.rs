//! Word tokeniser — splits a raw phrase into word and punctuation tokens.
//!
//! The synthesis frontend wants dates such as `25/12/2023` kept whole (the
//! normaliser expands them) and sentence punctuation split off as its own
//! tokens, including the three-dot ellipsis as a single token.  Everything
//! else splits on word boundaries.

use once_cell::sync::Lazy;
use regex::Regex;

/// Token pattern, leftmost-first:
///   1. date-shaped runs (`25/12/2023`, `1-3`, `1.1.99`) kept as one token
///   2. words, with internal apostrophes (`don't`)
///   3. `...` as a single token
///   4. any other single non-space symbol
static RE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,2}[/.\-]\d{1,2}(?:[/.\-]\d{2,4})?|\w+(?:'\w+)*|\.\.\.|[^\w\s]").unwrap()
});

/// Split `phrase` into an ordered list of raw tokens.
pub fn tokenize(phrase: &str) -> Vec<String> {
    RE_TOKEN
        .find_iter(phrase)
        .map(|m| m.as_str().to_string())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
