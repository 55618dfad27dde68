//! Phonemiciser — word tokens to a flat phone/punctuation list.
//!
//! Words are looked up lower-cased in the pronunciation dictionary (first
//! variant only); punctuation from the closed set passes through so the
//! sequencer can turn it into silence.  The whole utterance is wrapped in
//! `PAU` boundary markers.
//!
//! A word missing from the dictionary is fatal for the utterance: the
//! recording inventory has nothing to say for it, so the run aborts and
//! reports the token.

use crate::error::{Error, Result};
use crate::lexicon::Lexicon;

/// Pause marker delimiting phrase boundaries in the phone sequence.
pub const PAU: &str = "PAU";

/// The closed punctuation set the pipeline understands.
pub const PUNCTUATION: &[&str] = &[
    "\\", "/", ",", ":", ";", "—", "(", ")", "[", "]", "{", "}", "\"", "?", "!", ".", "...",
];

/// Sentence-final marks; these map to the long silence.
pub const PUNCTUATION_LONG: &[&str] = &["?", "!", ".", "..."];

pub fn is_punctuation(token: &str) -> bool {
    PUNCTUATION.contains(&token)
}

pub fn is_sentence_final(token: &str) -> bool {
    PUNCTUATION_LONG.contains(&token)
}

/// Convert normalised tokens to a phone list with `PAU` at both ends.
///
/// The result mixes phone labels (stress digits still attached) with
/// punctuation literals; [`crate::sequence::diphone_sequence`] consumes it.
pub fn phonemize(tokens: &[String], lexicon: &dyn Lexicon) -> Result<Vec<String>> {
    let mut phones = vec![PAU.to_string()];

    for token in tokens {
        if is_punctuation(token) {
            phones.push(token.clone());
            continue;
        }
        match lexicon.lookup(&token.to_lowercase()) {
            Some(entry) => phones.extend(entry.iter().cloned()),
            None => return Err(Error::UnknownWord(token.clone())),
        }
    }

    phones.push(PAU.to_string());
    Ok(phones)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
