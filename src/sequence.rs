//! Diphone sequencer — phone/punctuation list to concatenation units.
//!
//! Walks the phone list with one element of lookback and lookahead.  At a
//! punctuation boundary the neighbouring phones pair with `PAU` instead of
//! each other, and the punctuation itself becomes a silence marker (long for
//! sentence-final marks, short for the rest).  Stress digits are stripped
//! from phone labels when forming identifiers, matching the recording file
//! names.
//!
//! The `next` lookahead wraps from the last index back to index 0, so the
//! final `PAU` pairs with the initial one.  That circular boundary is
//! deliberate; changing it changes the audible utterance edges.

use std::fmt;

use crate::phonemize::{is_punctuation, is_sentence_final};

// ─────────────────────────────────────────────────────────────────────────────
// Unit types
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed-duration silence inserted for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Silence {
    /// 200 ms — commas, colons, brackets, and other clause punctuation.
    Short,
    /// 400 ms — sentence-final `? ! . ...`.
    Long,
}

impl Silence {
    pub fn duration_ms(self) -> u32 {
        match self {
            Silence::Short => 200,
            Silence::Long => 400,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Silence::Short => "short-silence",
            Silence::Long => "long-silence",
        }
    }
}

impl fmt::Display for Silence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// One element of the concatenation sequence: a diphone identifier
/// (`"HH-AY"`, `"PAU-HH"`) or a silence marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit {
    Diphone(String),
    Silence(Silence),
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Diphone(id) => f.write_str(id),
            Unit::Silence(s) => fmt::Display::fmt(s, f),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sequencing
// ─────────────────────────────────────────────────────────────────────────────

/// Drop the trailing stress digits from a CMU phone label (`AY1` → `AY`).
fn strip_stress(phone: &str) -> &str {
    phone.trim_end_matches(|c: char| c.is_ascii_digit())
}

/// Build the ordered diphone-unit sequence from a phone list.
///
/// For each position: a punctuation `prev` re-enters speech through
/// `PAU-<phone>`, a punctuation `next` exits through `<phone>-PAU`, plain
/// neighbours form `<phone>-<next>`, and punctuation itself becomes silence.
/// `prev` does not look back past index 0; `next` wraps circularly.
pub fn diphone_sequence(phones: &[String]) -> Vec<Unit> {
    let n = phones.len();
    let mut sequence = Vec::new();

    for i in 0..n {
        let elem = phones[i].as_str();
        let next = phones[(i + 1) % n].as_str();
        let prev_is_punct = i > 0 && is_punctuation(&phones[i - 1]);

        if prev_is_punct {
            sequence.push(Unit::Diphone(format!("PAU-{}", strip_stress(elem))));
        }

        if is_punctuation(next) {
            sequence.push(Unit::Diphone(format!("{}-PAU", strip_stress(elem))));
        } else if !is_punctuation(elem) {
            sequence.push(Unit::Diphone(format!(
                "{}-{}",
                strip_stress(elem),
                strip_stress(next)
            )));
        }

        if is_punctuation(elem) {
            let silence = if is_sentence_final(elem) { Silence::Long } else { Silence::Short };
            sequence.push(Unit::Silence(silence));
        }
    }

    sequence
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
