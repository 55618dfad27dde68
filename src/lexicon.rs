//! Pronunciation dictionary — word → phone-sequence lookup.
//!
//! The pipeline only needs a read-only lookup service, so the seam is a
//! trait; the CLI backs it with a CMU dictionary file (`cmudict.dict`
//! format) and tests back it with an in-memory map.
//!
//! Phones keep their stress digits here (`HH`, `AY1`); the sequencer strips
//! them when forming diphone identifiers.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

/// Read-only word → phones lookup.
pub trait Lexicon {
    /// Look up a lower-cased word; returns the first pronunciation variant.
    fn lookup(&self, word: &str) -> Option<&[String]>;
}

// ─────────────────────────────────────────────────────────────────────────────
// CMU dictionary file
// ─────────────────────────────────────────────────────────────────────────────

/// Dictionary parsed from a CMU-format file: one entry per line,
/// `word PH ON ES`, with `;;;` comment lines and `word(2)`-style alternate
/// pronunciations.  Only the first variant of each word is kept.
pub struct CmuDict {
    entries: HashMap<String, Vec<String>>,
}

impl CmuDict {
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("cannot open pronunciation dictionary: {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: BufReader<R>) -> Result<Self> {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();

        for line in reader.lines() {
            let line = line.context("error reading pronunciation dictionary")?;
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }

            let mut fields = line.split_whitespace();
            let Some(head) = fields.next() else { continue };

            // "word(2)" marks an alternate pronunciation; the base entry has
            // already been seen, so later variants never win.
            let word = match head.find('(') {
                Some(idx) => &head[..idx],
                None => head,
            };
            let word = word.to_lowercase();
            let phones: Vec<String> = fields.map(|p| p.to_string()).collect();
            if phones.is_empty() {
                continue;
            }
            entries.entry(word).or_insert(phones);
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Lexicon for CmuDict {
    fn lookup(&self, word: &str) -> Option<&[String]> {
        self.entries.get(word).map(Vec::as_slice)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory fixture
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory lexicon for tests and embedding.
#[derive(Default)]
pub struct MemoryLexicon {
    entries: HashMap<String, Vec<String>>,
}

impl MemoryLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: &str, phones: &[&str]) {
        self.entries
            .insert(word.to_lowercase(), phones.iter().map(|p| p.to_string()).collect());
    }
}

impl Lexicon for MemoryLexicon {
    fn lookup(&self, word: &str) -> Option<&[String]> {
        self.entries.get(word).map(Vec::as_slice)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
