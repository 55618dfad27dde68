//! # diphone-tts
//!
//! Concatenative diphone text-to-speech.  Text is normalised (dates become
//! speakable words), phonemicised against a CMU-style pronunciation
//! dictionary, turned into a diphone-unit sequence with punctuation-driven
//! silences, resolved against a directory of unit recordings, and assembled
//! into one waveform with optional overlap-add crossfading and peak-safe
//! volume scaling.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::path::Path;
//! use diphone_tts::{synthesize, CmuDict, SynthesisOptions, UnitInventory};
//!
//! let lexicon = CmuDict::from_file(Path::new("cmudict.dict")).unwrap();
//! let inventory = UnitInventory::scan(Path::new("./diphones")).unwrap();
//!
//! let mut audio = synthesize(
//!     "Hi there.",
//!     &lexicon,
//!     &inventory,
//!     &SynthesisOptions::default(),
//! ).unwrap();
//!
//! audio.rescale(0.8).unwrap();
//! audio.save(Path::new("output.wav")).unwrap();
//! audio.play().unwrap();
//! ```
//!
//! ## Pipeline
//! 1. **Tokenise** — phrase → word / punctuation tokens.
//! 2. **Normalise** — `DD/MM[/YYYY]` date tokens → spoken words.
//! 3. **Phonemicise** — dictionary lookup, `PAU` boundary markers; an
//!    out-of-dictionary word aborts the run.
//! 4. **Sequence** — phones → diphone identifiers + silence markers.
//! 5. **Resolve** — identifiers → recording paths; missing units are
//!    dropped with a warning.
//! 6. **Assemble** — load/generate buffers, optionally crossfade, concat.
//! 7. **Rescale** — clip-safe output volume.

pub mod audio;
pub mod error;
pub mod inventory;
pub mod lexicon;
pub mod normalize;
pub mod phonemize;
pub mod sequence;
pub mod synth;
pub mod tokenize;

// ─── Re-exports for convenience ─────────────────────────────────────────────

pub use audio::{AudioClip, AudioFormat, SAMPLE_RATE};
pub use error::Error;
pub use inventory::{ResolvedUnit, UnitInventory};
pub use lexicon::{CmuDict, Lexicon, MemoryLexicon};
pub use sequence::{Silence, Unit};
pub use synth::{synthesize, SynthesisOptions, Synthesizer};
