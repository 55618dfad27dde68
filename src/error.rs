//! Typed errors for the synthesis pipeline.
//!
//! Fatal conditions abort the whole run (an out-of-dictionary word, a unit
//! file whose format differs from the working format, an out-of-range
//! rescale factor).  Recoverable conditions — a diphone with no recording —
//! never surface here; they are logged and skipped at the resolver.

use std::path::PathBuf;

use crate::audio::AudioFormat;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A word token has no entry in the pronunciation dictionary.
    /// Numerals and symbols that escaped normalisation end up here too.
    #[error("'{0}' is not in the pronunciation dictionary; try changing it to a word")]
    UnknownWord(String),

    /// A loaded unit recording does not match the working audio format.
    /// Units are never resampled; the run aborts instead.
    #[error("{path}: format {found} does not match working format {expected}")]
    FormatMismatch {
        path: PathBuf,
        expected: AudioFormat,
        found: AudioFormat,
    },

    /// Rescale factor outside `[0, 1]` — the buffer is left untouched.
    #[error("expected a scaling factor between 0 and 1, got {0}")]
    RescaleFactor(f32),

    #[error("WAV codec error: {0}")]
    Wav(#[from] hound::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("audio device unavailable: {0}")]
    AudioDevice(#[from] rodio::StreamError),

    #[error("playback failed: {0}")]
    Playback(#[from] rodio::PlayError),
}

pub type Result<T> = std::result::Result<T, Error>;
