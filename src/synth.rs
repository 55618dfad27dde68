//! Concatenative synthesiser — resolved units to one output waveform.
//!
//! Silence markers become zero buffers at the working rate; file entries are
//! loaded through the WAV codec and must match the working format exactly.
//! Concatenation is either direct or overlap-add: a 10 ms linear taper on
//! the head and tail of every chunk, then each chunk's tapered head is mixed
//! into its predecessor's tail and trimmed so the 10 ms are not duplicated.
//!
//! The overlap runs circularly — the first chunk's head is also mixed into
//! the last chunk's tail, while the first chunk itself is emitted untrimmed.
//! `N` chunks therefore lose exactly `T * (N - 1)` samples.

use log::{debug, info};

use crate::audio::{AudioClip, AudioFormat};
use crate::error::Result;
use crate::inventory::{ResolvedUnit, UnitInventory};
use crate::lexicon::Lexicon;
use crate::normalize::normalize;
use crate::phonemize::phonemize;
use crate::sequence::diphone_sequence;
use crate::tokenize::tokenize;

// ─────────────────────────────────────────────────────────────────────────────
// Overlap-add
// ─────────────────────────────────────────────────────────────────────────────

fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

/// Linear taper, `len` factors evenly spaced from 0 to just under 1,
/// rounded to three decimals.
fn taper_window(len: usize) -> Vec<f32> {
    (0..len).map(|i| round3(i as f32 / len as f32)).collect()
}

/// Taper every chunk, overlap each tapered head into the previous chunk's
/// tail (circularly), and concatenate with the duplicated heads removed.
fn overlap_add(chunks: &mut [Vec<i16>], taper_len: usize) -> Vec<i16> {
    if chunks.is_empty() || taper_len == 0 {
        return chunks.concat();
    }
    let window = taper_window(taper_len);

    // Head and tail both read the pre-taper samples, then write back.
    for chunk in chunks.iter_mut() {
        let m = taper_len.min(chunk.len());
        let head: Vec<i16> = (0..m).map(|i| (chunk[i] as f32 * window[i]) as i16).collect();
        let start = chunk.len() - m;
        let tail: Vec<i16> =
            (0..m).map(|i| (chunk[start + i] as f32 * window[i]) as i16).collect();
        chunk[..m].copy_from_slice(&head);
        chunk[start..].copy_from_slice(&tail);
    }

    // Heads are mixed as tapered but not yet overlapped, so snapshot them
    // before any tail is modified.
    let heads: Vec<Vec<i16>> = chunks
        .iter()
        .map(|c| c[..taper_len.min(c.len())].to_vec())
        .collect();

    let n = chunks.len();
    for i in 0..n {
        let head = &heads[(i + 1) % n];
        let len = chunks[i].len();
        let m = taper_len.min(len).min(head.len());
        let start = len - m;
        for k in 0..m {
            chunks[i][start + k] = chunks[i][start + k].saturating_add(head[k]);
        }
    }

    // The first chunk keeps its head; every later chunk drops the 10 ms that
    // now live in its predecessor's tail.
    let mut out = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let skip = if i == 0 { 0 } else { taper_len.min(chunk.len()) };
        out.extend_from_slice(&chunk[skip..]);
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Synthesiser
// ─────────────────────────────────────────────────────────────────────────────

pub struct Synthesizer {
    format: AudioFormat,
    crossfade: bool,
}

impl Synthesizer {
    pub fn new(format: AudioFormat, crossfade: bool) -> Self {
        Self { format, crossfade }
    }

    /// Load or generate the sample buffer for every resolved unit, in order.
    fn realize(&self, resolved: &[ResolvedUnit]) -> Result<Vec<Vec<i16>>> {
        let mut chunks = Vec::with_capacity(resolved.len());
        for unit in resolved {
            match unit {
                ResolvedUnit::Silence(silence) => {
                    chunks.push(AudioClip::silence(self.format, silence.duration_ms()).samples);
                }
                ResolvedUnit::File(path) => {
                    chunks.push(AudioClip::load(path, self.format)?.samples);
                }
            }
        }
        Ok(chunks)
    }

    /// Assemble the final waveform from a resolved unit sequence.
    pub fn assemble(&self, resolved: &[ResolvedUnit]) -> Result<AudioClip> {
        let mut chunks = self.realize(resolved)?;

        let samples = if self.crossfade {
            info!("crossfading {} chunks", chunks.len());
            let taper_len = (self.format.sample_rate / 100) as usize; // 10 ms
            overlap_add(&mut chunks, taper_len)
        } else {
            chunks.concat()
        };

        Ok(AudioClip { format: self.format, samples })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Full pipeline
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    pub crossfade: bool,
    pub format: AudioFormat,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self { crossfade: false, format: AudioFormat::working() }
    }
}

/// Run the whole pipeline: phrase → tokens → phones → diphones → waveform.
pub fn synthesize(
    phrase: &str,
    lexicon: &dyn Lexicon,
    inventory: &UnitInventory,
    options: &SynthesisOptions,
) -> Result<AudioClip> {
    let tokens = normalize(&tokenize(phrase));
    info!("tokens: {:?}", tokens);

    let phones = phonemize(&tokens, lexicon)?;
    let units = diphone_sequence(&phones);
    debug!("diphone sequence: {:?}", units.iter().map(ToString::to_string).collect::<Vec<_>>());

    let resolved = inventory.resolve(&units);
    Synthesizer::new(options.format, options.crossfade).assemble(&resolved)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::lexicon::MemoryLexicon;
    use crate::sequence::Silence;
    use std::path::PathBuf;

    const FORMAT: AudioFormat = AudioFormat::working();
    const TAPER: usize = 160; // 10 ms at 16 kHz

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("diphone_tts_synth_{}_{}", std::process::id(), name));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_unit(dir: &PathBuf, name: &str, len: usize, value: i16) {
        let clip = AudioClip { format: FORMAT, samples: vec![value; len] };
        clip.save(&dir.join(name)).unwrap();
    }

    #[test]
    fn test_silence_realization_lengths() {
        let synth = Synthesizer::new(FORMAT, false);
        let out = synth
            .assemble(&[
                ResolvedUnit::Silence(Silence::Short),
                ResolvedUnit::Silence(Silence::Long),
            ])
            .unwrap();
        assert_eq!(out.samples.len(), 3200 + 6400);
    }

    #[test]
    fn test_plain_concat_length_is_sum() {
        let dir = fixture_dir("plain");
        write_unit(&dir, "a-b.wav", 500, 100);
        write_unit(&dir, "b-c.wav", 700, -100);
        let synth = Synthesizer::new(FORMAT, false);
        let out = synth
            .assemble(&[
                ResolvedUnit::File(dir.join("a-b.wav")),
                ResolvedUnit::File(dir.join("b-c.wav")),
            ])
            .unwrap();
        assert_eq!(out.samples.len(), 1200);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_crossfade_removes_one_taper_per_boundary() {
        let dir = fixture_dir("xfade_len");
        write_unit(&dir, "a-b.wav", 500, 100);
        write_unit(&dir, "b-c.wav", 700, 100);
        write_unit(&dir, "c-d.wav", 600, 100);
        let synth = Synthesizer::new(FORMAT, true);
        let out = synth
            .assemble(&[
                ResolvedUnit::File(dir.join("a-b.wav")),
                ResolvedUnit::File(dir.join("b-c.wav")),
                ResolvedUnit::File(dir.join("c-d.wav")),
            ])
            .unwrap();
        // 3 chunks: the first keeps its head, the other two lose 10 ms each
        assert_eq!(out.samples.len(), 500 + 700 + 600 - 2 * TAPER);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_crossfade_tapers_to_zero_at_start() {
        let dir = fixture_dir("xfade_zero");
        write_unit(&dir, "a-b.wav", 500, 1000);
        write_unit(&dir, "b-c.wav", 500, 1000);
        let synth = Synthesizer::new(FORMAT, true);
        let out = synth
            .assemble(&[
                ResolvedUnit::File(dir.join("a-b.wav")),
                ResolvedUnit::File(dir.join("b-c.wav")),
            ])
            .unwrap();
        // first taper factor is exactly 0
        assert_eq!(out.samples[0], 0);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_crossfade_mixes_boundary() {
        let dir = fixture_dir("xfade_mix");
        write_unit(&dir, "a-b.wav", 400, 1000);
        write_unit(&dir, "b-c.wav", 400, 1000);
        let synth = Synthesizer::new(FORMAT, true);
        let out = synth
            .assemble(&[
                ResolvedUnit::File(dir.join("a-b.wav")),
                ResolvedUnit::File(dir.join("b-c.wav")),
            ])
            .unwrap();
        // In the overlap region, fade-out of chunk A plus fade-in of chunk B
        // of equal-amplitude material stays near the original level.
        let boundary = 400 - TAPER / 2;
        let mixed = out.samples[boundary];
        assert!((mixed - 1000).abs() < 50, "boundary sample {mixed}");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_format_mismatch_is_fatal() {
        let dir = fixture_dir("mismatch");
        let other = AudioFormat { channels: 1, sample_rate: 22_050, bits_per_sample: 16 };
        AudioClip { format: other, samples: vec![0; 100] }
            .save(&dir.join("a-b.wav"))
            .unwrap();
        let synth = Synthesizer::new(FORMAT, false);
        let err = synth.assemble(&[ResolvedUnit::File(dir.join("a-b.wav"))]).unwrap_err();
        assert!(matches!(err, Error::FormatMismatch { .. }));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_empty_sequence_yields_empty_clip() {
        let synth = Synthesizer::new(FORMAT, false);
        let out = synth.assemble(&[]).unwrap();
        assert!(out.samples.is_empty());
    }

    // ── End-to-end pipeline ──────────────────────────────────────────────────

    fn pipeline_fixture(name: &str) -> (PathBuf, MemoryLexicon) {
        let dir = fixture_dir(name);
        for unit in ["pau-hh.wav", "hh-ay.wav", "ay-pau.wav", "pau-pau.wav"] {
            write_unit(&dir, unit, 320, 500);
        }
        let mut lex = MemoryLexicon::new();
        lex.insert("hi", &["HH", "AY1"]);
        (dir, lex)
    }

    #[test]
    fn test_pipeline_hi() {
        let (dir, lex) = pipeline_fixture("hi");
        let inventory = UnitInventory::scan(&dir).unwrap();
        let out = synthesize("Hi.", &lex, &inventory, &SynthesisOptions::default()).unwrap();
        // PAU-HH, HH-AY, AY-PAU, long-silence, PAU-PAU, PAU-PAU
        assert_eq!(out.samples.len(), 5 * 320 + 6400);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_pipeline_drops_missing_unit() {
        let (dir, lex) = pipeline_fixture("missing");
        std::fs::remove_file(dir.join("hh-ay.wav")).unwrap();
        let inventory = UnitInventory::scan(&dir).unwrap();
        let out = synthesize("Hi.", &lex, &inventory, &SynthesisOptions::default()).unwrap();
        // one 320-sample unit fewer, still no error
        assert_eq!(out.samples.len(), 4 * 320 + 6400);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_pipeline_unknown_word_aborts() {
        let (dir, lex) = pipeline_fixture("oov");
        let inventory = UnitInventory::scan(&dir).unwrap();
        let err = synthesize("Hello.", &lex, &inventory, &SynthesisOptions::default()).unwrap_err();
        assert!(matches!(err, Error::UnknownWord(w) if w == "Hello"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
