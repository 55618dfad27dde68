//! Audio object — an owned sample buffer with an explicit format tag.
//!
//! WAV decode/encode goes through [`hound`]; the load boundary is the only
//! place format conversion questions can arise, and the answer is always
//! "no": a unit recording that does not match the working format exactly is
//! a fatal error, never resampled.  Device playback goes through [`rodio`].
//!
//! All samples are 16-bit signed PCM.  The working format for the shipped
//! diphone recordings is mono 16 kHz.

use std::fmt;
use std::path::Path;

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, Sink};

use crate::error::{Error, Result};

/// Sample rate of the diphone unit recordings.
pub const SAMPLE_RATE: u32 = 16_000;

/// Maximum representable magnitude for 16-bit signed samples (2^15).
pub const FULL_SCALE: f32 = 32_768.0;

// ─────────────────────────────────────────────────────────────────────────────
// Format tag
// ─────────────────────────────────────────────────────────────────────────────

/// PCM format of a sample buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl AudioFormat {
    /// The working format of the synthesiser: mono, 16 kHz, 16-bit.
    pub const fn working() -> Self {
        Self { channels: 1, sample_rate: SAMPLE_RATE, bits_per_sample: 16 }
    }

    fn to_wav_spec(self) -> hound::WavSpec {
        hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: hound::SampleFormat::Int,
        }
    }

    fn from_wav_spec(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz, {} ch, {}-bit",
            self.sample_rate, self.channels, self.bits_per_sample
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AudioClip
// ─────────────────────────────────────────────────────────────────────────────

/// An owned, resizable sample buffer bound to its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub format: AudioFormat,
    pub samples: Vec<i16>,
}

impl AudioClip {
    pub fn new(format: AudioFormat) -> Self {
        Self { format, samples: Vec::new() }
    }

    /// A zero-filled buffer of `ms` milliseconds in the given format.
    pub fn silence(format: AudioFormat, ms: u32) -> Self {
        let frames = (format.sample_rate as u64 * ms as u64 / 1000) as usize;
        Self { format, samples: vec![0; frames * format.channels as usize] }
    }

    /// Load a 16-bit PCM WAV file, requiring it to match `expected` exactly.
    pub fn load(path: &Path, expected: AudioFormat) -> Result<Self> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        let found = AudioFormat::from_wav_spec(spec);

        if found != expected || spec.sample_format != hound::SampleFormat::Int {
            return Err(Error::FormatMismatch { path: path.to_path_buf(), expected, found });
        }

        let samples = reader.samples::<i16>().collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { format: found, samples })
    }

    /// Write the buffer out as a PCM WAV file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = hound::WavWriter::create(path, self.format.to_wav_spec())?;
        for &sample in &self.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
        Ok(())
    }

    pub fn duration_secs(&self) -> f32 {
        let frames = self.samples.len() as f32 / self.format.channels as f32;
        frames / self.format.sample_rate as f32
    }

    // ── Amplitude ─────────────────────────────────────────────────────────────

    /// Scale the buffer so its peak sits at `factor` of full scale.
    ///
    /// `factor` must be in `[0, 1]`; anything else is rejected and the
    /// buffer stays untouched.  A silent buffer has no peak to scale
    /// against, so rescaling it is a no-op rather than a division by zero.
    pub fn rescale(&mut self, factor: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&factor) {
            return Err(Error::RescaleFactor(factor));
        }

        let peak = self.samples.iter().map(|&s| (s as i32).abs()).max().unwrap_or(0);
        if peak == 0 {
            return Ok(());
        }

        let scale = factor * FULL_SCALE / peak as f32;
        for sample in &mut self.samples {
            let scaled = *sample as f32 * scale;
            *sample = scaled.clamp(i16::MIN as f32, i16::MAX as f32) as i16;
        }
        Ok(())
    }

    // ── Playback ──────────────────────────────────────────────────────────────

    /// Play the buffer on the default output device, blocking until done.
    pub fn play(&self) -> Result<()> {
        let (_stream, handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&handle)?;
        let source = SamplesBuffer::new(
            self.format.channels,
            self.format.sample_rate,
            self.samples.clone(),
        );
        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_wav(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("diphone_tts_{}_{}.wav", std::process::id(), name))
    }

    #[test]
    fn test_silence_length() {
        let clip = AudioClip::silence(AudioFormat::working(), 200);
        assert_eq!(clip.samples.len(), 3200); // 16 kHz * 0.2 s
        assert!(clip.samples.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_save_load_round_trip() {
        let path = temp_wav("round_trip");
        let clip = AudioClip {
            format: AudioFormat::working(),
            samples: vec![0, 1, -1, i16::MAX, i16::MIN, 1234, -4321],
        };
        clip.save(&path).unwrap();
        let reloaded = AudioClip::load(&path, AudioFormat::working()).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(reloaded, clip);
    }

    #[test]
    fn test_load_rejects_format_mismatch() {
        let path = temp_wav("mismatch");
        let other = AudioFormat { channels: 1, sample_rate: 8_000, bits_per_sample: 16 };
        AudioClip { format: other, samples: vec![0; 64] }.save(&path).unwrap();

        let err = AudioClip::load(&path, AudioFormat::working()).unwrap_err();
        std::fs::remove_file(&path).ok();
        match err {
            Error::FormatMismatch { expected, found, .. } => {
                assert_eq!(expected, AudioFormat::working());
                assert_eq!(found, other);
            }
            other => panic!("expected FormatMismatch, got {other}"),
        }
    }

    #[test]
    fn test_rescale_hits_target_peak() {
        let mut clip = AudioClip {
            format: AudioFormat::working(),
            samples: vec![100, -200, 50],
        };
        clip.rescale(0.5).unwrap();
        let peak = clip.samples.iter().map(|&s| (s as i32).abs()).max().unwrap();
        let target = (0.5 * FULL_SCALE) as i32;
        assert!((peak - target).abs() <= 1, "peak {peak} vs target {target}");
    }

    #[test]
    fn test_rescale_never_exceeds_factor() {
        let mut clip = AudioClip {
            format: AudioFormat::working(),
            samples: (0..1000).map(|i| (i * 13 % 700 - 350) as i16).collect(),
        };
        clip.rescale(0.25).unwrap();
        let bound = (0.25 * FULL_SCALE) as i32 + 1;
        for &s in &clip.samples {
            assert!((s as i32).abs() <= bound, "sample {s} above bound");
        }
    }

    #[test]
    fn test_rescale_silent_buffer_is_noop() {
        let mut clip = AudioClip::silence(AudioFormat::working(), 10);
        let before = clip.samples.clone();
        clip.rescale(1.0).unwrap();
        assert_eq!(clip.samples, before);
    }

    #[test]
    fn test_rescale_rejects_out_of_range_factor() {
        let mut clip = AudioClip { format: AudioFormat::working(), samples: vec![5, -5] };
        let before = clip.samples.clone();
        assert!(clip.rescale(1.5).is_err());
        assert!(clip.rescale(-0.1).is_err());
        assert_eq!(clip.samples, before, "rejected rescale must not mutate");
    }

    #[test]
    fn test_duration() {
        let clip = AudioClip::silence(AudioFormat::working(), 400);
        assert!((clip.duration_secs() - 0.4).abs() < 1e-6);
    }
}
