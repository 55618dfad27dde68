//! Command-line interface for the diphone synthesiser.
//!
//! Synthesises a phrase from pre-recorded diphone units, plays it on the
//! default audio device, and optionally writes it to a WAV file.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use diphone_tts::{synthesize, AudioFormat, CmuDict, SynthesisOptions, UnitInventory};

/// A basic text-to-speech program using diphone speech synthesis.
#[derive(Parser)]
#[command(name = "diphone-tts", version)]
struct Cli {
    /// The phrase to be synthesised
    phrase: String,

    /// Path to the folder containing diphone .wav recordings
    #[arg(long, default_value = "./diphones")]
    diphones: PathBuf,

    /// Path to a CMU-format pronunciation dictionary
    #[arg(long, default_value = "./cmudict.dict")]
    lexicon: PathBuf,

    /// Save the audio output to a .wav file
    #[arg(long, short = 's', value_name = "FILE")]
    save: Option<PathBuf>,

    /// Smoother concatenation by cross-fading between diphone units
    #[arg(long, short = 'c')]
    crossfade: bool,

    /// Final output volume, 0 to 100
    #[arg(long, short = 'v', default_value_t = 100)]
    volume: i32,

    /// Skip playback on the audio device
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    // Argument sanity up front: bad volume or an unwritable save target
    // should not cost a full synthesis run.
    if !(0..=100).contains(&cli.volume) {
        bail!("--volume/-v expected a value between 0 and 100, got {}", cli.volume);
    }
    if let Some(path) = &cli.save {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.is_dir() {
            bail!("cannot save to {}: directory {} does not exist", path.display(), dir.display());
        }
    }

    let lexicon = CmuDict::from_file(&cli.lexicon)?;
    let inventory = UnitInventory::scan(&cli.diphones)?;

    let options = SynthesisOptions { crossfade: cli.crossfade, format: AudioFormat::working() };
    let mut audio = synthesize(&cli.phrase, &lexicon, &inventory, &options)
        .context("synthesis failed")?;

    audio
        .rescale(cli.volume as f32 / 100.0)
        .context("volume rescale failed")?;

    if !cli.quiet {
        println!("Playing...");
        audio.play().context("audio playback failed")?;
    }

    if let Some(path) = &cli.save {
        println!("Saving: {}", path.display());
        audio
            .save(path)
            .with_context(|| format!("could not save audio output to {}", path.display()))?;
    }

    Ok(())
}
