//! Unit recording set — the diphone recordings available on disk.
//!
//! One directory scan at startup builds an immutable file-name set; the rest
//! of the run only queries it.  Resolution maps diphone identifiers to the
//! file `<lowercased-id>.wav` and passes silence markers through untouched.
//! A diphone with no recording is logged and dropped — output quality
//! degrades, the run continues.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::sequence::{Silence, Unit};

/// A sequence element after resolution: a loadable file or a silence to
/// generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedUnit {
    File(PathBuf),
    Silence(Silence),
}

/// The set of unit recordings found in one directory.
pub struct UnitInventory {
    dir: PathBuf,
    files: HashSet<String>,
}

impl UnitInventory {
    /// Scan `dir` (one level, the recording set is flat) and collect every
    /// file name.
    pub fn scan(dir: &Path) -> Result<Self> {
        let mut files = HashSet::new();
        let entries = fs::read_dir(dir)
            .with_context(|| format!("cannot read diphone directory: {}", dir.display()))?;
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.insert(entry.file_name().to_string_lossy().into_owned());
            }
        }
        debug!("found {} unit recordings in {}", files.len(), dir.display());
        Ok(Self { dir: dir.to_path_buf(), files })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolve a diphone-unit sequence against the recording set.
    ///
    /// Unresolvable diphones are skipped with a warning; the resolved list
    /// preserves the order of everything that survives.
    pub fn resolve(&self, units: &[Unit]) -> Vec<ResolvedUnit> {
        let mut resolved = Vec::with_capacity(units.len());
        for unit in units {
            match unit {
                Unit::Silence(silence) => resolved.push(ResolvedUnit::Silence(*silence)),
                Unit::Diphone(id) => {
                    let file_name = format!("{}.wav", id.to_lowercase());
                    if self.files.contains(&file_name) {
                        resolved.push(ResolvedUnit::File(self.dir.join(file_name)));
                    } else {
                        warn!(
                            "diphone {} not found in {}, skipping",
                            id,
                            self.dir.display()
                        );
                    }
                }
            }
        }
        resolved
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
