//! Run configuration: YAML file loading and startup validation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CorpusError;

/// Configuration document for one synthesis run.
///
/// Mirrors the keys of `config.yml`; `seed` and the target level bounds
/// are optional with sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory of clean speech recordings.
    pub speech_dir: PathBuf,
    /// Root directory of noise recordings, one subdirectory per category.
    pub noise_dir: PathBuf,
    /// Output directory for mixed (noisy) files.
    pub noisyspeech_dir: PathBuf,
    /// Output directory for level-processed clean copies.
    pub clean_proc_dir: PathBuf,
    /// Output directory for level-processed noise copies.
    pub noise_proc_dir: PathBuf,
    /// Noise categories to draw from.
    pub noise_categories: Vec<String>,
    /// Mix jobs produced per clean file (distinct categories each).
    pub samples_size: usize,
    /// Lowest SNR level in dB (inclusive).
    pub snr_lower: i32,
    /// Highest SNR level in dB (inclusive).
    pub snr_upper: i32,
    /// Target sample rate in Hz.
    pub fs: u32,
    /// RNG seed for reproducible runs. Entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Lower bound of the randomized output level in dBFS.
    #[serde(default = "default_target_level_lower")]
    pub target_level_lower: i32,
    /// Upper bound of the randomized output level in dBFS.
    #[serde(default = "default_target_level_upper")]
    pub target_level_upper: i32,
}

fn default_target_level_lower() -> i32 {
    -35
}

fn default_target_level_upper() -> i32 {
    -15
}

/// Load a configuration file.
pub fn load_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

impl Config {
    /// Validate configuration before any processing starts.
    ///
    /// Everything caught here is fatal; nothing has been written yet.
    pub fn validate(&self) -> Result<(), CorpusError> {
        if self.samples_size == 0 {
            return Err(CorpusError::InvalidConfig(
                "samples_size must be at least 1".into(),
            ));
        }
        if self.snr_lower > self.snr_upper {
            return Err(CorpusError::InvalidConfig(format!(
                "snr_lower ({}) exceeds snr_upper ({})",
                self.snr_lower, self.snr_upper
            )));
        }
        if self.fs == 0 {
            return Err(CorpusError::InvalidConfig("fs must be positive".into()));
        }
        if self.target_level_lower >= self.target_level_upper {
            return Err(CorpusError::InvalidConfig(format!(
                "target_level_lower ({}) must be below target_level_upper ({})",
                self.target_level_lower, self.target_level_upper
            )));
        }
        if self.noise_categories.len() < self.samples_size {
            return Err(CorpusError::InsufficientCategories {
                needed: self.samples_size,
                available: self.noise_categories.len(),
            });
        }
        if !self.speech_dir.is_dir() {
            return Err(CorpusError::MissingDirectory(self.speech_dir.clone()));
        }
        if !self.noise_dir.is_dir() {
            return Err(CorpusError::MissingDirectory(self.noise_dir.clone()));
        }
        Ok(())
    }
}
