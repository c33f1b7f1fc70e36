//! Error taxonomy for corpus synthesis.
//!
//! Only configuration-time problems are fatal; everything that can go
//! wrong with an individual file during the run is logged and skipped.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal and recoverable failures of the synthesis pipeline.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Fewer noise categories configured than `samples_size` requires.
    #[error("at least {needed} unique noise categories are required, got {available}")]
    InsufficientCategories { needed: usize, available: usize },

    /// A selected noise category directory contains no files.
    /// Recoverable: the affected sample is skipped.
    #[error("noise category '{category}' contains no files")]
    EmptyCategory { category: String },

    /// A required directory is missing on disk.
    #[error("directory not found: {0}")]
    MissingDirectory(PathBuf),

    /// A configuration value fails validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
