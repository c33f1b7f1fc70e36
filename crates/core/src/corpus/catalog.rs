//! Noise catalog: category name -> available noise filenames.
//!
//! Built once from the noise directory tree at startup and immutable for
//! the rest of the run. An empty category is not an error here; selection
//! deals with it per sample.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::CorpusError;

/// Mapping from noise category to the files available in it.
#[derive(Debug, Clone)]
pub struct NoiseCatalog {
    files: BTreeMap<String, Vec<String>>,
}

impl NoiseCatalog {
    /// Scan `noise_root/<category>/` for every configured category.
    ///
    /// Listings are sorted so a given directory tree always produces the
    /// same catalog. A missing root or category directory is fatal.
    pub fn build(noise_root: &Path, categories: &[String]) -> Result<Self> {
        if !noise_root.is_dir() {
            return Err(CorpusError::MissingDirectory(noise_root.to_path_buf()).into());
        }

        let mut files = BTreeMap::new();
        for category in categories {
            let dir = noise_root.join(category);
            let mut names = list_files(&dir)
                .with_context(|| format!("Failed to list noise category '{}'", category))?;
            names.sort();
            files.insert(category.clone(), names);
        }

        Ok(Self { files })
    }

    /// All category names, in sorted order.
    pub fn categories(&self) -> Vec<&str> {
        self.files.keys().map(String::as_str).collect()
    }

    /// Files available in one category.
    pub fn files(&self, category: &str) -> &[String] {
        self.files.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of categories in the catalog.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// List regular files in a directory (names only, no subdirectories).
fn list_files(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(CorpusError::MissingDirectory(dir.to_path_buf()).into());
    }
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    Ok(names)
}

/// List the clean speech files for a run, sorted for a stable iteration order.
pub fn list_clean_files(speech_dir: &Path) -> Result<Vec<String>> {
    let mut names = list_files(speech_dir)
        .with_context(|| format!("Failed to list speech dir: {}", speech_dir.display()))?;
    names.sort();
    Ok(names)
}
