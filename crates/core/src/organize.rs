//! CSV-driven file organizer: sorts a flat directory of recordings into
//! category folders, e.g. to build a noise tree from a labeling sheet.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// One row of the labeling sheet.
#[derive(Debug, Deserialize)]
struct Row {
    category: String,
    filename: String,
}

/// Counters from one organize pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OrganizeReport {
    pub placed: usize,
    pub missing: usize,
}

/// Place each file listed in `csv_file` into `dest_dir/<category>/`.
///
/// Category folders are created on demand. Files are copied unless
/// `move_files` is set. Rows pointing at files that do not exist under
/// `source_dir` are logged and counted, not fatal.
pub fn organize_files(
    csv_file: &Path,
    source_dir: &Path,
    dest_dir: &Path,
    move_files: bool,
) -> Result<OrganizeReport> {
    let mut reader = csv::Reader::from_path(csv_file)
        .with_context(|| format!("Failed to open CSV file: {}", csv_file.display()))?;

    let mut report = OrganizeReport::default();
    for row in reader.deserialize() {
        let row: Row = row.context("Malformed CSV row")?;

        let source = source_dir.join(&row.filename);
        if !source.is_file() {
            log::warn!("File not found: {}", source.display());
            report.missing += 1;
            continue;
        }

        let category_dir = dest_dir.join(&row.category);
        std::fs::create_dir_all(&category_dir)
            .with_context(|| format!("Failed to create directory: {}", category_dir.display()))?;

        let target = category_dir.join(&row.filename);
        if move_files {
            std::fs::rename(&source, &target)
                .with_context(|| format!("Failed to move {}", source.display()))?;
        } else {
            std::fs::copy(&source, &target)
                .with_context(|| format!("Failed to copy {}", source.display()))?;
        }
        log::info!("Placed {} in {}", row.filename, category_dir.display());
        report.placed += 1;
    }

    log::info!(
        "File organization complete: {} placed, {} missing",
        report.placed,
        report.missing
    );
    Ok(report)
}
