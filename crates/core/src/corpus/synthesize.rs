//! Corpus synthesis driver: iterates clean files, plans and mixes noise
//! samples, persists the output triples, and records a run manifest.
//!
//! Per-file decode and write failures are logged and skipped; only
//! configuration-time validation aborts the run, before anything is
//! written. The file-id and schedule cursors live in an explicit value
//! owned by the loop, so a future parallel version can pre-partition
//! ranges per clean file.

use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::audio::io::{load_audio, write_wav};
use crate::config::Config;
use crate::corpus::catalog::{list_clean_files, NoiseCatalog};
use crate::corpus::naming::{file_stem, output_names};
use crate::corpus::planner::{align_noise_length, plan_noise_picks};
use crate::corpus::schedule::build_schedule;
use crate::mix::snr::segmental_snr_mixer;

/// File-id and schedule position, advanced together once per produced
/// mix job. Skipped samples must not consume a schedule slot, or later
/// jobs would drift out of the balanced SNR distribution.
#[derive(Debug, Default, Clone, Copy)]
pub struct Cursor {
    pub file_id: usize,
    pub schedule_pos: usize,
}

impl Cursor {
    fn advance(&mut self) {
        self.file_id += 1;
        self.schedule_pos += 1;
    }
}

/// One produced mix job, as recorded in the run manifest.
#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    pub file_id: usize,
    pub clean_file: String,
    pub noise_file: String,
    pub category: String,
    pub snr: i32,
    pub target_level: i32,
}

/// Counters reported after a completed run.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub clean_files: usize,
    pub jobs: usize,
    pub skipped_clean: usize,
    pub skipped_samples: usize,
}

/// Run the full synthesis pipeline for one configuration.
pub fn run(config: &Config) -> Result<RunSummary> {
    config.validate()?;

    let catalog = NoiseCatalog::build(&config.noise_dir, &config.noise_categories)?;
    let clean_files = list_clean_files(&config.speech_dir)?;
    let total_samples = clean_files.len() * config.samples_size;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // The full SNR multiset for the run, computed once up front
    let schedule = build_schedule(config.snr_lower, config.snr_upper, total_samples, &mut rng);

    let level_range = (config.target_level_lower, config.target_level_upper);
    let mut cursor = Cursor::default();
    let mut records: Vec<JobRecord> = Vec::with_capacity(total_samples);
    let mut skipped_clean = 0usize;
    let mut skipped_samples = 0usize;

    for (idx, clean_file) in clean_files.iter().enumerate() {
        log::info!(
            "Processing clean file {}/{}: {}",
            idx + 1,
            clean_files.len(),
            clean_file
        );

        let clean_path = config.speech_dir.join(clean_file);
        let clean_samples = match load_audio(&clean_path, config.fs) {
            Ok(samples) => samples,
            Err(e) => {
                log::error!("Error loading audio file {}: {:#}", clean_path.display(), e);
                skipped_clean += 1;
                continue;
            }
        };

        let picks = plan_noise_picks(&catalog, config.samples_size, &mut rng)?;
        skipped_samples += config.samples_size - picks.len();

        for pick in picks {
            let noise_path = config.noise_dir.join(&pick.category).join(&pick.noise_file);
            let noise_samples = match load_audio(&noise_path, config.fs) {
                Ok(samples) => samples,
                Err(e) => {
                    log::error!("Error loading audio file {}: {:#}", noise_path.display(), e);
                    skipped_samples += 1;
                    continue;
                }
            };

            let aligned = align_noise_length(&noise_samples, clean_samples.len());
            let snr = schedule[cursor.schedule_pos];
            let mix = segmental_snr_mixer(
                &clean_samples,
                &aligned,
                snr,
                config.fs,
                level_range,
                &mut rng,
            );

            let names = output_names(
                file_stem(clean_file),
                file_stem(&pick.noise_file),
                &pick.category,
                snr,
                mix.target_level,
                cursor.file_id,
            );

            let outputs = [
                (config.noisyspeech_dir.join(&names.noisy), &mix.noisy),
                (config.clean_proc_dir.join(&names.clean), &mix.clean),
                (config.noise_proc_dir.join(&names.noise), &mix.noise),
            ];
            // A failed write leaves the job's sibling files in place;
            // partial triples are a known limitation, not rolled back
            for (path, samples) in outputs {
                if let Err(e) = write_wav(&path, samples, config.fs) {
                    log::error!("Error writing file {}: {:#}", path.display(), e);
                }
            }

            records.push(JobRecord {
                file_id: cursor.file_id,
                clean_file: clean_file.clone(),
                noise_file: pick.noise_file,
                category: pick.category,
                snr,
                target_level: mix.target_level,
            });
            cursor.advance();
        }
    }

    write_manifest(&config.noisyspeech_dir, config, &records)?;

    log::info!(
        "Produced {} mix jobs from {} clean files ({} clean skipped, {} samples skipped)",
        records.len(),
        clean_files.len(),
        skipped_clean,
        skipped_samples
    );

    Ok(RunSummary {
        clean_files: clean_files.len(),
        jobs: records.len(),
        skipped_clean,
        skipped_samples,
    })
}

/// Run manifest persisted next to the mixed outputs: the effective
/// configuration plus every produced job, enough to re-derive the corpus.
#[derive(Serialize)]
struct Manifest<'a> {
    config: &'a Config,
    jobs: &'a [JobRecord],
}

fn write_manifest(dir: &Path, config: &Config, records: &[JobRecord]) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    let path = dir.join("manifest.json");
    let json = serde_json::to_string_pretty(&Manifest {
        config,
        jobs: records,
    })?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
    Ok(())
}
