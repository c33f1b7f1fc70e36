//! Noisemix CLI — synthesize a noisy-speech corpus, or organize raw
//! recordings into category folders.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use noisemix_core::config::load_config;
use noisemix_core::corpus::synthesize;
use noisemix_core::organize::organize_files;

// ─── Top-level CLI ───────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "noisemix",
    about = "Noisy-speech corpus synthesis at balanced SNR levels",
    version,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mix clean speech with categorized noise per a config file
    Synthesize(SynthesizeArgs),
    /// Sort files into category folders from a CSV labeling sheet
    Organize(OrganizeArgs),
}

#[derive(Parser, Debug)]
struct SynthesizeArgs {
    /// Path to the configuration file
    #[arg(long, alias = "config_path", default_value = "./config.yml")]
    config_path: PathBuf,

    /// RNG seed for reproducible output (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Show verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Parser, Debug)]
struct OrganizeArgs {
    /// CSV file with 'category' and 'filename' columns
    #[arg(long)]
    csv_file: PathBuf,

    /// Directory where all files currently live
    #[arg(long)]
    source_dir: PathBuf,

    /// Directory to organize files into, one folder per category
    #[arg(long)]
    dest_dir: PathBuf,

    /// Move files instead of copying them
    #[arg(long, default_value_t = false)]
    r#move: bool,

    /// Show verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

// ─── Main ────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let log_level = match &cli.command {
        Command::Synthesize(a) if a.verbose => "debug",
        Command::Organize(a) if a.verbose => "debug",
        _ => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Command::Synthesize(args) => run_synthesize(args),
        Command::Organize(args) => run_organize(args),
    };

    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

// ─── Runners ─────────────────────────────────────────────────────

fn run_synthesize(args: SynthesizeArgs) -> Result<()> {
    let mut config = load_config(&args.config_path)?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    println!(
        "Noise categories: {} {:?}",
        config.noise_categories.len(),
        config.noise_categories
    );

    let summary = synthesize::run(&config)?;

    println!(
        "Produced {} mix jobs from {} clean files",
        summary.jobs, summary.clean_files
    );
    if summary.skipped_clean > 0 || summary.skipped_samples > 0 {
        println!(
            "Skipped: {} clean files, {} samples",
            summary.skipped_clean, summary.skipped_samples
        );
    }
    println!("Output: {}", config.noisyspeech_dir.display());

    Ok(())
}

fn run_organize(args: OrganizeArgs) -> Result<()> {
    let report = organize_files(&args.csv_file, &args.source_dir, &args.dest_dir, args.r#move)?;
    println!("Placed {} file(s), {} missing", report.placed, report.missing);
    Ok(())
}
