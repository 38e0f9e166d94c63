//! Command-line parsing for the dividend fact engine.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the engine code. The CLI is a thin harness: it
//! reads company-facts documents (or generates synthetic ones) and hands the
//! fact sets to the library.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "divfacts",
    version,
    about = "Dividend fact normalizer and quality scorer"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process company-facts JSON documents into vetted dividend ledgers.
    Process(ProcessArgs),
    /// Generate a synthetic fact set and run it through the engine.
    Sample(SampleArgs),
}

/// Options for processing real company-facts documents.
#[derive(Debug, Parser, Clone)]
pub struct ProcessArgs {
    /// Company-facts JSON files, one per company.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Only print events flagged for review.
    #[arg(long, default_value_t = false)]
    pub flagged_only: bool,

    /// Confidence below which an event is flagged for review.
    #[arg(long, default_value_t = 0.8)]
    pub review_threshold: f64,

    /// Per-share amount above which a fact is penalized as implausible.
    #[arg(long, default_value_t = 50.0)]
    pub max_amount: f64,

    /// Per-share amount below which a fact is penalized as implausible.
    #[arg(long, default_value_t = 0.01)]
    pub min_amount: f64,

    /// Directory to write one `<company_id>.json` ledger export per input.
    #[arg(long)]
    pub export_dir: Option<PathBuf>,
}

/// Options for the synthetic sample run.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Random seed for fact generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// First fiscal year generated.
    #[arg(long, default_value_t = 2020)]
    pub start_year: i32,

    /// Number of consecutive fiscal years.
    #[arg(long, default_value_t = 4)]
    pub years: usize,

    /// Per-share quarterly amount in the first year.
    #[arg(long, default_value_t = 0.22)]
    pub base_amount: f64,

    /// Annual growth applied to the quarterly amount.
    #[arg(long, default_value_t = 0.05)]
    pub growth: f64,

    /// Std dev of per-quarter noise, as a fraction of the amount.
    #[arg(long, default_value_t = 0.02)]
    pub noise: f64,

    /// Probability that a quarter gets a restated duplicate filing.
    #[arg(long, default_value_t = 0.1)]
    pub restatement_prob: f64,

    /// Write the processed ledger to this JSON file.
    #[arg(long)]
    pub export: Option<PathBuf>,
}
