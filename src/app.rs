//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads (or generates) fact sets
//! - runs the engine
//! - prints reports and writes optional exports

use clap::Parser;

use crate::cli::{Command, ProcessArgs, SampleArgs};
use crate::data::{SampleConfig, generate_sample};
use crate::domain::EngineConfig;
use crate::engine::process_company;
use crate::error::AppError;
use crate::io::write_ledger_json;
use crate::report::format::{format_events, format_flagged, format_run_summary};
use crate::report::summarize;

pub mod pipeline;

/// Entry point for the `divfacts` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Process(args) => handle_process(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_process(args: ProcessArgs) -> Result<(), AppError> {
    let config = engine_config_from_args(&args)?;

    if let Some(dir) = &args.export_dir {
        std::fs::create_dir_all(dir).map_err(|e| {
            AppError::io(format!("Failed to create export dir '{}': {e}", dir.display()))
        })?;
    }

    let outputs = pipeline::process_files(&args.inputs, &config)?;

    for output in &outputs {
        println!(
            "{}",
            format_run_summary(
                &output.ledger.company_id,
                output.entity_name.as_deref(),
                &output.ledger.counters,
                output.summary.as_ref(),
            )
        );
        if args.flagged_only {
            println!("{}", format_flagged(&output.ledger.events));
        } else if !output.ledger.events.is_empty() {
            println!("{}", format_events(&output.ledger.events));
        }

        if let Some(dir) = &args.export_dir {
            let path = dir.join(format!("{}.json", output.ledger.company_id));
            write_ledger_json(&path, &output.ledger, output.entity_name.as_deref())?;
        }
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let sample_config = SampleConfig {
        seed: args.seed,
        start_year: args.start_year,
        years: args.years,
        base_amount: args.base_amount,
        growth: args.growth,
        noise: args.noise,
        restatement_prob: args.restatement_prob,
    };
    let facts = generate_sample(&sample_config)?;

    let config = EngineConfig::default();
    let ledger = process_company("sample", &facts, &config);
    let summary = summarize(&ledger.events);

    println!(
        "{}",
        format_run_summary("sample", Some("Synthetic Co."), &ledger.counters, summary.as_ref())
    );
    if !ledger.events.is_empty() {
        println!("{}", format_events(&ledger.events));
    }

    if let Some(path) = &args.export {
        write_ledger_json(path, &ledger, Some("Synthetic Co."))?;
    }

    Ok(())
}

fn engine_config_from_args(args: &ProcessArgs) -> Result<EngineConfig, AppError> {
    if !(0.0..=1.0).contains(&args.review_threshold) {
        return Err(AppError::input("Review threshold must be in [0, 1]."));
    }
    if args.max_amount <= args.min_amount {
        return Err(AppError::input("Max amount must exceed min amount."));
    }
    Ok(EngineConfig {
        max_reasonable_amount: args.max_amount,
        min_reasonable_amount: args.min_amount,
        review_threshold: args.review_threshold,
        ..EngineConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> ProcessArgs {
        ProcessArgs {
            inputs: vec![],
            flagged_only: false,
            review_threshold: 0.8,
            max_amount: 50.0,
            min_amount: 0.01,
            export_dir: None,
        }
    }

    #[test]
    fn args_map_onto_engine_config() {
        let mut args = base_args();
        args.review_threshold = 0.9;
        args.max_amount = 10.0;
        let config = engine_config_from_args(&args).unwrap();
        assert_eq!(config.review_threshold, 0.9);
        assert_eq!(config.max_reasonable_amount, 10.0);
        assert_eq!(config.min_reasonable_amount, 0.01);
    }

    #[test]
    fn nonsense_thresholds_are_rejected() {
        let mut args = base_args();
        args.review_threshold = 1.5;
        assert_eq!(engine_config_from_args(&args).unwrap_err().exit_code(), 2);

        let mut args = base_args();
        args.max_amount = 0.001;
        assert_eq!(engine_config_from_args(&args).unwrap_err().exit_code(), 2);
    }
}
