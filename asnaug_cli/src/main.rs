//! asnaug command-line tool
//!
//! Augments assignment-problem graph files for a perfect-matching solver and
//! translates the solver's matching back into the original node numbering.

#[global_allocator]
/// Global allocator using jemalloc for better performance in parallel workloads.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;

use std::error::Error;
use std::fs;
use std::process::ExitCode;

use asnaug_core::{AugmentError, AugmentOutcome, augment_file, translate_file};
use clap::Parser;
use rayon::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use args::{Args, AugmentArgs, Command, TranslateArgs};

/// Executes the asnaug tool.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging (`RUST_LOG` wins over `--quiet`)
/// 3. Runs the selected subcommand
fn main() -> Result<ExitCode, Box<dyn Error>> {
    let args = Args::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match &args.command {
        Command::Augment(augment) => run_augment(augment),
        Command::Translate(translate) => run_translate(translate),
    }
}

/// Augments every input; several inputs are independent sessions run in parallel.
fn run_augment(args: &AugmentArgs) -> Result<ExitCode, Box<dyn Error>> {
    let config = args.to_config();
    info!("Augmenting {} graph file(s)", args.inputs.len());

    let output_dirs = args.output_dirs();

    let results = args
        .inputs
        .par_iter()
        .zip(output_dirs.par_iter())
        .map(|(input, output_dir)| -> Result<AugmentOutcome, AugmentError> {
            if args.inputs.len() > 1 {
                fs::create_dir_all(output_dir)?;
            }
            augment_file(input, output_dir, &config)
        })
        .collect::<Vec<_>>();

    let mut failed = 0usize;
    for (input, result) in args.inputs.iter().zip(&results) {
        match result {
            Ok(outcome) if args.json => println!("{}", serde_json::to_string(outcome)?),
            Ok(outcome) => println!(
                "{}: {} nodes, {} arcs -> {} nodes, {} arcs in {}",
                input.display(),
                outcome.summary.problem.node_count,
                outcome.summary.problem.arc_count,
                outcome.summary.augmented.node_count,
                outcome.summary.augmented.arc_count,
                outcome.artifact.display()
            ),
            Err(e) => {
                error!("{}: {}", input.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        error!("{} of {} graph file(s) failed", failed, args.inputs.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_translate(args: &TranslateArgs) -> Result<ExitCode, Box<dyn Error>> {
    let config = args.to_config()?;
    let outcome = translate_file(config, &args.solution, &args.output)?;

    if args.json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else {
        println!(
            "{}: kept {}, discarded {}, skipped {} -> {}",
            args.solution.display(),
            outcome.report.kept,
            outcome.report.discarded,
            outcome.report.skipped,
            outcome.output.display()
        );
    }
    Ok(ExitCode::SUCCESS)
}
