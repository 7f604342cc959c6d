use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use asnaug_core::{
    AugmentConfig, DEFAULT_ARTIFACT_NAME, DEFAULT_SENTINEL_WEIGHT, TranslateConfig, TranslateError,
};
use clap::{Parser, Subcommand};

/// Assignment-problem augmentation for perfect-matching solvers
#[derive(Parser, Debug)]
#[command(name = "asnaug")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Only report warnings and errors
    #[arg(short = 'q', long, global = true, default_value_t = false)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Augment assignment-problem graph files into perfect-matching problems
    Augment(AugmentArgs),
    /// Translate a solver's matching back into original node ids
    Translate(TranslateArgs),
}

#[derive(clap::Args, Debug)]
pub struct AugmentArgs {
    /// Graph files in DIMACS `asn` format
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory receiving the augmented graph (one sub-directory per input
    /// when several inputs are given)
    #[arg(short = 'o', long)]
    pub output_dir: PathBuf,

    /// Weight of the arcs pairing a node with its own mirror twin
    #[arg(long, default_value_t = DEFAULT_SENTINEL_WEIGHT, allow_negative_numbers = true)]
    pub sentinel: i64,

    /// File name of the augmented graph
    #[arg(long, default_value = DEFAULT_ARTIFACT_NAME)]
    pub artifact_name: String,

    /// Print the outcome as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl AugmentArgs {
    /// Convert command-line arguments into internal configuration
    pub fn to_config(&self) -> AugmentConfig {
        AugmentConfig::new(self.sentinel, self.artifact_name.as_str())
    }

    /// Output directory for each input, in input order.
    ///
    /// A single input writes straight into `output_dir`. Several inputs each get
    /// a sub-directory named after their file stem; a stem shared by more than
    /// one input is suffixed with the input's 1-based position (bumped further
    /// if that name is itself some input's stem).
    pub fn output_dirs(&self) -> Vec<PathBuf> {
        if self.inputs.len() == 1 {
            return vec![self.output_dir.clone()];
        }

        let stems: Vec<String> = self.inputs.iter().map(|input| stem_of(input)).collect();
        let mut uses: HashMap<&str, usize> = HashMap::new();
        for stem in &stems {
            *uses.entry(stem.as_str()).or_default() += 1;
        }
        let mut taken: HashSet<String> = stems
            .iter()
            .filter(|stem| uses[stem.as_str()] == 1)
            .cloned()
            .collect();

        stems
            .iter()
            .enumerate()
            .map(|(idx, stem)| {
                if uses[stem.as_str()] == 1 {
                    return self.output_dir.join(stem);
                }
                let mut suffix = idx + 1;
                loop {
                    let name = format!("{stem}-{suffix}");
                    if taken.insert(name.clone()) {
                        return self.output_dir.join(name);
                    }
                    suffix += 1;
                }
            })
            .collect()
    }
}

fn stem_of(input: &Path) -> String {
    input
        .file_stem()
        .map_or_else(|| "graph".into(), |s| s.to_string_lossy().into_owned())
}

#[derive(clap::Args, Debug)]
pub struct TranslateArgs {
    /// Number of source nodes in the original problem
    #[arg(short = 's', long)]
    pub sources: u64,

    /// Total number of nodes in the original problem
    #[arg(short = 'n', long)]
    pub nodes: u64,

    /// Solution file produced by the solver
    pub solution: PathBuf,

    /// Where to write the translated matching
    #[arg(short = 'o', long)]
    pub output: PathBuf,

    /// Print the outcome as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl TranslateArgs {
    pub fn to_config(&self) -> Result<TranslateConfig, TranslateError> {
        TranslateConfig::new(self.sources, self.nodes)
    }
}
