use std::path::PathBuf;

use clap::{ArgAction, Args, Parser};

use mv_engine::{Mode, RunConfig};

/// Input and output files of a multiplication.
#[derive(Args, Debug, Clone)]
pub struct Operands {
    /// Matrix file A (rows x cols)
    #[arg(value_name = "A")]
    pub a: PathBuf,

    /// Column vector file x (cols x 1)
    #[arg(value_name = "X")]
    pub x: PathBuf,

    /// Output file for y = A * x
    #[arg(value_name = "Y")]
    pub y: PathBuf,
}

impl Operands {
    pub fn into_config(self, mode: Mode) -> RunConfig {
        RunConfig::new(self.a, self.x, self.y, mode)
    }
}

/// Serial matrix-vector multiplication: y = A * x
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct SerialArgs {
    #[command(flatten)]
    pub operands: Operands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Parallel matrix-vector multiplication with P threads: y = A * x
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct ParallelArgs {
    #[command(flatten)]
    pub operands: Operands,

    /// Number of worker threads (positive)
    #[arg(value_name = "P", value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: u32,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Create a binary matrix file filled with seeded random values in [0, 10)
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct GenerateArgs {
    /// Output file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Number of rows (positive)
    #[arg(value_parser = clap::value_parser!(u32).range(1..=i32::MAX as i64))]
    pub rows: u32,

    /// Number of columns (positive)
    #[arg(value_parser = clap::value_parser!(u32).range(1..=i32::MAX as i64))]
    pub cols: u32,

    /// Random seed
    #[arg(short, long, default_value_t = mv_matrix::generate::DEFAULT_SEED)]
    pub seed: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Print a binary matrix file as text
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct PrintArgs {
    /// Matrix file to print
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
