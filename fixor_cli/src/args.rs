use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fixor_common::{Config, PhaseBudget};

/// Fixor - logic circuit sandbox and puzzle checker
#[derive(Parser, Debug)]
#[command(name = "fixor")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// How many propagation phases one tick may run
    #[arg(long, value_enum, default_value = "graph-size", global = true)]
    pub phase_budget: PhaseBudgetArg,

    /// Phase count used with `--phase-budget fixed`
    #[arg(long, default_value_t = 64, global = true)]
    pub phases: usize,

    /// Refuse to enumerate truth tables with more inputs than this
    #[arg(long, global = true)]
    pub max_inputs: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the canonical truth table of a circuit description
    Table {
        /// Path to a circuit description (JSON)
        circuit: PathBuf,
    },
    /// Check a circuit against a level's reference solution
    Verify {
        /// Path to a level definition (JSON)
        #[arg(short = 'l', long)]
        level: PathBuf,
        /// Path to the attempted circuit (JSON)
        #[arg(short = 'a', long)]
        attempt: PathBuf,
    },
    /// Load a circuit into the live engine, drive its inputs and report the outputs
    Simulate {
        /// Path to a circuit description (JSON)
        circuit: PathBuf,
        /// Indices of input sources to drive high
        #[arg(long = "high", value_delimiter = ',')]
        high: Vec<usize>,
        /// Number of ticks to run
        #[arg(short = 't', long, default_value_t = 1)]
        ticks: usize,
    },
}

impl Args {
    /// Convert command-line arguments into engine configuration
    pub fn to_config(&self) -> Config {
        let budget = match self.phase_budget {
            PhaseBudgetArg::GraphSize => PhaseBudget::GraphSize,
            PhaseBudgetArg::Fixed => PhaseBudget::Fixed(self.phases),
        };
        Config::new(budget, self.max_inputs)
    }
}

/// Command-line argument wrapper for PhaseBudget
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum PhaseBudgetArg {
    /// One phase per node and wire in the graph
    #[value(name = "graph-size")]
    GraphSize,
    /// The value of `--phases`
    #[value(name = "fixed")]
    Fixed,
}
