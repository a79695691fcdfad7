//! Fixor CLI
//!
//! Command-line front end for the circuit analyzer and the live engine: prints canonical truth
//! tables, checks attempts against puzzle levels, and runs circuits tick by tick.

mod args;

use std::path::Path;

use clap::Parser;
use fixor_analysis::{canonical_string_with, equivalent};
use fixor_common::{Config, GraphDescription, Level};
use fixor_sim::Graph;
use tracing::info;

use args::{Args, Command};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    let config = args.to_config();

    match &args.command {
        Command::Table { circuit } => table(circuit, &config),
        Command::Verify { level, attempt } => verify(level, attempt, &config),
        Command::Simulate {
            circuit,
            high,
            ticks,
        } => simulate(circuit, high, *ticks, config),
    }
}

fn table(circuit: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Loading circuit: {}", circuit.display());
    let desc = GraphDescription::load(circuit)?;
    print!("{}", canonical_string_with(&desc, config)?);
    Ok(())
}

fn verify(level: &Path, attempt: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let level = Level::load(level)?;
    let attempt = GraphDescription::load(attempt)?;

    if equivalent(&attempt, &level.solution, config)? {
        println!("PASS");
    } else {
        println!("FAIL");
        println!("\n=== Expected ===");
        print!("{}", canonical_string_with(&level.solution, config)?);
        println!("\n=== Got ===");
        print!("{}", canonical_string_with(&attempt, config)?);
    }
    Ok(())
}

fn simulate(
    circuit: &Path,
    high: &[usize],
    ticks: usize,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Loading circuit: {}", circuit.display());
    let desc = GraphDescription::load(circuit)?;
    let mut graph = Graph::from_description(&desc, config)?;

    let sources: Vec<_> = graph.sources().collect();
    for &index in high {
        let source = sources
            .get(index)
            .ok_or_else(|| format!("no input source {index}, circuit has {}", sources.len()))?;
        graph.set_input(*source, true)?;
    }

    for tick in 0..ticks {
        let stats = graph.tick();
        println!(
            "tick {tick}: {} phases, {} evaluations{}",
            stats.phases,
            stats.evaluations,
            if stats.settled { ", settled" } else { "" }
        );
    }

    let outputs: Vec<&str> = graph
        .sink_states()
        .into_iter()
        .map(|v| if v { "T" } else { "F" })
        .collect();
    println!("outputs: {}", outputs.join(" "));
    Ok(())
}
