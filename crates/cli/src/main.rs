//! APEX pipeline simulator CLI.
//!
//! This binary loads a program text file and runs it through the cycle-accurate pipeline.
//! It supports two modes:
//! 1. **Simulate:** Print every active stage each cycle, then the final state and statistics.
//! 2. **Display:** Run silently, then print the final state and statistics.
//!
//! Either mode can take run parameters from a JSON file and emit the final state as JSON.

use std::path::PathBuf;
use std::{fs, process};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use apex_pipe_core::core::pipeline::{ConsoleTrace, NullTrace, TraceSink};
use apex_pipe_core::sim::{AsmFile, FinalState, Simulator};
use apex_pipe_core::{Config, SimResult};

#[derive(Parser, Debug)]
#[command(
    name = "apex-sim",
    author,
    version,
    about = "APEX cycle-accurate pipeline simulator",
    long_about = "Run an APEX program through the in-order pipeline.\n\nExamples:\n  apex-sim simulate input.asm 50\n  apex-sim display input.asm 200 --json\n  apex-sim display input.asm 200 --config run.json"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Trace every stage each cycle, then print the final state.
    Simulate(RunArgs),
    /// Run silently, then print the final state.
    Display(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Program text file, one instruction per line.
    program: PathBuf,

    /// Number of cycles to simulate (overrides the config file).
    cycles: Option<u64>,

    /// JSON file with run parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final state as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (args, trace_stages) = match cli.command {
        Commands::Simulate(args) => (args, true),
        Commands::Display(args) => (args, false),
    };

    if let Err(e) = run(&args, trace_stages) {
        eprintln!("\n[!] Simulation aborted: {e}");
        process::exit(1);
    }
}

/// Installs the `tracing` subscriber; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads configuration and program, runs the simulation and reports the result.
fn run(args: &RunArgs, trace_stages: bool) -> SimResult<()> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                apex_pipe_core::SimError::InvalidConfig(format!(
                    "cannot read {}: {e}",
                    path.display()
                ))
            })?;
            let config = Config::from_json(&text)?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => Config::default(),
    };
    if let Some(cycles) = args.cycles {
        config = config.with_cycle_budget(cycles);
    }

    let mut sim = Simulator::from_source(&AsmFile::new(&args.program), &config)?;
    let mut console = ConsoleTrace;
    let mut silent = NullTrace;
    let trace: &mut dyn TraceSink = if trace_stages || config.general.trace_stages {
        &mut console
    } else {
        &mut silent
    };

    let outcome = sim.run(trace)?;
    let state: FinalState = sim.final_state();

    if args.json {
        println!("{}", state.to_json()?);
    } else {
        println!("\n[*] Simulation complete: {:?} at cycle {}", outcome.state, outcome.cycles);
        println!("{state}");
        sim.cpu.stats.print();
    }
    Ok(())
}
