use std::error::Error;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod store;

use commands::{
    bfs::{self, BfsArgs},
    convert::{self, ConvertArgs},
    inspect::{self, InspectArgs},
    random::{self, RandomArgs},
};

#[derive(Parser, Debug)]
#[command(name = "flownet", about = "Generate, inspect, traverse and convert graphs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a random graph or flow network and write it to disk.
    Random(RandomArgs),
    /// Print counts, properties and the canonical hash of a stored graph.
    Inspect(InspectArgs),
    /// Run a breadth-first search over a stored graph and print its ticks.
    Bfs(BfsArgs),
    /// Convert a flow network between `.max`, `.json` and `.bin`.
    Convert(ConvertArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Random(args) => random::run(&args),
        Command::Inspect(args) => inspect::run(&args),
        Command::Bfs(args) => bfs::run(&args),
        Command::Convert(args) => convert::run(&args),
    }
}

/// Logs go to stderr so that stdout carries only JSON reports.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
