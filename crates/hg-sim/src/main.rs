use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    check::{self, CheckArgs},
    generate::{self, GenerateArgs},
    replay::{self, ReplayArgs},
    show::{self, ShowArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "hg-sim", about = "Hypergraph store scripting CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply an operation script to a fresh store and write its snapshot.
    Replay(ReplayArgs),
    /// Validate a snapshot and print its canonical hash.
    Check(CheckArgs),
    /// Print the contents of a snapshot.
    Show(ShowArgs),
    /// Write a seeded random operation script.
    Generate(GenerateArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("hg_sim=info".parse()?)
                .add_directive("hg_graph=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay(args) => replay::run(&args),
        Command::Check(args) => check::run(&args),
        Command::Show(args) => show::run(&args),
        Command::Generate(args) => generate::run(&args),
    }
}
