use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    convert_table::{self, ConvertTableArgs},
    kinematics::{self, KinematicsArgs},
    p_coal::{self, PCoalArgs},
    version::{self, VersionArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "crxs", about = "Antinuclei production cross-section toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transform a LAB-frame product point into the CM frame.
    Kinematics(KinematicsArgs),
    /// Evaluate a coalescence momentum model over projectile energies.
    PCoal(PCoalArgs),
    /// Convert a published cross-section table into annotated fixed-width text.
    ConvertTable(ConvertTableArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crxs=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Kinematics(args) => kinematics::run(&args),
        Command::PCoal(args) => p_coal::run(&args),
        Command::ConvertTable(args) => convert_table::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
