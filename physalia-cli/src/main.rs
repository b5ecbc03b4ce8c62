//! Command-line interface for the Physalia phylogenetics workspace.
//!
//! Subcommands live in their own modules:
//! - `clustalw_cmd.rs` — ClustalW multiple sequence alignment
//! - `fengdoolittle_cmd.rs` — Feng-Doolittle multiple sequence alignment
//! - `phyltree_cmd.rs` — distance-based phylogenetic trees

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

mod clustalw_cmd;
mod common;
mod fengdoolittle_cmd;
mod phyltree_cmd;

#[derive(Debug, Parser)]
#[command(
    name = "physalia",
    version,
    about = "Protein phylogenetics and progressive multiple sequence alignment",
    disable_help_subcommand = true
)]
struct Cli {
    /// Verbose progress output.
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// ClustalW multiple sequence alignment with weights and matrix selection.
    Clustalw(clustalw_cmd::ClustalwCmd),
    /// Feng-Doolittle multiple sequence alignment.
    Fengdoolittle(fengdoolittle_cmd::FengdoolittleCmd),
    /// Build a phylogenetic tree and print it as Newick.
    Phyltree(phyltree_cmd::PhyltreeCmd),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        })
        .init();

    match cli.command {
        Command::Clustalw(cmd) => clustalw_cmd::run(cmd),
        Command::Fengdoolittle(cmd) => fengdoolittle_cmd::run(cmd),
        Command::Phyltree(cmd) => phyltree_cmd::run(cmd),
    }
}
