//! The `physalia fengdoolittle` subcommand.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use physalia_io::write_alignment;
use physalia_msa::FengDoolittle;

use crate::common;

#[derive(Debug, Args)]
pub struct FengdoolittleCmd {
    /// Input FASTA file.
    #[arg(long = "in", value_name = "FASTA")]
    input: PathBuf,

    /// Output ClustalW file (default: stdout).
    #[arg(long = "out", value_name = "OUT")]
    output: Option<PathBuf>,

    /// Gap opening penalty.
    #[arg(short = 'o', value_name = "OPEN", default_value_t = 10.0)]
    gap_open: f64,

    /// Gap extension penalty.
    #[arg(short = 'e', value_name = "EXT", default_value_t = 0.1)]
    gap_extend: f64,

    /// Shuffle seed for the distance metric.
    #[arg(long, value_name = "SEED", default_value_t = 42)]
    seed: u64,
}

pub fn run(cmd: FengdoolittleCmd) -> Result<()> {
    let sequences = common::load_sequences(&cmd.input)?;
    let engine = FengDoolittle::new(cmd.gap_open, cmd.gap_extend, cmd.seed);
    log::info!("computing Feng-Doolittle alignment");
    let msa = engine.align(&sequences)?;

    let rows: Vec<(String, String)> = msa
        .sequences()
        .iter()
        .map(|s| (s.identifier().to_string(), s.residues().to_string()))
        .collect();
    common::emit(cmd.output.as_deref(), &write_alignment(&rows))
}
