//! The `physalia clustalw` subcommand.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use physalia_align::{AffineGap, MatrixFamily};
use physalia_io::write_alignment;
use physalia_msa::ClustalW;
use physalia_phylo::ClusteringMethod;

use crate::common;

#[derive(Debug, Args)]
pub struct ClustalwCmd {
    /// Input FASTA file.
    #[arg(long = "in", value_name = "FASTA")]
    input: PathBuf,

    /// Output ClustalW file (default: stdout).
    #[arg(long = "out", value_name = "OUT")]
    output: Option<PathBuf>,

    /// Substitution matrix: catalog name or matrix file.
    #[arg(short = 'm', value_name = "MATRIX", default_value = "BLOSUM62")]
    matrix: String,

    /// Gap opening penalty for the distance stage.
    #[arg(short = 'o', value_name = "OPEN", default_value_t = 10.0)]
    gap_open: f64,

    /// Gap extension penalty for the distance stage.
    #[arg(short = 'e', value_name = "EXT", default_value_t = 0.1)]
    gap_extend: f64,

    /// Distance criterion: 0 identity, 1 Levenshtein, 2 Feng-Doolittle.
    #[arg(short = 'd', value_name = "0|1|2", default_value_t = 0)]
    distance: u8,

    /// Clustering: 0 UPGMA, 1 Fitch-Margoliash, 2 Neighbor-Joining.
    #[arg(short = 'c', value_name = "0|1|2", default_value_t = 2)]
    clustering: u8,

    /// Matrix family for the progressive stage: 0 PAM, 1 BLOSUM.
    #[arg(short = 'n', value_name = "0|1", default_value_t = 1)]
    family: u8,

    /// Initial gap opening penalty for the progressive stage.
    #[arg(long = "wo", value_name = "OPEN", default_value_t = 10.0)]
    progressive_gap_open: f64,

    /// Initial gap extension penalty for the progressive stage.
    #[arg(long = "we", value_name = "EXT", default_value_t = 0.2)]
    progressive_gap_extend: f64,

    /// Shuffle seed for the Feng-Doolittle distance.
    #[arg(long, value_name = "SEED", default_value_t = 42)]
    seed: u64,
}

pub fn run(cmd: ClustalwCmd) -> Result<()> {
    let sequences = common::load_sequences(&cmd.input)?;
    let matrix = common::load_matrix(&cmd.matrix)?;
    let gap = AffineGap::new(cmd.gap_open, cmd.gap_extend);
    let metric = common::build_metric(cmd.distance, &matrix, gap, cmd.seed)?;

    let clustering = match cmd.clustering {
        0 => ClusteringMethod::Upgma,
        1 => ClusteringMethod::FitchMargoliash,
        2 => ClusteringMethod::NeighborJoining,
        other => bail!("invalid clustering algorithm '{}' (expected 0, 1 or 2)", other),
    };
    let family = match cmd.family {
        0 => MatrixFamily::Pam,
        1 => MatrixFamily::Blosum,
        other => bail!("invalid matrix family '{}' (expected 0 or 1)", other),
    };

    let engine = ClustalW::new(
        metric,
        clustering,
        family,
        cmd.progressive_gap_open,
        cmd.progressive_gap_extend,
    );
    log::info!("computing ClustalW alignment");
    let msa = engine.align(&sequences)?;

    let rows: Vec<(String, String)> = msa
        .sequences()
        .iter()
        .map(|s| (s.identifier().to_string(), s.residues().to_string()))
        .collect();
    common::emit(cmd.output.as_deref(), &write_alignment(&rows))
}
