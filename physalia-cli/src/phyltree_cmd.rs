//! The `physalia phyltree` subcommand.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use physalia_align::AffineGap;
use physalia_phylo::ClusteringMethod;

use crate::common;

#[derive(Debug, Args)]
pub struct PhyltreeCmd {
    /// Input FASTA file.
    #[arg(long = "in", value_name = "FASTA")]
    input: PathBuf,

    /// Output Newick file (default: stdout).
    #[arg(long = "out", value_name = "OUT")]
    output: Option<PathBuf>,

    /// Substitution matrix: catalog name or matrix file.
    #[arg(short = 'm', value_name = "MATRIX", default_value = "BLOSUM62")]
    matrix: String,

    /// Gap opening penalty.
    #[arg(short = 'o', value_name = "OPEN", default_value_t = 10.0)]
    gap_open: f64,

    /// Gap extension penalty.
    #[arg(short = 'e', value_name = "EXT", default_value_t = 0.1)]
    gap_extend: f64,

    /// Distance criterion: 0 identity, 1 Levenshtein, 2 Feng-Doolittle.
    #[arg(short = 'd', value_name = "0|1|2", default_value_t = 0)]
    distance: u8,

    /// Clustering: 0 UPGMA, 1 Neighbor-Joining.
    #[arg(short = 'c', value_name = "0|1", default_value_t = 1)]
    clustering: u8,

    /// Shuffle seed for the Feng-Doolittle distance.
    #[arg(long, value_name = "SEED", default_value_t = 42)]
    seed: u64,
}

pub fn run(cmd: PhyltreeCmd) -> Result<()> {
    let sequences = common::load_sequences(&cmd.input)?;
    let matrix = common::load_matrix(&cmd.matrix)?;
    let gap = AffineGap::new(cmd.gap_open, cmd.gap_extend);
    let metric = common::build_metric(cmd.distance, &matrix, gap, cmd.seed)?;

    let clustering = match cmd.clustering {
        0 => ClusteringMethod::Upgma,
        1 => ClusteringMethod::NeighborJoining,
        other => bail!("invalid clustering algorithm '{}' (expected 0 or 1)", other),
    };

    log::info!("computing distance matrix");
    let distances = metric.build_matrix(&sequences)?;
    log::info!("building guide tree");
    let tree = clustering.build_tree(&distances)?;
    let newick = tree.to_newick()?;

    common::emit(cmd.output.as_deref(), &format!("{}\n", newick))
}
