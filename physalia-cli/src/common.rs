//! Helpers shared by the subcommands.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use physalia_align::{AffineGap, MatrixId, SubstitutionMatrix};
use physalia_io::parse_matrix;
use physalia_msa::DistanceMetric;
use physalia_seq::{read_fasta, Sequence};

/// Read the input FASTA and require at least two sequences.
pub fn load_sequences(path: &Path) -> Result<Vec<Sequence>> {
    let sequences = read_fasta(path)
        .with_context(|| format!("cannot read input FASTA '{}'", path.display()))?;
    if sequences.len() < 2 {
        bail!(
            "input FASTA must contain at least two sequences (found {})",
            sequences.len()
        );
    }
    log::info!("loaded {} sequences", sequences.len());
    Ok(sequences)
}

/// Resolve a matrix argument: a catalog name (e.g. `BLOSUM62`, `PAM250`)
/// takes the precomputed table, anything else is opened as a matrix file.
pub fn load_matrix(spec: &str) -> Result<SubstitutionMatrix> {
    if let Ok(id) = spec.parse::<MatrixId>() {
        return Ok(id.table());
    }
    let text = fs::read_to_string(spec)
        .with_context(|| format!("cannot open substitution matrix '{}'", spec))?;
    parse_matrix(&text, spec)
        .with_context(|| format!("malformed substitution matrix file '{}'", spec))
}

/// Build the distance metric for a `-d` selector.
pub fn build_metric(
    selector: u8,
    matrix: &SubstitutionMatrix,
    gap: AffineGap,
    seed: u64,
) -> Result<DistanceMetric> {
    match selector {
        0 => Ok(DistanceMetric::identity_percentage(matrix, gap)),
        1 => Ok(DistanceMetric::levenshtein()),
        2 => Ok(DistanceMetric::feng_doolittle(matrix, gap, seed)),
        other => bail!("invalid distance criterion '{}' (expected 0, 1 or 2)", other),
    }
}

/// Write to the output file, or to stdout when no file was given.
pub fn emit(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("cannot write output '{}'", path.display())),
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}
