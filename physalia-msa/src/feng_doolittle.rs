//! Feng-Doolittle progressive alignment.
//!
//! Distances come from the Feng-Doolittle metric over PAM250, the guide tree
//! from Fitch-Margoliash with midpoint rerooting. At every join the single
//! best-scoring sequence pair between the two groups is aligned, and its gap
//! pattern is imposed on every row of the respective group ("once a gap,
//! always a gap").

use std::collections::HashMap;

use physalia_align::{needleman_wunsch, AffineGap, MatrixId, PairwiseAlignment, SubstitutionMatrix};
use physalia_core::{PhysaliaError, Result};
use physalia_phylo::{fitch_margoliash, NodeId};
use physalia_seq::Sequence;

use crate::metric::DistanceMetric;
use crate::profile::MultipleAlignment;

/// The Feng-Doolittle progressive MSA engine.
#[derive(Debug, Clone, Copy)]
pub struct FengDoolittle {
    /// Gap opening penalty.
    pub gap_open: f64,
    /// Gap extension penalty.
    pub gap_extend: f64,
    /// Seed for the shuffle step of the distance metric.
    pub seed: u64,
}

impl FengDoolittle {
    /// Create an engine with the given penalties and shuffle seed.
    pub fn new(gap_open: f64, gap_extend: f64, seed: u64) -> Self {
        Self {
            gap_open,
            gap_extend,
            seed,
        }
    }

    /// Align a set of sequences into a multiple alignment.
    pub fn align(&self, sequences: &[Sequence]) -> Result<MultipleAlignment> {
        if sequences.len() < 2 {
            return Err(PhysaliaError::InvalidInput(
                "progressive alignment needs at least 2 sequences".into(),
            ));
        }

        let matrix = MatrixId::Pam250.table().shifted_to_zero();
        let gap = AffineGap::new(self.gap_open, self.gap_extend);

        let metric = DistanceMetric::feng_doolittle(&MatrixId::Pam250.table(), gap, self.seed);
        let distances = metric.build_matrix(sequences)?;
        let guide = fitch_margoliash(&distances)?.midpoint_root()?;

        let pool: HashMap<&str, &Sequence> = sequences
            .iter()
            .map(|s| (s.identifier(), s))
            .collect();

        // Explicit post-order walk instead of recursion: child profiles are
        // consumed as soon as their parent merges them.
        let mut profiles: HashMap<NodeId, MultipleAlignment> = HashMap::new();
        for id in guide.iter_postorder() {
            let node = guide
                .get_node(id)
                .ok_or_else(|| PhysaliaError::Internal("guide tree node vanished".into()))?;
            if node.is_leaf() {
                let name = node.name.as_deref().ok_or_else(|| {
                    PhysaliaError::Internal("unlabelled leaf in guide tree".into())
                })?;
                let sequence = pool.get(name).ok_or_else(|| {
                    PhysaliaError::Internal(format!("guide tree leaf '{}' has no sequence", name))
                })?;
                profiles.insert(id, MultipleAlignment::from_sequence((*sequence).clone()));
                continue;
            }
            let mut merged = profiles.remove(&node.children[0]).ok_or_else(|| {
                PhysaliaError::Internal("child profile missing in post-order".into())
            })?;
            for &child in &node.children[1..] {
                let other = profiles.remove(&child).ok_or_else(|| {
                    PhysaliaError::Internal("child profile missing in post-order".into())
                })?;
                merged = merge_best_pair(&merged, &other, &matrix, &gap)?;
            }
            profiles.insert(id, merged);
        }

        profiles
            .remove(&guide.root())
            .ok_or_else(|| PhysaliaError::Internal("guide tree produced no alignment".into()))
    }
}

impl Default for FengDoolittle {
    /// Pipeline defaults: penalties `(10.0, 0.1)`, seed 42.
    fn default() -> Self {
        Self::new(10.0, 0.1, 42)
    }
}

/// Align every row of `a` against every row of `b`, keep the best-scoring
/// pair, and impose its gap pattern on both groups.
fn merge_best_pair(
    a: &MultipleAlignment,
    b: &MultipleAlignment,
    matrix: &SubstitutionMatrix,
    gap: &AffineGap,
) -> Result<MultipleAlignment> {
    let degap = |s: &str| -> Vec<u8> {
        s.bytes().map(|c| if c == b'-' { b'X' } else { c }).collect()
    };

    let mut best: Option<PairwiseAlignment> = None;
    for row_a in a.sequences() {
        let x = degap(row_a.residues());
        for row_b in b.sequences() {
            let y = degap(row_b.residues());
            let aligned = needleman_wunsch(&x, &y, matrix, gap);
            if best.as_ref().map_or(true, |current| aligned.score > current.score) {
                best = Some(aligned);
            }
        }
    }
    let best = best
        .ok_or_else(|| PhysaliaError::Internal("cannot merge an empty profile".into()))?;

    // Thread each original row through the chosen row's gap pattern.
    let apply = |pattern: &str, residues: &str| -> String {
        let mut source = residues.bytes();
        pattern
            .bytes()
            .map(|c| {
                if c == b'-' {
                    '-'
                } else {
                    source.next().unwrap_or(b'-') as char
                }
            })
            .collect()
    };

    let mut rows = Vec::with_capacity(a.size() + b.size());
    for row in a.sequences() {
        rows.push(Sequence::from_normalized(
            row.identifier().into(),
            apply(&best.aligned_a, row.residues()),
        ));
    }
    for row in b.sequences() {
        rows.push(Sequence::from_normalized(
            row.identifier().into(),
            apply(&best.aligned_b, row.residues()),
        ));
    }
    MultipleAlignment::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequences(data: &[(&str, &str)]) -> Vec<Sequence> {
        data.iter().map(|(id, res)| Sequence::new(id, res)).collect()
    }

    fn five_test_sequences() -> Vec<Sequence> {
        sequences(&[
            ("Seq1", "MAAAAATLRGAMVGPRGAGLP"),
            ("Seq2", "MAAAAASLRGVVLGPRGAGL"),
            ("Seq3", "MTEFKAGSAKKGATLFKTRCL"),
            ("Seq4", "MAAAAASLRRTVLGPRGVGLPGASAPGLL"),
            ("Seq5", "MFSQKLLANGKLLSKLAIVSGVVG"),
        ])
    }

    #[test]
    fn identical_pair_aligns_without_gaps() {
        let engine = FengDoolittle::default();
        let msa = engine
            .align(&sequences(&[("a", "MKVLYAGHE"), ("b", "MKVLYAGHE")]))
            .unwrap();
        assert_eq!(msa.size(), 2);
        for row in msa.sequences() {
            assert_eq!(row.residues(), "MKVLYAGHE");
        }
    }

    #[test]
    fn five_sequences_produce_a_rectangular_alignment() {
        let engine = FengDoolittle::default();
        let input = five_test_sequences();
        let msa = engine.align(&input).unwrap();
        assert_eq!(msa.size(), 5);
        let length = msa.length();
        assert!(length >= 29, "alignment shorter than the longest input");
        for row in msa.sequences() {
            assert_eq!(row.len(), length);
        }
        // Every input sequence survives gap-stripping unchanged.
        for input_seq in &input {
            let row = msa
                .sequence(msa.position_of(input_seq.identifier()).unwrap())
                .unwrap();
            assert_eq!(row.residues().replace('-', ""), input_seq.residues());
        }
        assert_eq!(msa.consensus().len(), length);
    }

    #[test]
    fn same_seed_reproduces_the_alignment() {
        let engine = FengDoolittle::new(10.0, 0.1, 1234);
        let first = engine.align(&five_test_sequences()).unwrap();
        let second = engine.align(&five_test_sequences()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn close_pair_ends_up_adjacent_in_guide_order() {
        // Seq1/Seq2 are near-identical; their merge must happen below the
        // root, so both rows carry the same residues at the leading columns.
        let engine = FengDoolittle::default();
        let msa = engine.align(&five_test_sequences()).unwrap();
        let s1 = msa.sequence(msa.position_of("Seq1").unwrap()).unwrap();
        let s2 = msa.sequence(msa.position_of("Seq2").unwrap()).unwrap();
        assert_eq!(&s1.residues()[..4], &s2.residues()[..4]);
    }

    #[test]
    fn too_few_sequences_error() {
        let engine = FengDoolittle::default();
        assert!(engine.align(&sequences(&[("a", "MKV")])).is_err());
        assert!(engine.align(&[]).is_err());
    }
}
