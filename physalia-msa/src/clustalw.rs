//! ClustalW progressive alignment.
//!
//! Profile-profile schedule over a guide tree, with tree-derived sequence
//! weights, divergence-driven substitution-matrix selection, and the
//! position-specific gap machinery of [`crate::profile_align`].

use std::collections::HashMap;

use physalia_align::{MatrixFamily, MatrixId, SubstitutionMatrix};
use physalia_core::{PhysaliaError, Result};
use physalia_phylo::{ClusteringMethod, NodeId, PhyloTree};
use physalia_seq::Sequence;

use crate::metric::DistanceMetric;
use crate::profile::MultipleAlignment;
use crate::profile_align::ProfileAligner;

/// The ClustalW progressive MSA engine.
#[derive(Debug, Clone)]
pub struct ClustalW {
    /// Metric used for the distance matrix.
    pub metric: DistanceMetric,
    /// Guide-tree clustering algorithm.
    pub clustering: ClusteringMethod,
    /// Substitution-matrix family for the progressive stage.
    pub family: MatrixFamily,
    /// Initial gap opening penalty of the progressive stage.
    pub gap_open: f64,
    /// Initial gap extension penalty of the progressive stage.
    pub gap_extend: f64,
}

impl ClustalW {
    /// Create an engine from its five configuration axes.
    pub fn new(
        metric: DistanceMetric,
        clustering: ClusteringMethod,
        family: MatrixFamily,
        gap_open: f64,
        gap_extend: f64,
    ) -> Self {
        Self {
            metric,
            clustering,
            family,
            gap_open,
            gap_extend,
        }
    }

    /// Align a set of sequences into a multiple alignment.
    pub fn align(&self, sequences: &[Sequence]) -> Result<MultipleAlignment> {
        if sequences.len() < 2 {
            return Err(PhysaliaError::InvalidInput(
                "progressive alignment needs at least 2 sequences".into(),
            ));
        }

        let distances = self.metric.build_matrix(sequences)?;
        let guide = self.clustering.build_tree(&distances)?.into_rooted()?;
        let weights = sequence_weights(&guide);
        let max_distance = guide.max_leaf_distance();

        let pool: HashMap<&str, &Sequence> = sequences
            .iter()
            .map(|s| (s.identifier(), s))
            .collect();

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
                let raw = guide.path_distance(node.children[0], child)?;
                let divergence = if max_distance > 0.0 {
                    raw / max_distance
                } else {
                    0.0
                };
                let matrix = self.matrix_for_divergence(divergence);
                let aligner =
                    ProfileAligner::new(&matrix, &weights, self.gap_open, self.gap_extend);
                merged = aligner.align(&merged, &other)?;
            }
            profiles.insert(id, merged);
        }

        profiles
            .remove(&guide.root())
            .ok_or_else(|| PhysaliaError::Internal("guide tree produced no alignment".into()))
    }

    /// Pick the family matrix for a normalized divergence, shifted so the
    /// minimum score is zero. A missing divergence (`NaN`) counts as 0.
    pub fn matrix_for_divergence(&self, divergence: f64) -> SubstitutionMatrix {
        let d = if divergence.is_nan() { 0.0 } else { divergence };
        let id = match self.family {
            MatrixFamily::Pam => {
                if d >= 0.8 {
                    MatrixId::Pam20
                } else if d >= 0.6 {
                    MatrixId::Pam60
                } else if d >= 0.4 {
                    MatrixId::Pam120
                } else {
                    MatrixId::Pam350
                }
            }
            MatrixFamily::Blosum => {
                if d >= 0.8 {
                    MatrixId::Blosum80
                } else if d >= 0.6 {
                    MatrixId::Blosum62
                } else if d >= 0.3 {
                    MatrixId::Blosum45
                } else {
                    MatrixId::Blosum30
                }
            }
        };
        id.table().shifted_to_zero()
    }
}

/// Tree-derived sequence weights.
///
/// Each leaf starts from its pendant edge and walks to the root, adding every
/// edge's length divided by the number of leaves below it (the walk starts at
/// the leaf itself, so the pendant edge also contributes a second time, over
/// its single leaf). Weights are normalized by the maximum; a degenerate
/// all-zero tree weighs every sequence 1.0.
pub fn sequence_weights(guide: &PhyloTree) -> HashMap<String, f64> {
    let mut weights: HashMap<String, f64> = HashMap::new();
    let mut max_weight = 0.0f64;

    for leaf in guide.leaves() {
        let node = match guide.get_node(leaf) {
            Some(node) => node,
            None => continue,
        };
        let name = match &node.name {
            Some(name) => name.clone(),
            None => continue,
        };
        let mut weight = node.branch_length.unwrap_or(0.0);
        let mut current = leaf;
        while let Some(node) = guide.get_node(current) {
            let parent = match node.parent {
                Some(parent) => parent,
                None => break,
            };
            weight += node.branch_length.unwrap_or(0.0) / guide.leaves_below(current) as f64;
            current = parent;
        }
        max_weight = max_weight.max(weight);
        weights.insert(name, weight);
    }

    if max_weight > 0.0 {
        for weight in weights.values_mut() {
            *weight /= max_weight;
        }
    } else {
        for weight in weights.values_mut() {
            *weight = 1.0;
        }
    }
    weights
}

#[cfg(test)]
mod tests {
    use super::*;
    use physalia_align::AffineGap;

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

    fn default_engine() -> ClustalW {
        ClustalW::new(
            DistanceMetric::identity_percentage(&MatrixId::Blosum62.table(), AffineGap::default()),
            ClusteringMethod::NeighborJoining,
            MatrixFamily::Blosum,
            10.0,
            0.2,
        )
    }

    #[test]
    fn identical_pair_aligns_without_gaps() {
        let engine = default_engine();
        let msa = engine
            .align(&sequences(&[("a", "MKVLYAGHE"), ("b", "MKVLYAGHE")]))
            .unwrap();
        assert_eq!(msa.size(), 2);
        assert_eq!(msa.length(), 9);
        for row in msa.sequences() {
            assert_eq!(row.residues(), "MKVLYAGHE");
        }
    }

    #[test]
    fn five_sequences_produce_a_rectangular_alignment() {
        let engine = default_engine();
        let input = five_test_sequences();
        let msa = engine.align(&input).unwrap();
        assert_eq!(msa.size(), 5);
        let length = msa.length();
        assert!(length >= 29);
        for row in msa.sequences() {
            assert_eq!(row.len(), length);
        }
        for input_seq in &input {
            let row = msa
                .sequence(msa.position_of(input_seq.identifier()).unwrap())
                .unwrap();
            assert_eq!(row.residues().replace('-', ""), input_seq.residues());
        }
        assert_eq!(msa.consensus().len(), length);
    }

    #[test]
    fn works_with_every_metric_and_clustering() {
        let input = five_test_sequences();
        let metrics = [
            DistanceMetric::identity_percentage(&MatrixId::Blosum62.table(), AffineGap::default()),
            DistanceMetric::levenshtein(),
            DistanceMetric::feng_doolittle(&MatrixId::Blosum62.table(), AffineGap::default(), 42),
        ];
        let clusterings = [
            ClusteringMethod::Upgma,
            ClusteringMethod::FitchMargoliash,
            ClusteringMethod::NeighborJoining,
        ];
        for metric in &metrics {
            for &clustering in &clusterings {
                let engine = ClustalW::new(
                    metric.clone(),
                    clustering,
                    MatrixFamily::Blosum,
                    10.0,
                    0.2,
                );
                let msa = engine.align(&input).unwrap();
                assert_eq!(msa.size(), 5);
            }
        }
    }

    #[test]
    fn pam_family_ladder() {
        let engine = ClustalW::new(
            DistanceMetric::levenshtein(),
            ClusteringMethod::NeighborJoining,
            MatrixFamily::Pam,
            10.0,
            0.2,
        );
        assert_eq!(engine.matrix_for_divergence(0.9).name(), "PAM20");
        assert_eq!(engine.matrix_for_divergence(0.7).name(), "PAM60");
        assert_eq!(engine.matrix_for_divergence(0.5).name(), "PAM120");
        assert_eq!(engine.matrix_for_divergence(0.1).name(), "PAM350");
        assert_eq!(engine.matrix_for_divergence(f64::NAN).name(), "PAM350");
    }

    #[test]
    fn blosum_family_ladder() {
        let engine = default_engine();
        assert_eq!(engine.matrix_for_divergence(0.85).name(), "BLOSUM80");
        assert_eq!(engine.matrix_for_divergence(0.6).name(), "BLOSUM62");
        assert_eq!(engine.matrix_for_divergence(0.35).name(), "BLOSUM45");
        assert_eq!(engine.matrix_for_divergence(0.0).name(), "BLOSUM30");
        assert_eq!(engine.matrix_for_divergence(f64::NAN).name(), "BLOSUM30");
        // The selected tables come shifted to a zero minimum.
        assert_eq!(engine.matrix_for_divergence(0.85).min_score(), 0);
    }

    #[test]
    fn weights_are_normalized_to_unit_maximum() {
        let guide =
            PhyloTree::from_newick("((A:0.1,B:0.4):0.2,(C:0.3,D:0.6):0.1);").unwrap();
        let weights = sequence_weights(&guide);
        assert_eq!(weights.len(), 4);
        let max = weights.values().cloned().fold(0.0, f64::max);
        assert!((max - 1.0).abs() < 1e-12);
        // The longer pendant edges carry the larger weights.
        assert!(weights["D"] > weights["C"]);
        assert!(weights["B"] > weights["A"]);
    }

    #[test]
    fn zero_length_tree_weighs_everything_one() {
        let guide = PhyloTree::from_newick("((A:0,B:0):0,C:0);").unwrap();
        let weights = sequence_weights(&guide);
        for (_, w) in weights {
            assert_eq!(w, 1.0);
        }
    }

    #[test]
    fn leaf_weight_doubles_its_pendant_edge() {
        // Leaf A: pendant 0.1 counted twice, plus 0.2 shared over 2 leaves.
        let guide = PhyloTree::from_newick("((A:0.1,B:0.4):0.2,C:0.5);").unwrap();
        let weights = sequence_weights(&guide);
        let raw_a = 0.1 + 0.1 + 0.2 / 2.0;
        let raw_b = 0.4 + 0.4 + 0.2 / 2.0;
        let raw_c: f64 = 0.5 + 0.5;
        let max = raw_c.max(raw_b);
        assert!((weights["A"] - raw_a / max).abs() < 1e-12);
        assert!((weights["B"] - raw_b / max).abs() < 1e-12);
        assert!((weights["C"] - raw_c / max).abs() < 1e-12);
    }

    #[test]
    fn huge_opening_penalty_forbids_gaps_on_equal_lengths() {
        let input = sequences(&[
            ("a", "MKVLYAARNDCEQGH"),
            ("b", "MKVLYAVRNDCEQGH"),
            ("c", "MKVLYAARNDCEQGY"),
        ]);
        let strict = ClustalW::new(
            DistanceMetric::levenshtein(),
            ClusteringMethod::NeighborJoining,
            MatrixFamily::Blosum,
            1000.0,
            0.2,
        );
        let msa = strict.align(&input).unwrap();
        assert_eq!(msa.length(), 15);
        for row in msa.sequences() {
            assert!(!row.residues().contains('-'));
        }
        // Looser penalties can only lose gapless columns, never gain them.
        let loose = default_engine();
        let loose_msa = loose.align(&input).unwrap();
        let gapless = |m: &MultipleAlignment| {
            (0..m.length()).filter(|&p| m.gap_count(p) == 0).count()
        };
        assert!(gapless(&msa) >= gapless(&loose_msa));
    }

    #[test]
    fn too_few_sequences_error() {
        let engine = default_engine();
        assert!(engine.align(&sequences(&[("a", "MKV")])).is_err());
    }
}
