//! Global Needleman-Wunsch alignment with affine gap penalties.
//!
//! Uses a single score matrix with a traceback matrix; whether a gap costs
//! `open` or `extend` depends on the direction recorded in the neighboring
//! cell (open on a direction change, extend on a continuation). Ties in the
//! three-way maximum prefer diagonal, then up, then left.

use physalia_core::Scored;

use crate::gap::AffineGap;
use crate::matrix::SubstitutionMatrix;

/// The outcome of a global pairwise alignment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairwiseAlignment {
    /// Final alignment score.
    pub score: f64,
    /// First sequence with `-` for gaps.
    pub aligned_a: String,
    /// Second sequence with `-` for gaps.
    pub aligned_b: String,
}

impl Scored for PairwiseAlignment {
    fn score(&self) -> f64 {
        self.score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    None,
    Diag,
    Up,
    Left,
}

/// Globally align two sequences.
///
/// `matrix` supplies the substitution scores (callers shift it so the minimum
/// cell is zero); `gap` is the affine gap cost. An empty sequence is padded
/// with gaps against the other; this never fails.
pub fn needleman_wunsch(
    a: &[u8],
    b: &[u8],
    matrix: &SubstitutionMatrix,
    gap: &AffineGap,
) -> PairwiseAlignment {
    let m = a.len();
    let n = b.len();

    if m == 0 || n == 0 {
        let longer = m.max(n);
        let score = -gap.penalty(longer);
        let pad: String = "-".repeat(longer);
        let other: String = String::from_utf8_lossy(if m == 0 { b } else { a }).into_owned();
        return if m == 0 {
            PairwiseAlignment {
                score: if n == 0 { 0.0 } else { score },
                aligned_a: pad,
                aligned_b: other,
            }
        } else {
            PairwiseAlignment {
                score,
                aligned_a: other,
                aligned_b: pad,
            }
        };
    }

    let cols = n + 1;
    let mut score = vec![0.0f64; (m + 1) * cols];
    let mut dir = vec![Direction::None; (m + 1) * cols];
    let idx = |i: usize, j: usize| -> usize { i * cols + j };

    for i in 1..=m {
        score[idx(i, 0)] = -gap.penalty(i);
        dir[idx(i, 0)] = Direction::Up;
    }
    for j in 1..=n {
        score[idx(0, j)] = -gap.penalty(j);
        dir[idx(0, j)] = Direction::Left;
    }

    for i in 1..=m {
        for j in 1..=n {
            // Affine: a gap opens on a direction change and extends otherwise.
            let vgap = if dir[idx(i - 1, j)] == Direction::Up {
                gap.extend
            } else {
                gap.open
            };
            let hgap = if dir[idx(i, j - 1)] == Direction::Left {
                gap.extend
            } else {
                gap.open
            };

            let diag = score[idx(i - 1, j - 1)] + matrix.score(a[i - 1], b[j - 1]) as f64;
            let up = score[idx(i - 1, j)] - vgap;
            let left = score[idx(i, j - 1)] - hgap;

            let (best, d) = if diag >= up && diag >= left {
                (diag, Direction::Diag)
            } else if up >= left {
                (up, Direction::Up)
            } else {
                (left, Direction::Left)
            };
            score[idx(i, j)] = best;
            dir[idx(i, j)] = d;
        }
    }

    // Traceback from (m, n).
    let mut aligned_a = Vec::with_capacity(m + n);
    let mut aligned_b = Vec::with_capacity(m + n);
    let (mut i, mut j) = (m, n);
    loop {
        match dir[idx(i, j)] {
            Direction::None => break,
            Direction::Diag => {
                i -= 1;
                j -= 1;
                aligned_a.push(a[i]);
                aligned_b.push(b[j]);
            }
            Direction::Up => {
                i -= 1;
                aligned_a.push(a[i]);
                aligned_b.push(b'-');
            }
            Direction::Left => {
                j -= 1;
                aligned_a.push(b'-');
                aligned_b.push(b[j]);
            }
        }
    }
    aligned_a.reverse();
    aligned_b.reverse();

    PairwiseAlignment {
        score: score[idx(m, n)],
        aligned_a: String::from_utf8_lossy(&aligned_a).into_owned(),
        aligned_b: String::from_utf8_lossy(&aligned_b).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MatrixId;

    fn blosum62_shifted() -> SubstitutionMatrix {
        MatrixId::Blosum62.table().shifted_to_zero()
    }

    #[test]
    fn identical_sequences_align_without_gaps() {
        let m = blosum62_shifted();
        let gap = AffineGap::new(10.0, 0.1);
        let result = needleman_wunsch(b"HEAGAWGHEE", b"HEAGAWGHEE", &m, &gap);
        assert_eq!(result.aligned_a, "HEAGAWGHEE");
        assert_eq!(result.aligned_b, "HEAGAWGHEE");
        let expected: f64 = b"HEAGAWGHEE".iter().map(|&r| m.score(r, r) as f64).sum();
        assert!((result.score - expected).abs() < 1e-9);
    }

    #[test]
    fn deletion_introduces_one_gap() {
        let m = blosum62_shifted();
        let gap = AffineGap::new(10.0, 0.1);
        let result = needleman_wunsch(b"MKVLYA", b"MKLYA", &m, &gap);
        assert_eq!(result.aligned_a.len(), result.aligned_b.len());
        assert_eq!(result.aligned_a, "MKVLYA");
        assert_eq!(result.aligned_b.matches('-').count(), 1);
    }

    #[test]
    fn unrelated_peptides_still_align_globally() {
        let m = blosum62_shifted();
        let gap = AffineGap::new(10.0, 0.1);
        let result = needleman_wunsch(b"HEAGAWGHEE", b"PAWHEAE", &m, &gap);
        assert_eq!(result.aligned_a.len(), result.aligned_b.len());
        assert!(result.aligned_a.len() >= 10);
    }

    #[test]
    fn empty_sequence_is_padded() {
        let m = blosum62_shifted();
        let gap = AffineGap::new(10.0, 0.1);
        let result = needleman_wunsch(b"", b"MKV", &m, &gap);
        assert_eq!(result.aligned_a, "---");
        assert_eq!(result.aligned_b, "MKV");
        assert!((result.score + 10.2).abs() < 1e-9);

        let result = needleman_wunsch(b"MKV", b"", &m, &gap);
        assert_eq!(result.aligned_a, "MKV");
        assert_eq!(result.aligned_b, "---");

        let result = needleman_wunsch(b"", b"", &m, &gap);
        assert_eq!(result.score, 0.0);
        assert!(result.aligned_a.is_empty() && result.aligned_b.is_empty());
    }

    #[test]
    fn ties_prefer_diagonal() {
        // With the identity matrix and free-ish gaps, a mismatch column and a
        // double gap can tie; the diagonal must win.
        let m = MatrixId::Identity.table();
        let gap = AffineGap::new(0.0, 0.0);
        let result = needleman_wunsch(b"A", b"R", &m, &gap);
        assert_eq!(result.aligned_a, "A");
        assert_eq!(result.aligned_b, "R");
    }

    #[test]
    fn gap_cost_is_affine_not_linear() {
        let m = blosum62_shifted();
        // A long gap should cost open + (k-1) * extend, far less than k * open.
        let gap = AffineGap::new(10.0, 0.1);
        let result = needleman_wunsch(b"MKVAAAA", b"MKV", &m, &gap);
        let matched: f64 = b"MKV".iter().map(|&r| m.score(r, r) as f64).sum();
        assert!((result.score - (matched - (10.0 + 3.0 * 0.1))).abs() < 1e-9);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::matrix::MatrixId;
    use proptest::prelude::*;

    fn protein_seq(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(
            proptest::sample::select(b"ARNDCEQGHILKMFPSTWYV".to_vec()),
            0..=max_len,
        )
    }

    proptest! {
        #[test]
        fn aligned_lengths_match(a in protein_seq(30), b in protein_seq(30)) {
            let m = MatrixId::Blosum62.table().shifted_to_zero();
            let gap = AffineGap::new(10.0, 0.1);
            let result = needleman_wunsch(&a, &b, &m, &gap);
            prop_assert_eq!(result.aligned_a.len(), result.aligned_b.len());
            prop_assert!(result.aligned_a.len() >= a.len().max(b.len()));
        }

        #[test]
        fn alignment_is_deterministic(a in protein_seq(30), b in protein_seq(30)) {
            let m = MatrixId::Blosum62.table().shifted_to_zero();
            let gap = AffineGap::new(10.0, 0.1);
            let r1 = needleman_wunsch(&a, &b, &m, &gap);
            let r2 = needleman_wunsch(&a, &b, &m, &gap);
            prop_assert_eq!(r1, r2);
        }

        #[test]
        fn gaps_never_face_gaps(a in protein_seq(20), b in protein_seq(20)) {
            let m = MatrixId::Blosum62.table().shifted_to_zero();
            let gap = AffineGap::new(10.0, 0.1);
            let result = needleman_wunsch(&a, &b, &m, &gap);
            for (x, y) in result.aligned_a.bytes().zip(result.aligned_b.bytes()) {
                prop_assert!(!(x == b'-' && y == b'-'));
            }
        }

        #[test]
        fn stripping_gaps_recovers_inputs(a in protein_seq(20), b in protein_seq(20)) {
            let m = MatrixId::Blosum62.table().shifted_to_zero();
            let gap = AffineGap::new(10.0, 0.1);
            let result = needleman_wunsch(&a, &b, &m, &gap);
            let stripped_a: Vec<u8> =
                result.aligned_a.bytes().filter(|&c| c != b'-').collect();
            let stripped_b: Vec<u8> =
                result.aligned_b.bytes().filter(|&c| c != b'-').collect();
            prop_assert_eq!(stripped_a, a);
            prop_assert_eq!(stripped_b, b);
        }
    }
}
