//! Profile-profile alignment with position-specific gap penalties.
//!
//! The ClustalW refinement of global alignment: substitution scores are
//! weighted averages over the two residue columns, and the affine gap
//! penalties are modulated per column by existing gaps, nearby gaps,
//! hydrophilic stretches, and the Pascarella-Argos residue factors.

use std::collections::HashMap;

use physalia_align::SubstitutionMatrix;
use physalia_core::Result;
use physalia_seq::Sequence;

use crate::profile::MultipleAlignment;

/// Columns searched on either side of a position for nearby gaps.
const GAP_SEARCH_DISTANCE: usize = 8;

/// Pascarella-Argos residue-specific gap modification factor.
/// Residues outside the published table count as 1.0.
fn pascarella_factor(residue: u8) -> f64 {
    match residue {
        b'A' => 1.13,
        b'C' => 1.13,
        b'D' => 0.96,
        b'E' => 1.31,
        b'F' => 1.20,
        b'G' => 0.61,
        b'H' => 1.00,
        b'I' => 1.32,
        b'K' => 0.96,
        b'L' => 1.21,
        b'M' => 1.29,
        b'N' => 0.63,
        b'P' => 0.74,
        b'Q' => 1.07,
        b'R' => 0.72,
        b'S' => 0.76,
        b'T' => 0.89,
        b'V' => 1.25,
        b'W' => 1.23,
        b'Y' => 1.00,
        _ => 1.00,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    None,
    Diag,
    Up,
    Left,
}

/// Aligns two profiles under a substitution matrix, per-sequence weights and
/// position-specific affine gap penalties.
///
/// The matrix is expected to be shifted so its minimum score is zero.
/// Sequences without an entry in the weight table weigh 1.0.
pub struct ProfileAligner<'a> {
    matrix: &'a SubstitutionMatrix,
    weights: &'a HashMap<String, f64>,
    gap_open: f64,
    gap_extend: f64,
}

impl<'a> ProfileAligner<'a> {
    /// Create an aligner from a shifted matrix, weights and initial penalties.
    pub fn new(
        matrix: &'a SubstitutionMatrix,
        weights: &'a HashMap<String, f64>,
        gap_open: f64,
        gap_extend: f64,
    ) -> Self {
        Self {
            matrix,
            weights,
            gap_open,
            gap_extend,
        }
    }

    /// The initial gap-opening penalty for placing gaps along `a`.
    fn initial_gop(&self, a: &MultipleAlignment, b: &MultipleAlignment) -> f64 {
        let shorter = a.length().min(b.length()) as f64;
        self.gap_open + shorter.ln() * self.matrix.avg_score() * a.percent_identity()
    }

    /// The initial gap-extension penalty; symmetric in the two profiles.
    fn initial_gep(&self, a: &MultipleAlignment, b: &MultipleAlignment) -> f64 {
        let ratio = a.length() as f64 / b.length() as f64;
        self.gap_extend * (1.0 + ratio.ln().abs())
    }

    /// Position-specific gap-opening penalty along `profile`.
    fn position_gop(profile: &MultipleAlignment, position: usize, initial: f64) -> f64 {
        let gaps = profile.gap_count(position);
        if gaps > 0 {
            return initial * 0.3 * (1.0 - gaps as f64 / profile.size() as f64);
        }
        for distance in 1..=GAP_SEARCH_DISTANCE {
            let before = position
                .checked_sub(distance)
                .map_or(0, |p| profile.gap_count(p));
            let after = profile.gap_count(position + distance);
            if before + after > 0 {
                return initial * (4.0 - distance as f64 / 4.0);
            }
        }
        if profile.has_hydrophilic_stretch(position) {
            return initial * 2.0 / 3.0;
        }
        let column = profile.column(position);
        let average =
            column.iter().map(|&r| pascarella_factor(r)).sum::<f64>() / column.len() as f64;
        initial * average
    }

    /// Position-specific gap-extension penalty along `profile`.
    fn position_gep(profile: &MultipleAlignment, position: usize, initial: f64) -> f64 {
        if profile.gap_count(position) > 0 {
            initial * 0.5
        } else {
            initial
        }
    }

    /// Align two profiles into a joint alignment carrying all rows of both.
    pub fn align(
        &self,
        a: &MultipleAlignment,
        b: &MultipleAlignment,
    ) -> Result<MultipleAlignment> {
        if a.is_empty() {
            return Ok(b.clone());
        }
        if b.is_empty() {
            return Ok(a.clone());
        }

        let m = a.length();
        let n = b.length();

        // A zero-width profile contributes all-gap rows against the other.
        if m == 0 || n == 0 {
            let mut rows = Vec::with_capacity(a.size() + b.size());
            for s in a.sequences() {
                let residues = if m == 0 { "-".repeat(n) } else { s.residues().into() };
                rows.push(Sequence::from_normalized(s.identifier().into(), residues));
            }
            for s in b.sequences() {
                let residues = if n == 0 { "-".repeat(m) } else { s.residues().into() };
                rows.push(Sequence::from_normalized(s.identifier().into(), residues));
            }
            return MultipleAlignment::new(rows);
        }

        // Per-position penalties, derived once per alignment.
        let gop_a_init = self.initial_gop(a, b);
        let gop_b_init = self.initial_gop(b, a);
        let gep_init = self.initial_gep(a, b);
        let gop_a: Vec<f64> = (0..m).map(|p| Self::position_gop(a, p, gop_a_init)).collect();
        let gop_b: Vec<f64> = (0..n).map(|p| Self::position_gop(b, p, gop_b_init)).collect();
        let gep_a: Vec<f64> = (0..m).map(|p| Self::position_gep(a, p, gep_init)).collect();
        let gep_b: Vec<f64> = (0..n).map(|p| Self::position_gep(b, p, gep_init)).collect();

        // Column and weight caches for the scoring sum.
        let cols_a: Vec<Vec<u8>> = (0..m).map(|p| a.column(p)).collect();
        let cols_b: Vec<Vec<u8>> = (0..n).map(|p| b.column(p)).collect();
        let weight_of = |s: &Sequence| self.weights.get(s.identifier()).copied().unwrap_or(1.0);
        let weights_a: Vec<f64> = a.sequences().iter().map(weight_of).collect();
        let weights_b: Vec<f64> = b.sequences().iter().map(weight_of).collect();
        let pair_norm = (a.size() * b.size()) as f64;

        let column_score = |j: usize, i: usize| -> f64 {
            let mut sum = 0.0;
            for (ra, &wa) in cols_a[j].iter().zip(&weights_a) {
                if *ra == b'-' {
                    continue;
                }
                for (rb, &wb) in cols_b[i].iter().zip(&weights_b) {
                    if *rb == b'-' {
                        continue;
                    }
                    sum += wa * wb * self.matrix.score(*ra, *rb) as f64;
                }
            }
            sum / pair_norm
        };

        let cols = m + 1;
        let mut score = vec![0.0f64; (n + 1) * cols];
        let mut dir = vec![Direction::None; (n + 1) * cols];
        let idx = |i: usize, j: usize| -> usize { i * cols + j };

        for j in 1..=m {
            score[idx(0, j)] = -(gop_a[0] + gep_a[j - 1] * (j - 1) as f64);
            dir[idx(0, j)] = Direction::Left;
        }
        for i in 1..=n {
            score[idx(i, 0)] = -(gop_b[0] + gep_b[i - 1] * (i - 1) as f64);
            dir[idx(i, 0)] = Direction::Up;
        }

        for i in 1..=n {
            for j in 1..=m {
                let hgap = if dir[idx(i, j - 1)] == Direction::Left {
                    gep_a[j - 1]
                } else {
                    gop_a[j - 1]
                };
                let vgap = if dir[idx(i - 1, j)] == Direction::Up {
                    gep_b[i - 1]
                } else {
                    gop_b[i - 1]
                };

                let diag = score[idx(i - 1, j - 1)] + column_score(j - 1, i - 1);
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

        // Traceback: every step emits one joint column.
        let mut rows_a: Vec<Vec<u8>> = vec![Vec::new(); a.size()];
        let mut rows_b: Vec<Vec<u8>> = vec![Vec::new(); b.size()];
        let (mut i, mut j) = (n, m);
        loop {
            match dir[idx(i, j)] {
                Direction::None => break,
                Direction::Diag => {
                    i -= 1;
                    j -= 1;
                    for (row, &r) in rows_a.iter_mut().zip(&cols_a[j]) {
                        row.push(r);
                    }
                    for (row, &r) in rows_b.iter_mut().zip(&cols_b[i]) {
                        row.push(r);
                    }
                }
                Direction::Up => {
                    i -= 1;
                    for row in &mut rows_a {
                        row.push(b'-');
                    }
                    for (row, &r) in rows_b.iter_mut().zip(&cols_b[i]) {
                        row.push(r);
                    }
                }
                Direction::Left => {
                    j -= 1;
                    for (row, &r) in rows_a.iter_mut().zip(&cols_a[j]) {
                        row.push(r);
                    }
                    for row in &mut rows_b {
                        row.push(b'-');
                    }
                }
            }
        }

        let mut sequences = Vec::with_capacity(a.size() + b.size());
        for (source, row) in a.sequences().iter().zip(rows_a) {
            let mut row = row;
            row.reverse();
            sequences.push(Sequence::from_normalized(
                source.identifier().into(),
                String::from_utf8_lossy(&row).into_owned(),
            ));
        }
        for (source, row) in b.sequences().iter().zip(rows_b) {
            let mut row = row;
            row.reverse();
            sequences.push(Sequence::from_normalized(
                source.identifier().into(),
                String::from_utf8_lossy(&row).into_owned(),
            ));
        }
        MultipleAlignment::new(sequences)
    }
}
