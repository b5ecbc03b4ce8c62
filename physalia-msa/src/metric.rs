//! Pairwise distance metrics and the all-pairs matrix builder.
//!
//! Three strategies, kept as a closed enum so the hot loops dispatch on a
//! plain match:
//!
//! - **IdentityPercentage** — `1 - identity` of the global alignment
//! - **Levenshtein** — plain edit distance, independent of any score matrix
//! - **FengDoolittle** — normalized alignment score against shuffled
//!   sequences, `-ln`-transformed

use physalia_align::{needleman_wunsch, AffineGap, SubstitutionMatrix};
use physalia_core::Result;
use physalia_phylo::DistanceMatrix;
use physalia_seq::Sequence;

use crate::rng::{shuffle, Xorshift64};

/// Strategy for turning a sequence pair into a distance.
#[derive(Debug, Clone)]
pub enum DistanceMetric {
    /// `1 - I/L` over the global alignment: `I` identical non-gap columns,
    /// `L` the longer non-gap length.
    IdentityPercentage {
        matrix: SubstitutionMatrix,
        gap: AffineGap,
    },
    /// Unit-cost edit distance on the raw residues.
    Levenshtein,
    /// `-ln(2(S_xy - S_r) / (S_xx + S_yy + 2 S_r))`, where `S_r` scores a
    /// pair of independently shuffled copies. The log argument is clamped to
    /// 1 whenever the numerator is non-positive.
    FengDoolittle {
        matrix: SubstitutionMatrix,
        gap: AffineGap,
        seed: u64,
    },
}

impl DistanceMetric {
    /// Identity-percentage metric over `matrix` (shifted so its minimum is 0).
    pub fn identity_percentage(matrix: &SubstitutionMatrix, gap: AffineGap) -> Self {
        DistanceMetric::IdentityPercentage {
            matrix: matrix.shifted_to_zero(),
            gap,
        }
    }

    /// Plain Levenshtein distance.
    pub fn levenshtein() -> Self {
        DistanceMetric::Levenshtein
    }

    /// Feng-Doolittle metric over `matrix` (shifted so its minimum is 0).
    /// The seed drives the shuffle step and makes the metric reproducible.
    pub fn feng_doolittle(matrix: &SubstitutionMatrix, gap: AffineGap, seed: u64) -> Self {
        DistanceMetric::FengDoolittle {
            matrix: matrix.shifted_to_zero(),
            gap,
            seed,
        }
    }

    /// The distance between two residue strings.
    pub fn compute_distance(&self, a: &str, b: &str) -> f64 {
        match self {
            DistanceMetric::IdentityPercentage { matrix, gap } => {
                identity_distance(a.as_bytes(), b.as_bytes(), matrix, gap)
            }
            DistanceMetric::Levenshtein => levenshtein(a.as_bytes(), b.as_bytes()),
            DistanceMetric::FengDoolittle { matrix, gap, seed } => {
                feng_doolittle_distance(a.as_bytes(), b.as_bytes(), matrix, gap, *seed)
            }
        }
    }

    /// All-pairs distance matrix over a sequence set, keyed by identifier.
    pub fn build_matrix(&self, sequences: &[Sequence]) -> Result<DistanceMatrix> {
        let mut matrix = DistanceMatrix::new();
        for sequence in sequences {
            matrix.add_otu(sequence.identifier());
        }
        for (i, a) in sequences.iter().enumerate() {
            for b in sequences.iter().skip(i + 1) {
                let d = self.compute_distance(a.residues(), b.residues());
                matrix.set(a.identifier(), b.identifier(), d);
            }
        }
        Ok(matrix)
    }
}

fn identity_distance(a: &[u8], b: &[u8], matrix: &SubstitutionMatrix, gap: &AffineGap) -> f64 {
    let non_gap = |s: &[u8]| s.iter().filter(|&&c| c != b'-').count();
    let longer = non_gap(a).max(non_gap(b));
    if longer == 0 {
        return 0.0;
    }
    let aligned = needleman_wunsch(a, b, matrix, gap);
    let identical = aligned
        .aligned_a
        .bytes()
        .zip(aligned.aligned_b.bytes())
        .filter(|&(x, y)| x == y && x != b'-')
        .count();
    1.0 - identical as f64 / longer as f64
}

fn levenshtein(a: &[u8], b: &[u8]) -> f64 {
    if a.is_empty() {
        return b.len() as f64;
    }
    if b.is_empty() {
        return a.len() as f64;
    }
    let mut costs: Vec<usize> = (0..=b.len()).collect();
    for (i, &ca) in a.iter().enumerate() {
        let mut corner = i;
        costs[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let upper = costs[j + 1];
            costs[j + 1] = if ca == cb {
                corner
            } else {
                costs[j].min(upper).min(corner) + 1
            };
            corner = upper;
        }
    }
    costs[b.len()] as f64
}

fn feng_doolittle_distance(
    a: &[u8],
    b: &[u8],
    matrix: &SubstitutionMatrix,
    gap: &AffineGap,
    seed: u64,
) -> f64 {
    // Internal gaps are not residues; score them as the unknown code.
    let degap = |s: &[u8]| -> Vec<u8> {
        s.iter()
            .map(|&c| if c == b'-' { b'X' } else { c })
            .collect()
    };
    let x = degap(a);
    let y = degap(b);

    let s_xx = needleman_wunsch(&x, &x, matrix, gap).score;
    let s_yy = needleman_wunsch(&y, &y, matrix, gap).score;
    let s_xy = needleman_wunsch(&x, &y, matrix, gap).score;

    let mut rng = Xorshift64::new(seed);
    let mut xr = x.clone();
    let mut yr = y.clone();
    shuffle(&mut xr, &mut rng);
    shuffle(&mut yr, &mut rng);
    let s_r = needleman_wunsch(&xr, &yr, matrix, gap).score;

    let ratio = 2.0 * (s_xy - s_r) / (s_xx + s_yy + 2.0 * s_r);
    if ratio > 0.0 {
        -ratio.ln()
    } else {
        // Degenerate ratio: clamp the log argument to 1.
        0.0
    }
}
