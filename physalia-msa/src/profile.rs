//! Profile (multiple alignment) column statistics.

use physalia_core::{PhysaliaError, Result, Summarizable};
use physalia_seq::{is_hydrophilic, Sequence};

/// Residue ordering used for consensus tie-breaking.
const CONSENSUS_ORDER: &[u8] = b"ARNDCQEGHILKMFPSTWYVUBZX";

/// Window radius for hydrophilic-stretch detection.
const HYDROPHILIC_RANGE: usize = 5;

/// An ordered list of aligned sequences of identical length.
///
/// Every constructor enforces the single invariant: all rows share one
/// length. Column queries treat the alignment as a residue distribution,
/// which is what the profile-profile aligner consumes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultipleAlignment {
    sequences: Vec<Sequence>,
}

impl MultipleAlignment {
    /// Build a profile from aligned rows.
    pub fn new(sequences: Vec<Sequence>) -> Result<Self> {
        if let Some(first) = sequences.first() {
            for sequence in &sequences {
                if sequence.len() != first.len() {
                    return Err(PhysaliaError::Internal(format!(
                        "alignment rows differ in length: '{}' has {} columns, '{}' has {}",
                        first.identifier(),
                        first.len(),
                        sequence.identifier(),
                        sequence.len()
                    )));
                }
            }
        }
        Ok(Self { sequences })
    }

    /// A single-row profile.
    pub fn from_sequence(sequence: Sequence) -> Self {
        Self {
            sequences: vec![sequence],
        }
    }

    /// Number of rows.
    pub fn size(&self) -> usize {
        self.sequences.len()
    }

    /// Number of columns.
    pub fn length(&self) -> usize {
        self.sequences.first().map_or(0, Sequence::len)
    }

    /// Whether the profile has no rows.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// The aligned rows.
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// A row by index.
    pub fn sequence(&self, index: usize) -> Option<&Sequence> {
        self.sequences.get(index)
    }

    /// The row index of an identifier.
    pub fn position_of(&self, identifier: &str) -> Option<usize> {
        self.sequences
            .iter()
            .position(|s| s.identifier() == identifier)
    }

    /// The residues of one column, top to bottom.
    pub fn column(&self, position: usize) -> Vec<u8> {
        if position >= self.length() {
            return Vec::new();
        }
        self.sequences
            .iter()
            .filter_map(|s| s.residue(position))
            .collect()
    }

    /// How many rows carry `residue` at `position`.
    pub fn count(&self, residue: u8, position: usize) -> usize {
        self.column(position)
            .into_iter()
            .filter(|&r| r == residue)
            .count()
    }

    /// How many rows carry a gap at `position`. Out-of-range positions have
    /// no gaps.
    pub fn gap_count(&self, position: usize) -> usize {
        self.count(b'-', position)
    }

    /// How many rows carry a residue (non-gap) at `position`.
    pub fn non_gap_count(&self, position: usize) -> usize {
        self.column(position).len() - self.gap_count(position)
    }

    /// The fraction of rows carrying `residue` at `position`.
    pub fn frequency(&self, residue: u8, position: usize) -> f64 {
        if self.size() == 0 || position >= self.length() {
            return 0.0;
        }
        self.count(residue, position) as f64 / self.size() as f64
    }

    /// The consensus residue of one column: the most frequent non-gap
    /// residue, ties broken by the canonical residue ordering; `-` when the
    /// column is all gaps.
    pub fn consensus_at(&self, position: usize) -> u8 {
        let mut consensus = b'-';
        let mut max_count = 0;
        for &residue in CONSENSUS_ORDER {
            let count = self.count(residue, position);
            if count > max_count {
                max_count = count;
                consensus = residue;
            }
        }
        consensus
    }

    /// The consensus over all columns.
    pub fn consensus(&self) -> String {
        (0..self.length())
            .map(|p| self.consensus_at(p) as char)
            .collect()
    }

    /// The fraction of columns in which every row agrees with row 0,
    /// gaps included in the comparison.
    pub fn percent_identity(&self) -> f64 {
        let length = self.length();
        if length == 0 {
            return 0.0;
        }
        let conserved = (0..length)
            .filter(|&p| {
                let column = self.column(p);
                column.iter().all(|&r| r == column[0])
            })
            .count();
        conserved as f64 / length as f64
    }

    /// Whether any row has five consecutive hydrophilic residues inside the
    /// window of five columns on either side of `position`.
    pub fn has_hydrophilic_stretch(&self, position: usize) -> bool {
        let start = position.saturating_sub(HYDROPHILIC_RANGE);
        let end = (position + HYDROPHILIC_RANGE + 1).min(self.length());
        self.sequences.iter().any(|sequence| {
            let mut run = 0;
            for p in start..end {
                match sequence.residue(p) {
                    Some(r) if is_hydrophilic(r) => {
                        run += 1;
                        if run >= HYDROPHILIC_RANGE {
                            return true;
                        }
                    }
                    _ => run = 0,
                }
            }
            false
        })
    }
}

impl Summarizable for MultipleAlignment {
    fn summary(&self) -> String {
        format!(
            "MultipleAlignment: {} sequences x {} columns",
            self.size(),
            self.length()
        )
    }
}
