//! Symmetric OTU-to-OTU distance storage.

use indexmap::IndexMap;
use physalia_core::Summarizable;

/// A symmetric distance function over a set of OTU labels.
///
/// Distances are stored once per unordered pair, keyed with the
/// lexicographically smaller label first, and iterated in insertion order.
/// A pair that was never set reads as the largest finite distance, and
/// `d(x, x)` is always zero. Minimum/maximum scans resolve ties in favor of
/// the entry inserted first.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    otus: Vec<String>,
    entries: IndexMap<(String, String), f64>,
}

/// Distance read back for a pair that was never set.
pub const UNSET_DISTANCE: f64 = f64::MAX;

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl DistanceMatrix {
    /// An empty matrix with no OTUs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an OTU label. Re-adding an existing label is a no-op.
    pub fn add_otu(&mut self, label: impl AsRef<str>) -> &mut Self {
        let label = label.as_ref();
        if !self.has_otu(label) {
            self.otus.push(label.to_string());
        }
        self
    }

    /// Remove an OTU and every pair involving it.
    pub fn remove_otu(&mut self, label: &str) -> &mut Self {
        self.otus.retain(|o| o != label);
        self.entries
            .retain(|(a, b), _| a != label && b != label);
        self
    }

    /// Whether `label` is a registered OTU.
    pub fn has_otu(&self, label: &str) -> bool {
        self.otus.iter().any(|o| o == label)
    }

    /// The OTU labels in insertion order.
    pub fn otus(&self) -> &[String] {
        &self.otus
    }

    /// Number of registered OTUs.
    pub fn len(&self) -> usize {
        self.otus.len()
    }

    /// Whether no OTUs are registered.
    pub fn is_empty(&self) -> bool {
        self.otus.is_empty()
    }

    /// The distance between two labels: zero on the diagonal, the stored
    /// value for a set pair, [`UNSET_DISTANCE`] otherwise.
    pub fn get(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 0.0;
        }
        self.entries
            .get(&pair_key(a, b))
            .copied()
            .unwrap_or(UNSET_DISTANCE)
    }

    /// Whether a distance has been stored for the pair.
    pub fn is_set(&self, a: &str, b: &str) -> bool {
        a != b && self.entries.contains_key(&pair_key(a, b))
    }

    /// Store a distance for an unordered pair. Setting the diagonal is a
    /// no-op; it always reads as zero.
    pub fn set(&mut self, a: &str, b: &str, distance: f64) -> &mut Self {
        if a != b {
            self.entries.insert(pair_key(a, b), distance);
        }
        self
    }

    /// Remove the stored distance for a pair, if any.
    pub fn unset(&mut self, a: &str, b: &str) -> &mut Self {
        self.entries.shift_remove(&pair_key(a, b));
        self
    }

    /// The smallest stored distance.
    pub fn min(&self) -> Option<f64> {
        self.min_position().map(|(a, b)| self.get(&a, &b))
    }

    /// The pair with the smallest stored distance; ties keep the pair whose
    /// entry was inserted first.
    pub fn min_position(&self) -> Option<(String, String)> {
        let mut best: Option<(&(String, String), f64)> = None;
        for (key, &d) in &self.entries {
            match best {
                Some((_, current)) if d >= current => {}
                _ => best = Some((key, d)),
            }
        }
        best.map(|((a, b), _)| (a.clone(), b.clone()))
    }

    /// The largest stored distance.
    pub fn max(&self) -> Option<f64> {
        self.max_position().map(|(a, b)| self.get(&a, &b))
    }

    /// The pair with the largest stored distance; ties keep the pair whose
    /// entry was inserted first.
    pub fn max_position(&self) -> Option<(String, String)> {
        let mut best: Option<(&(String, String), f64)> = None;
        for (key, &d) in &self.entries {
            match best {
                Some((_, current)) if d <= current => {}
                _ => best = Some((key, d)),
            }
        }
        best.map(|((a, b), _)| (a.clone(), b.clone()))
    }
}

impl Summarizable for DistanceMatrix {
    fn summary(&self) -> String {
        format!(
            "DistanceMatrix: {} OTUs, {} stored pairs",
            self.len(),
            self.entries.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc_matrix() -> DistanceMatrix {
        let mut d = DistanceMatrix::new();
        d.add_otu("A").add_otu("B").add_otu("C");
        d.set("A", "B", 0.1);
        d.set("A", "C", 9.5);
        d.set("B", "C", 0.333);
        d
    }

    #[test]
    fn lookups_and_size() {
        let d = abc_matrix();
        assert_eq!(d.len(), 3);
        assert_eq!(d.get("A", "B"), 0.1);
        assert_eq!(d.get("B", "C"), 0.333);
        assert_eq!(d.get("A", "C"), 9.5);
    }

    #[test]
    fn symmetry() {
        let d = abc_matrix();
        assert_eq!(d.get("B", "A"), 0.1);
        assert_eq!(d.get("C", "A"), 9.5);
        assert_eq!(d.get("C", "B"), d.get("B", "C"));
    }

    #[test]
    fn extrema() {
        let d = abc_matrix();
        assert_eq!(d.max(), Some(9.5));
        assert_eq!(d.min(), Some(0.1));
        assert_eq!(d.min_position(), Some(("A".into(), "B".into())));
        assert_eq!(d.max_position(), Some(("A".into(), "C".into())));
    }

    #[test]
    fn diagonal_is_zero() {
        let mut d = abc_matrix();
        assert_eq!(d.get("A", "A"), 0.0);
        d.set("A", "A", 7.0);
        assert_eq!(d.get("A", "A"), 0.0);
    }

    #[test]
    fn missing_pair_reads_as_unset() {
        let mut d = DistanceMatrix::new();
        d.add_otu("A").add_otu("B");
        assert_eq!(d.get("A", "B"), UNSET_DISTANCE);
        assert!(!d.is_set("A", "B"));
    }

    #[test]
    fn overwriting_keeps_symmetry() {
        let mut d = abc_matrix();
        d.set("B", "A", 0.25);
        assert_eq!(d.get("A", "B"), 0.25);
        assert_eq!(d.get("B", "A"), 0.25);
    }

    #[test]
    fn remove_otu_clears_pairs() {
        let mut d = abc_matrix();
        d.remove_otu("A");
        assert!(!d.has_otu("A"));
        assert_eq!(d.len(), 2);
        assert_eq!(d.get("A", "B"), UNSET_DISTANCE);
        assert_eq!(d.get("B", "C"), 0.333);
    }

    #[test]
    fn min_ties_keep_first_inserted() {
        let mut d = DistanceMatrix::new();
        d.add_otu("X").add_otu("Y").add_otu("Z");
        d.set("X", "Y", 1.0);
        d.set("Y", "Z", 1.0);
        assert_eq!(d.min_position(), Some(("X".into(), "Y".into())));
    }

    #[test]
    fn unset_removes_entry() {
        let mut d = abc_matrix();
        d.unset("C", "A");
        assert_eq!(d.get("A", "C"), UNSET_DISTANCE);
    }

    #[test]
    fn summary_format() {
        let d = abc_matrix();
        assert_eq!(d.summary(), "DistanceMatrix: 3 OTUs, 3 stored pairs");
    }
}
