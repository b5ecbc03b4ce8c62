//! Seeded xorshift PRNG for the Feng-Doolittle shuffle.

/// Xorshift64 PRNG; fast, reproducible, good enough for shuffling.
pub(crate) struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

/// In-place Fisher-Yates shuffle.
pub(crate) fn shuffle(bytes: &mut [u8], rng: &mut Xorshift64) {
    for i in (1..bytes.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        bytes.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = Xorshift64::new(42);
        let mut b = Xorshift64::new(42);
        for _ in 0..10 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn zero_seed_is_remapped() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = Xorshift64::new(7);
        let mut data = b"MKVLYAARNDCEQGH".to_vec();
        let mut sorted_before = data.clone();
        shuffle(&mut data, &mut rng);
        let mut sorted_after = data.clone();
        sorted_before.sort_unstable();
        sorted_after.sort_unstable();
        assert_eq!(sorted_before, sorted_after);
    }
}
