//! Canonical substitution-score data.
//!
//! The tables are the NCBI reference matrices in their standard 24-symbol
//! layout (`A R N D C Q E G H I L K M F P S T W Y V B Z X *`). [`expand`]
//! lifts a 24-symbol table onto the 26-code Physalia alphabet: U borrows the
//! C scores, O borrows K, and J borrows L, following the usual NCBI extension
//! practice; the stop-codon column is dropped.

use physalia_seq::AminoAcid;

/// Symbol order of the raw NCBI tables.
const BASE_ORDER: &[u8; 24] = b"ARNDCQEGHILKMFPSTWYVBZX*";

/// Matrix dimension of the raw NCBI tables.
const BASE_DIM: usize = 24;

fn base_index(letter: u8) -> usize {
    BASE_ORDER
        .iter()
        .position(|&b| b == letter)
        .unwrap_or(BASE_DIM - 2)
}

/// The NCBI symbol each Physalia code scores as.
fn base_letter(aa: AminoAcid) -> u8 {
    match aa {
        AminoAcid::Sec => b'C',
        AminoAcid::Pyl => b'K',
        AminoAcid::Xle => b'L',
        other => other.letter() as u8,
    }
}

/// Expand a 24-symbol NCBI table to the 26x26 Physalia score layout.
pub(crate) fn expand(base: &[i32; BASE_DIM * BASE_DIM]) -> Vec<i32> {
    let n = AminoAcid::all().len();
    let mut scores = vec![0i32; n * n];
    for &a in AminoAcid::all() {
        let ia = base_index(base_letter(a));
        for &b in AminoAcid::all() {
            let ib = base_index(base_letter(b));
            scores[a.code() * n + b.code()] = base[ia * BASE_DIM + ib];
        }
    }
    scores
}

/// The identity table: 1 on the diagonal, 0 elsewhere.
pub(crate) fn identity() -> Vec<i32> {
    let n = AminoAcid::all().len();
    let mut scores = vec![0i32; n * n];
    for i in 0..n {
        scores[i * n + i] = 1;
    }
    scores
}

/// BLOSUM62 — 24x24 flattened, NCBI reference.
#[rustfmt::skip]
pub(crate) const BLOSUM62: [i32; BASE_DIM * BASE_DIM] = [
//   A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
     4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0, -2, -1,  0, -4, // A
    -1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3, -1,  0, -1, -4, // R
    -2,  0,  6,  1, -3,  0,  0,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3,  3,  0, -1, -4, // N
    -2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3,  4,  1, -1, -4, // D
     0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1, -3, -3, -2, -4, // C
    -1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2,  0,  3, -1, -4, // Q
    -1,  0,  0,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4, // E
     0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3, -1, -2, -1, -4, // G
    -2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3,  0,  0, -1, -4, // H
    -1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3, -3, -3, -1, -4, // I
    -1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1, -4, -3, -1, -4, // L
    -1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2,  0,  1, -1, -4, // K
    -1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1, -3, -1, -1, -4, // M
    -2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1, -3, -3, -1, -4, // F
    -1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2, -2, -1, -2, -4, // P
     1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2,  0,  0,  0, -4, // S
     0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0, -1, -1,  0, -4, // T
    -3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3, -4, -3, -2, -4, // W
    -2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1, -3, -2, -1, -4, // Y
     0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4, -3, -2, -1, -4, // V
    -2, -1,  3,  4, -3,  0,  1, -1,  0, -3, -4,  0, -3, -3, -2,  0, -1, -4, -3, -3,  4,  1, -1, -4, // B
    -1,  0,  0,  1, -3,  3,  4, -2,  0, -3, -3,  1, -1, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4, // Z
     0, -1, -1, -1, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -2,  0,  0, -2, -1, -1, -1, -1, -1, -4, // X
    -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4,  1, // *
];

/// BLOSUM45 — 24x24 flattened, NCBI reference.
#[rustfmt::skip]
pub(crate) const BLOSUM45: [i32; BASE_DIM * BASE_DIM] = [
//   A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
     5, -2, -1, -2, -1, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -2, -2,  0, -1, -1,  0, -5, // A
    -2,  7,  0, -1, -3,  1,  0, -2,  0, -3, -2,  3, -1, -2, -2, -1, -1, -2, -1, -2, -1,  0, -1, -5, // R
    -1,  0,  6,  2, -2,  0,  0,  0,  1, -2, -3,  0, -2, -2, -2,  1,  0, -4, -2, -3,  4,  0, -1, -5, // N
    -2, -1,  2,  7, -3,  0,  2, -1,  0, -4, -3,  0, -3, -4, -1,  0, -1, -4, -2, -3,  5,  1, -1, -5, // D
    -1, -3, -2, -3, 12, -3, -3, -3, -3, -3, -2, -3, -2, -2, -4, -1, -1, -5, -3, -1, -2, -3, -2, -5, // C
    -1,  1,  0,  0, -3,  6,  2, -2,  1, -2, -2,  1,  0, -4, -1,  0, -1, -2, -1, -3,  0,  4, -1, -5, // Q
    -1,  0,  0,  2, -3,  2,  6, -2,  0, -3, -2,  1, -2, -3,  0,  0, -1, -3, -2, -3,  1,  4, -1, -5, // E
     0, -2,  0, -1, -3, -2, -2,  7, -2, -4, -3, -2, -2, -3, -2,  0, -2, -2, -3, -3, -1, -2, -1, -5, // G
    -2,  0,  1,  0, -3,  1,  0, -2, 10, -3, -2, -1,  0, -2, -2, -1, -2, -3,  2, -3,  0,  0, -1, -5, // H
    -1, -3, -2, -4, -3, -2, -3, -4, -3,  5,  2, -3,  2,  0, -2, -2, -1, -2,  0,  3, -3, -3, -1, -5, // I
    -1, -2, -3, -3, -2, -2, -2, -3, -2,  2,  5, -3,  2,  1, -3, -3, -1, -2,  0,  1, -3, -2, -1, -5, // L
    -1,  3,  0,  0, -3,  1,  1, -2, -1, -3, -3,  5, -1, -3, -1, -1, -1, -2, -1, -2,  0,  1, -1, -5, // K
    -1, -1, -2, -3, -2,  0, -2, -2,  0,  2,  2, -1,  6,  0, -2, -2, -1, -2,  0,  1, -2, -1, -1, -5, // M
    -2, -2, -2, -4, -2, -4, -3, -3, -2,  0,  1, -3,  0,  8, -3, -2, -1,  1,  3,  0, -3, -3, -1, -5, // F
    -1, -2, -2, -1, -4, -1,  0, -2, -2, -2, -3, -1, -2, -3,  9, -1, -1, -3, -3, -3, -2, -1, -1, -5, // P
     1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -3, -1, -2, -2, -1,  4,  2, -4, -2, -1,  0,  0,  0, -5, // S
     0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -1, -1,  2,  5, -3, -1,  0,  0, -1,  0, -5, // T
    -2, -2, -4, -4, -5, -2, -3, -2, -3, -2, -2, -2, -2,  1, -3, -4, -3, 15,  3, -3, -4, -2, -2, -5, // W
    -2, -1, -2, -2, -3, -1, -2, -3,  2,  0,  0, -1,  0,  3, -3, -2, -1,  3,  8, -1, -2, -2, -1, -5, // Y
     0, -2, -3, -3, -1, -3, -3, -3, -3,  3,  1, -2,  1,  0, -3, -1,  0, -3, -1,  5, -3, -3, -1, -5, // V
    -1, -1,  4,  5, -2,  0,  1, -1,  0, -3, -3,  0, -2, -3, -2,  0,  0, -4, -2, -3,  4,  2, -1, -5, // B
    -1,  0,  0,  1, -3,  4,  4, -2,  0, -3, -2,  1, -1, -3, -1,  0, -1, -2, -2, -3,  2,  4, -1, -5, // Z
     0, -1, -1, -1, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,  0,  0, -2, -1, -1, -1, -1, -1, -5, // X
    -5, -5, -5, -5, -5, -5, -5, -5, -5, -5, -5, -5, -5, -5, -5, -5, -5, -5, -5, -5, -5, -5, -5,  1, // *
];

/// BLOSUM80 — 24x24 flattened, NCBI reference.
#[rustfmt::skip]
pub(crate) const BLOSUM80: [i32; BASE_DIM * BASE_DIM] = [
//   A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
     7, -3, -3, -3, -1, -2, -2,  0, -3, -3, -3, -1, -2, -4, -1,  2,  0, -5, -4, -1, -3, -2, -1, -8, // A
    -3,  9, -1, -3, -6,  1, -1, -4,  0, -5, -4,  3, -3, -5, -3, -2, -2, -5, -4, -4, -2,  0, -2, -8, // R
    -3, -1,  9,  2, -5,  0, -1, -1,  1, -6, -6,  0, -4, -6, -4,  1,  0, -7, -4, -5,  5,  0, -2, -8, // N
    -3, -3,  2, 10, -7, -1,  2, -3, -2, -7, -7, -2, -6, -6, -3, -1, -2, -8, -6, -6,  6,  1, -3, -8, // D
    -1, -6, -5, -7, 13, -5, -7, -6, -7, -2, -3, -6, -3, -4, -6, -2, -2, -5, -5, -2, -6, -7, -4, -8, // C
    -2,  1,  0, -1, -5,  9,  3, -4,  1, -5, -4,  2, -1, -5, -3, -1, -1, -4, -3, -4, -1,  5, -2, -8, // Q
    -2, -1, -1,  2, -7,  3,  8, -4,  0, -6, -6,  1, -4, -6, -2,  0, -2, -6, -5, -4,  1,  6, -2, -8, // E
     0, -4, -1, -3, -6, -4, -4,  9, -4, -7, -7, -3, -5, -6, -5, -1, -3, -6, -6, -6, -2, -4, -3, -8, // G
    -3,  0,  1, -2, -7,  1,  0, -4, 12, -6, -5, -1, -4, -2, -4, -2, -3, -4,  3, -5, -1,  0, -2, -8, // H
    -3, -5, -6, -7, -2, -5, -6, -7, -6,  7,  2, -5,  2, -1, -5, -4, -2, -5, -3,  4, -6, -6, -2, -8, // I
    -3, -4, -6, -7, -3, -4, -6, -7, -5,  2,  6, -4,  3,  0, -5, -4, -3, -4, -2,  1, -7, -5, -2, -8, // L
    -1,  3,  0, -2, -6,  2,  1, -3, -1, -5, -4,  8, -3, -5, -2, -1, -1, -6, -4, -4, -1,  1, -2, -8, // K
    -2, -3, -4, -6, -3, -1, -4, -5, -4,  2,  3, -3,  9, -1, -4, -3, -1, -3, -3,  1, -5, -3, -2, -8, // M
    -4, -5, -6, -6, -4, -5, -6, -6, -2, -1,  0, -5, -1, 10, -6, -4, -4,  0,  4, -2, -6, -6, -3, -8, // F
    -1, -3, -4, -3, -6, -3, -2, -5, -4, -5, -5, -2, -4, -6, 12, -2, -3, -7, -6, -4, -4, -2, -3, -8, // P
     2, -2,  1, -1, -2, -1,  0, -1, -2, -4, -4, -1, -3, -4, -2,  7,  2, -6, -3, -3,  0, -1, -1, -8, // S
     0, -2,  0, -2, -2, -1, -2, -3, -3, -2, -3, -1, -1, -4, -3,  2,  8, -5, -3,  0, -1, -2, -1, -8, // T
    -5, -5, -7, -8, -5, -4, -6, -6, -4, -5, -4, -6, -3,  0, -7, -6, -5, 16,  3, -5, -8, -5, -5, -8, // W
    -4, -4, -4, -6, -5, -3, -5, -6,  3, -3, -2, -4, -3,  4, -6, -3, -3,  3, 11, -3, -5, -4, -3, -8, // Y
    -1, -4, -5, -6, -2, -4, -4, -6, -5,  4,  1, -4,  1, -2, -4, -3,  0, -5, -3,  7, -6, -4, -2, -8, // V
    -3, -2,  5,  6, -6, -1,  1, -2, -1, -6, -7, -1, -5, -6, -4,  0, -1, -8, -5, -6,  6,  0, -3, -8, // B
    -2,  0,  0,  1, -7,  5,  6, -4,  0, -6, -5,  1, -3, -6, -2, -1, -2, -5, -4, -4,  0,  6, -1, -8, // Z
    -1, -2, -2, -3, -4, -2, -2, -3, -2, -2, -2, -2, -2, -3, -3, -1, -1, -5, -3, -2, -3, -1, -2, -8, // X
    -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8,  1, // *
];

/// BLOSUM30 — 24x24 flattened, NCBI reference.
#[rustfmt::skip]
pub(crate) const BLOSUM30: [i32; BASE_DIM * BASE_DIM] = [
//   A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
     4, -1,  0,  0, -3,  1,  0,  0, -2,  0, -1,  0,  1, -2, -1,  1,  1, -5, -4,  1,  0,  0,  0, -7, // A
    -1,  8, -2, -1, -2,  3, -1, -2, -1, -3, -2,  1,  0, -1, -1, -1, -3,  0,  0, -1, -2,  0, -1, -7, // R
     0, -2,  8,  1, -1, -1, -1,  0,  0, -2, -2,  0, -1, -1, -3,  0,  1, -7, -4, -2,  5, -1, -1, -7, // N
     0, -1,  1,  9, -3, -1,  1, -1, -2, -4, -1,  0, -3, -5, -1,  0, -1, -4, -1, -2,  5,  0, -1, -7, // D
    -3, -2, -1, -3, 17, -2,  1, -4, -5,  0, -2,  0, -2, -3, -3, -2, -2, -2, -6, -2, -2,  0, -2, -7, // C
     1,  3, -1, -1, -2,  8,  2, -2,  0, -2,  0,  0, -1, -3,  0, -1,  0, -1, -1, -3, -1,  4, -1, -7, // Q
     0, -1, -1,  1,  1,  2,  6, -2,  0, -3, -1,  1, -1, -4,  1,  0, -2, -1, -2, -3,  0,  5, -1, -7, // E
     0, -2,  0, -1, -4, -2, -2,  8, -3, -1, -2, -1, -2, -3, -1,  0, -2,  1, -3, -3,  0, -2, -1, -7, // G
    -2, -1,  0, -2, -5,  0,  0, -3, 14, -2, -1, -2,  2, -3,  1, -1, -2, -5,  0, -3, -1,  0, -1, -7, // H
     0, -3, -2, -4,  0, -2, -3, -1, -2,  6,  2, -2,  1,  0, -3, -1,  0, -3, -1,  4, -3, -3,  0, -7, // I
    -1, -2, -2, -1, -2,  0, -1, -2, -1,  2,  4, -2,  2,  2, -3, -2,  0, -2,  3,  1, -1, -1, -1, -7, // L
     0,  1,  0,  0,  0,  0,  1, -1, -2, -2, -2,  4,  2, -1,  0,  0, -1, -2, -1, -2,  0,  0,  0, -7, // K
     1,  0, -1, -3, -2, -1, -1, -2,  2,  1,  2,  2,  6,  0, -4, -2,  0, -3, -1,  0, -2, -1,  0, -7, // M
    -2, -1, -1, -5, -3, -3, -4, -3, -3,  0,  2, -1,  0, 10, -4, -1, -2,  0,  3, -1, -3, -4, -1, -7, // F
    -1, -1, -3, -1, -3,  0,  1, -1,  1, -3, -3,  0, -4, -4, 11, -1,  0, -3, -2, -4, -2,  0, -1, -7, // P
     1, -1,  0,  0, -2, -1,  0,  0, -1, -1, -2,  0, -2, -1, -1,  4,  2, -3, -2, -1,  0,  0,  0, -7, // S
     1, -3,  1, -1, -2,  0, -2, -2, -2,  0,  0, -1,  0, -2,  0,  2,  5, -5, -1,  1,  0, -1,  0, -7, // T
    -5,  0, -7, -4, -2, -1, -1,  1, -5, -3, -2, -2, -3,  0, -3, -3, -5, 20,  5, -3, -5, -1, -2, -7, // W
    -4,  0, -4, -1, -6, -1, -2, -3,  0, -1,  3, -1, -1,  3, -2, -2, -1,  5,  9,  1, -3, -2, -1, -7, // Y
     1, -1, -2, -2, -2, -3, -3, -3, -3,  4,  1, -2,  0, -1, -4, -1,  1, -3,  1,  5, -2, -3,  0, -7, // V
     0, -2,  5,  5, -2, -1,  0,  0, -1, -3, -1,  0, -2, -3, -2,  0,  0, -5, -3, -2,  5,  0, -1, -7, // B
     0,  0, -1,  0,  0,  4,  5, -2,  0, -3, -1,  0, -1, -4,  0,  0, -1, -1, -2, -3,  0,  4, -1, -7, // Z
     0, -1, -1, -1, -2, -1, -1, -1, -1,  0, -1,  0,  0, -1, -1,  0,  0, -2, -1,  0, -1, -1, -1, -7, // X
    -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7,  1, // *
];

/// PAM40 — 24x24 flattened, NCBI reference.
#[rustfmt::skip]
pub(crate) const PAM40: [i32; BASE_DIM * BASE_DIM] = [
//   A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
     6, -4, -2, -1, -4, -2, -1,  0, -4, -3, -4, -4, -3, -6,  0,  1,  1, -9, -6, -1, -1, -1, -2,-11, // A
    -4,  8, -2, -4, -6,  0, -3, -6,  1, -3, -5,  2, -2, -7, -2, -1, -4,  0, -7, -5, -3, -2, -3,-11, // R
    -2, -2,  6,  3, -7, -1,  0, -1,  2, -4, -5,  0, -5, -6, -3,  1, -1, -6, -3, -5,  5, -1, -2,-11, // N
    -1, -4,  3,  7, -9,  0,  4, -2, -1, -5, -8, -2, -6, -9, -4, -1, -2,-10, -7, -5,  5,  3, -3,-11, // D
    -4, -6, -7, -9, 15, -9, -9, -6, -5, -4, -9, -9, -9, -8, -5, -1, -5,-11, -2, -4, -8, -9, -6,-11, // C
    -2,  0, -1,  0, -9,  7,  2, -4,  2, -5, -3,  0, -2, -8, -1, -3, -3, -8, -7, -4,  0,  5, -2,-11, // Q
    -1, -3,  0,  4, -9,  2,  7, -2, -2, -4, -6, -2, -4, -9, -3, -2, -3,-11, -6, -4,  3,  5, -3,-11, // E
     0, -6, -1, -2, -6, -4, -2,  7, -5, -6, -7, -4, -5, -7, -3,  0, -3,-10, -8, -4, -1, -3, -3,-11, // G
    -4,  1,  2, -1, -5,  2, -2, -5,  8, -5, -4, -3, -5, -4, -2, -3, -4, -5, -1, -4,  1,  0, -3,-11, // H
    -3, -3, -4, -5, -4, -5, -4, -6, -5,  8,  1, -4,  1,  0, -5, -4, -1, -9, -3,  3, -4, -4, -3,-11, // I
    -4, -5, -5, -8, -9, -3, -6, -7, -4,  1,  7, -5,  3,  0, -5, -5, -4, -4, -3,  0, -6, -4, -4,-11, // L
    -4,  2,  0, -2, -9,  0, -2, -4, -3, -4, -5,  6, -1, -9, -4, -2, -2, -7, -7, -5, -1, -1, -3,-11, // K
    -3, -2, -5, -6, -9, -2, -4, -5, -5,  1,  3, -1, 10, -2, -5, -3, -2, -8, -6,  0, -5, -3, -3,-11, // M
    -6, -7, -6, -9, -8, -8, -9, -7, -4,  0,  0, -9, -2, 11, -7, -4, -6, -3,  4, -4, -7, -8, -5,-11, // F
     0, -2, -3, -4, -5, -1, -3, -3, -2, -5, -5, -4, -5, -7,  8,  0, -2, -9, -8, -3, -4, -2, -3,-11, // P
     1, -1,  1, -1, -1, -3, -2,  0, -3, -4, -5, -2, -3, -4,  0,  5,  2, -4, -4, -3,  0, -2, -2,-11, // S
     1, -4, -1, -2, -5, -3, -3, -3, -4, -1, -4, -2, -2, -6, -2,  2,  6, -8, -4, -1, -2, -3, -2,-11, // T
    -9,  0, -6,-10,-11, -8,-11,-10, -5, -9, -4, -7, -8, -3, -9, -4, -8, 17, -3, -9, -7,-10, -7,-11, // W
    -6, -7, -3, -7, -2, -7, -6, -8, -1, -3, -3, -7, -6,  4, -8, -4, -4, -3, 12, -5, -4, -7, -5,-11, // Y
    -1, -5, -5, -5, -4, -4, -4, -4, -4,  3,  0, -5,  0, -4, -3, -3, -1, -9, -5,  6, -5, -4, -3,-11, // V
    -1, -3,  5,  5, -8,  0,  3, -1,  1, -4, -6, -1, -5, -7, -4,  0, -2, -7, -4, -5,  5,  2, -2,-11, // B
    -1, -2, -1,  3, -9,  5,  5, -3,  0, -4, -4, -1, -3, -8, -2, -2, -3,-10, -7, -4,  2,  5, -2,-11, // Z
    -2, -3, -2, -3, -6, -2, -3, -3, -3, -3, -4, -3, -3, -5, -3, -2, -2, -7, -5, -3, -2, -2, -3,-11, // X
   -11,-11,-11,-11,-11,-11,-11,-11,-11,-11,-11,-11,-11,-11,-11,-11,-11,-11,-11,-11,-11,-11,-11,  1, // *
];

/// PAM120 — 24x24 flattened, NCBI reference.
#[rustfmt::skip]
pub(crate) const PAM120: [i32; BASE_DIM * BASE_DIM] = [
//   A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
     3, -3,  0,  0, -3, -1,  0,  1, -3, -1, -3, -2, -2, -4,  1,  1,  1, -7, -4,  0,  0,  0, -1, -8, // A
    -3,  6, -1, -3, -4,  1, -3, -4,  1, -2, -4,  2, -1, -5, -1, -1, -2,  1, -5, -3, -2, -1, -2, -8, // R
     0, -1,  4,  2, -5,  0,  1,  0,  2, -2, -4,  1, -3, -4, -2,  1,  0, -4, -2, -3,  3,  0, -1, -8, // N
     0, -3,  2,  5, -7,  1,  3,  0,  0, -3, -5, -1, -4, -7, -3,  0, -1, -8, -5, -3,  4,  3, -2, -8, // D
    -3, -4, -5, -7, 12, -7, -7, -4, -4, -3, -7, -7, -6, -6, -4,  0, -3, -8, -1, -3, -6, -7, -4, -8, // C
    -1,  1,  0,  1, -7,  6,  2, -3,  3, -3, -2,  0, -1, -6,  0, -2, -2, -6, -5, -3,  0,  4, -1, -8, // Q
     0, -3,  1,  3, -7,  2,  5, -1, -1, -3, -4, -1, -3, -7, -2,  0, -2, -8, -5, -3,  3,  4, -1, -8, // E
     1, -4,  0,  0, -4, -3, -1,  5, -4, -4, -5, -3, -4, -5, -2,  1, -1, -8, -6, -2,  0, -2, -2, -8, // G
    -3,  1,  2,  0, -4,  3, -1, -4,  7, -4, -3, -2, -4, -3, -1, -2, -3, -3,  0, -3,  1,  1, -2, -8, // H
    -1, -2, -2, -3, -3, -3, -3, -4, -4,  6,  1, -3,  1,  0, -3, -2,  0, -6, -2,  3, -3, -3, -1, -8, // I
    -3, -4, -4, -5, -7, -2, -4, -5, -3,  1,  5, -4,  3,  0, -4, -4, -3, -3, -2,  1, -5, -3, -2, -8, // L
    -2,  2,  1, -1, -7,  0, -1, -3, -2, -3, -4,  5,  0, -7, -2, -1, -1, -5, -5, -4,  0, -1, -2, -8, // K
    -2, -1, -3, -4, -6, -1, -3, -4, -4,  1,  3,  0,  8, -1, -3, -2, -1, -6, -4,  1, -4, -2, -2, -8, // M
    -4, -5, -4, -7, -6, -6, -7, -5, -3,  0,  1, -7, -1,  8, -5, -3, -4,  0,  5, -3, -5, -6, -3, -8, // F
     1, -1, -2, -3, -4,  0, -2, -2, -1, -3, -4, -2, -3, -5,  6,  1,  0, -7, -6, -2, -2, -1, -2, -8, // P
     1, -1,  1,  0,  0, -2,  0,  1, -2, -2, -4, -1, -2, -3,  1,  3,  2, -2, -3, -2,  0, -1, -1, -8, // S
     1, -2,  0, -1, -3, -2, -2, -1, -3,  0, -3, -1, -1, -4,  0,  2,  4, -6, -3,  0, -1, -2, -1, -8, // T
    -7,  1, -4, -8, -8, -6, -8, -8, -3, -6, -3, -5, -6,  0, -7, -2, -6, 17, -1, -8, -6, -7, -5, -8, // W
    -4, -5, -2, -5, -1, -5, -5, -6,  0, -2, -2, -5, -4,  5, -6, -3, -3, -1, 10, -3, -3, -5, -3, -8, // Y
     0, -3, -3, -3, -3, -3, -3, -2, -3,  3,  1, -4,  1, -3, -2, -2,  0, -8, -3,  5, -3, -3, -1, -8, // V
     0, -2,  3,  4, -6,  0,  3,  0,  1, -3, -5,  0, -4, -5, -2,  0, -1, -6, -3, -3,  4,  2, -1, -8, // B
     0, -1,  0,  3, -7,  4,  4, -2,  1, -3, -3, -1, -2, -6, -1, -1, -2, -7, -5, -3,  2,  4, -1, -8, // Z
    -1, -2, -1, -2, -4, -1, -1, -2, -2, -1, -2, -2, -2, -3, -2, -1, -1, -5, -3, -1, -1, -1, -2, -8, // X
    -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8,  1, // *
];

/// PAM200 — 24x24 flattened, NCBI reference.
#[rustfmt::skip]
pub(crate) const PAM200: [i32; BASE_DIM * BASE_DIM] = [
//   A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
     2, -2,  0,  0, -2,  0,  0,  1, -1, -1, -2, -1, -1, -3,  1,  1,  1, -6, -3,  0,  0,  0,  0, -8, // A
    -2,  6,  0, -1, -4,  1, -1, -3,  2, -2, -3,  3,  0, -4,  0,  0, -1,  2, -4, -2, -1,  0, -1, -8, // R
     0,  0,  2,  2, -4,  1,  1,  0,  2, -2, -3,  1, -2, -3,  0,  1,  0, -4, -2, -2,  2,  1,  0, -8, // N
     0, -1,  2,  4, -5,  2,  3,  1,  1, -2, -4,  0, -3, -6, -1,  0,  0, -7, -4, -2,  3,  3, -1, -8, // D
    -2, -4, -4, -5, 12, -5, -5, -3, -3, -2, -6, -5, -5, -4, -3,  0, -2, -8,  0, -2, -4, -5, -3, -8, // C
     0,  1,  1,  2, -5,  4,  2, -1,  3, -2, -2,  1, -1, -5,  0, -1, -1, -5, -4, -2,  1,  3, -1, -8, // Q
     0, -1,  1,  3, -5,  2,  4,  0,  1, -2, -3,  0, -2, -5, -1,  0,  0, -7, -4, -2,  3,  3, -1, -8, // E
     1, -3,  0,  1, -3, -1,  0,  5, -2, -3, -4, -2, -3, -5,  0,  1,  0, -7, -5, -1,  0,  0, -1, -8, // G
    -1,  2,  2,  1, -3,  3,  1, -2,  6, -2, -2,  0, -2, -2,  0, -1, -1, -3,  0, -2,  1,  2, -1, -8, // H
    -1, -2, -2, -2, -2, -2, -2, -3, -2,  5,  2, -2,  2,  1, -2, -1,  0, -5, -1,  4, -2, -2, -1, -8, // I
    -2, -3, -3, -4, -6, -2, -3, -4, -2,  2,  6, -3,  4,  2, -3, -3, -2, -2, -1,  2, -3, -3, -1, -8, // L
    -1,  3,  1,  0, -5,  1,  0, -2,  0, -2, -3,  5,  0, -5, -1,  0,  0, -3, -4, -2,  1,  0, -1, -8, // K
    -1,  0, -2, -3, -5, -1, -2, -3, -2,  2,  4,  0,  6,  0, -2, -2, -1, -4, -2,  2, -2, -2, -1, -8, // M
    -3, -4, -3, -6, -4, -5, -5, -5, -2,  1,  2, -5,  0,  9, -5, -3, -3,  0,  7, -1, -4, -5, -2, -8, // F
     1,  0,  0, -1, -3,  0, -1,  0,  0, -2, -3, -1, -2, -5,  6,  1,  0, -6, -5, -1, -1,  0, -1, -8, // P
     1,  0,  1,  0,  0, -1,  0,  1, -1, -1, -3,  0, -2, -3,  1,  2,  1, -2, -3, -1,  0,  0,  0, -8, // S
     1, -1,  0,  0, -2, -1,  0,  0, -1,  0, -2,  0, -1, -3,  0,  1,  3, -5, -3,  0,  0, -1,  0, -8, // T
    -6,  2, -4, -7, -8, -5, -7, -7, -3, -5, -2, -3, -4,  0, -6, -2, -5, 17,  0, -6, -5, -6, -4, -8, // W
    -3, -4, -2, -4,  0, -4, -4, -5,  0, -1, -1, -4, -2,  7, -5, -3, -3,  0, 10, -2, -3, -4, -2, -8, // Y
     0, -2, -2, -2, -2, -2, -2, -1, -2,  4,  2, -2,  2, -1, -1, -1,  0, -6, -2,  4, -2, -2, -1, -8, // V
     0, -1,  2,  3, -4,  1,  3,  0,  1, -2, -3,  1, -2, -4, -1,  0,  0, -5, -3, -2,  3,  2, -1, -8, // B
     0,  0,  1,  3, -5,  3,  3,  0,  2, -2, -3,  0, -2, -5,  0,  0, -1, -6, -4, -2,  2,  3, -1, -8, // Z
     0, -1,  0, -1, -3, -1, -1, -1, -1, -1, -1, -1, -1, -2, -1,  0,  0, -4, -2, -1, -1, -1, -1, -8, // X
    -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8,  1, // *
];

/// PAM250 — 24x24 flattened, NCBI/Dayhoff reference.
#[rustfmt::skip]
pub(crate) const PAM250: [i32; BASE_DIM * BASE_DIM] = [
//   A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
     2, -2,  0,  0, -2,  0,  0,  1, -1, -1, -2, -1, -1, -3,  1,  1,  1, -6, -3,  0,  0,  0,  0, -8, // A
    -2,  6,  0, -1, -4,  1, -1, -3,  2, -2, -3,  3,  0, -4,  0,  0, -1,  2, -4, -2, -1,  0, -1, -8, // R
     0,  0,  2,  2, -4,  1,  1,  0,  2, -2, -3,  1, -2, -3,  0,  1,  0, -4, -2, -2,  2,  1,  0, -8, // N
     0, -1,  2,  4, -5,  2,  3,  1,  1, -2, -4,  0, -3, -6, -1,  0,  0, -7, -4, -2,  3,  3, -1, -8, // D
    -2, -4, -4, -5, 12, -5, -5, -3, -3, -2, -6, -5, -5, -4, -3,  0, -2, -8,  0, -2, -4, -5, -3, -8, // C
     0,  1,  1,  2, -5,  4,  2, -1,  3, -2, -2,  1, -1, -5,  0, -1, -1, -5, -4, -2,  1,  3, -1, -8, // Q
     0, -1,  1,  3, -5,  2,  4,  0,  1, -2, -3,  0, -2, -5, -1,  0,  0, -7, -4, -2,  3,  3, -1, -8, // E
     1, -3,  0,  1, -3, -1,  0,  5, -2, -3, -4, -2, -3, -5,  0,  1,  0, -7, -5, -1,  0,  0, -1, -8, // G
    -1,  2,  2,  1, -3,  3,  1, -2,  6, -2, -2,  0, -2, -2,  0, -1, -1, -3,  0, -2,  1,  2, -1, -8, // H
    -1, -2, -2, -2, -2, -2, -2, -3, -2,  5,  2, -2,  2,  1, -2, -1,  0, -5, -1,  4, -2, -2, -1, -8, // I
    -2, -3, -3, -4, -6, -2, -3, -4, -2,  2,  6, -3,  4,  2, -3, -3, -2, -2, -1,  2, -3, -3, -1, -8, // L
    -1,  3,  1,  0, -5,  1,  0, -2,  0, -2, -3,  5,  0, -5, -1,  0,  0, -3, -4, -2,  1,  0, -1, -8, // K
    -1,  0, -2, -3, -5, -1, -2, -3, -2,  2,  4,  0,  6,  0, -2, -2, -1, -4, -2,  2, -2, -2, -1, -8, // M
    -3, -4, -3, -6, -4, -5, -5, -5, -2,  1,  2, -5,  0,  9, -5, -3, -3,  0,  7, -1, -4, -5, -2, -8, // F
     1,  0,  0, -1, -3,  0, -1,  0,  0, -2, -3, -1, -2, -5,  6,  1,  0, -6, -5, -1, -1,  0, -1, -8, // P
     1,  0,  1,  0,  0, -1,  0,  1, -1, -1, -3,  0, -2, -3,  1,  2,  1, -2, -3, -1,  0,  0,  0, -8, // S
     1, -1,  0,  0, -2, -1,  0,  0, -1,  0, -2,  0, -1, -3,  0,  1,  3, -5, -3,  0,  0, -1,  0, -8, // T
    -6,  2, -4, -7, -8, -5, -7, -7, -3, -5, -2, -3, -4,  0, -6, -2, -5, 17,  0, -6, -5, -6, -4, -8, // W
    -3, -4, -2, -4,  0, -4, -4, -5,  0, -1, -1, -4, -2,  7, -5, -3, -3,  0, 10, -2, -3, -4, -2, -8, // Y
     0, -2, -2, -2, -2, -2, -2, -1, -2,  4,  2, -2,  2, -1, -1, -1,  0, -6, -2,  4, -2, -2, -1, -8, // V
     0, -1,  2,  3, -4,  1,  3,  0,  1, -2, -3,  1, -2, -4, -1,  0,  0, -5, -3, -2,  3,  2, -1, -8, // B
     0,  0,  1,  3, -5,  3,  3,  0,  2, -2, -3,  0, -2, -5,  0,  0, -1, -6, -4, -2,  2,  3, -1, -8, // Z
     0, -1,  0, -1, -3, -1, -1, -1, -1, -1, -1, -1, -1, -2, -1,  0,  0, -4, -2, -1, -1, -1, -1, -8, // X
    -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8, -8,  1, // *
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_preserves_canonical_scores() {
        let scores = expand(&BLOSUM62);
        let n = AminoAcid::all().len();
        let idx = |a: AminoAcid, b: AminoAcid| a.code() * n + b.code();
        assert_eq!(scores[idx(AminoAcid::Ala, AminoAcid::Ala)], 4);
        assert_eq!(scores[idx(AminoAcid::Trp, AminoAcid::Trp)], 11);
        assert_eq!(scores[idx(AminoAcid::Ala, AminoAcid::Arg)], -1);
    }

    #[test]
    fn rare_residues_borrow_canonical_rows() {
        let scores = expand(&BLOSUM62);
        let n = AminoAcid::all().len();
        let idx = |a: AminoAcid, b: AminoAcid| a.code() * n + b.code();
        // U scores as C, O as K, J as L.
        assert_eq!(
            scores[idx(AminoAcid::Sec, AminoAcid::Sec)],
            scores[idx(AminoAcid::Cys, AminoAcid::Cys)]
        );
        assert_eq!(
            scores[idx(AminoAcid::Pyl, AminoAcid::Ala)],
            scores[idx(AminoAcid::Lys, AminoAcid::Ala)]
        );
        assert_eq!(
            scores[idx(AminoAcid::Xle, AminoAcid::Ile)],
            scores[idx(AminoAcid::Leu, AminoAcid::Ile)]
        );
    }

    #[test]
    fn expanded_tables_are_symmetric() {
        for table in [&BLOSUM62, &BLOSUM45, &BLOSUM80, &BLOSUM30, &PAM40, &PAM120, &PAM200, &PAM250] {
            let scores = expand(table);
            let n = AminoAcid::all().len();
            for i in 0..n {
                for j in 0..n {
                    assert_eq!(scores[i * n + j], scores[j * n + i]);
                }
            }
        }
    }

    #[test]
    fn identity_table_shape() {
        let scores = identity();
        let n = AminoAcid::all().len();
        assert_eq!(scores[0], 1);
        assert_eq!(scores[1], 0);
        assert_eq!(scores.iter().sum::<i32>(), n as i32);
    }
}
