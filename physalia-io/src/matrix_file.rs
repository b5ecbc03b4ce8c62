//! Plain-text substitution-matrix exchange format.
//!
//! ```text
//! ARNDCEQGHILKMFPSTWYVUOBZJX
//! 26
//! 26  6 -4 -2 ... (26 scores)
//! ...                (26 rows)
//! #
//! ```
//!
//! The first line is the residue alphabet, the second its size, then one
//! line per residue prefixed by the size again, and a terminating `#`.
//! Residue pairs absent from the file score zero.

use physalia_align::SubstitutionMatrix;
use physalia_core::{PhysaliaError, Result};
use physalia_seq::amino::ALPHABET_SIZE;
use physalia_seq::AminoAcid;

/// Parse the plain-text matrix format.
pub fn parse_matrix(input: &str, name: impl Into<String>) -> Result<SubstitutionMatrix> {
    let mut lines = input.lines().filter(|l| !l.trim().is_empty());

    let alphabet: Vec<char> = lines
        .next()
        .ok_or_else(|| PhysaliaError::Parse("matrix file is empty".into()))?
        .trim()
        .chars()
        .collect();

    let size: usize = lines
        .next()
        .ok_or_else(|| PhysaliaError::Parse("matrix file missing size line".into()))?
        .trim()
        .parse()
        .map_err(|_| PhysaliaError::Parse("invalid matrix size line".into()))?;
    if size != alphabet.len() {
        return Err(PhysaliaError::Parse(format!(
            "matrix size {} does not match alphabet of {} residues",
            size,
            alphabet.len()
        )));
    }

    let mut scores = vec![0i32; ALPHABET_SIZE * ALPHABET_SIZE];
    for row in 0..size {
        let line = lines.next().ok_or_else(|| {
            PhysaliaError::Parse(format!("matrix file ends after {} of {} rows", row, size))
        })?;
        let mut fields = line.split_whitespace();
        let prefix: usize = fields
            .next()
            .ok_or_else(|| PhysaliaError::Parse("empty matrix row".into()))?
            .parse()
            .map_err(|_| PhysaliaError::Parse("invalid matrix row prefix".into()))?;
        if prefix != size {
            return Err(PhysaliaError::Parse(format!(
                "matrix row prefixed {} in a size-{} matrix",
                prefix, size
            )));
        }
        let from = AminoAcid::from_letter(alphabet[row]).code();
        for col in 0..size {
            let value: i32 = fields
                .next()
                .ok_or_else(|| {
                    PhysaliaError::Parse(format!("matrix row {} has fewer than {} scores", row, size))
                })?
                .parse()
                .map_err(|_| PhysaliaError::Parse("invalid matrix score".into()))?;
            let to = AminoAcid::from_letter(alphabet[col]).code();
            scores[from * ALPHABET_SIZE + to] = value;
        }
    }

    match lines.next().map(str::trim) {
        Some("#") => {}
        other => {
            return Err(PhysaliaError::Parse(format!(
                "matrix file missing terminating '#', found {:?}",
                other
            )))
        }
    }

    SubstitutionMatrix::new(scores, name)
}

/// Render a matrix in the plain-text exchange format, over the full
/// 26-residue alphabet.
pub fn write_matrix(matrix: &SubstitutionMatrix) -> String {
    let mut out = String::new();
    for &aa in AminoAcid::all() {
        out.push(aa.letter());
    }
    out.push('\n');
    out.push_str(&format!("{}\n", ALPHABET_SIZE));
    for &from in AminoAcid::all() {
        out.push_str(&format!("{}", ALPHABET_SIZE));
        for &to in AminoAcid::all() {
            out.push_str(&format!(" {}", matrix.score_codes(from.code(), to.code())));
        }
        out.push('\n');
    }
    out.push_str("#\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use physalia_align::MatrixId;

    #[test]
    fn roundtrip_preserves_scores() {
        let original = MatrixId::Blosum62.table();
        let text = write_matrix(&original);
        let parsed = parse_matrix(&text, "BLOSUM62").unwrap();
        for &a in AminoAcid::all() {
            for &b in AminoAcid::all() {
                assert_eq!(
                    parsed.score_codes(a.code(), b.code()),
                    original.score_codes(a.code(), b.code()),
                );
            }
        }
        assert_eq!(parsed.min_score(), original.min_score());
        assert_eq!(parsed.avg_score(), original.avg_score());
    }

    #[test]
    fn parse_small_alphabet_defaults_rest_to_zero() {
        let input = "AR\n2\n2 4 -1\n2 -1 5\n#\n";
        let m = parse_matrix(input, "toy").unwrap();
        assert_eq!(m.score(b'A', b'A'), 4);
        assert_eq!(m.score(b'A', b'R'), -1);
        assert_eq!(m.score(b'R', b'R'), 5);
        assert_eq!(m.score(b'W', b'W'), 0);
    }

    #[test]
    fn parse_rejects_size_mismatch() {
        assert!(parse_matrix("AR\n3\n", "bad").is_err());
    }

    #[test]
    fn parse_rejects_truncated_rows() {
        assert!(parse_matrix("AR\n2\n2 4 -1\n#\n", "bad").is_err());
        assert!(parse_matrix("AR\n2\n2 4\n2 -1 5\n#\n", "bad").is_err());
    }

    #[test]
    fn parse_requires_terminator() {
        assert!(parse_matrix("AR\n2\n2 4 -1\n2 -1 5\n", "bad").is_err());
    }
}
