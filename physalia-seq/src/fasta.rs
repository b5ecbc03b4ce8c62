//! FASTA input.

use std::path::Path;

use needletail::parse_fastx_file;
use physalia_core::{PhysaliaError, Result};

use crate::sequence::Sequence;

/// Read all records of a FASTA file into normalized [`Sequence`]s.
///
/// Identifiers are trimmed at the first whitespace; residues are uppercased
/// with unknown letters folded to `X`.
pub fn read_fasta(path: impl AsRef<Path>) -> Result<Vec<Sequence>> {
    let path = path.as_ref();
    let mut reader = parse_fastx_file(path).map_err(|e| PhysaliaError::Parse(e.to_string()))?;

    let mut sequences = Vec::new();
    while let Some(record) = reader.next() {
        let record = record.map_err(|e| PhysaliaError::Parse(e.to_string()))?;
        let id = String::from_utf8_lossy(record.id()).into_owned();
        let residues = String::from_utf8_lossy(&record.seq()).into_owned();
        sequences.push(Sequence::new(id, residues));
    }

    Ok(sequences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_records_in_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">Seq1 first sequence").unwrap();
        writeln!(file, "MKVLYA").unwrap();
        writeln!(file, ">Seq2").unwrap();
        writeln!(file, "mkv").unwrap();
        writeln!(file, "lya").unwrap();
        file.flush().unwrap();

        let seqs = read_fasta(file.path()).unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0].identifier(), "Seq1");
        assert_eq!(seqs[0].residues(), "MKVLYA");
        assert_eq!(seqs[1].identifier(), "Seq2");
        assert_eq!(seqs[1].residues(), "MKVLYA");
    }

    #[test]
    fn unknown_letters_fold_to_x() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">odd").unwrap();
        writeln!(file, "MK?V*").unwrap();
        file.flush().unwrap();

        let seqs = read_fasta(file.path()).unwrap();
        assert_eq!(seqs[0].residues(), "MKXVX");
    }

    #[test]
    fn missing_file_errors() {
        assert!(read_fasta("/nonexistent/input.fasta").is_err());
    }
}
