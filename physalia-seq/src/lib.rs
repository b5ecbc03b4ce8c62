//! Protein sequences and FASTA input for the Physalia phylogenetics workspace.
//!
//! Provides the 26-code amino-acid alphabet (20 canonical residues, the rare
//! Selenocysteine/Pyrrolysine pair, the B/Z/J ambiguity codes and the unknown
//! code X), a normalized [`Sequence`] type, and FASTA reading:
//!
//! ```
//! use physalia_seq::{AminoAcid, Sequence};
//!
//! let aa = AminoAcid::from_letter('W');
//! assert_eq!(aa.three_letter(), "TRP");
//!
//! // Unknown letters fold to X, identifiers stop at the first whitespace.
//! let seq = Sequence::new("sp|P69905 HBA_HUMAN", "mv?lspadk");
//! assert_eq!(seq.identifier(), "sp|P69905");
//! assert_eq!(seq.residues(), "MVXLSPADK");
//! ```

pub mod amino;
pub mod fasta;
pub mod sequence;

pub use amino::{AminoAcid, GAP, is_hydrophilic};
pub use fasta::read_fasta;
pub use sequence::Sequence;
