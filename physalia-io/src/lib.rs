//! File formats for the Physalia phylogenetics workspace.
//!
//! - **ClustalW-style alignments** — block-interleaved text with cumulative
//!   residue counts ([`clustal`])
//! - **Substitution matrices** — the plain-text exchange format
//!   ([`matrix_file`])

pub mod clustal;
pub mod matrix_file;

pub use clustal::{parse_alignment, write_alignment};
pub use matrix_file::{parse_matrix, write_matrix};
