//! Pairwise protein alignment for the Physalia phylogenetics workspace.
//!
//! Provides 26-residue substitution matrices with a precomputed family
//! catalog (BLOSUM, PAM, identity), affine gap penalties, and global
//! Needleman-Wunsch alignment:
//!
//! ```
//! use physalia_align::{needleman_wunsch, AffineGap, MatrixId};
//!
//! let matrix = MatrixId::Blosum62.table().shifted_to_zero();
//! let gap = AffineGap::new(10.0, 0.1);
//! let result = needleman_wunsch(b"HEAGAWGHEE", b"PAWHEAE", &matrix, &gap);
//! assert_eq!(result.aligned_a.len(), result.aligned_b.len());
//! ```

pub mod gap;
pub mod matrix;
pub mod pairwise;
mod tables;

pub use gap::AffineGap;
pub use matrix::{MatrixFamily, MatrixId, SubstitutionMatrix};
pub use pairwise::{needleman_wunsch, PairwiseAlignment};
