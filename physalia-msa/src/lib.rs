//! Progressive multiple sequence alignment for the Physalia phylogenetics
//! workspace.
//!
//! Ties the other crates together: pairwise distances over a sequence set
//! ([`DistanceMetric`]), guide trees from `physalia-phylo`, profile column
//! statistics ([`MultipleAlignment`]), a profile-profile aligner with
//! position-specific gap penalties, and the two progressive schedules
//! ([`FengDoolittle`] and [`ClustalW`]).

pub mod clustalw;
pub mod feng_doolittle;
pub mod metric;
pub mod profile;
pub mod profile_align;
mod rng;

pub use clustalw::ClustalW;
pub use feng_doolittle::FengDoolittle;
pub use metric::DistanceMetric;
pub use profile::MultipleAlignment;
pub use profile_align::ProfileAligner;
