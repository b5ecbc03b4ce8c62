//! Phylogenetic trees and distance-based tree construction for the Physalia
//! phylogenetics workspace.
//!
//! Provides the OTU-labelled [`DistanceMatrix`], rooted and unrooted tree
//! arenas, Newick format I/O, midpoint rerooting, and the three agglomerative
//! clustering algorithms (UPGMA, Neighbor-Joining, Fitch-Margoliash).
//!
//! # Quick start
//!
//! ```
//! use physalia_phylo::PhyloTree;
//!
//! let tree = PhyloTree::from_newick("((A:0.1,B:0.2):0.3,(C:0.4,D:0.5):0.6);").unwrap();
//! assert_eq!(tree.leaf_count(), 4);
//! assert_eq!(tree.leaf_names(), vec!["A", "B", "C", "D"]);
//! ```

pub mod construct;
pub mod distance_matrix;
pub mod newick;
pub mod tree;
pub mod unrooted;

pub use construct::{fitch_margoliash, neighbor_joining, upgma, ClusteringMethod, Phylogeny};
pub use distance_matrix::DistanceMatrix;
pub use newick::{parse as parse_newick, write as write_newick};
pub use tree::{Node, NodeId, PhyloTree};
pub use unrooted::UnrootedTree;
