//! Distance-based tree construction.
//!
//! Three agglomerative methods over a [`DistanceMatrix`]:
//!
//! - **UPGMA** — unweighted group average, produces an ultrametric rooted tree
//! - **Neighbor-Joining** — Q-criterion joins, produces an unrooted tree
//! - **Fitch-Margoliash** — three-point branch lengths, produces an unrooted tree
//!
//! Joined clusters are tracked under composite labels (`"A+B"`); averages use
//! the *original* matrix where the method calls for it, not the shrinking
//! working copy.

use std::collections::HashMap;

use physalia_core::{PhysaliaError, Result};

use crate::distance_matrix::DistanceMatrix;
use crate::tree::{Node, NodeId, PhyloTree};
use crate::unrooted::UnrootedTree;

/// A guide tree in either rooted or unrooted form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phylogeny {
    Rooted(PhyloTree),
    Unrooted(UnrootedTree),
}

impl Phylogeny {
    /// The rooted form: rooted trees pass through, unrooted trees are
    /// midpoint-rooted.
    pub fn into_rooted(self) -> Result<PhyloTree> {
        match self {
            Phylogeny::Rooted(tree) => Ok(tree),
            Phylogeny::Unrooted(tree) => tree.midpoint_root(),
        }
    }

    /// Newick serialization (midpoint-rooting unrooted trees first).
    pub fn to_newick(&self) -> Result<String> {
        match self {
            Phylogeny::Rooted(tree) => Ok(tree.to_newick()),
            Phylogeny::Unrooted(tree) => tree.to_newick(),
        }
    }
}

/// The clustering algorithm used to build a guide tree.
///
/// The set is closed on purpose; each variant maps onto one construction
/// function below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClusteringMethod {
    Upgma,
    FitchMargoliash,
    NeighborJoining,
}

impl ClusteringMethod {
    /// Build a guide tree from a distance matrix.
    pub fn build_tree(self, matrix: &DistanceMatrix) -> Result<Phylogeny> {
        match self {
            ClusteringMethod::Upgma => upgma(matrix).map(Phylogeny::Rooted),
            ClusteringMethod::FitchMargoliash => {
                fitch_margoliash(matrix).map(Phylogeny::Unrooted)
            }
            ClusteringMethod::NeighborJoining => {
                neighbor_joining(matrix).map(Phylogeny::Unrooted)
            }
        }
    }
}

fn validate(matrix: &DistanceMatrix) -> Result<()> {
    if matrix.len() < 2 {
        return Err(PhysaliaError::InvalidInput(
            "need at least 2 OTUs to build a tree".into(),
        ));
    }
    Ok(())
}

fn join_label(a: &str, b: &str) -> String {
    format!("{}+{}", a, b)
}

fn no_pair_left() -> PhysaliaError {
    PhysaliaError::Internal("no joinable pair left in distance matrix".into())
}

/// Build a rooted ultrametric tree with UPGMA.
///
/// At each step the closest pair joins under a new node whose height is half
/// their distance; distances from the merged cluster to the rest are averaged
/// over the original matrix (unweighted group average).
pub fn upgma(matrix: &DistanceMatrix) -> Result<PhyloTree> {
    validate(matrix)?;

    let mut work = matrix.clone();
    let mut nodes: Vec<Node> = Vec::new();
    let mut node_pool: HashMap<String, NodeId> = HashMap::new();
    let mut heights: HashMap<String, f64> = HashMap::new();
    let mut members: HashMap<String, Vec<String>> = HashMap::new();

    for label in matrix.otus() {
        let id = nodes.len();
        nodes.push(Node {
            id,
            parent: None,
            children: Vec::new(),
            branch_length: None,
            name: Some(label.clone()),
        });
        node_pool.insert(label.clone(), id);
        heights.insert(label.clone(), 0.0);
        members.insert(label.clone(), vec![label.clone()]);
    }

    let mut root = 0;
    while work.len() > 1 {
        let (i, j) = work.min_position().ok_or_else(no_pair_left)?;
        let new_label = join_label(&i, &j);
        let new_height = work.get(&i, &j) / 2.0;

        let child_i = node_pool[&i];
        let child_j = node_pool[&j];
        let id = nodes.len();
        nodes.push(Node {
            id,
            parent: None,
            children: vec![child_i, child_j],
            branch_length: None,
            name: None,
        });
        nodes[child_i].parent = Some(id);
        nodes[child_j].parent = Some(id);
        nodes[child_i].branch_length = Some(new_height - heights[&i]);
        nodes[child_j].branch_length = Some(new_height - heights[&j]);

        let mut merged = members[&i].clone();
        merged.extend(members[&j].iter().cloned());

        // Group average over the original distances.
        for other in work.otus().to_vec() {
            if other == i || other == j {
                continue;
            }
            let mut sum = 0.0;
            for a in &merged {
                for b in &members[&other] {
                    sum += matrix.get(a, b);
                }
            }
            let average = sum / (merged.len() * members[&other].len()) as f64;
            work.set(&other, &new_label, average);
        }

        work.add_otu(&new_label);
        work.remove_otu(&i);
        work.remove_otu(&j);
        node_pool.insert(new_label.clone(), id);
        heights.insert(new_label.clone(), new_height);
        members.insert(new_label, merged);
        root = id;
    }

    PhyloTree::from_nodes(nodes, root)
}

/// Build an unrooted tree with Neighbor-Joining.
pub fn neighbor_joining(matrix: &DistanceMatrix) -> Result<UnrootedTree> {
    validate(matrix)?;

    let mut tree = UnrootedTree::new();
    let mut node_pool: HashMap<String, usize> = HashMap::new();
    for label in matrix.otus() {
        let id = tree.add_node(Some(label.clone()));
        node_pool.insert(label.clone(), id);
    }

    let mut work = matrix.clone();
    while work.len() > 1 {
        let otus = work.otus().to_vec();
        let n = otus.len();

        let (f, g) = if n == 2 {
            (otus[0].clone(), otus[1].clone())
        } else {
            // Row sums feed the Q criterion.
            let sums: Vec<f64> = otus
                .iter()
                .map(|i| otus.iter().map(|k| work.get(i, k)).sum())
                .collect();
            let mut best: Option<(f64, usize, usize)> = None;
            for i in 0..n {
                for j in (i + 1)..n {
                    let q = (n as f64 - 2.0) * work.get(&otus[i], &otus[j]) - sums[i] - sums[j];
                    if best.map_or(true, |(bq, _, _)| q < bq) {
                        best = Some((q, i, j));
                    }
                }
            }
            let (_, i, j) = best.ok_or_else(no_pair_left)?;
            (otus[i].clone(), otus[j].clone())
        };

        let d_fg = work.get(&f, &g);
        let u_label = join_label(&f, &g);
        let u = tree.add_node(None);

        if n == 2 {
            tree.connect(u, node_pool[&f], d_fg / 2.0);
            tree.connect(u, node_pool[&g], d_fg / 2.0);
        } else {
            let sum_f: f64 = otus.iter().map(|k| work.get(&f, k)).sum();
            let sum_g: f64 = otus.iter().map(|k| work.get(&g, k)).sum();
            let delta_f =
                (0.5 * d_fg + (sum_f - sum_g) / (2.0 * (n as f64 - 2.0))).max(0.0);
            let delta_g = (d_fg - delta_f).max(0.0);
            tree.connect(u, node_pool[&f], delta_f);
            tree.connect(u, node_pool[&g], delta_g);
        }

        for k in &otus {
            if *k == f || *k == g {
                continue;
            }
            let d_uk = 0.5 * (work.get(&f, k) + work.get(&g, k) - d_fg);
            work.set(&u_label, k, d_uk);
        }
        work.remove_otu(&f);
        work.remove_otu(&g);
        work.add_otu(&u_label);
        node_pool.insert(u_label, u);
    }

    Ok(tree)
}

/// Build an unrooted tree with Fitch-Margoliash.
pub fn fitch_margoliash(matrix: &DistanceMatrix) -> Result<UnrootedTree> {
    validate(matrix)?;

    let mut tree = UnrootedTree::new();
    let mut node_pool: HashMap<String, usize> = HashMap::new();
    let mut members: HashMap<String, Vec<String>> = HashMap::new();
    for label in matrix.otus() {
        let id = tree.add_node(Some(label.clone()));
        node_pool.insert(label.clone(), id);
        members.insert(label.clone(), vec![label.clone()]);
    }

    // Mean distance between a cluster and the outside, on original distances.
    let cluster_to_outside = |cluster: &[String], outside: &[String]| -> f64 {
        let mut sum = 0.0;
        for x in cluster {
            for o in outside {
                sum += matrix.get(x, o);
            }
        }
        sum / (cluster.len() * outside.len()) as f64
    };

    let mut work = matrix.clone();
    while work.len() > 3 {
        let (a, b) = work.min_position().ok_or_else(no_pair_left)?;
        let r_label = join_label(&a, &b);
        let r = tree.add_node(None);

        let mut merged = members[&a].clone();
        merged.extend(members[&b].iter().cloned());
        let outside: Vec<String> = matrix
            .otus()
            .iter()
            .filter(|o| !merged.contains(o))
            .cloned()
            .collect();

        let d_ab = work.get(&a, &b);
        let d_ao = cluster_to_outside(&members[&a], &outside);
        let d_bo = cluster_to_outside(&members[&b], &outside);
        let branch_a = (0.5 * (d_ao + d_ab - d_bo)).max(0.0);
        let branch_b = (0.5 * (d_bo + d_ab - d_ao)).max(0.0);
        tree.connect(r, node_pool[&a], branch_a);
        tree.connect(r, node_pool[&b], branch_b);

        for k in work.otus().to_vec() {
            if k == a || k == b {
                continue;
            }
            let d_rk = 0.5 * (work.get(&a, &k) + work.get(&b, &k));
            work.set(&r_label, &k, d_rk);
        }
        work.remove_otu(&a);
        work.remove_otu(&b);
        work.add_otu(&r_label);
        node_pool.insert(r_label.clone(), r);
        members.insert(r_label, merged);
    }

    if work.len() == 3 {
        // Closed-form three-leaf star.
        let otus = work.otus().to_vec();
        let (a, b, c) = (&otus[0], &otus[1], &otus[2]);
        let (d_ab, d_ac, d_bc) = (work.get(a, b), work.get(a, c), work.get(b, c));
        let branch_a = (0.5 * (d_ab + d_ac - d_bc)).max(0.0);
        let branch_b = (0.5 * (d_ab + d_bc - d_ac)).max(0.0);
        let branch_c = (0.5 * (d_ac + d_bc - d_ab)).max(0.0);
        let r = tree.add_node(None);
        tree.connect(r, node_pool[a], branch_a);
        tree.connect(r, node_pool[b], branch_b);
        tree.connect(r, node_pool[c], branch_c);
    } else if work.len() == 2 {
        let otus = work.otus().to_vec();
        let d = work.get(&otus[0], &otus[1]);
        let r = tree.add_node(None);
        tree.connect(r, node_pool[&otus[0]], d / 2.0);
        tree.connect(r, node_pool[&otus[1]], d / 2.0);
    }

    Ok(tree)
}
