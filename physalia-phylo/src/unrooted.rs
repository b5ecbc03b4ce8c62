//! Unrooted phylogenetic trees.
//!
//! The same arena idiom as [`crate::tree`], with a symmetric adjacency map
//! per node instead of parent/child links. Node ids are indices into the
//! arena and are fresh per tree.

use std::collections::BTreeMap;

use physalia_core::{PhysaliaError, Result, Summarizable};

use crate::distance_matrix::DistanceMatrix;
use crate::tree::{Node, PhyloTree};

/// A node of an unrooted tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnrootedNode {
    /// Index of this node in the arena.
    pub id: usize,
    /// Taxon label; internal join nodes are unlabelled.
    pub label: Option<String>,
    /// Neighbor id -> edge length. Kept sorted by id so traversal order is
    /// deterministic.
    neighbors: BTreeMap<usize, f64>,
}

impl UnrootedNode {
    /// A node is a leaf when it has fewer than two neighbors.
    pub fn is_leaf(&self) -> bool {
        self.neighbors.len() < 2
    }

    /// Neighbor ids and edge lengths in id order.
    pub fn neighbors(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.neighbors.iter().map(|(&id, &d)| (id, d))
    }

    /// The direct edge length to `other`, if the nodes are adjacent.
    pub fn edge_to(&self, other: usize) -> Option<f64> {
        self.neighbors.get(&other).copied()
    }
}

/// An unrooted phylogenetic tree.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnrootedTree {
    nodes: Vec<UnrootedNode>,
}

impl UnrootedTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an isolated node and return its id.
    pub fn add_node(&mut self, label: Option<String>) -> usize {
        let id = self.nodes.len();
        self.nodes.push(UnrootedNode {
            id,
            label,
            neighbors: BTreeMap::new(),
        });
        id
    }

    /// Connect two nodes with an edge of the given length. The relation is
    /// symmetric, and re-connecting an existing pair updates the length
    /// (no multi-edges).
    pub fn connect(&mut self, a: usize, b: usize, length: f64) {
        if a == b || a >= self.nodes.len() || b >= self.nodes.len() {
            return;
        }
        self.nodes[a].neighbors.insert(b, length);
        self.nodes[b].neighbors.insert(a, length);
    }

    /// Remove the edge between two nodes, if present.
    pub fn disconnect(&mut self, a: usize, b: usize) {
        if a < self.nodes.len() && b < self.nodes.len() {
            self.nodes[a].neighbors.remove(&b);
            self.nodes[b].neighbors.remove(&a);
        }
    }

    /// Access a node by id.
    pub fn get_node(&self, id: usize) -> Option<&UnrootedNode> {
        self.nodes.get(id)
    }

    /// Read-only access to the arena.
    pub fn nodes(&self) -> &[UnrootedNode] {
        &self.nodes
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Ids of all leaves.
    pub fn leaves(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .filter(|n| n.is_leaf())
            .map(|n| n.id)
            .collect()
    }

    /// The id of the leaf with the given label.
    pub fn find_leaf(&self, label: &str) -> Option<usize> {
        self.nodes
            .iter()
            .find(|n| n.is_leaf() && n.label.as_deref() == Some(label))
            .map(|n| n.id)
    }

    /// Path lengths from `source` to every node (BFS over the adjacency).
    pub fn distances_from(&self, source: usize) -> Vec<f64> {
        let n = self.nodes.len();
        let mut dist = vec![f64::MAX; n];
        let mut visited = vec![false; n];
        let mut queue = std::collections::VecDeque::new();
        dist[source] = 0.0;
        visited[source] = true;
        queue.push_back(source);
        while let Some(u) = queue.pop_front() {
            for (v, length) in self.nodes[u].neighbors() {
                if !visited[v] {
                    visited[v] = true;
                    dist[v] = dist[u] + length;
                    queue.push_back(v);
                }
            }
        }
        dist
    }

    /// Sum of edge lengths on the unique path between two nodes.
    pub fn path_distance(&self, a: usize, b: usize) -> f64 {
        self.distances_from(a)[b]
    }

    /// All-pairs leaf distances as a [`DistanceMatrix`] keyed by leaf label.
    pub fn leaf_distance_matrix(&self) -> DistanceMatrix {
        let leaves = self.leaves();
        let mut matrix = DistanceMatrix::new();
        for &leaf in &leaves {
            if let Some(label) = &self.nodes[leaf].label {
                matrix.add_otu(label);
            }
        }
        for (i, &a) in leaves.iter().enumerate() {
            let dist = self.distances_from(a);
            for &b in leaves.iter().skip(i + 1) {
                if let (Some(la), Some(lb)) = (&self.nodes[a].label, &self.nodes[b].label) {
                    matrix.set(la, lb, dist[b]);
                }
            }
        }
        matrix
    }

    /// Split the edge between `x` and `y` with a new unlabelled node placed
    /// `dist_from_y` away from `y`. Returns the new node's id.
    pub fn split_edge(&mut self, x: usize, y: usize, dist_from_y: f64) -> Result<usize> {
        let length = self.nodes[y].edge_to(x).ok_or_else(|| {
            PhysaliaError::Internal(format!("split_edge: nodes {} and {} not adjacent", x, y))
        })?;
        let node = self.add_node(None);
        self.disconnect(x, y);
        self.connect(node, y, dist_from_y);
        self.connect(node, x, length - dist_from_y);
        Ok(node)
    }

    /// Grow a rooted tree outward from `root`. Children follow the neighbor
    /// id order; edge lengths become the children's branch lengths.
    pub fn to_rooted(&self, root: usize) -> Result<PhyloTree> {
        if root >= self.nodes.len() {
            return Err(PhysaliaError::InvalidInput(format!(
                "root id {} out of range ({})",
                root,
                self.nodes.len()
            )));
        }
        let mut nodes: Vec<Node> = Vec::with_capacity(self.nodes.len());
        // (unrooted id, unrooted parent, rooted parent)
        let mut stack: Vec<(usize, Option<usize>, Option<usize>)> = vec![(root, None, None)];
        while let Some((id, up, rp)) = stack.pop() {
            let new_id = nodes.len();
            let branch_length = up.and_then(|p| self.nodes[id].edge_to(p));
            nodes.push(Node {
                id: new_id,
                parent: rp,
                children: Vec::new(),
                branch_length,
                name: self.nodes[id].label.clone(),
            });
            if let Some(parent) = rp {
                nodes[parent].children.push(new_id);
            }
            // Reversed so the smallest neighbor id is visited first.
            let mut next: Vec<usize> = self.nodes[id]
                .neighbors()
                .map(|(n, _)| n)
                .filter(|&n| Some(n) != up)
                .collect();
            next.reverse();
            for n in next {
                stack.push((n, Some(id), Some(new_id)));
            }
        }
        PhyloTree::from_nodes(nodes, 0)
    }

    /// Reroot at the midpoint of the longest leaf-to-leaf path and return
    /// the resulting rooted tree.
    pub fn midpoint_root(&self) -> Result<PhyloTree> {
        if self.nodes.is_empty() {
            return Err(PhysaliaError::InvalidInput(
                "cannot root an empty tree".into(),
            ));
        }
        let leaves = self.leaves();
        if leaves.len() < 2 {
            return self.to_rooted(leaves.first().copied().unwrap_or(0));
        }

        // The two most distant leaves.
        let matrix = self.leaf_distance_matrix();
        let (label_a, label_b) = match matrix.max_position() {
            Some(pair) => pair,
            None => return self.to_rooted(leaves[0]),
        };
        let a = self.find_leaf(&label_a).ok_or_else(|| {
            PhysaliaError::Internal(format!("leaf '{}' vanished from tree", label_a))
        })?;
        let b = self.find_leaf(&label_b).ok_or_else(|| {
            PhysaliaError::Internal(format!("leaf '{}' vanished from tree", label_b))
        })?;

        let dist_to_b = self.distances_from(b);
        let total = dist_to_b[a];
        if total <= 0.0 {
            // Zero-length tree: still root on an edge, not at a leaf, so
            // every leaf stays below the root.
            let neighbor = self.nodes[a].neighbors().next().map(|(n, _)| n);
            return match neighbor {
                Some(u) => {
                    let mut split = self.clone();
                    split.split_edge(u, a, 0.0)?;
                    split.to_rooted(split.node_count() - 1)
                }
                None => self.to_rooted(a),
            };
        }
        let half = total / 2.0;

        // Walk from a toward b, always taking the neighbor closest to b,
        // until the remaining distance drops to half the diameter.
        let mut previous: Option<usize> = None;
        let mut current = a;
        while dist_to_b[current] > half {
            let next = self.nodes[current]
                .neighbors()
                .map(|(n, _)| n)
                .filter(|&n| Some(n) != previous)
                .min_by(|&x, &y| {
                    dist_to_b[x]
                        .partial_cmp(&dist_to_b[y])
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .ok_or_else(|| {
                    PhysaliaError::Internal("midpoint walk ran out of neighbors".into())
                })?;
            previous = Some(current);
            current = next;
        }

        let root = match previous {
            // The midpoint sits on the edge just traversed.
            Some(previous) => {
                let offset = half - dist_to_b[current];
                let mut split = self.clone();
                split.split_edge(previous, current, offset)?;
                return split.to_rooted(split.node_count() - 1);
            }
            None => current,
        };
        self.to_rooted(root)
    }

    /// Newick serialization of the midpoint-rooted tree.
    pub fn to_newick(&self) -> Result<String> {
        Ok(self.midpoint_root()?.to_newick())
    }
}

impl Summarizable for UnrootedTree {
    fn summary(&self) -> String {
        format!(
            "UnrootedTree: {} nodes ({} leaves)",
            self.node_count(),
            self.leaf_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A - u - B with A:1, B:3 plus u - v - C with v-C:2, u-v:1.
    fn small_tree() -> (UnrootedTree, usize, usize, usize) {
        let mut t = UnrootedTree::new();
        let a = t.add_node(Some("A".into()));
        let b = t.add_node(Some("B".into()));
        let c = t.add_node(Some("C".into()));
        let u = t.add_node(None);
        let v = t.add_node(None);
        t.connect(a, u, 1.0);
        t.connect(b, u, 3.0);
        t.connect(u, v, 1.0);
        t.connect(v, c, 2.0);
        (t, a, b, c)
    }

    #[test]
    fn connection_is_symmetric() {
        let (t, a, _, _) = small_tree();
        let u = 3;
        assert_eq!(t.get_node(a).unwrap().edge_to(u), Some(1.0));
        assert_eq!(t.get_node(u).unwrap().edge_to(a), Some(1.0));
    }

    #[test]
    fn reconnect_updates_without_multi_edge() {
        let mut t = UnrootedTree::new();
        let a = t.add_node(Some("A".into()));
        let b = t.add_node(Some("B".into()));
        t.connect(a, b, 1.0);
        t.connect(a, b, 2.5);
        assert_eq!(t.get_node(a).unwrap().neighbors().count(), 1);
        assert_eq!(t.get_node(b).unwrap().edge_to(a), Some(2.5));
    }

    #[test]
    fn leaves_are_degree_one() {
        let (t, ..) = small_tree();
        assert_eq!(t.leaf_count(), 3);
        assert!(t.find_leaf("A").is_some());
        assert!(t.find_leaf("Z").is_none());
    }

    #[test]
    fn path_distances() {
        let (t, a, b, c) = small_tree();
        assert!((t.path_distance(a, b) - 4.0).abs() < 1e-12);
        assert!((t.path_distance(a, c) - 4.0).abs() < 1e-12);
        assert!((t.path_distance(b, c) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn leaf_distance_matrix_is_symmetric() {
        let (t, ..) = small_tree();
        let m = t.leaf_distance_matrix();
        assert_eq!(m.len(), 3);
        assert_eq!(m.get("A", "B"), m.get("B", "A"));
        assert!((m.get("B", "C") - 6.0).abs() < 1e-12);
    }

    #[test]
    fn split_edge_preserves_total_length() {
        let (mut t, a, b, _) = small_tree();
        let u = 3;
        let mid = t.split_edge(a, u, 0.25).unwrap();
        assert_eq!(t.get_node(mid).unwrap().edge_to(u), Some(0.25));
        assert_eq!(t.get_node(mid).unwrap().edge_to(a), Some(0.75));
        assert!((t.path_distance(a, b) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn to_rooted_orders_children_by_id() {
        let (t, ..) = small_tree();
        let u = 3;
        let rooted = t.to_rooted(u).unwrap();
        assert_eq!(rooted.leaf_count(), 3);
        // Neighbors of u are a(0), b(1), v(4): children follow that order.
        let root_children = &rooted.get_node(rooted.root()).unwrap().children;
        let first = rooted.get_node(root_children[0]).unwrap();
        assert_eq!(first.name.as_deref(), Some("A"));
        assert_eq!(first.branch_length, Some(1.0));
    }

    #[test]
    fn midpoint_root_balances_depths() {
        let (t, ..) = small_tree();
        // Diameter is B..C = 6; the root must see both at depth 3.
        let rooted = t.midpoint_root().unwrap();
        let depths: Vec<f64> = rooted
            .leaves()
            .into_iter()
            .map(|l| rooted.distance_from_root(l))
            .collect();
        let max = depths.iter().cloned().fold(0.0, f64::max);
        assert!((max - 3.0).abs() < 1e-9);
        // Both subtrees below the root reach the same maximum depth.
        let root_children = rooted.get_node(rooted.root()).unwrap().children.clone();
        assert_eq!(root_children.len(), 2);
        let side_max = |child| {
            rooted
                .leaves()
                .into_iter()
                .filter(|&l| {
                    let mut cur = l;
                    loop {
                        if cur == child {
                            break true;
                        }
                        match rooted.get_node(cur).unwrap().parent {
                            Some(p) => cur = p,
                            None => break false,
                        }
                    }
                })
                .map(|l| rooted.distance_from_root(l))
                .fold(0.0, f64::max)
        };
        assert!((side_max(root_children[0]) - side_max(root_children[1])).abs() < 1e-9);
    }

    #[test]
    fn midpoint_handles_long_pendant_edge() {
        // A:1 - u - B:9. The midpoint falls inside B's pendant edge.
        let mut t = UnrootedTree::new();
        let a = t.add_node(Some("A".into()));
        let b = t.add_node(Some("B".into()));
        let u = t.add_node(None);
        t.connect(a, u, 1.0);
        t.connect(b, u, 9.0);
        let rooted = t.midpoint_root().unwrap();
        let depths: Vec<f64> = rooted
            .leaves()
            .into_iter()
            .map(|l| rooted.distance_from_root(l))
            .collect();
        for d in depths {
            assert!((d - 5.0).abs() < 1e-9, "unbalanced depth {}", d);
        }
    }

    #[test]
    fn roundtrip_through_rooted() {
        let (t, ..) = small_tree();
        let rooted = t.to_rooted(3).unwrap();
        let back = rooted.to_unrooted();
        assert_eq!(back.leaf_count(), 3);
        let a = back.find_leaf("A").unwrap();
        let c = back.find_leaf("C").unwrap();
        assert!((back.path_distance(a, c) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn midpoint_of_zero_length_tree_keeps_all_leaves_below_root() {
        let mut t = UnrootedTree::new();
        let a = t.add_node(Some("A".into()));
        let b = t.add_node(Some("B".into()));
        let u = t.add_node(None);
        t.connect(a, u, 0.0);
        t.connect(b, u, 0.0);
        let rooted = t.midpoint_root().unwrap();
        assert_eq!(rooted.leaf_count(), 2);
        let mut names = rooted.leaf_names();
        names.sort();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn single_node_tree_roots_trivially() {
        let mut t = UnrootedTree::new();
        t.add_node(Some("only".into()));
        let rooted = t.midpoint_root().unwrap();
        assert_eq!(rooted.node_count(), 1);
        assert_eq!(rooted.get_node(0).unwrap().name.as_deref(), Some("only"));
    }
}
