//! Rooted phylogenetic trees.
//!
//! Uses arena-style storage: nodes live in a flat `Vec<Node>` and are
//! referenced by `NodeId` (a `usize` index). Parent/child links are indices,
//! so the structure has no ownership cycles and derives cheap equality.

use physalia_core::{PhysaliaError, Result, Summarizable};

use crate::distance_matrix::DistanceMatrix;
use crate::unrooted::UnrootedTree;

/// Index into the tree's node arena.
pub type NodeId = usize;

/// A single node in a rooted phylogenetic tree.
///
/// `branch_length` is the length of the edge to the parent; `None` means the
/// length is unset (it serializes as a bare label in Newick output).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Index of this node in the arena.
    pub id: NodeId,
    /// Parent node (None for root).
    pub parent: Option<NodeId>,
    /// Child nodes, in sibling order.
    pub children: Vec<NodeId>,
    /// Branch length from this node to its parent.
    pub branch_length: Option<f64>,
    /// Taxon or clade label.
    pub name: Option<String>,
}

impl Node {
    /// True if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True if this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A rooted phylogenetic tree stored as an arena of nodes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhyloTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl PhyloTree {
    /// Create a new tree with a single unnamed root node.
    pub fn new() -> Self {
        let root = Node {
            id: 0,
            parent: None,
            children: Vec::new(),
            branch_length: None,
            name: None,
        };
        Self {
            nodes: vec![root],
            root: 0,
        }
    }

    /// Create a tree from pre-built nodes and a root index.
    ///
    /// This is used by the Newick parser and the tree construction algorithms.
    pub fn from_nodes(nodes: Vec<Node>, root: NodeId) -> Result<Self> {
        if nodes.is_empty() {
            return Err(PhysaliaError::InvalidInput("empty node list".into()));
        }
        if root >= nodes.len() {
            return Err(PhysaliaError::InvalidInput(format!(
                "root index {} out of range ({})",
                root,
                nodes.len()
            )));
        }
        Ok(Self { nodes, root })
    }

    /// Add a child to `parent` and return its `NodeId`.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: Option<String>,
        branch_length: Option<f64>,
    ) -> Result<NodeId> {
        if parent >= self.nodes.len() {
            return Err(PhysaliaError::InvalidInput(format!(
                "parent index {} out of range ({})",
                parent,
                self.nodes.len()
            )));
        }
        let id = self.nodes.len();
        self.nodes.push(Node {
            id,
            parent: Some(parent),
            children: Vec::new(),
            branch_length,
            name,
        });
        self.nodes[parent].children.push(id);
        Ok(id)
    }

    /// Access a node by id.
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Mutable access to a node by id.
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// The root node id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Read-only access to the full node arena.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaf nodes.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// All leaf node ids.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.is_leaf())
            .map(|n| n.id)
            .collect()
    }

    /// Number of leaves in the subtree rooted at `id`.
    pub fn leaves_below(&self, id: NodeId) -> usize {
        let mut count = 0;
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let node = &self.nodes[cur];
            if node.is_leaf() {
                count += 1;
            } else {
                stack.extend(&node.children);
            }
        }
        count
    }

    /// Pre-order (parent before children) traversal yielding node ids.
    pub fn iter_preorder(&self) -> PreorderIter<'_> {
        PreorderIter {
            tree: self,
            stack: vec![self.root],
        }
    }

    /// Post-order (children before parent) traversal yielding node ids.
    ///
    /// The sequence is materialized up front, so deep trees cost heap rather
    /// than stack.
    pub fn iter_postorder(&self) -> PostorderIter {
        let mut result = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            result.push(id);
            for &child in &self.nodes[id].children {
                stack.push(child);
            }
        }
        result.reverse();
        PostorderIter {
            sequence: result,
            pos: 0,
        }
    }

    /// Most recent common ancestor of two nodes.
    pub fn mrca(&self, a: NodeId, b: NodeId) -> Result<NodeId> {
        if a >= self.nodes.len() || b >= self.nodes.len() {
            return Err(PhysaliaError::InvalidInput("node id out of range".into()));
        }
        let mut ancestors_a = Vec::new();
        let mut cur = a;
        loop {
            ancestors_a.push(cur);
            match self.nodes[cur].parent {
                Some(p) => cur = p,
                None => break,
            }
        }
        cur = b;
        loop {
            if ancestors_a.contains(&cur) {
                return Ok(cur);
            }
            match self.nodes[cur].parent {
                Some(p) => cur = p,
                None => break,
            }
        }
        Ok(self.root)
    }

    /// Sorted list of leaf names (leaves without names are excluded).
    pub fn leaf_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .nodes
            .iter()
            .filter(|n| n.is_leaf())
            .filter_map(|n| n.name.clone())
            .collect();
        names.sort();
        names
    }

    /// Sum of branch lengths on the path from the root down to `id`.
    ///
    /// The root's own (pendant) branch length does not count.
    pub fn distance_from_root(&self, id: NodeId) -> f64 {
        let mut dist = 0.0;
        let mut cur = id;
        while let Some(parent) = self.nodes[cur].parent {
            dist += self.nodes[cur].branch_length.unwrap_or(0.0);
            cur = parent;
        }
        dist
    }

    /// The largest root-to-leaf path length.
    pub fn max_leaf_distance(&self) -> f64 {
        self.leaves()
            .into_iter()
            .map(|leaf| self.distance_from_root(leaf))
            .fold(0.0, f64::max)
    }

    /// Sum of edge lengths on the unique path between two nodes.
    pub fn path_distance(&self, a: NodeId, b: NodeId) -> Result<f64> {
        let ancestor = self.mrca(a, b)?;
        Ok(self.distance_from_root(a) + self.distance_from_root(b)
            - 2.0 * self.distance_from_root(ancestor))
    }

    /// All-pairs leaf distances as a [`DistanceMatrix`] keyed by leaf name.
    pub fn leaf_distance_matrix(&self) -> Result<DistanceMatrix> {
        let leaves = self.leaves();
        let mut matrix = DistanceMatrix::new();
        for &leaf in &leaves {
            if let Some(name) = &self.nodes[leaf].name {
                matrix.add_otu(name);
            }
        }
        for (i, &a) in leaves.iter().enumerate() {
            for &b in leaves.iter().skip(i + 1) {
                if let (Some(na), Some(nb)) = (&self.nodes[a].name, &self.nodes[b].name) {
                    let d = self.path_distance(a, b)?;
                    matrix.set(na, nb, d);
                }
            }
        }
        Ok(matrix)
    }

    /// Drop the root, turning parent-child edges into symmetric neighbors
    /// with the same lengths.
    pub fn to_unrooted(&self) -> UnrootedTree {
        let mut tree = UnrootedTree::new();
        let mut mapping = vec![0usize; self.nodes.len()];
        for id in self.iter_preorder() {
            mapping[id] = tree.add_node(self.nodes[id].name.clone());
        }
        for id in self.iter_preorder() {
            for &child in &self.nodes[id].children {
                let length = self.nodes[child].branch_length.unwrap_or(0.0);
                tree.connect(mapping[id], mapping[child], length);
            }
        }
        tree
    }

    /// Parse a Newick format string into a tree.
    pub fn from_newick(input: &str) -> Result<Self> {
        crate::newick::parse(input)
    }

    /// Serialize the tree to a Newick format string.
    pub fn to_newick(&self) -> String {
        crate::newick::write(self)
    }
}

impl Default for PhyloTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Summarizable for PhyloTree {
    fn summary(&self) -> String {
        let leaves = self.leaf_count();
        let internal = self.node_count() - leaves;
        format!(
            "PhyloTree: {} nodes ({} leaves, {} internal)",
            self.node_count(),
            leaves,
            internal
        )
    }
}

/// Pre-order iterator over node ids.
pub struct PreorderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreorderIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // Push children in reverse order so the leftmost is visited first.
        for &child in self.tree.nodes[id].children.iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}

/// Post-order iterator over node ids.
pub struct PostorderIter {
    sequence: Vec<NodeId>,
    pos: usize,
}

impl Iterator for PostorderIter {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos < self.sequence.len() {
            let id = self.sequence[self.pos];
            self.pos += 1;
            Some(id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> PhyloTree {
        // ((A:0.1,B:0.2)AB:0.3,(C:0.4,D:0.5)CD:0.6)root;
        let mut tree = PhyloTree::new();
        tree.get_node_mut(0).unwrap().name = Some("root".into());
        let ab = tree.add_child(0, Some("AB".into()), Some(0.3)).unwrap();
        let cd = tree.add_child(0, Some("CD".into()), Some(0.6)).unwrap();
        tree.add_child(ab, Some("A".into()), Some(0.1)).unwrap();
        tree.add_child(ab, Some("B".into()), Some(0.2)).unwrap();
        tree.add_child(cd, Some("C".into()), Some(0.4)).unwrap();
        tree.add_child(cd, Some("D".into()), Some(0.5)).unwrap();
        tree
    }

    #[test]
    fn new_tree_has_single_root() {
        let tree = PhyloTree::new();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.leaf_count(), 1);
        assert!(tree.get_node(0).unwrap().is_root());
    }

    #[test]
    fn add_child_works() {
        let mut tree = PhyloTree::new();
        let c1 = tree.add_child(0, Some("A".into()), Some(1.0)).unwrap();
        assert_eq!(c1, 1);
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.get_node(c1).unwrap().parent, Some(0));
        assert_eq!(tree.get_node(0).unwrap().children, vec![1]);
    }

    #[test]
    fn add_child_invalid_parent() {
        let mut tree = PhyloTree::new();
        assert!(tree.add_child(99, None, None).is_err());
    }

    #[test]
    fn leaf_counts() {
        let tree = sample_tree();
        assert_eq!(tree.node_count(), 7);
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.leaf_names(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn leaves_below_counts_subtrees() {
        let tree = sample_tree();
        assert_eq!(tree.leaves_below(tree.root()), 4);
        assert_eq!(tree.leaves_below(1), 2); // AB clade
        assert_eq!(tree.leaves_below(3), 1); // leaf A
    }

    #[test]
    fn preorder_traversal() {
        let tree = sample_tree();
        let order: Vec<NodeId> = tree.iter_preorder().collect();
        // root(0), AB(1), A(3), B(4), CD(2), C(5), D(6)
        assert_eq!(order, vec![0, 1, 3, 4, 2, 5, 6]);
    }

    #[test]
    fn postorder_traversal() {
        let tree = sample_tree();
        let order: Vec<NodeId> = tree.iter_postorder().collect();
        // A(3), B(4), AB(1), C(5), D(6), CD(2), root(0)
        assert_eq!(order, vec![3, 4, 1, 5, 6, 2, 0]);
    }

    #[test]
    fn mrca_siblings_and_cousins() {
        let tree = sample_tree();
        assert_eq!(tree.mrca(3, 4).unwrap(), 1);
        assert_eq!(tree.mrca(3, 5).unwrap(), 0);
        assert_eq!(tree.mrca(1, 3).unwrap(), 1);
        assert_eq!(tree.mrca(3, 3).unwrap(), 3);
    }

    #[test]
    fn distances_from_root() {
        let tree = sample_tree();
        assert_eq!(tree.distance_from_root(tree.root()), 0.0);
        assert!((tree.distance_from_root(3) - 0.4).abs() < 1e-12); // A
        assert!((tree.distance_from_root(6) - 1.1).abs() < 1e-12); // D
        assert!((tree.max_leaf_distance() - 1.1).abs() < 1e-12);
    }

    #[test]
    fn path_distance_is_additive() {
        let tree = sample_tree();
        // A-B through AB: 0.1 + 0.2
        assert!((tree.path_distance(3, 4).unwrap() - 0.3).abs() < 1e-12);
        // A-D through the root: 0.1 + 0.3 + 0.6 + 0.5
        assert!((tree.path_distance(3, 6).unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn leaf_distance_matrix_matches_paths() {
        let tree = sample_tree();
        let matrix = tree.leaf_distance_matrix().unwrap();
        assert_eq!(matrix.len(), 4);
        assert!((matrix.get("A", "B") - 0.3).abs() < 1e-12);
        assert!((matrix.get("A", "D") - 1.5).abs() < 1e-12);
        assert!((matrix.get("D", "A") - 1.5).abs() < 1e-12);
    }

    #[test]
    fn to_unrooted_preserves_leaves_and_lengths() {
        let tree = sample_tree();
        let unrooted = tree.to_unrooted();
        assert_eq!(unrooted.leaf_count(), 4);
        let a = unrooted.find_leaf("A").unwrap();
        let b = unrooted.find_leaf("B").unwrap();
        assert!((unrooted.path_distance(a, b) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn summary_format() {
        let tree = sample_tree();
        assert_eq!(tree.summary(), "PhyloTree: 7 nodes (4 leaves, 3 internal)");
    }
}
