//! Newick format parser and writer.
//!
//! Supports the standard Newick grammar:
//! ```text
//! newick   = subtree? ';'
//! subtree  = '(' children ')' label | label
//! children = subtree (',' subtree)*
//! label    = name? (':' length)?
//! ```
//! where a name is either an unquoted run of non-special characters or a
//! double-quoted literal. An unset branch length serializes as a bare label.

use physalia_core::{PhysaliaError, Result};

use crate::tree::{Node, NodeId, PhyloTree};

/// Parse a Newick format string into a `PhyloTree`.
pub fn parse(input: &str) -> Result<PhyloTree> {
    let bytes = input.as_bytes();
    let mut parser = Parser::new(bytes);
    let (nodes, root) = parser.parse_tree()?;
    PhyloTree::from_nodes(nodes, root)
}

/// Serialize a `PhyloTree` to a Newick format string.
pub fn write(tree: &PhyloTree) -> String {
    let mut buf = String::new();
    write_subtree(tree, tree.root(), &mut buf);
    buf.push(';');
    buf
}

fn write_subtree(tree: &PhyloTree, id: NodeId, buf: &mut String) {
    let node = tree.get_node(id).unwrap();
    if !node.children.is_empty() {
        buf.push('(');
        for (i, &child) in node.children.iter().enumerate() {
            if i > 0 {
                buf.push(',');
            }
            write_subtree(tree, child, buf);
        }
        buf.push(')');
    }
    if let Some(ref name) = node.name {
        if name.bytes().any(|b| matches!(b, b'(' | b')' | b',' | b':' | b';' | b'"' | b' ' | b'\t' | b'\n' | b'\r')) {
            buf.push('"');
            buf.push_str(name);
            buf.push('"');
        } else {
            buf.push_str(name);
        }
    }
    if let Some(len) = node.branch_length {
        buf.push(':');
        // Enough precision, without trailing zeros.
        let s = format!("{:.10}", len);
        let s = s.trim_end_matches('0');
        let s = s.trim_end_matches('.');
        buf.push_str(s);
    }
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    nodes: Vec<Node>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            nodes: Vec::new(),
        }
    }

    fn parse_tree(&mut self) -> Result<(Vec<Node>, NodeId)> {
        self.skip_whitespace();
        // An empty document is a bare root.
        if self.peek() == Some(b';') {
            self.pos += 1;
            self.expect_end()?;
            let root = self.alloc_node(None);
            return Ok((std::mem::take(&mut self.nodes), root));
        }
        let root = self.parse_subtree(None)?;
        self.skip_whitespace();
        if self.peek() != Some(b';') {
            return Err(PhysaliaError::Parse(
                "expected ';' at end of Newick string".into(),
            ));
        }
        self.pos += 1;
        self.expect_end()?;
        Ok((std::mem::take(&mut self.nodes), root))
    }

    fn expect_end(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(PhysaliaError::Parse(format!(
                "stray characters after ';' at offset {}",
                self.pos
            )));
        }
        Ok(())
    }

    fn parse_subtree(&mut self, parent: Option<NodeId>) -> Result<NodeId> {
        self.skip_whitespace();
        let id = self.alloc_node(parent);

        if self.peek() == Some(b'(') {
            self.pos += 1;
            let first_child = self.parse_subtree(Some(id))?;
            self.nodes[id].children.push(first_child);

            loop {
                self.skip_whitespace();
                if self.peek() == Some(b',') {
                    self.pos += 1;
                    let child = self.parse_subtree(Some(id))?;
                    self.nodes[id].children.push(child);
                } else {
                    break;
                }
            }
            self.skip_whitespace();
            if self.peek() != Some(b')') {
                return Err(PhysaliaError::Parse("expected ')' in Newick string".into()));
            }
            self.pos += 1;
        }

        self.parse_label(id)?;
        Ok(id)
    }

    fn parse_label(&mut self, id: NodeId) -> Result<()> {
        self.skip_whitespace();
        let name = self.parse_name()?;
        if !name.is_empty() {
            self.nodes[id].name = Some(name);
        }
        self.skip_whitespace();
        if self.peek() == Some(b':') {
            self.pos += 1;
            self.skip_whitespace();
            let len_str = self.parse_float_str();
            if len_str.is_empty() {
                return Err(PhysaliaError::Parse("expected number after ':'".into()));
            }
            let len: f64 = len_str.parse().map_err(|_| {
                PhysaliaError::Parse(format!("invalid branch length: '{}'", len_str))
            })?;
            self.nodes[id].branch_length = Some(len);
        }
        Ok(())
    }

    fn parse_name(&mut self) -> Result<String> {
        if self.peek() == Some(b'"') {
            // Quoted literal: everything up to the closing quote.
            self.pos += 1;
            let start = self.pos;
            while self.pos < self.input.len() && self.input[self.pos] != b'"' {
                self.pos += 1;
            }
            if self.pos >= self.input.len() {
                return Err(PhysaliaError::Parse("unterminated quoted label".into()));
            }
            let name = String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();
            self.pos += 1;
            return Ok(name);
        }
        let start = self.pos;
        while self.pos < self.input.len() {
            match self.input[self.pos] {
                b':' | b',' | b')' | b'(' | b';' => break,
                b' ' | b'\t' | b'\n' | b'\r' => break,
                _ => self.pos += 1,
            }
        }
        Ok(String::from_utf8_lossy(&self.input[start..self.pos]).into_owned())
    }

    fn parse_float_str(&mut self) -> String {
        let start = self.pos;
        while self.pos < self.input.len() {
            match self.input[self.pos] {
                b'0'..=b'9' | b'.' | b'-' | b'+' | b'e' | b'E' => self.pos += 1,
                _ => break,
            }
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    fn alloc_node(&mut self, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            id,
            parent,
            children: Vec::new(),
            branch_length: None,
            name: None,
        });
        id
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() {
            match self.input[self.pos] {
                b' ' | b'\t' | b'\n' | b'\r' => self.pos += 1,
                _ => break,
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn leaf_name() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9]{0,5}"
    }

    /// A caterpillar tree over 2-6 leaves, without branch lengths.
    fn simple_newick() -> impl Strategy<Value = String> {
        proptest::collection::vec(leaf_name(), 2..=6).prop_map(|leaves| {
            if leaves.len() == 2 {
                return format!("({},{});", leaves[0], leaves[1]);
            }
            let mut s = format!("({},{}", leaves[0], leaves[1]);
            for leaf in &leaves[2..] {
                s = format!("({},{})", s, leaf);
            }
            s.push(';');
            s
        })
    }

    proptest! {
        #[test]
        fn roundtrip_preserves_structure(newick in simple_newick()) {
            if let Ok(tree) = parse(&newick) {
                let reparsed = parse(&write(&tree)).unwrap();
                prop_assert_eq!(tree, reparsed);
            }
        }

        #[test]
        fn parse_does_not_panic(s in "\\PC{0,100}") {
            let _ = parse(&s);
        }

        #[test]
        fn node_count_ge_leaf_count(newick in simple_newick()) {
            if let Ok(tree) = parse(&newick) {
                prop_assert!(tree.node_count() >= tree.leaf_count());
            }
        }
    }
}
