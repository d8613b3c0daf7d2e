//! The frequency tree: builds a Huffman tree over byte symbols weighted by how often they
//! occur, and walks it to produce the code table.
//!
//! Tree building must be reproducible. Candidates are kept in a Vec that is stable-sorted by
//! weight before every merge, leaves start out in ascending symbol order, and merged nodes
//! are appended at the end. Equal weights therefore always resolve the same way.
//!
//! Each internal node owns its two children in a Box, so dropping the root tears down the
//! whole tree.

use std::fmt::{Display, Formatter};

use log::trace;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};

/// Longest code the one-byte length field of the header can describe.
pub const MAX_CODE_LEN: usize = 255;

/// A codeword: the path from the tree root to a leaf, zero-branch = 0, one-branch = 1.
/// Bits are packed most significant bit first, the same way the header stores them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Code {
    len: usize,
    packed: Vec<u8>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a code from `len` bits held MSB-first in `packed`. Bits past `len` are cleared
    /// and surplus bytes dropped.
    pub fn from_packed(len: usize, mut packed: Vec<u8>) -> Self {
        // A short buffer is padded with zero bits, a long one cut to size.
        packed.resize((len + 7) / 8, 0);
        if len % 8 != 0 {
            if let Some(last) = packed.last_mut() {
                *last &= 0xff << (8 - len % 8);
            }
        }
        Self { len, packed }
    }

    /// Number of bits in the code.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The code bits, MSB-first, zero padded in the last byte.
    pub fn packed(&self) -> &[u8] {
        &self.packed
    }

    pub fn push(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.packed.push(0);
        }
        if bit {
            self.packed[self.len / 8] |= 0x80 >> (self.len % 8);
        }
        self.len += 1;
    }

    pub fn pop(&mut self) -> Option<bool> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let mask = 0x80 >> (self.len % 8);
        let bit = self.packed[self.len / 8] & mask != 0;
        self.packed[self.len / 8] &= !mask;
        if self.len % 8 == 0 {
            self.packed.pop();
        }
        Some(bit)
    }

    /// Bit `idx` of the code, counted from the root. `idx` must be below `len`.
    fn bit(&self, idx: usize) -> bool {
        self.packed[idx / 8] & (0x80 >> (idx % 8)) != 0
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bit(i))
    }

    /// True when every bit of self matches the start of other (a code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && (0..self.len).all(|i| self.bit(i) == other.bit(i))
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.bits()
            .try_for_each(|b| write!(f, "{}", if b { '1' } else { '0' }))
    }
}

/// Symbol to codeword mapping. Iteration is always in ascending symbol order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: FxHashMap<u8, Code>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a code for a symbol, returning the code it replaced, if any.
    pub fn insert(&mut self, symbol: u8, code: Code) -> Option<Code> {
        self.codes.insert(symbol, code)
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// (symbol, code) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        let mut entries = self
            .codes
            .iter()
            .map(|(&s, c)| (s, c))
            .collect::<Vec<(u8, &Code)>>();
        entries.sort_unstable_by_key(|&(s, _)| s);
        entries.into_iter()
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    /// Zero-branch and one-branch children.
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    /// Occurrence count of every symbol below this node.
    pub weight: u64,
    /// Longest path from this node down to a leaf.
    pub depth: usize,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new leaf
    pub fn leaf(symbol: u8, weight: u64) -> Node {
        Node {
            weight,
            depth: 0,
            node_data: NodeData::Leaf(symbol),
        }
    }

    /// Join two subtrees under a new internal node.
    pub fn join(zero: Node, one: Node) -> Node {
        Node {
            weight: zero.weight + one.weight,
            depth: zero.depth.max(one.depth) + 1,
            node_data: NodeData::Kids(Box::new(zero), Box::new(one)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }

    /// Longest leaf depth below (and including) this node. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Walk the tree and return the code for every leaf. A tree that is a single leaf gives
    /// that symbol the empty code.
    pub fn codes(&self) -> Result<CodeTable> {
        if self.depth > MAX_CODE_LEN {
            return Err(Error::EncodingOverflow(format!(
                "code length {} exceeds the {} bit maximum",
                self.depth, MAX_CODE_LEN
            )));
        }
        let mut table = CodeTable::new();
        let mut path = Code::new();
        return_leaves(self, &mut path, &mut table);
        Ok(table)
    }
}

/// Build the tree for a frequency table. Returns None when no symbol occurs.
pub fn build_tree(freqs: &[u32; 256]) -> Option<Node> {
    let mut tree: Vec<Node> = freqs
        .iter()
        .enumerate()
        .filter(|(_, f)| **f > 0)
        .map(|(sym, &f)| Node::leaf(sym as u8, f as u64))
        .collect();

    // ...then pare it down to one single node with child nodes.
    while tree.len() > 1 {
        // Stable, so equal weights keep their insertion order.
        tree.sort_by_key(|node| node.weight);

        // The lightest node becomes the zero-branch, the next lightest the one-branch.
        let one = tree.remove(1);
        let zero = tree.remove(0);
        tree.push(Node::join(zero, one));
    }

    let root = tree.pop();
    if let Some(root) = &root {
        trace!(
            "Built huffman tree with weight {} and depth {}",
            root.weight,
            root.depth
        );
    }
    root
}

/// Recursively walk the tree, recording the current path for every leaf reached.
/// The zero-branch is always visited first.
fn return_leaves(node: &Node, path: &mut Code, leaves: &mut CodeTable) {
    match &node.node_data {
        NodeData::Kids(zero, one) => {
            path.push(false);
            return_leaves(zero, path, leaves);
            path.pop();
            path.push(true);
            return_leaves(one, path, leaves);
            path.pop();
        }
        NodeData::Leaf(sym) => {
            leaves.insert(*sym, path.clone());
        }
    };
}
