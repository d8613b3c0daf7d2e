//! Decode-side trie, rebuilt from the transmitted code table.
//!
//! Nodes live in a Vec and refer to their children by index. Index 0 is the root.

use super::huffman_tree::{Code, CodeTable};
use crate::error::{Error, Result};

const ROOT: usize = 0;

#[derive(Clone, Debug, Default)]
struct TrieNode {
    /// Zero-branch and one-branch.
    kids: [Option<usize>; 2],
    symbol: Option<u8>,
}

impl TrieNode {
    fn has_kids(&self) -> bool {
        self.kids.iter().any(|k| k.is_some())
    }
}

/// Result of stepping one bit down the trie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Reached a leaf; the walk is back at the root.
    Symbol(u8),
    /// Still inside a codeword.
    Partial,
}

#[derive(Clone, Debug)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    cursor: usize,
}

impl Trie {
    /// Insert every (symbol, code) as a root-to-leaf path. Fails when the table is not
    /// prefix-free, since such a table can not be decoded unambiguously.
    pub fn from_table(table: &CodeTable) -> Result<Self> {
        let mut trie = Trie {
            nodes: vec![TrieNode::default()],
            cursor: ROOT,
        };
        for (symbol, code) in table.iter() {
            trie.insert(symbol, code)?;
        }
        Ok(trie)
    }

    fn insert(&mut self, symbol: u8, code: &Code) -> Result<()> {
        let mut node = ROOT;
        for bit in code.bits() {
            if let Some(other) = self.nodes[node].symbol {
                return Err(not_prefix_free(other, symbol));
            }
            node = match self.nodes[node].kids[bit as usize] {
                Some(next) => next,
                None => {
                    self.nodes.push(TrieNode::default());
                    let next = self.nodes.len() - 1;
                    self.nodes[node].kids[bit as usize] = Some(next);
                    next
                }
            };
        }
        let leaf = &mut self.nodes[node];
        if let Some(other) = leaf.symbol {
            return Err(not_prefix_free(other, symbol));
        }
        if leaf.has_kids() {
            return Err(Error::MalformedInput(format!(
                "code for {:#04x} is a prefix of another code",
                symbol
            )));
        }
        leaf.symbol = Some(symbol);
        Ok(())
    }

    /// The symbol held by the root, which only happens for a single-symbol table whose
    /// code is empty.
    pub fn root_symbol(&self) -> Option<u8> {
        self.nodes[ROOT].symbol
    }

    /// Step one bit from the current position. Stepping into a branch that no code uses
    /// means the payload is corrupt.
    pub fn step(&mut self, bit: bool) -> Result<Step> {
        let next = self.nodes[self.cursor].kids[bit as usize].ok_or_else(|| {
            Error::MalformedInput("payload bits do not match any code".to_string())
        })?;
        match self.nodes[next].symbol {
            Some(symbol) => {
                self.cursor = ROOT;
                Ok(Step::Symbol(symbol))
            }
            None => {
                self.cursor = next;
                Ok(Step::Partial)
            }
        }
    }

    /// True when the walk sits on a codeword boundary.
    pub fn at_root(&self) -> bool {
        self.cursor == ROOT
    }
}

fn not_prefix_free(a: u8, b: u8) -> Error {
    Error::MalformedInput(format!(
        "codes for {:#04x} and {:#04x} are not prefix-free",
        a, b
    ))
}
