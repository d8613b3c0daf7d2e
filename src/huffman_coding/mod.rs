//! The huffman module turns a byte buffer into a size header, a code table header and a
//! bit-packed payload, and back again.
//!
//! Encoding is a single static pass: count every byte, build one tree for the whole buffer,
//! write the code table, then write each byte's codeword MSB-first. The decoder never sees
//! the tree. It rebuilds a trie from the transmitted codes and walks it bit by bit until it
//! has emitted the original number of bytes.
//!
//! - huffman_tree: frequency tree, codewords and the code table.
//! - header: size field and code table (de)serialization.
//! - trie: decode-side trie.
//! - huffman: the stream codec tying the above together.
//!

pub mod header;
pub mod huffman;
pub mod huffman_tree;
pub mod trie;
