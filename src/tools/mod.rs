//! The tools module provides the smaller pieces used around the Huffman codec.
//!
//! The tools are:
//! - cli: Command line interface.
//! - freq_count: Frequency count of the bytes in a buffer.
//! - rle: The byte run (run-length) codec, a complete codec on its own.
//!
pub mod cli;
pub mod freq_count;
pub mod rle;
