//! A byte stream compressor with two independent codecs.
//!
//! Version 0.1.0
//!
//! - Run-length encoding: every maximal run of identical bytes (split at 255) becomes a
//!   (count, byte) pair.
//! - Huffman coding: one static code built over the whole input. The output carries the
//!   original length and the code table ahead of the packed payload, so it decodes on its
//!   own.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> hufrle -z test.txt`
//!
//! This will compress the file and create the file test.txt.huf.
//! The original file will be deleted unless `-k` is given.
//!
//! From code, pick a codec and hand it the whole buffer:
//!
//! ```
//! use hufrle::compression::codec::Codec;
//!
//! let packed = Codec::Huffman.encode(b"AAABBCCCC")?;
//! assert_eq!(Codec::Huffman.decode(&packed)?, b"AAABBCCCC");
//! # Ok::<(), hufrle::error::Error>(())
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;
