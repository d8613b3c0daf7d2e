//! The compression module wires the codecs to files, stdin and stdout.
//!
//! Two codecs are offered and they never mix:
//! - RLE: every run of identical bytes becomes a (count, byte) pair. No header.
//! - Huffman: a static Huffman code built over the whole input, with a header carrying the
//!   original length and the code table.
//!
//! A whole input is always read into memory before it is coded. Compressed files carry the
//! codec in their extension (`.rle` or `.huf`), which is how decompression picks a codec.
//!

pub mod codec;
pub mod compress;
pub mod decompress;
