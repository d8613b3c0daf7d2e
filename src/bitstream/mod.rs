//! The bitstream module forms the I/O subsystem for the Huffman stream codec.
//!
//! Both halves work MSB-first: the first bit written or read is the most significant bit of
//! its byte. Codewords, the header's packed code bytes and the payload all share this
//! convention, so the encoder and the decoder never disagree about bit order.
//!
//! Everything happens on in-memory buffers. The whole input is held at once, there is no
//! incremental or streaming mode.
//!
pub mod bitpacker;
pub mod bitreader;
