//! Error taxonomy shared by both codecs and the file wiring around them.
//!
//! Decoding is the only side that validates untrusted structure, so nearly every variant
//! here comes out of a decode call. Encoding only fails with `EncodingOverflow`.

/// Errors returned by the RLE and Huffman codecs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structurally invalid compressed stream (odd-length RLE data, truncated stream,
    /// payload exhausted before the original length was reached, ...).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The code table header contradicts itself (duplicate symbols, entries running past
    /// the declared header length, ...).
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// A value does not fit the fixed-width field the stream format gives it.
    #[error("encoding overflow: {0}")]
    EncodingOverflow(String),

    /// Io error while reading or writing files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Convenience constructor used where the decoder runs out of data.
    pub(crate) fn eof(what: &str) -> Self {
        Error::MalformedInput(format!("unexpected end of data while reading {}", what))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
