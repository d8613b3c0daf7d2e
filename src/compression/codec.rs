use std::{fmt::Display, fmt::Formatter};

use crate::error::Result;
use crate::huffman_coding::huffman::{huf_decode, huf_encode};
use crate::tools::rle::{rle_decode, rle_encode};

/// The two selectable codecs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Codec {
    /// Run-length encoding: (count, byte) pairs
    Rle,
    /// Static Huffman coding with a code table header
    Huffman,
}

impl Codec {
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            Codec::Rle => Ok(rle_encode(data)),
            Codec::Huffman => huf_encode(data),
        }
    }

    pub fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            Codec::Rle => rle_decode(data),
            Codec::Huffman => huf_decode(data),
        }
    }

    /// File extension (without the dot) for data compressed with this codec.
    pub fn extension(&self) -> &'static str {
        match self {
            Codec::Rle => "rle",
            Codec::Huffman => "huf",
        }
    }

    /// Find the codec from a file name's extension, if it is one we write.
    pub fn from_extension(fname: &str) -> Option<Codec> {
        let (_, ext) = fname.rsplit_once('.')?;
        [Codec::Rle, Codec::Huffman]
            .into_iter()
            .find(|c| c.extension() == ext)
    }
}

impl Display for Codec {
    /// Same spelling as the command line value.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Codec::Rle => write!(f, "rle"),
            Codec::Huffman => write!(f, "huffman"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Codec;
    use crate::error::Error;

    #[test]
    fn extension_test() {
        assert_eq!(Codec::from_extension("notes.txt.huf"), Some(Codec::Huffman));
        assert_eq!(Codec::from_extension("image.rle"), Some(Codec::Rle));
        assert_eq!(Codec::from_extension("image.bmp"), None);
        assert_eq!(Codec::from_extension("huf"), None);
        assert_eq!(Codec::Rle.extension(), "rle");
        assert_eq!(Codec::Huffman.to_string(), "huffman");
    }

    #[test]
    fn dispatch_test() {
        let data = "mississippi river banks".as_bytes();
        for codec in [Codec::Rle, Codec::Huffman] {
            let packed = codec.encode(data).unwrap();
            assert_eq!(codec.decode(&packed).unwrap(), data);
        }
        assert_eq!(Codec::Rle.encode(b"aab").unwrap(), vec![2, b'a', 1, b'b']);
    }

    #[test]
    fn wrong_codec_test() {
        // A Huffman stream of odd length is not RLE data.
        let packed = Codec::Huffman.encode(b"AAABBCCCC").unwrap();
        assert_eq!(packed.len() % 2, 1);
        assert!(matches!(
            Codec::Rle.decode(&packed),
            Err(Error::MalformedInput(_))
        ));
    }
}
