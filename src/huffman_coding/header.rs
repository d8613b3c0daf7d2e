//! Header codec for the Huffman stream.
//!
//! Layout, all integers big-endian:
//!
//! | Offset | Size       | Field                                                        |
//! |--------|------------|--------------------------------------------------------------|
//! | 0      | 4          | original uncompressed length                                 |
//! | 4      | 2          | code table length in bytes, counted from offset 6            |
//! | 6      | table len  | entries: symbol, code bit length, ceil(len / 8) packed bytes |
//!
//! Entries are written in ascending symbol order, but every entry is self-contained so a
//! reader does not depend on that order. A code of length 0 is legal only as the sole entry
//! of a single-symbol stream, and then has no data bytes.

use log::{debug, trace};

use super::huffman_tree::{Code, CodeTable, MAX_CODE_LEN};
use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::bitreader::BitReader;
use crate::error::{Error, Result};

/// Bytes taken by the original length and table length fields.
pub const FIXED_HEADER_LEN: usize = 6;

/// Everything the decoder needs before it can walk the payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamHeader {
    pub original_len: u32,
    pub table: CodeTable,
}

impl StreamHeader {
    /// Put the size field and the code table on the stream.
    pub fn write(&self, bw: &mut BitPacker) -> Result<()> {
        bw.out32(self.original_len);
        write_table(bw, &self.table)
    }

    /// Read the size field and the code table, leaving the reader on the first payload bit.
    pub fn read(br: &mut BitReader<'_>) -> Result<Self> {
        let original_len = br.bint(32).ok_or_else(|| Error::eof("size header"))? as u32;
        let table = read_table(br)?;
        Ok(Self {
            original_len,
            table,
        })
    }

    /// Total bytes this header occupies on the stream.
    pub fn encoded_len(&self) -> usize {
        FIXED_HEADER_LEN + table_len(&self.table)
    }
}

/// Byte length of the code table entries (not counting the 2 byte length field).
pub fn table_len(table: &CodeTable) -> usize {
    table.iter().map(|(_, code)| 2 + (code.len() + 7) / 8).sum()
}

/// Serialize the code table: 2 byte length followed by the entries.
pub fn serialize(table: &CodeTable) -> Result<Vec<u8>> {
    let mut bw = BitPacker::new(2 + table_len(table));
    write_table(&mut bw, table)?;
    Ok(bw.finish())
}

/// Deserialize a code table block that starts with its 2 byte length. Bytes past the
/// declared length are ignored.
pub fn deserialize(data: &[u8]) -> Result<CodeTable> {
    read_table(&mut BitReader::new(data))
}

/// Write the table length and entries. The packer must be on a byte boundary.
pub fn write_table(bw: &mut BitPacker, table: &CodeTable) -> Result<()> {
    let len = table_len(table);
    let len = u16::try_from(len).map_err(|_| {
        Error::EncodingOverflow(format!("code table needs {} header bytes", len))
    })?;
    debug!("Writing code table of {} entries, {} bytes", table.len(), len);
    bw.out16(len);

    for (symbol, code) in table.iter() {
        if code.len() > MAX_CODE_LEN {
            return Err(Error::EncodingOverflow(format!(
                "code for {:#04x} is {} bits long",
                symbol,
                code.len()
            )));
        }
        trace!("{} {:#04x}: {}", bw.loc(), symbol, code);
        bw.out8(symbol);
        bw.out8(code.len() as u8);
        code.packed().iter().for_each(|&b| bw.out8(b));
    }
    Ok(())
}

/// Read the table length and entries, stopping exactly at the declared boundary.
pub fn read_table(br: &mut BitReader<'_>) -> Result<CodeTable> {
    let len = br.bint(16).ok_or_else(|| Error::eof("header length"))?;
    let block = br.bytes(len).ok_or_else(|| {
        Error::MalformedInput(format!(
            "header declares {} bytes but only {} remain",
            len,
            br.remaining_bits() / 8
        ))
    })?;
    debug!("Reading code table of {} bytes", len);

    let mut entries = BitReader::new(&block);
    let mut table = CodeTable::new();
    while entries.remaining_bits() > 0 {
        let at = entries.position();
        let (symbol, bits) = match (entries.byte(), entries.byte()) {
            (Some(symbol), Some(bits)) => (symbol, bits as usize),
            _ => {
                return Err(Error::MalformedHeader(format!(
                    "entry at byte {} is cut off by the header boundary",
                    at
                )))
            }
        };
        let packed = entries.bytes((bits + 7) / 8).ok_or_else(|| {
            Error::MalformedHeader(format!(
                "code for {:#04x} ({} bits) runs past the header boundary",
                symbol, bits
            ))
        })?;
        let code = Code::from_packed(bits, packed);
        trace!("{:#04x}: {}", symbol, code);
        if table.insert(symbol, code).is_some() {
            return Err(Error::MalformedHeader(format!(
                "symbol {:#04x} appears more than once",
                symbol
            )));
        }
    }
    Ok(table)
}
