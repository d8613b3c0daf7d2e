use log::debug;

use crate::error::{Error, Result};

/// Longest run a single (count, symbol) record can hold.
const MAX_RUN: usize = 255;

/// Encode runs of identical bytes as (count, symbol) pairs. Runs longer than 255 bytes are
/// split, so the next record simply continues the same symbol. Output is always even-length.
pub fn rle_encode(data: &[u8]) -> Vec<u8> {
    // Worst case (no runs at all) doubles the data.
    let mut out = Vec::with_capacity(data.len().min(1 << 20) * 2);
    let mut idx = 0;

    while idx < data.len() {
        let symbol = data[idx];
        // Count identical bytes from here, capped at what one record can hold.
        let run = data[idx..]
            .iter()
            .take(MAX_RUN)
            .position(|&b| b != symbol)
            .unwrap_or_else(|| (data.len() - idx).min(MAX_RUN));
        out.push(run as u8);
        out.push(symbol);
        idx += run;
    }

    debug!("RLE encoded {} bytes into {} runs", data.len(), out.len() / 2);
    out
}

/// Expand (count, symbol) pairs back into the original bytes.
pub fn rle_decode(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() % 2 != 0 {
        return Err(Error::MalformedInput(format!(
            "RLE data must be pairs of bytes, found odd length {}",
            data.len()
        )));
    }
    let size = data.chunks_exact(2).map(|pair| pair[0] as usize).sum();
    let mut out = Vec::with_capacity(size);
    for pair in data.chunks_exact(2) {
        out.resize(out.len() + pair[0] as usize, pair[1]);
    }

    debug!("RLE decoded {} runs into {} bytes", data.len() / 2, out.len());
    Ok(out)
}
