use log::{debug, info, trace};

use super::header::StreamHeader;
use super::huffman_tree::{build_tree, Code, CodeTable};
use super::trie::{Step, Trie};
use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::bitreader::BitReader;
use crate::error::{Error, Result};
use crate::tools::freq_count::freqs;

/// Huffman encode a whole buffer: size header, code table, then the packed payload.
pub fn huf_encode(data: &[u8]) -> Result<Vec<u8>> {
    let original_len = u32::try_from(data.len()).map_err(|_| {
        Error::EncodingOverflow(format!(
            "{} bytes do not fit the 32 bit size header",
            data.len()
        ))
    })?;

    // Count, build the tree and pull the codes out of it. The tree is dropped right after.
    let freqs = freqs(data);
    let table = match build_tree(&freqs) {
        Some(root) => {
            debug!(
                "Huffman tree has depth {} over {} bytes",
                root.depth(),
                root.weight
            );
            root.codes()?
        }
        None => CodeTable::new(),
    };
    debug!("Code table has {} symbols", table.len());

    let header = StreamHeader {
        original_len,
        table,
    };

    // Index the codes by byte value for the payload loop.
    let mut lookup: Vec<Option<&Code>> = vec![None; 256];
    for (symbol, code) in header.table.iter() {
        lookup[symbol as usize] = Some(code);
    }
    let payload_bits: usize = freqs
        .iter()
        .zip(lookup.iter())
        .map(|(&f, code)| f as usize * code.map_or(0, |c| c.len()))
        .sum();

    let mut bw = BitPacker::new(header.encoded_len() + (payload_bits + 7) / 8);
    header.write(&mut bw)?;
    trace!("Payload starts at {}", bw.loc());

    // Every input byte has a code, so nothing is skipped here.
    for &byte in data {
        if let Some(code) = lookup[byte as usize] {
            bw.out_code(code);
        }
    }
    bw.flush();
    trace!("Last byte holds {} bits (0 = full)", bw.last_bits);

    info!(
        "Huffman encoded {} bytes into {} ({} header, {} payload bits)",
        data.len(),
        bw.output.len(),
        header.encoded_len(),
        payload_bits
    );
    Ok(bw.output)
}

/// Decode a Huffman stream produced by huf_encode.
pub fn huf_decode(data: &[u8]) -> Result<Vec<u8>> {
    let mut br = BitReader::new(data);
    let header = StreamHeader::read(&mut br)?;
    let original_len = header.original_len as usize;
    debug!(
        "Stream holds {} bytes with {} codes, payload at {}",
        original_len,
        header.table.len(),
        br.loc()
    );

    // The table has to be decodable even when there is nothing to decode.
    let mut trie = Trie::from_table(&header.table)?;

    if original_len == 0 {
        check_padding(&mut br)?;
        return Ok(Vec::new());
    }
    if header.table.is_empty() {
        return Err(Error::MalformedHeader(format!(
            "no codes given for {} symbols",
            original_len
        )));
    }

    // A single symbol has the empty code and consumes no payload bits.
    if let Some(symbol) = trie.root_symbol() {
        check_padding(&mut br)?;
        return Ok(vec![symbol; original_len]);
    }

    // Every symbol takes at least one bit, so a short payload can be rejected up front.
    if original_len > br.remaining_bits() {
        return Err(Error::MalformedInput(format!(
            "{} payload bits can not hold {} symbols",
            br.remaining_bits(),
            original_len
        )));
    }

    let mut out = Vec::with_capacity(original_len);
    while out.len() < original_len {
        let bit = br.bool_bit().ok_or_else(|| {
            Error::MalformedInput(format!(
                "payload ended after {} of {} symbols",
                out.len(),
                original_len
            ))
        })?;
        if let Step::Symbol(symbol) = trie.step(bit)? {
            out.push(symbol);
        }
    }
    check_padding(&mut br)?;

    info!("Huffman decoded {} bytes into {}", data.len(), out.len());
    Ok(out)
}

/// Whatever follows the last symbol must be the zero padding of the final byte.
fn check_padding(br: &mut BitReader<'_>) -> Result<()> {
    if br.remaining_bits() >= 8 {
        return Err(Error::MalformedInput(format!(
            "{} trailing bytes after the payload",
            br.remaining_bits() / 8
        )));
    }
    while let Some(bit) = br.bool_bit() {
        if bit {
            return Err(Error::MalformedInput(
                "padding bits after the payload are not zero".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Reproducible random bytes drawn from the first `alphabet` byte values.
    fn noise(len: usize, alphabet: u16, seed: u64) -> Vec<u8> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| rng.gen_range(0..alphabet) as u8).collect()
    }

    #[test]
    fn known_vector_test() {
        let input = "AAABBCCCC".as_bytes();
        let encoded = huf_encode(input).unwrap();
        assert_eq!(
            encoded,
            vec![
                0, 0, 0, 9, // original length
                0, 9, // table length
                b'A', 2, 0b1100_0000, b'B', 2, 0b1000_0000, b'C', 1, 0, // codes
                0b1111_1110, 0b1000_0000, // 11 11 11 10 10 0 0 0 0
            ]
        );
        assert_eq!(huf_decode(&encoded).unwrap(), input);
    }

    #[test]
    fn single_symbol_test() {
        let encoded = huf_encode("AAAA".as_bytes()).unwrap();
        assert_eq!(encoded, vec![0, 0, 0, 4, 0, 2, b'A', 0]);
        assert_eq!(huf_decode(&encoded).unwrap(), "AAAA".as_bytes());
    }

    #[test]
    fn empty_test() {
        let encoded = huf_encode(&[]).unwrap();
        assert_eq!(encoded, vec![0, 0, 0, 0, 0, 0]);
        assert_eq!(huf_decode(&encoded).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn round_trip_test() {
        let inputs: Vec<Vec<u8>> = vec![
            vec![0],
            vec![255, 0],
            "the quick brown fox jumps over the lazy dog".as_bytes().to_vec(),
            (0..=255_u8).collect(),
            (0..=255_u8).cycle().take(5_000).collect(),
            noise(10_000, 3, 0x1234_5678),
            noise(10_000, 256, 0x9e37_79b9),
            noise(777, 17, 42),
        ];
        for input in inputs {
            let encoded = huf_encode(&input).unwrap();
            assert_eq!(huf_decode(&encoded).unwrap(), input);
        }
    }

    #[test]
    fn random_round_trip_test() {
        for seed in 0..200_u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let len = rng.gen_range(0..2_000);
            let alphabet = rng.gen_range(1..=256);
            let input = noise(len, alphabet, seed);
            let encoded = huf_encode(&input).unwrap();
            assert_eq!(huf_decode(&encoded).unwrap(), input, "seed {}", seed);
        }
    }

    #[test]
    fn skewed_compresses_test() {
        let mut input = vec![b'a'; 4_000];
        input.extend_from_slice("bcdefg".as_bytes());
        let encoded = huf_encode(&input).unwrap();
        assert!(encoded.len() < input.len() / 4);
        assert_eq!(huf_decode(&encoded).unwrap(), input);
    }

    #[test]
    fn deterministic_test() {
        let input = noise(2_000, 40, 7);
        assert_eq!(huf_encode(&input).unwrap(), huf_encode(&input).unwrap());
    }

    #[test]
    fn truncation_test() {
        let inputs: Vec<Vec<u8>> = vec![
            "AAABBCCCC".as_bytes().to_vec(),
            "AAAA".as_bytes().to_vec(),
            noise(300, 11, 99),
        ];
        for input in inputs {
            let encoded = huf_encode(&input).unwrap();
            for cut in 0..encoded.len() {
                let result = huf_decode(&encoded[..cut]);
                assert!(
                    matches!(result, Err(Error::MalformedInput(_))),
                    "cut at {} of {} gave {:?}",
                    cut,
                    encoded.len(),
                    result
                );
            }
        }
    }

    #[test]
    fn trailing_data_test() {
        let mut encoded = huf_encode("AAABBCCCC".as_bytes()).unwrap();
        encoded.push(0);
        assert!(matches!(huf_decode(&encoded), Err(Error::MalformedInput(_))));

        let mut encoded = huf_encode("AAAA".as_bytes()).unwrap();
        encoded.push(0);
        assert!(matches!(huf_decode(&encoded), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn dirty_padding_test() {
        let mut encoded = huf_encode("AAABBCCCC".as_bytes()).unwrap();
        *encoded.last_mut().unwrap() |= 1;
        assert!(matches!(huf_decode(&encoded), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn duplicate_header_symbol_test() {
        let encoded = [0, 0, 0, 2, 0, 6, b'A', 1, 0, b'A', 1, 0x80, 0b0100_0000];
        assert!(matches!(huf_decode(&encoded), Err(Error::MalformedHeader(_))));
    }

    #[test]
    fn empty_table_with_length_test() {
        let encoded = [0, 0, 0, 3, 0, 0, 0xff];
        assert!(matches!(huf_decode(&encoded), Err(Error::MalformedHeader(_))));
    }

    #[test]
    fn ambiguous_table_test() {
        let encoded = [0, 0, 0, 1, 0, 6, b'A', 1, 0x80, b'B', 2, 0x80, 0x80];
        assert!(matches!(huf_decode(&encoded), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn ambiguous_table_without_payload_test() {
        // Nothing to decode, the table still has to be prefix-free.
        let encoded = [0, 0, 0, 0, 0, 6, b'A', 1, 0x80, b'B', 2, 0x80];
        assert!(matches!(huf_decode(&encoded), Err(Error::MalformedInput(_))));
        let encoded = [0, 0, 0, 0, 0, 4, b'A', 0, b'B', 0];
        assert!(matches!(huf_decode(&encoded), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn unused_branch_test() {
        // Only "0" is a valid code, the payload starts with a 1.
        let encoded = [0, 0, 0, 1, 0, 3, b'A', 1, 0x00, 0x80];
        assert!(matches!(huf_decode(&encoded), Err(Error::MalformedInput(_))));
    }
}
