//! BitReader: reads a packed bitstream, most significant bit first.
//!
//! The reader borrows the compressed buffer and never copies it. Every read returns an
//! `Option`; `None` means the data ran out, and the caller decides which error that is.
//!

const BIT_MASK: u8 = 0xff;

/// Reads a packed bitstream from a byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    cursor: usize,
    bit_index: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            cursor: 0,
            bit_index: 0,
        }
    }

    /// Return bit as Option<usize> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<usize> {
        let byte = *self.data.get(self.cursor)?;
        let bit = (byte & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Some(bit as usize)
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Option<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Return Option<usize> of the next n bits (n <= 32), or None if there is not enough
    /// data left. Nothing is consumed when None is returned.
    pub fn bint(&mut self, n: usize) -> Option<usize> {
        if n > self.remaining_bits() {
            return None;
        }
        // Whole bytes on a byte boundary are the common case for header fields.
        if self.bit_index == 0 && n % 8 == 0 {
            let result = self.data[self.cursor..self.cursor + n / 8]
                .iter()
                .fold(0_usize, |acc, &b| acc << 8 | b as usize);
            self.cursor += n / 8;
            return Some(result);
        }
        let mut result = 0_usize;
        for _ in 0..n {
            result = result << 1 | self.bit()?;
        }
        Some(result)
    }

    /// Returns a byte as an Option<u8>, or None if there is no more data to read. This is
    /// a convenience function, and calls bint(8).
    pub fn byte(&mut self) -> Option<u8> {
        self.bint(8).map(|byte| byte as u8)
    }

    /// Returns an Option<Vec<u8>> of n bytes, or None if fewer than n bytes remain.
    pub fn bytes(&mut self, n: usize) -> Option<Vec<u8>> {
        if n * 8 > self.remaining_bits() {
            return None;
        }
        (0..n).map(|_| self.byte()).collect()
    }

    /// Count of bits not yet consumed.
    pub fn remaining_bits(&self) -> usize {
        (self.data.len() - self.cursor.min(self.data.len())) * 8 - self.bit_index
    }

    /// Byte offset of the next unread bit.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}
