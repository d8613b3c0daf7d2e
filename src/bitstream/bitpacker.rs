use log::trace;

use crate::huffman_coding::huffman_tree::Code;

/// Creates a bitstream for output.
pub struct BitPacker {
    pub output: Vec<u8>,
    /// Number of valid bits in the final byte after flush() (0 means the last byte is full).
    pub last_bits: u8,
    queue: u64,
    q_bits: u8,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of size specified. Call flush() (or
    /// finish()) to push the partially filled last byte to the buffer.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            last_bits: 0,
            queue: 0,
            q_bits: 0,
        }
    }

    /// Internal bitstream write function common to all out.XX functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Puts a single bit on the stream.
    pub fn out_bit(&mut self, bit: bool) {
        self.queue <<= 1;
        self.queue |= bit as u64;
        self.q_bits += 1;
        self.write_stream();
    }

    /// Puts a codeword on the stream, most significant bit first. An empty code writes nothing.
    pub fn out_code(&mut self, code: &Code) {
        let mut left = code.len();
        for &byte in code.packed() {
            // Every packed byte is full except possibly the last one.
            let n = left.min(8) as u8;
            self.queue <<= n;
            self.queue |= (byte >> (8 - n)) as u64;
            self.q_bits += n;
            left -= n as usize;
            self.write_stream();
        }
    }

    /// Puts a byte on the stream.
    pub fn out8(&mut self, data: u8) {
        self.queue <<= 8; //shift queue by one byte
        self.queue |= data as u64; //add the byte to queue
        self.q_bits += 8; //update depth of queue bits
        self.write_stream();
    }

    /// Puts a 16 bit word on the stream, big-endian.
    pub fn out16(&mut self, data: u16) {
        self.queue <<= 16;
        self.queue |= data as u64;
        self.q_bits += 16;
        self.write_stream();
    }

    /// Puts a 32 bit word on the stream, big-endian.
    pub fn out32(&mut self, data: u32) {
        self.queue <<= 32;
        self.queue |= data as u64;
        self.q_bits += 32;
        self.write_stream();
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits
    pub fn flush(&mut self) {
        self.last_bits = self.q_bits % 8;
        if self.q_bits > 0 {
            trace!("Padding final byte with {} zero bits", 8 - self.q_bits);
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits = 8;
            self.write_stream(); // write out all that is left
        }
    }

    /// Flush and hand back the packed bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.flush();
        self.output
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        let bits = (self.output.len() * 8) + self.q_bits as usize;
        format!("[{}.{}]", bits / 8, bits % 8)
    }
}

#[cfg(test)]
mod test {
    use super::BitPacker;
    use crate::huffman_coding::huffman_tree::Code;

    fn code(bits: &str) -> Code {
        let mut c = Code::new();
        bits.chars().for_each(|b| c.push(b == '1'));
        c
    }

    #[test]
    fn out16_test() {
        let mut bw = BitPacker::new(100);
        let data = 0b00100001_00100000;
        bw.out16(data);
        bw.flush();
        let out = bw.output;
        assert_eq!(out, "! ".as_bytes());
    }

    #[test]
    fn out32_test() {
        let mut bw = BitPacker::new(100);
        bw.out32(0x0000_0009);
        let out = bw.finish();
        assert_eq!(out, [0, 0, 0, 9]);
    }

    #[test]
    fn out_bit_and_loc_test() {
        let mut bw = BitPacker::new(100);
        bw.out_bit(true);
        bw.out_bit(false);
        bw.out_bit(true);
        assert_eq!("[0.3]", &bw.loc());
        bw.flush();
        assert_eq!(bw.last_bits, 3);
        assert_eq!(bw.output, [0b1010_0000]);
        assert_eq!("[1.0]", &bw.loc());
    }

    #[test]
    fn unaligned_byte_test() {
        let mut bw = BitPacker::new(100);
        bw.out_bit(true);
        bw.out8(0xff);
        let out = bw.finish();
        assert_eq!(out, [0xff, 0b1000_0000]);
    }

    #[test]
    fn out_code_test() {
        let mut bw = BitPacker::new(100);
        bw.out_code(&code("110"));
        bw.out_code(&code(""));
        bw.out_code(&code("0111111111"));
        bw.flush();
        assert_eq!(bw.last_bits, 5);
        assert_eq!(bw.output, [0b1100_1111, 0b1111_1000]);
    }

    #[test]
    fn flush_on_boundary_test() {
        let mut bw = BitPacker::new(100);
        bw.out8(7);
        bw.flush();
        assert_eq!(bw.last_bits, 0);
        assert_eq!(bw.output, [7]);
    }
}
