use crate::io::Read;

/// Reads single bits from a byte source, pulling one byte at a time.
///
/// Within a byte the least significant bit is read first, matching how
/// [`BitSequence`](crate::BitSequence) packs bits. Only bytes that are
/// actually needed are taken from the source, so whatever follows the bits
/// in the stream stays untouched.
pub struct BitReader<R: Read> {
    source: R,
    current: u8,
    /// Bits of `current` not yet handed out
    bits_in_current: u8,
    bits_read: usize,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R) -> Self {
        BitReader {
            source,
            current: 0,
            bits_in_current: 0,
            bits_read: 0,
        }
    }

    pub fn bits_read(&self) -> usize {
        self.bits_read
    }

    /// Read the next bit. Fails with `UnexpectedEof` once the source is empty.
    pub fn get_bit(&mut self) -> crate::io::Result<bool> {
        if self.bits_in_current == 0 {
            let mut byte = [0u8; 1];
            self.source.read_exact(&mut byte)?;
            self.current = byte[0];
            self.bits_in_current = 8;
        }
        let bit = self.current & 1 == 1;
        self.current >>= 1;
        self.bits_in_current -= 1;
        self.bits_read += 1;
        Ok(bit)
    }

    /// Read `n` bits into a value, the first bit read being the most significant
    pub fn get_bits_msb(&mut self, n: u32) -> crate::io::Result<u64> {
        assert!(n <= 64, "Cant serve this request. The reader is limited to 64bit");
        let mut value = 0;
        for _ in 0..n {
            value = (value << 1) | u64::from(self.get_bit()?);
        }
        Ok(value)
    }

    #[cfg(test)]
    /// Give back the underlying source. Unread bits of a partially consumed
    /// byte are dropped.
    pub fn into_inner(self) -> R {
        self.source
    }
}
