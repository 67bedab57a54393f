use alloc::vec::Vec;
use core::fmt;

/// An ordered sequence of single bits that can be appended to, read back and
/// packed into bytes.
///
/// Bits are packed 8 to a byte, the first bit of every group of 8 landing in
/// the *least significant* position of its byte. Unused high bits of the last
/// byte are always zero.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitSequence {
    /// Packed storage, kept in the output format at all times
    bytes: Vec<u8>,
    /// Number of valid bits in `bytes`
    len: usize,
}

impl BitSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sequence with room for `bits` bits
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Views packed bytes as a sequence of `8 * bytes.len()` bits
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            len: bytes.len() * 8,
        }
    }

    /// Append a single bit
    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            // offset 0 always pushed a byte, so there is a last byte here
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 1 << offset;
        }
        self.len += 1;
    }

    /// Append the lowest `num_bits` of `value`, most significant of those first
    pub fn push_bits_msb(&mut self, value: u64, num_bits: u32) {
        assert!(num_bits <= 64);
        for shift in (0..num_bits).rev() {
            self.push((value >> shift) & 1 == 1);
        }
    }

    /// Append all bits of `other`, in order
    pub fn extend_from(&mut self, other: &BitSequence) {
        if self.len % 8 == 0 {
            // Aligned, the packed bytes can be copied as they are
            self.bytes.extend_from_slice(&other.bytes);
            self.len += other.len;
            return;
        }
        for bit in other.iter() {
            self.push(bit);
        }
    }

    /// Read the bit at `index`, if the sequence is long enough
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bytes[index / 8] & (1 << (index % 8)) != 0)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> Bits<'_> {
        Bits {
            sequence: self,
            idx: 0,
        }
    }

    /// The packed representation, zero padded in the last byte
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Consume the sequence and return the packed representation
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Number of bytes the packed representation occupies
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

impl Extend<bool> for BitSequence {
    fn extend<T: IntoIterator<Item = bool>>(&mut self, iter: T) {
        for bit in iter {
            self.push(bit);
        }
    }
}

impl core::iter::FromIterator<bool> for BitSequence {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let mut sequence = BitSequence::new();
        sequence.extend(iter);
        sequence
    }
}

impl<'s> IntoIterator for &'s BitSequence {
    type Item = bool;
    type IntoIter = Bits<'s>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders the bits in insertion order, e.g. `"0110"`
impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSequence(\"{}\")", self)
    }
}

/// Iterator over the bits of a [`BitSequence`] in insertion order
pub struct Bits<'s> {
    sequence: &'s BitSequence,
    idx: usize,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let bit = self.sequence.get(self.idx)?;
        self.idx += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.sequence.len - self.idx;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Bits<'_> {}
