//! Values and interfaces shared between the encoding side
//! and the decoding side.

mod bit_sequence;
pub use bit_sequence::BitSequence;

// --- TREE ---
/// Every leaf in a serialized tree carries a character of this many bits.
pub const CHARACTER_BITS: u32 = 16;
/// Deepest tree nesting accepted while reading a serialized tree.
///
/// A Huffman tree of depth `d` needs a total weight of at least the `d + 2`th
/// Fibonacci number, so no tree built from 64 bit counts comes close to this.
pub const MAX_TREE_DEPTH: usize = 128;

// --- HEADER ---
/// Size of the total character count that follows the tree
pub const CHARACTER_COUNT_BYTES: usize = 8;
/// Size of the data block length that follows the character count
pub const DATA_LENGTH_BYTES: usize = 4;

// --- DECODING ---
/// Default for how many characters a stream whose tree is a single leaf may
/// declare. Such a stream stores no data bits, so nothing else bounds the
/// output it produces.
pub const DEFAULT_REPEAT_LIMIT: u64 = 1 << 24;
