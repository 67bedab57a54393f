//! Structures and utilities used for decoding huffpack streams

pub(crate) mod bit_reader;
mod decompressor;
mod tree_walker;

pub use decompressor::*;
pub use tree_walker::TreeWalker;

use crate::errors::DecompressError;
use crate::io::{Read, Write};
use alloc::vec::Vec;

/// Decompress a stream into UTF-8 text.
///
/// Use a [`Decompressor`] to pick a different [`TextEncoding`](crate::TextEncoding).
pub fn decompress(source: impl Read, drain: impl Write) -> Result<DecompressionSummary, DecompressError> {
    Decompressor::default().decompress(source, drain)
}

/// Decompress a stream of UTF-8 text into a new vector
pub fn decompress_to_vec(input: &[u8]) -> Result<Vec<u8>, DecompressError> {
    Decompressor::default().decompress_to_vec(input)
}
