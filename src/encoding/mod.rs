//! Modules used for compressing/encoding text into the huffpack format.
mod code_map;
mod compressor;

pub use code_map::CodeMap;
pub use compressor::*;

use crate::errors::CompressError;
use crate::io::{Read, Write};
use alloc::vec::Vec;

/// Compress UTF-8 text from `source` into `drain`.
///
/// Use a [`Compressor`] to pick a different [`TextEncoding`](crate::TextEncoding).
pub fn compress(source: impl Read, drain: impl Write) -> Result<CompressionSummary, CompressError> {
    Compressor::default().compress(source, drain)
}

/// Compress UTF-8 text into a new vector
///
/// # Examples
/// ```
/// let compressed = huffpack::compress_to_vec("hello".as_bytes()).unwrap();
/// let decompressed = huffpack::decompress_to_vec(&compressed).unwrap();
/// assert_eq!(decompressed, b"hello");
/// ```
pub fn compress_to_vec(input: &[u8]) -> Result<Vec<u8>, CompressError> {
    Compressor::default().compress_to_vec(input)
}
