//! A lossless text compressor based on Huffman coding.
//!
//! The whole input is read, its characters (16 bit code units) are counted and
//! a Huffman tree is built from the counts. The output is the serialized tree,
//! a small header and the input encoded with the codes the tree assigns:
//!
//! ```text
//! [ tree: preorder, 1 flag bit per node, leaves followed by their 16 bit character ]
//! [ 8 bytes: number of characters, big endian ]
//! [ 4 bytes: length of the data block in bytes, big endian ]
//! [ data block: the packed codes ]
//! ```
//!
//! # Examples
//! ```
//! let text = "she sells sea shells by the sea shore";
//! let compressed = huffpack::compress_to_vec(text.as_bytes()).unwrap();
//! assert!(compressed.len() < text.len() + 40);
//! let decompressed = huffpack::decompress_to_vec(&compressed).unwrap();
//! assert_eq!(decompressed, text.as_bytes());
//! ```
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

extern crate alloc;

macro_rules! vdebug {
    ($($x:expr),* $(,)?) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($x),*);
    }
}

pub mod common;
pub mod decoding;
pub mod encoding;
pub mod errors;
pub mod frame;
pub mod io;
pub mod text;
pub mod tree;
#[cfg(test)]
mod tests;

pub use common::BitSequence;
pub use decoding::{decompress, decompress_to_vec, DecompressionSummary, Decompressor};
pub use encoding::{compress, compress_to_vec, CompressionSummary, Compressor};
pub use errors::{CompressError, DecompressError, MalformedStreamError};
pub use text::TextEncoding;
pub use tree::{HuffmanTree, Node};
