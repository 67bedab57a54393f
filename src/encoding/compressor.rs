//! Utilities and interfaces for compressing a whole stream at once.

use alloc::vec::Vec;
use core::convert::TryFrom;

use super::CodeMap;
use crate::common::BitSequence;
use crate::errors::CompressError;
use crate::frame::FrameHeader;
use crate::io::{Read, Write};
use crate::text::TextEncoding;
use crate::tree::{write_tree, HuffmanTree};

/// Facts about a finished compression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionSummary {
    /// Characters in the input text
    pub character_count: u64,
    /// Distinct characters, which is the number of leaves in the tree
    pub distinct_characters: usize,
    /// Size of the serialized tree
    pub tree_bytes: usize,
    /// Size of the packed data block
    pub data_bytes: usize,
    /// Size of the whole compressed output
    pub total_bytes: usize,
}

/// A text encoded against its own tree, ready to be written out
pub struct EncodedText {
    pub tree: HuffmanTree,
    pub character_count: u64,
    pub data: BitSequence,
}

/// Build the tree for `text` and encode `text` with it.
///
/// Fails with [`CompressError::EmptyInput`] if `text` is empty.
pub fn encode_text(text: &[u16]) -> Result<EncodedText, CompressError> {
    let tree = HuffmanTree::from_text(text).ok_or(CompressError::EmptyInput)?;
    let codes = CodeMap::new(&tree);
    vdebug!("derived {} codes", codes.len());

    let mut data = BitSequence::with_capacity(codes.encoded_len(text).unwrap_or(0));
    // The codes were derived from this very text, so every character has one
    if let Err(character) = codes.encode_into(text, &mut data) {
        unreachable!(
            "character {:#06x} missing from its own code map",
            character
        );
    }

    Ok(EncodedText {
        tree,
        character_count: text.len() as u64,
        data,
    })
}

/// An interface for compressing text into the huffpack format.
///
/// # Examples
/// ```
/// use huffpack::{Compressor, TextEncoding};
/// let mut output = Vec::new();
/// let compressor = Compressor::new(TextEncoding::Utf8);
/// let summary = compressor.compress("aab".as_bytes(), &mut output).unwrap();
/// assert_eq!(summary.character_count, 3);
/// assert_eq!(summary.total_bytes, output.len());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Compressor {
    encoding: TextEncoding,
}

impl Compressor {
    pub fn new(encoding: TextEncoding) -> Self {
        Compressor { encoding }
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Read all of `source`, compress it and write the result to `drain`.
    ///
    /// Nothing is written to `drain` unless the input could be read and
    /// encoded completely. If writing fails midway, whatever reached the drain
    /// has to be discarded.
    pub fn compress(
        &self,
        mut source: impl Read,
        mut drain: impl Write,
    ) -> Result<CompressionSummary, CompressError> {
        let mut input = Vec::new();
        source.read_to_end(&mut input)?;
        let text = self.encoding.decode(&input)?;
        drop(input);
        vdebug!("read {} characters of {} text", text.len(), self.encoding);

        let encoded = encode_text(&text)?;
        let tree = write_tree(&encoded.tree);
        let data = encoded.data.into_bytes();
        let header = FrameHeader {
            character_count: encoded.character_count,
            data_len: u32::try_from(data.len())
                .map_err(|_| CompressError::DataBlockTooLarge { bytes: data.len() })?,
        };

        drain.write_all(&tree)?;
        header.serialize(&mut drain)?;
        drain.write_all(&data)?;
        drain.flush()?;

        let summary = CompressionSummary {
            character_count: encoded.character_count,
            distinct_characters: encoded.tree.leaf_count(),
            tree_bytes: tree.len(),
            data_bytes: data.len(),
            total_bytes: tree.len() + FrameHeader::SIZE + data.len(),
        };
        vdebug!("compressed: {:?}", summary);
        Ok(summary)
    }

    /// Compress `input` into a new vector
    pub fn compress_to_vec(&self, input: &[u8]) -> Result<Vec<u8>, CompressError> {
        let mut output = Vec::new();
        self.compress(input, &mut output)?;
        Ok(output)
    }
}
