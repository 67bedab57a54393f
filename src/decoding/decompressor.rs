//! Reading a whole compressed stream back into text.

use alloc::vec::Vec;
use core::convert::TryFrom;

use super::TreeWalker;
use crate::common::DEFAULT_REPEAT_LIMIT;
use crate::errors::{DecompressError, MalformedStreamError};
use crate::frame::FrameHeader;
use crate::io::{Read, Write};
use crate::text::TextEncoding;
use crate::tree::{read_tree, HuffmanTree, Node};

/// Facts about a finished decompression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompressionSummary {
    /// Characters decoded, as declared in the header
    pub character_count: u64,
    /// Bytes written to the drain
    pub output_bytes: usize,
}

/// Decode `expected` characters from a packed data block.
///
/// A tree whose root is a leaf has a zero bit code, its character is repeated
/// `expected` times without looking at `data`. More than `repeat_limit`
/// repetitions are rejected.
pub fn decode_data(
    tree: &HuffmanTree,
    expected: u64,
    data: &[u8],
    repeat_limit: u64,
) -> Result<Vec<u16>, MalformedStreamError> {
    if let Node::Leaf { character, .. } = tree.root() {
        let too_many = || MalformedStreamError::TooManyCharacters {
            declared: expected,
            limit: repeat_limit,
        };
        if expected > repeat_limit {
            return Err(too_many());
        }
        let count = usize::try_from(expected).map_err(|_| too_many())?;
        let mut text = Vec::new();
        text.try_reserve_exact(count).map_err(|_| too_many())?;
        text.resize(count, *character);
        return Ok(text);
    }

    // Every character costs at least one bit
    if expected > data.len() as u64 * 8 {
        return Err(MalformedStreamError::IncompleteData {
            decoded: 0,
            expected,
        });
    }

    let mut text = Vec::with_capacity(expected as usize);
    let mut walker = TreeWalker::new(tree, expected);
    for &byte in data {
        if walker.is_finished() {
            break;
        }
        walker.next_byte(byte, |character| text.push(character));
    }
    text.extend(walker.finish());

    if !walker.is_finished() {
        return Err(MalformedStreamError::IncompleteData {
            decoded: walker.emitted(),
            expected,
        });
    }
    Ok(text)
}

/// An interface for decompressing streams produced by a [`Compressor`](crate::Compressor).
///
/// The [`TextEncoding`] has to match the one used for compressing.
///
/// A stream whose tree is a single leaf carries no data bits, its header alone
/// decides the output size. The decompressor refuses such streams declaring
/// more than [`repeat_limit`](Decompressor::repeat_limit) characters,
/// [`DEFAULT_REPEAT_LIMIT`] unless raised with
/// [`with_repeat_limit`](Decompressor::with_repeat_limit).
#[derive(Debug, Clone, Copy)]
pub struct Decompressor {
    encoding: TextEncoding,
    repeat_limit: u64,
}

impl Default for Decompressor {
    fn default() -> Self {
        Decompressor::new(TextEncoding::default())
    }
}

impl Decompressor {
    pub fn new(encoding: TextEncoding) -> Self {
        Decompressor {
            encoding,
            repeat_limit: DEFAULT_REPEAT_LIMIT,
        }
    }

    pub fn with_repeat_limit(self, repeat_limit: u64) -> Self {
        Decompressor {
            repeat_limit,
            ..self
        }
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn repeat_limit(&self) -> u64 {
        self.repeat_limit
    }

    /// Read one compressed stream from `source` and write the text to `drain`.
    ///
    /// Only the bytes belonging to the stream are read from `source`. Output is
    /// written only after the whole stream decoded successfully.
    pub fn decompress(
        &self,
        mut source: impl Read,
        mut drain: impl Write,
    ) -> Result<DecompressionSummary, DecompressError> {
        let tree = read_tree(&mut source)?;
        let header = FrameHeader::read(&mut source)?;
        vdebug!(
            "read tree with {} leaves, header declares {} characters in {} bytes",
            tree.leaf_count(),
            header.character_count,
            header.data_len
        );

        let mut data = Vec::new();
        (&mut source)
            .take(u64::from(header.data_len))
            .read_to_end(&mut data)
            .map_err(DecompressError::Io)?;
        if data.len() != header.data_len as usize {
            return Err(MalformedStreamError::TruncatedData {
                declared: header.data_len,
                available: data.len(),
            }
            .into());
        }

        let text = decode_data(&tree, header.character_count, &data, self.repeat_limit)?;
        let mut output = Vec::with_capacity(text.len());
        self.encoding.encode(&text, &mut output)?;

        drain.write_all(&output).map_err(DecompressError::Io)?;
        drain.flush().map_err(DecompressError::Io)?;

        Ok(DecompressionSummary {
            character_count: header.character_count,
            output_bytes: output.len(),
        })
    }

    /// Decompress `input` into a new vector
    pub fn decompress_to_vec(&self, input: &[u8]) -> Result<Vec<u8>, DecompressError> {
        let mut output = Vec::new();
        self.decompress(input, &mut output)?;
        Ok(output)
    }
}
