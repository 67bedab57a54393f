//! Errors returned by [`compress`](crate::compress) and [`decompress`](crate::decompress).

use crate::io;
use crate::tree::TreeDecodeError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CompressError {
    #[error("Content length needs to be larger than zero")]
    EmptyInput,
    #[error("Input is not valid {encoding} text: {reason}")]
    InvalidText {
        encoding: &'static str,
        reason: alloc::string::String,
    },
    #[error("Compressed data is {bytes} bytes long, the format can only describe up to {max} bytes", max = u32::MAX)]
    DataBlockTooLarge { bytes: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecompressError {
    #[error("Malformed compressed stream: {0}")]
    MalformedStream(#[from] MalformedStreamError),
    #[error(transparent)]
    Io(io::Error),
}

/// The compressed artifact is truncated or inconsistent with itself
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MalformedStreamError {
    #[error(transparent)]
    Tree(TreeDecodeError),
    #[error("Stream ended inside the {field}")]
    TruncatedHeader { field: &'static str },
    #[error("Header declares a data block of {declared} bytes but only {available} bytes are present")]
    TruncatedData { declared: u32, available: usize },
    #[error("Data block ran out after {decoded} of {expected} characters")]
    IncompleteData { decoded: u64, expected: u64 },
    #[error("Header declares {declared} repetitions of a single character, the limit is {limit}")]
    TooManyCharacters { declared: u64, limit: u64 },
    #[error("Decoded character {unit:#06x} can not be represented as {encoding} text")]
    InvalidText { unit: u16, encoding: &'static str },
}

impl From<TreeDecodeError> for DecompressError {
    fn from(err: TreeDecodeError) -> Self {
        match err {
            TreeDecodeError::Io(err) => DecompressError::Io(err),
            other => DecompressError::MalformedStream(MalformedStreamError::Tree(other)),
        }
    }
}

impl DecompressError {
    /// Classify a failed read: running out of input means the artifact is
    /// truncated, anything else is a problem with the source itself.
    pub(crate) fn from_read(err: io::Error, truncated: MalformedStreamError) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => DecompressError::MalformedStream(truncated),
            _ => DecompressError::Io(err),
        }
    }
}
