//! Conversion between the bytes of a stream and the 16 bit code units the
//! Huffman coder works on.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::convert::TryFrom;
use core::fmt;

use crate::errors::{CompressError, MalformedStreamError};

/// How the bytes of the uncompressed stream are turned into characters.
///
/// The encoding is not recorded in the compressed stream, compressing and
/// decompressing must use the same one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// The input is UTF-8 text, coded as UTF-16 code units
    #[default]
    Utf8,
    /// Every byte is one character. Accepts any input.
    Latin1,
}

impl TextEncoding {
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Latin1 => "Latin-1",
        }
    }

    /// Split `bytes` into code units
    pub fn decode(self, bytes: &[u8]) -> Result<Vec<u16>, CompressError> {
        match self {
            TextEncoding::Utf8 => {
                let text = core::str::from_utf8(bytes).map_err(|err| {
                    CompressError::InvalidText {
                        encoding: self.name(),
                        reason: err.to_string(),
                    }
                })?;
                Ok(text.encode_utf16().collect())
            }
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&byte| u16::from(byte)).collect()),
        }
    }

    /// Turn code units back into bytes, appending them to `target`
    pub fn encode(self, units: &[u16], target: &mut Vec<u8>) -> Result<(), MalformedStreamError> {
        match self {
            TextEncoding::Utf8 => {
                let mut buf = [0u8; 4];
                for decoded in char::decode_utf16(units.iter().copied()) {
                    let c = decoded.map_err(|err| MalformedStreamError::InvalidText {
                        unit: err.unpaired_surrogate(),
                        encoding: self.name(),
                    })?;
                    target.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
            }
            TextEncoding::Latin1 => {
                target.reserve(units.len());
                for &unit in units {
                    let byte = u8::try_from(unit).map_err(|_| MalformedStreamError::InvalidText {
                        unit,
                        encoding: self.name(),
                    })?;
                    target.push(byte);
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
