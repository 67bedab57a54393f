//! The fixed size header between the serialized tree and the data block.
use crate::common::{CHARACTER_COUNT_BYTES, DATA_LENGTH_BYTES};
use crate::errors::{DecompressError, MalformedStreamError};
use crate::io::{Read, Write};

/// Both values are stored as unsigned big endian integers, count first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Number of characters in the original text
    pub character_count: u64,
    /// Length of the packed data block in bytes
    pub data_len: u32,
}

impl FrameHeader {
    pub const SIZE: usize = CHARACTER_COUNT_BYTES + DATA_LENGTH_BYTES;

    pub fn serialize(&self, output: &mut impl Write) -> crate::io::Result<()> {
        output.write_all(&self.character_count.to_be_bytes())?;
        output.write_all(&self.data_len.to_be_bytes())
    }

    pub fn read(mut source: impl Read) -> Result<FrameHeader, DecompressError> {
        let mut count = [0u8; CHARACTER_COUNT_BYTES];
        source.read_exact(&mut count).map_err(|err| {
            DecompressError::from_read(
                err,
                MalformedStreamError::TruncatedHeader {
                    field: "character count",
                },
            )
        })?;

        let mut data_len = [0u8; DATA_LENGTH_BYTES];
        source.read_exact(&mut data_len).map_err(|err| {
            DecompressError::from_read(
                err,
                MalformedStreamError::TruncatedHeader {
                    field: "data block length",
                },
            )
        })?;

        Ok(FrameHeader {
            character_count: u64::from_be_bytes(count),
            data_len: u32::from_be_bytes(data_len),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::FrameHeader;
    use crate::errors::{DecompressError, MalformedStreamError};
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn header_is_big_endian() {
        let header = FrameHeader {
            character_count: 3,
            data_len: 0x0102_0304,
        };
        let mut output = Vec::new();
        header.serialize(&mut output).unwrap();
        assert_eq!(output.len(), FrameHeader::SIZE);
        assert_eq!(output, vec![0, 0, 0, 0, 0, 0, 0, 3, 1, 2, 3, 4]);
        assert_eq!(FrameHeader::read(output.as_slice()).unwrap(), header);
    }

    #[test]
    fn short_header_is_malformed() {
        let err = FrameHeader::read(&[0u8; 5][..]).unwrap_err();
        assert!(matches!(
            err,
            DecompressError::MalformedStream(MalformedStreamError::TruncatedHeader {
                field: "character count"
            })
        ));

        let err = FrameHeader::read(&[0u8; 10][..]).unwrap_err();
        assert!(matches!(
            err,
            DecompressError::MalformedStream(MalformedStreamError::TruncatedHeader {
                field: "data block length"
            })
        ));
    }
}
