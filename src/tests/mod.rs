//! Round trips through the public interface.

use crate::errors::{CompressError, DecompressError, MalformedStreamError};
use crate::frame::FrameHeader;
use crate::text::TextEncoding;
use crate::tree::{read_tree, write_tree, HuffmanTree, Node};
use crate::{compress_to_vec, decompress_to_vec, Compressor, Decompressor};
use alloc::string::String;
use alloc::vec::Vec;
use rand::{Rng, SeedableRng};


fn round_trip(text: &str) {
    let compressed = compress_to_vec(text.as_bytes()).unwrap();
    let decompressed = decompress_to_vec(&compressed).unwrap();
    assert_eq!(
        String::from_utf8(decompressed).unwrap(),
        text,
        "round trip changed the text"
    );
}

/// Offset of the data block in a compressed stream
fn data_offset(compressed: &[u8]) -> usize {
    let mut source = compressed;
    read_tree(&mut source).unwrap();
    compressed.len() - source.len() + FrameHeader::SIZE
}

#[test]
fn simple_texts_round_trip() {
    round_trip("aab");
    round_trip("a");
    round_trip("ab");
    round_trip("hello world");
    round_trip("The quick brown fox jumps over the lazy dog.\r\nAnd back again.\n");
    round_trip("\u{0}\u{1}\u{2}\u{7f}");
}

#[test]
fn single_character_round_trips() {
    round_trip("aaaa");
    round_trip(" ");
    round_trip(&"z".repeat(10_000));
}

#[test]
fn non_ascii_round_trips() {
    round_trip("gr\u{fc}\u{df}e aus K\u{f6}ln");
    round_trip("\u{65e5}\u{672c}\u{8a9e}\u{306e}\u{30c6}\u{30ad}\u{30b9}\u{30c8}");
    round_trip("emoji \u{1F600}\u{1F680}\u{1F600} are surrogate pairs");
    round_trip("\u{1F600}");
}

#[test]
fn code_stream_ending_on_a_byte_boundary() {
    // 'a' gets a one bit code, eight of them fill the data block exactly
    let text = "aaaaaaab";
    let compressed = compress_to_vec(text.as_bytes()).unwrap();
    let offset = data_offset(&compressed);
    assert_eq!(compressed.len() - offset, 1);
    assert_eq!(decompress_to_vec(&compressed).unwrap(), text.as_bytes());

    let text = "aaaaaaaaaaaaaaab";
    let compressed = compress_to_vec(text.as_bytes()).unwrap();
    assert_eq!(compressed.len() - data_offset(&compressed), 2);
    assert_eq!(decompress_to_vec(&compressed).unwrap(), text.as_bytes());
}

#[test]
fn random_texts_round_trip() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(0xDEADBEEF);
    let alphabets: [&[char]; 3] = [
        &['a', 'b'],
        &['x', 'y', 'z', ' ', '\n', '\u{e9}'],
        &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '\u{3b1}', '\u{1F600}'],
    ];
    for _ in 0..200 {
        let alphabet = alphabets[rng.gen_range(0..alphabets.len())];
        let len = rng.gen_range(1..2000);
        // Skew the distribution so that trees are not balanced
        let text: String = (0..len)
            .map(|_| {
                let idx = rng.gen_range(0..alphabet.len());
                alphabet[rng.gen_range(0..=idx)]
            })
            .collect();
        round_trip(&text);
    }
}

#[test]
fn random_binary_round_trips_as_latin1() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(0x5EED);
    let compressor = Compressor::new(TextEncoding::Latin1);
    let decompressor = Decompressor::new(TextEncoding::Latin1);
    for _ in 0..50 {
        let len = rng.gen_range(1..4096);
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let compressed = compressor.compress_to_vec(&data).unwrap();
        assert_eq!(decompressor.decompress_to_vec(&compressed).unwrap(), data);
    }
}

#[test]
fn skewed_text_compresses() {
    let text = "a".repeat(1000) + &"b".repeat(10) + "c";
    let compressed = compress_to_vec(text.as_bytes()).unwrap();
    assert!(compressed.len() < text.len() / 4, "{} bytes", compressed.len());
    round_trip(&text);
}

#[test]
fn empty_input_fails() {
    let err = compress_to_vec(b"").unwrap_err();
    assert!(matches!(err, CompressError::EmptyInput));
    let err = Compressor::new(TextEncoding::Latin1)
        .compress_to_vec(b"")
        .unwrap_err();
    assert!(matches!(err, CompressError::EmptyInput));
}

#[test]
fn compressing_twice_gives_the_same_artifact() {
    let text = "determinism within a run, and across runs as well";
    let first = compress_to_vec(text.as_bytes()).unwrap();
    let second = compress_to_vec(text.as_bytes()).unwrap();
    assert_eq!(first, second);
    assert_eq!(decompress_to_vec(&second).unwrap(), text.as_bytes());
}

#[test]
fn truncated_data_block_is_rejected() {
    let texts = [
        "aab",
        "hello world",
        "a longer text with a larger tree and a data block of several bytes",
    ];
    for text in texts.iter() {
        let mut compressed = compress_to_vec(text.as_bytes()).unwrap();
        compressed.pop();
        let err = decompress_to_vec(&compressed).unwrap_err();
        assert!(
            matches!(
                err,
                DecompressError::MalformedStream(MalformedStreamError::TruncatedData { .. })
            ),
            "{}: {:?}",
            text,
            err
        );
    }
}

#[test]
fn shortened_data_block_is_rejected() {
    // Same as above, but the header is patched to agree with the shorter
    // block, so the decoder itself has to notice the missing characters
    let text = "a longer text with a larger tree and a data block of several bytes";
    let mut compressed = compress_to_vec(text.as_bytes()).unwrap();
    let offset = data_offset(&compressed);
    let mut header = FrameHeader::read(&compressed[offset - FrameHeader::SIZE..]).unwrap();
    header.data_len -= 1;
    let mut patched = Vec::new();
    header.serialize(&mut patched).unwrap();
    compressed[offset - FrameHeader::SIZE..offset].copy_from_slice(&patched);
    compressed.pop();

    let err = decompress_to_vec(&compressed).unwrap_err();
    assert!(
        matches!(
            err,
            DecompressError::MalformedStream(MalformedStreamError::IncompleteData { .. })
        ),
        "{:?}",
        err
    );
}

#[test]
fn every_truncation_is_rejected() {
    let compressed = compress_to_vec(b"mississippi").unwrap();
    for cut in 0..compressed.len() {
        let err = decompress_to_vec(&compressed[..cut]).unwrap_err();
        assert!(
            matches!(err, DecompressError::MalformedStream(_)),
            "cut at {}: {:?}",
            cut,
            err
        );
    }
}

#[test]
fn garbage_padding_is_ignored() {
    let text = "aab";
    let mut compressed = compress_to_vec(text.as_bytes()).unwrap();
    let last = compressed.len() - 1;
    // three code bits, everything above is padding
    for padding in 0..32_u8 {
        compressed[last] = (compressed[last] & 0b111) | (padding << 3);
        assert_eq!(decompress_to_vec(&compressed).unwrap(), text.as_bytes());
    }
}

#[test]
fn aab_uses_three_data_bits() {
    let compressed = compress_to_vec(b"aab").unwrap();
    let tree = read_tree(&compressed[..]).unwrap();
    let expected = HuffmanTree::new(Node::merge(
        Node::leaf(u16::from(b'b'), 0),
        Node::leaf(u16::from(b'a'), 0),
    ));
    assert_eq!(tree, expected);
    let offset = data_offset(&compressed);
    assert_eq!(&compressed[offset..], &[0b011]);
}

#[test]
fn mismatched_encoding_is_detected() {
    let compressed = Compressor::new(TextEncoding::Utf8)
        .compress_to_vec("\u{20ac}uro".as_bytes())
        .unwrap();
    let err = Decompressor::new(TextEncoding::Latin1)
        .decompress_to_vec(&compressed)
        .unwrap_err();
    assert!(matches!(
        err,
        DecompressError::MalformedStream(MalformedStreamError::InvalidText { unit: 0x20AC, .. })
    ));
}

#[test]
fn invalid_utf8_input_fails() {
    let err = compress_to_vec(&[b'a', 0xC3]).unwrap_err();
    assert!(matches!(err, CompressError::InvalidText { .. }));
}

#[test]
fn lone_leaf_stream_with_huge_count_fails_cleanly() {
    let mut artifact = write_tree(&HuffmanTree::new(Node::leaf(u16::from(b'a'), 0)));
    FrameHeader {
        character_count: u64::MAX,
        data_len: 0,
    }
    .serialize(&mut artifact)
    .unwrap();
    let err = decompress_to_vec(&artifact).unwrap_err();
    assert!(matches!(err, DecompressError::MalformedStream(_)), "{:?}", err);
}

#[test]
fn tiny_lone_leaf_stream_cannot_demand_huge_output() {
    let mut artifact = write_tree(&HuffmanTree::new(Node::leaf(u16::from(b'a'), 0)));
    FrameHeader {
        character_count: 1 << 26,
        data_len: 0,
    }
    .serialize(&mut artifact)
    .unwrap();
    assert_eq!(artifact.len(), 15);
    let err = decompress_to_vec(&artifact).unwrap_err();
    assert!(
        matches!(
            err,
            DecompressError::MalformedStream(MalformedStreamError::TooManyCharacters { .. })
        ),
        "{:?}",
        err
    );
}
