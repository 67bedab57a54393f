#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate huffpack;
use huffpack::{Compressor, Decompressor, TextEncoding};

fuzz_target!(|data: &[u8]| {
    // Latin-1 accepts every input, so every non empty input has to survive
    let compressor = Compressor::new(TextEncoding::Latin1);
    let decompressor = Decompressor::new(TextEncoding::Latin1);
    match compressor.compress_to_vec(data) {
        Ok(compressed) => {
            let decoded = decompressor.decompress_to_vec(&compressed).unwrap();
            assert_eq!(data, decoded.as_slice());
        }
        Err(_) => assert!(data.is_empty()),
    }

    if let Ok(compressed) = huffpack::compress_to_vec(data) {
        let decoded = huffpack::decompress_to_vec(&compressed).unwrap();
        assert_eq!(data, decoded.as_slice());
    }
});
