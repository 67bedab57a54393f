#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate huffpack;

fuzz_target!(|data: &[u8]| {
    // Errors are fine, panics are not
    let _ = huffpack::decompress_to_vec(data);
});
