//! The parts of `std::io` the compressor and decompressor are written against.
pub use std::io::{Error, ErrorKind, Read, Result, Write};
