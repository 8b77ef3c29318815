//! zlib compression over in-memory buffers
//!
//! Both directions run in a single shot. The output of `compress` grows as
//! needed, so incompressible payloads cannot truncate; `decompress` checks
//! the produced length against what the surrounding framing declared.

use crate::error::{Error, Result};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Compress a buffer as one zlib stream at maximum level
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(data)
        .map_err(|e| Error::compression(format!("deflate: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| Error::compression(format!("deflate finish: {}", e)))
}

/// Decompress a zlib stream into exactly `expected_len` bytes
pub fn decompress(data: &[u8], expected_len: usize) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::with_capacity(expected_len);
    decoder
        .read_to_end(&mut out)
        .map_err(|e| Error::compression(format!("inflate: {}", e)))?;

    if out.len() != expected_len {
        return Err(Error::malformed(format!(
            "decompressed {} bytes, framing declared {}",
            out.len(),
            expected_len
        )));
    }

    Ok(out)
}
