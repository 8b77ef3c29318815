//! .sig.bin file format reading and writing
//!
//! ```text
//! [ magic u32 = C000FFEE ] [ chunks u32 ] [ zlib(payload) ]
//! payload = chunks x { id u32, pos u32, hash u32, size u32 }
//! ```
//!
//! All integers are big-endian.

use super::{BlockSignature, SignatureIndex, SIGNATURE_MAGIC, SIGNATURE_RECORD_LEN};
use crate::compress;
use crate::error::{Error, Result};
use crate::fileio;
use std::path::Path;

/// Fixed header: magic + chunk count
const HEADER_LEN: usize = 8;

/// Write a signature index to a file
pub fn write_signature(index: &SignatureIndex, path: &Path) -> Result<()> {
    let bytes = write_signature_to_bytes(index)?;
    fileio::save(path, &bytes)
}

/// Serialize a signature index to bytes
pub fn write_signature_to_bytes(index: &SignatureIndex) -> Result<Vec<u8>> {
    let mut payload = Vec::with_capacity(index.len() * SIGNATURE_RECORD_LEN);
    for block in index.iter() {
        payload.extend_from_slice(&block.id.to_be_bytes());
        payload.extend_from_slice(&block.pos.to_be_bytes());
        payload.extend_from_slice(&block.hash.to_be_bytes());
        payload.extend_from_slice(&block.size.to_be_bytes());
    }

    let compressed = compress::compress(&payload)?;

    let mut out = Vec::with_capacity(HEADER_LEN + compressed.len());
    out.extend_from_slice(&SIGNATURE_MAGIC.to_be_bytes());
    out.extend_from_slice(&(index.len() as u32).to_be_bytes());
    out.extend_from_slice(&compressed);
    Ok(out)
}

/// Read a signature index from a file
pub fn read_signature(path: &Path) -> Result<SignatureIndex> {
    let bytes = fileio::load(path)?;
    read_signature_from_bytes(&bytes)
}

/// Parse a signature index from bytes
pub fn read_signature_from_bytes(data: &[u8]) -> Result<SignatureIndex> {
    if data.len() < HEADER_LEN {
        return Err(Error::malformed("signature file shorter than its header"));
    }

    let magic = u32::from_be_bytes(data[0..4].try_into().unwrap());
    if magic != SIGNATURE_MAGIC {
        return Err(Error::bad_signature(format!(
            "unexpected magic {:#010x}",
            magic
        )));
    }

    let chunks = u32::from_be_bytes(data[4..8].try_into().unwrap()) as usize;
    if chunks == 0 {
        return Err(Error::malformed("signature file declares zero chunks"));
    }

    let payload = compress::decompress(&data[HEADER_LEN..], chunks * SIGNATURE_RECORD_LEN)?;

    let mut index = SignatureIndex::new();
    for record in payload.chunks_exact(SIGNATURE_RECORD_LEN) {
        index.push(BlockSignature::new(
            u32::from_be_bytes(record[0..4].try_into().unwrap()),
            u32::from_be_bytes(record[4..8].try_into().unwrap()),
            u32::from_be_bytes(record[8..12].try_into().unwrap()),
            u32::from_be_bytes(record[12..16].try_into().unwrap()),
        ));
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::generate_signature_from_bytes;

    #[test]
    fn test_roundtrip_bytes() {
        let index = generate_signature_from_bytes(b"hello world test data", 8).unwrap();

        let bytes = write_signature_to_bytes(&index).unwrap();
        let loaded = read_signature_from_bytes(&bytes).unwrap();

        assert_eq!(loaded, index);
    }

    #[test]
    fn test_roundtrip_file() {
        let index = generate_signature_from_bytes(&vec![42u8; 1000], 64).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v1.sig.bin");
        write_signature(&index, &path).unwrap();

        let loaded = read_signature(&path).unwrap();
        assert_eq!(loaded.len(), index.len());
        for (a, b) in loaded.iter().zip(index.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_flipped_magic_is_rejected() {
        let index = generate_signature_from_bytes(b"some base content", 4).unwrap();
        let mut bytes = write_signature_to_bytes(&index).unwrap();
        bytes[0] ^= 0xFF;

        let err = read_signature_from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, Error::BadSignatureFormat { .. }));
    }

    #[test]
    fn test_zero_chunks_is_rejected() {
        let index = SignatureIndex::new();
        let bytes = write_signature_to_bytes(&index).unwrap();

        let err = read_signature_from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, Error::MalformedLength { .. }));
    }

    #[test]
    fn test_truncated_header_is_rejected() {
        let err = read_signature_from_bytes(&[0xC0, 0x00]).unwrap_err();
        assert!(matches!(err, Error::MalformedLength { .. }));
    }

    #[test]
    fn test_truncated_payload_is_rejected() {
        let index = generate_signature_from_bytes(&vec![1u8; 256], 16).unwrap();
        let bytes = write_signature_to_bytes(&index).unwrap();

        let err = read_signature_from_bytes(&bytes[..bytes.len() - 4]).unwrap_err();
        assert!(matches!(
            err,
            Error::Compression { .. } | Error::MalformedLength { .. }
        ));
    }
}
