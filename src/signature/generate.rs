//! Signature generation over fixed-size blocks

use super::{BlockSignature, SignatureIndex};
use crate::error::{Error, Result};
use crate::fileio;
use crate::hash::hash;
use std::path::Path;

/// Generate a signature index for a file on disk
pub fn generate_signature(path: &Path, chunk_size: u32) -> Result<SignatureIndex> {
    let data = fileio::load(path)?;
    tracing::debug!(
        path = %path.display(),
        size = data.len(),
        chunk_size,
        "generating signature index"
    );
    generate_signature_from_bytes(&data, chunk_size)
}

/// Generate a signature index from a byte buffer
///
/// Emits one signature per chunk of `chunk_size` bytes; the last block is
/// short when the chunk size does not divide the buffer length. Offsets and
/// sizes ride a 32-bit wire format, so buffers past 4 GiB are rejected.
pub fn generate_signature_from_bytes(data: &[u8], chunk_size: u32) -> Result<SignatureIndex> {
    if chunk_size == 0 {
        return Err(Error::config("chunk size must be non-zero"));
    }
    if data.len() > u32::MAX as usize {
        return Err(Error::malformed("file exceeds 32-bit addressing"));
    }

    let mut index = SignatureIndex::new();

    for (i, chunk) in data.chunks(chunk_size as usize).enumerate() {
        let pos = i as u32 * chunk_size;
        index.push(BlockSignature::new(
            i as u32,
            pos,
            hash(chunk),
            chunk.len() as u32,
        ));
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_count_and_sizes() {
        let data = vec![0u8; 150];
        let index = generate_signature_from_bytes(&data, 100).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index[0].size, 100);
        assert_eq!(index[1].size, 50);
    }

    #[test]
    fn test_exact_multiple_has_no_empty_tail() {
        let data = vec![0u8; 400];
        let index = generate_signature_from_bytes(&data, 100).unwrap();

        assert_eq!(index.len(), 4);
        for block in index.iter() {
            assert_eq!(block.size, 100);
        }
    }

    #[test]
    fn test_ids_and_offsets_are_dense() {
        let data = vec![7u8; 50];
        let index = generate_signature_from_bytes(&data, 10).unwrap();

        for (i, block) in index.iter().enumerate() {
            assert_eq!(block.id, i as u32);
            assert_eq!(block.pos, i as u32 * 10);
        }

        let total: u32 = index.iter().map(|b| b.size).sum();
        assert_eq!(total, 50);
    }

    #[test]
    fn test_empty_input() {
        let index = generate_signature_from_bytes(&[], 16).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_zero_chunk_size_is_rejected() {
        let err = generate_signature_from_bytes(b"abc", 0).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_hashes_differ_between_blocks() {
        let index = generate_signature_from_bytes(b"ABCDEFGH", 4).unwrap();
        assert_eq!(index.len(), 2);
        assert_ne!(index[0].hash, index[1].hash);
    }

    #[test]
    fn test_generate_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v1.bin");
        std::fs::write(&path, b"test content here").unwrap();

        let index = generate_signature(&path, 8).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index[2].size, 1);
    }
}
