//! Block signatures for the base version of a file

pub mod file;
pub mod generate;

pub use file::{read_signature, read_signature_from_bytes, write_signature, write_signature_to_bytes};
pub use generate::{generate_signature, generate_signature_from_bytes};

/// Magic tag at the head of .sig.bin files
pub const SIGNATURE_MAGIC: u32 = 0xC000_FFEE;

/// Size of one serialized signature record on the wire
pub const SIGNATURE_RECORD_LEN: usize = 16;

/// Signature of a single fixed-size block of the base file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSignature {
    /// Ordinal of the block (0-based, dense)
    pub id: u32,

    /// Byte offset of the block in the base file
    pub pos: u32,

    /// Polynomial hash of the block bytes
    pub hash: u32,

    /// Block length; equals the chunk size except for a short last block
    pub size: u32,
}

impl BlockSignature {
    /// Create a new block signature
    pub fn new(id: u32, pos: u32, hash: u32, size: u32) -> Self {
        Self {
            id,
            pos,
            hash,
            size,
        }
    }
}

/// Ordered signature list for one base file
///
/// Blocks are kept in `id` order; an entry's `id` always equals its index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureIndex {
    /// Block signatures ordered by `id`
    pub blocks: Vec<BlockSignature>,
}

impl SignatureIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block signature
    pub fn push(&mut self, block: BlockSignature) {
        self.blocks.push(block);
    }

    /// Number of blocks in the index
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the index holds no blocks
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Drop all blocks
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Iterate over the blocks in `id` order
    pub fn iter(&self) -> std::slice::Iter<'_, BlockSignature> {
        self.blocks.iter()
    }
}

impl std::ops::Index<usize> for SignatureIndex {
    type Output = BlockSignature;

    fn index(&self, pos: usize) -> &BlockSignature {
        &self.blocks[pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_access() {
        let mut index = SignatureIndex::new();
        assert!(index.is_empty());

        index.push(BlockSignature::new(0, 0, 0xAB, 8));
        index.push(BlockSignature::new(1, 8, 0xCD, 8));

        assert_eq!(index.len(), 2);
        assert_eq!(index[1].hash, 0xCD);

        index.clear();
        assert!(index.is_empty());
    }
}
