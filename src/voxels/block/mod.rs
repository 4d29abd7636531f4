//! # Block Module
//!
//! The default block payload stored by chunks. Storage and addressing never look
//! inside a block; only the built-in generators and callers interpret it.

use block_type::BlockType;

pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Represents a single voxel block in the world.
///
/// # Memory Layout
/// `#[repr(C)]` with a single byte, so a chunk's block slice can be handed to
/// `bytemuck` for zero-copy byte views.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,
}

impl Block {
    pub const AIR: Block = Block {
        block_type: BlockType::AIR as BlockTypeSize,
    };

    /// Creates a new block of the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
        }
    }

    /// The decoded block type, or `None` for a byte no variant maps to.
    pub fn block_type(&self) -> Option<BlockType> {
        BlockType::from_int(self.block_type)
    }

    pub fn is_air(&self) -> bool {
        self.block_type == BlockType::AIR as BlockTypeSize
    }
}

impl From<BlockType> for Block {
    fn from(block_type: BlockType) -> Self {
        Block::new(block_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_block_is_air() {
        assert!(Block::default().is_air());
        assert_eq!(Block::default(), Block::AIR);
        assert_eq!(Block::AIR.block_type(), Some(BlockType::AIR));
    }

    #[test]
    fn blocks_cast_to_bytes() {
        let blocks = [Block::new(BlockType::DIRT), Block::new(BlockType::WOOD)];
        let bytes: &[u8] = bytemuck::cast_slice(&blocks);
        assert_eq!(bytes, &[BlockType::DIRT as u8, BlockType::WOOD as u8]);
    }

    #[test]
    fn unknown_type_byte_decodes_to_none() {
        let block = Block { block_type: 200 };
        assert_eq!(block.block_type(), None);
        assert!(!block.is_air());
    }
}
