//! # Block Type Module
//!
//! The block types produced by the built-in terrain generators.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::BlockTypeSize;

/// Enumerates all block types the built-in generators emit.
///
/// The `FromPrimitive` derive allows conversion from the compact byte stored
/// in [`super::Block`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize)]
pub enum BlockType {
    /// An air block, which is non-solid and transparent.
    AIR,

    /// A basic dirt block, used as a common building material.
    DIRT,

    /// A grass block.
    GRASS,

    /// A wooden block.
    WOOD,

    /// A plain white block, often used for testing.
    WHITE,
}

/// Solid block types in byte order, used when a generator picks a material.
pub const SOLID_TYPES: [BlockType; 4] = [
    BlockType::DIRT,
    BlockType::GRASS,
    BlockType::WOOD,
    BlockType::WHITE,
];

impl BlockType {
    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// Returns `None` if the value doesn't correspond to a valid `BlockType`.
    pub fn from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// Picks a solid type from a `fastrand` generator.
    pub fn random_solid(rng: &mut fastrand::Rng) -> Self {
        SOLID_TYPES[rng.usize(..SOLID_TYPES.len())]
    }

    pub fn is_solid(&self) -> bool {
        *self != BlockType::AIR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_from_every_valid_byte() {
        assert_eq!(BlockType::from_int(0), Some(BlockType::AIR));
        assert_eq!(BlockType::from_int(4), Some(BlockType::WHITE));
        assert_eq!(BlockType::from_int(5), None);
    }

    #[test]
    fn random_solid_never_returns_air() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..256 {
            assert!(BlockType::random_solid(&mut rng).is_solid());
        }
    }
}
