//! # Chunk Module
//!
//! A `Chunk` is a cube of `size^3` blocks stored in one flat, fixed-length slice.
//! It knows nothing about world coordinates: callers index it with local
//! coordinates in `[0, size)` and all world-to-local arithmetic lives in
//! [`crate::voxels::addressing`].
//!
//! ## Layout
//!
//! The block at local `(x, y, z)` lives at
//! `(x << double_bits) | (y << bits_per_axis) | z`, so `z` is the fastest
//! varying axis and `x` the slowest. See [`ChunkGeometry::index`].
//!
//! Chunks are built either from a complete block vector
//! ([`Chunk::from_blocks`]), by filling ([`Chunk::filled`]), or incrementally
//! with a [`ChunkBuilder`]. Once built, the slice is never resized.

use crate::error::{Result, WorldError};

use super::{ChunkCoord, ChunkGeometry, LocalCoord};

mod chunk_creation;
pub mod chunk_iteration;

pub use chunk_creation::ChunkBuilder;
pub use chunk_iteration::ChunkBlockIterator;

/// A fixed-size cube of block storage, the unit of world loading.
#[derive(Clone, Debug)]
pub struct Chunk<B> {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    position: ChunkCoord,
    geometry: ChunkGeometry,
    /// Exactly `geometry.volume()` blocks in flat-index order.
    blocks: Box<[B]>,
}

impl<B: Copy> Chunk<B> {
    /// Wraps a complete block vector.
    ///
    /// # Errors
    /// [`WorldError::GenerationSizeMismatch`] when `blocks.len() != volume`.
    pub fn from_blocks(position: ChunkCoord, geometry: ChunkGeometry, blocks: Vec<B>) -> Result<Self> {
        if blocks.len() != geometry.volume() {
            return Err(WorldError::GenerationSizeMismatch {
                expected: geometry.volume(),
                actual: blocks.len(),
            });
        }

        Ok(Self {
            position,
            geometry,
            blocks: blocks.into_boxed_slice(),
        })
    }

    /// Creates a chunk where every block is `value`.
    pub fn filled(position: ChunkCoord, geometry: ChunkGeometry, value: B) -> Self {
        Self {
            position,
            geometry,
            blocks: vec![value; geometry.volume()].into_boxed_slice(),
        }
    }

    /// Reads the block at a local coordinate.
    ///
    /// # Errors
    /// [`WorldError::LocalOutOfRange`] when any component is `>= size`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Result<B> {
        let index = self.geometry.index(x, y, z)?;
        Ok(self.blocks[index])
    }

    #[inline]
    pub fn get_at(&self, local: LocalCoord) -> Result<B> {
        self.get(local.x, local.y, local.z)
    }

    /// Overwrites the block at a local coordinate.
    ///
    /// # Errors
    /// [`WorldError::LocalOutOfRange`] when any component is `>= size`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: B) -> Result<()> {
        let index = self.geometry.index(x, y, z)?;
        self.blocks[index] = value;
        Ok(())
    }

    #[inline]
    pub fn set_at(&mut self, local: LocalCoord, value: B) -> Result<()> {
        self.set(local.x, local.y, local.z, value)
    }

    /// Counts the blocks for which `predicate` holds.
    pub fn count_matching(&self, predicate: impl Fn(&B) -> bool) -> usize {
        self.blocks.iter().filter(|block| predicate(block)).count()
    }
}

impl<B> Chunk<B> {
    pub fn position(&self) -> ChunkCoord {
        self.position
    }

    pub fn geometry(&self) -> &ChunkGeometry {
        &self.geometry
    }

    /// Number of blocks, always equal to `geometry().volume()`.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// The raw block slice in flat-index order.
    pub fn blocks(&self) -> &[B] {
        &self.blocks
    }

    /// Iterates every block with its local coordinate, in flat-index order.
    pub fn iter(&self) -> ChunkBlockIterator<'_, B> {
        ChunkBlockIterator::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    fn geometry() -> ChunkGeometry {
        ChunkGeometry::new(4).unwrap()
    }

    #[test]
    fn get_reads_flat_index() {
        let geometry = geometry();
        let blocks: Vec<u32> = (0..geometry.volume() as u32).collect();
        let chunk = Chunk::from_blocks(Point3::new(0, 0, 0), geometry, blocks).unwrap();

        assert_eq!(chunk.get(4, 5, 13).unwrap(), 1117);
        assert_eq!(chunk.get_at(Point3::new(0, 0, 1)).unwrap(), 1);
        assert_eq!(chunk.get(1, 0, 0).unwrap(), 256);
        assert_eq!(chunk.len(), 4096);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = Chunk::from_blocks(Point3::new(0, 0, 0), geometry(), vec![0u8; 100]).unwrap_err();
        assert!(matches!(
            err,
            WorldError::GenerationSizeMismatch {
                expected: 4096,
                actual: 100
            }
        ));
    }

    #[test]
    fn out_of_range_access_does_not_wrap() {
        let mut chunk = Chunk::filled(Point3::new(2, -3, 4), geometry(), 0u8);
        assert!(matches!(
            chunk.get(0, 16, 0),
            Err(WorldError::LocalOutOfRange { y: 16, .. })
        ));
        assert!(chunk.set(16, 0, 0, 1).is_err());
        assert_eq!(chunk.count_matching(|b| *b != 0), 0);
    }

    #[test]
    fn set_then_get() {
        let mut chunk = Chunk::filled(Point3::new(0, 0, 0), geometry(), 0u8);
        chunk.set(15, 15, 15, 9).unwrap();
        chunk.set_at(Point3::new(3, 2, 1), 4).unwrap();

        assert_eq!(chunk.get(15, 15, 15).unwrap(), 9);
        assert_eq!(chunk.get(3, 2, 1).unwrap(), 4);
        assert_eq!(chunk.blocks()[chunk.len() - 1], 9);
        assert_eq!(chunk.count_matching(|b| *b != 0), 2);
        assert_eq!(chunk.position(), Point3::new(0, 0, 0));
    }
}
