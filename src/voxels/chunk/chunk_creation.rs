//! # Chunk Creation Module
//!
//! `ChunkBuilder` fills a chunk one block at a time in flat-index order
//! (`x` outermost, `z` innermost) and tracks the local position of the next
//! block, so generators can compute world positions without redoing the index
//! arithmetic.

use crate::error::{Result, WorldError};
use crate::voxels::{ChunkCoord, ChunkGeometry, LocalCoord};

use super::Chunk;

/// Incremental builder for a [`Chunk`].
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use chunk_world::voxels::{ChunkBuilder, ChunkGeometry};
///
/// let geometry = ChunkGeometry::new(1).unwrap();
/// let mut builder = ChunkBuilder::new(Point3::new(0, 0, 0), geometry);
/// while !builder.is_complete() {
///     let local = builder.next_local();
///     builder.push_block(local.x + local.y + local.z);
/// }
/// let chunk = builder.build().unwrap();
/// assert_eq!(chunk.get(1, 1, 1).unwrap(), 3);
/// ```
pub struct ChunkBuilder<B> {
    position: ChunkCoord,
    geometry: ChunkGeometry,
    blocks: Vec<B>,
}

impl<B: Copy> ChunkBuilder<B> {
    pub fn new(position: ChunkCoord, geometry: ChunkGeometry) -> Self {
        ChunkBuilder {
            position,
            geometry,
            blocks: Vec::with_capacity(geometry.volume()),
        }
    }

    /// Local coordinate the next pushed block will occupy.
    ///
    /// Only meaningful while [`ChunkBuilder::is_complete`] is `false`.
    pub fn next_local(&self) -> LocalCoord {
        self.geometry.local_from_index(self.blocks.len())
    }

    pub fn is_complete(&self) -> bool {
        self.blocks.len() >= self.geometry.volume()
    }

    /// Appends the block for the current position and advances.
    pub fn push_block(&mut self, block: B) {
        self.blocks.push(block);
    }

    /// Finalizes the chunk.
    ///
    /// # Errors
    /// [`WorldError::GenerationSizeMismatch`] unless exactly `volume` blocks
    /// were pushed.
    pub fn build(self) -> Result<Chunk<B>> {
        Chunk::from_blocks(self.position, self.geometry, self.blocks)
    }

    /// Hands back the pushed blocks without building a chunk.
    pub fn into_blocks(self) -> Vec<B> {
        self.blocks
    }
}

impl<B> std::fmt::Debug for ChunkBuilder<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkBuilder")
            .field("position", &self.position)
            .field("pushed", &self.blocks.len())
            .field("volume", &self.geometry.volume())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    #[test]
    fn next_local_walks_z_fastest() {
        let geometry = ChunkGeometry::new(1).unwrap();
        let mut builder = ChunkBuilder::new(Point3::new(0, 0, 0), geometry);

        let mut visited = Vec::new();
        while !builder.is_complete() {
            visited.push(builder.next_local());
            builder.push_block(0u8);
        }

        assert_eq!(visited[0], Point3::new(0, 0, 0));
        assert_eq!(visited[1], Point3::new(0, 0, 1));
        assert_eq!(visited[2], Point3::new(0, 1, 0));
        assert_eq!(visited[4], Point3::new(1, 0, 0));
        assert_eq!(visited.len(), 8);
    }

    #[test]
    fn incomplete_builder_fails() {
        let geometry = ChunkGeometry::new(2).unwrap();
        let mut builder = ChunkBuilder::new(Point3::new(0, 0, 0), geometry);
        builder.push_block(1u8);

        assert!(matches!(
            builder.build(),
            Err(WorldError::GenerationSizeMismatch {
                expected: 64,
                actual: 1
            })
        ));
    }
}
