//! # Chunk Iteration Module
//!
//! Walks a chunk's blocks in storage order, decoding each flat index back into
//! its local coordinate.

use crate::voxels::LocalCoord;

use super::Chunk;

/// An iterator over every block of a chunk together with its local position.
pub struct ChunkBlockIterator<'a, B> {
    chunk_ref: &'a Chunk<B>,
    /// Next flat index to yield.
    current_index: usize,
}

impl<'a, B> ChunkBlockIterator<'a, B> {
    pub fn new(chunk_ref: &'a Chunk<B>) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            current_index: 0,
        }
    }
}

impl<'a, B> Iterator for ChunkBlockIterator<'a, B> {
    type Item = (LocalCoord, &'a B);

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.chunk_ref.blocks.get(self.current_index)?;
        let position = self.chunk_ref.geometry.local_from_index(self.current_index);
        self.current_index += 1;
        Some((position, block))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.chunk_ref.blocks.len() - self.current_index;
        (remaining, Some(remaining))
    }
}

impl<'a, B> ExactSizeIterator for ChunkBlockIterator<'a, B> {}

#[cfg(test)]
mod tests {
    use crate::voxels::{Chunk, ChunkGeometry};
    use cgmath::Point3;

    #[test]
    fn yields_every_block_with_its_position() {
        let geometry = ChunkGeometry::new(2).unwrap();
        let blocks: Vec<usize> = (0..geometry.volume()).collect();
        let chunk = Chunk::from_blocks(Point3::new(0, 0, 0), geometry, blocks).unwrap();

        let mut iter = chunk.iter();
        assert_eq!(iter.len(), 64);

        for (local, block) in iter.by_ref().take(10) {
            assert_eq!(chunk.get_at(local).unwrap(), *block);
        }
        assert_eq!(iter.len(), 54);
        assert_eq!(chunk.iter().last(), Some((Point3::new(3, 3, 3), &63)));
    }
}
