//! # Chunk Geometry
//!
//! Chunks are cubes whose edge length is a power of two. Everything that maps
//! between coordinates and storage offsets is derived from a single parameter,
//! the number of bits per axis:
//!
//! | constant      | value                   |
//! |---------------|-------------------------|
//! | `size`        | `1 << bits_per_axis`    |
//! | `mask`        | `size - 1`              |
//! | `double_bits` | `2 * bits_per_axis`     |
//! | `volume`      | `size * size * size`    |
//!
//! A local coordinate `(x, y, z)` is stored at flat index
//! `(x << double_bits) | (y << bits_per_axis) | z`.

use cgmath::Point3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WorldError};

use super::LocalCoord;

/// Smallest supported number of bits per axis (2x2x2 chunks).
pub const MIN_BITS_PER_AXIS: u32 = 1;
/// Largest supported number of bits per axis (1024^3 blocks per chunk).
pub const MAX_BITS_PER_AXIS: u32 = 10;
/// Bits per axis used when nothing else is configured (16x16x16 chunks).
pub const DEFAULT_BITS_PER_AXIS: u32 = 4;

/// Immutable description of chunk dimensions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ChunkGeometry {
    bits_per_axis: u32,
    size: usize,
    mask: usize,
    double_bits: u32,
    volume: usize,
}

impl ChunkGeometry {
    /// Builds the geometry for chunks with `2^bits_per_axis` blocks per edge.
    ///
    /// # Errors
    /// [`WorldError::InvalidGeometry`] when `bits_per_axis` is outside
    /// `MIN_BITS_PER_AXIS..=MAX_BITS_PER_AXIS`.
    pub fn new(bits_per_axis: u32) -> Result<Self> {
        if !(MIN_BITS_PER_AXIS..=MAX_BITS_PER_AXIS).contains(&bits_per_axis) {
            return Err(WorldError::InvalidGeometry { bits_per_axis });
        }

        let size = 1usize << bits_per_axis;
        Ok(Self {
            bits_per_axis,
            size,
            mask: size - 1,
            double_bits: bits_per_axis * 2,
            volume: size * size * size,
        })
    }

    #[inline]
    pub fn bits_per_axis(&self) -> u32 {
        self.bits_per_axis
    }

    /// Number of blocks along one edge of a chunk.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn mask(&self) -> usize {
        self.mask
    }

    #[inline]
    pub fn double_bits(&self) -> u32 {
        self.double_bits
    }

    /// Total number of blocks in one chunk.
    #[inline]
    pub fn volume(&self) -> usize {
        self.volume
    }

    #[inline]
    pub fn contains_local(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.size && y < self.size && z < self.size
    }

    /// Packs a local coordinate into its flat storage index.
    ///
    /// # Errors
    /// [`WorldError::LocalOutOfRange`] when any component is `>= size`.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> Result<usize> {
        if !self.contains_local(x, y, z) {
            return Err(WorldError::LocalOutOfRange {
                x,
                y,
                z,
                size: self.size,
            });
        }
        Ok((x << self.double_bits) | (y << self.bits_per_axis) | z)
    }

    /// Inverse of [`ChunkGeometry::index`] for indices in `0..volume`.
    #[inline]
    pub fn local_from_index(&self, index: usize) -> LocalCoord {
        Point3::new(
            (index >> self.double_bits) & self.mask,
            (index >> self.bits_per_axis) & self.mask,
            index & self.mask,
        )
    }
}

impl Default for ChunkGeometry {
    fn default() -> Self {
        let size = 1usize << DEFAULT_BITS_PER_AXIS;
        Self {
            bits_per_axis: DEFAULT_BITS_PER_AXIS,
            size,
            mask: size - 1,
            double_bits: DEFAULT_BITS_PER_AXIS * 2,
            volume: size * size * size,
        }
    }
}

impl TryFrom<u32> for ChunkGeometry {
    type Error = WorldError;

    fn try_from(bits_per_axis: u32) -> Result<Self> {
        Self::new(bits_per_axis)
    }
}

impl From<ChunkGeometry> for u32 {
    fn from(geometry: ChunkGeometry) -> Self {
        geometry.bits_per_axis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_constants_for_sixteen() {
        let geometry = ChunkGeometry::new(4).unwrap();
        assert_eq!(geometry.size(), 16);
        assert_eq!(geometry.mask(), 15);
        assert_eq!(geometry.double_bits(), 8);
        assert_eq!(geometry.volume(), 4096);
        assert_eq!(geometry, ChunkGeometry::default());
    }

    #[test]
    fn rejects_zero_bits() {
        assert!(matches!(
            ChunkGeometry::new(0),
            Err(WorldError::InvalidGeometry { bits_per_axis: 0 })
        ));
        assert!(ChunkGeometry::new(MAX_BITS_PER_AXIS + 1).is_err());
        assert!(ChunkGeometry::new(MIN_BITS_PER_AXIS).is_ok());
    }

    #[test]
    fn flat_index_packing() {
        let geometry = ChunkGeometry::new(4).unwrap();
        assert_eq!(geometry.index(4, 5, 13).unwrap(), 1117);
        assert_eq!(geometry.index(0, 0, 0).unwrap(), 0);
        assert_eq!(geometry.index(15, 15, 15).unwrap(), geometry.volume() - 1);
    }

    #[test]
    fn index_out_of_range() {
        let geometry = ChunkGeometry::new(4).unwrap();
        let err = geometry.index(16, 0, 0).unwrap_err();
        assert!(matches!(
            err,
            WorldError::LocalOutOfRange {
                x: 16,
                y: 0,
                z: 0,
                size: 16
            }
        ));
        assert!(geometry.index(0, 0, 16).is_err());
    }

    #[test]
    fn index_inverse_covers_every_cell() {
        let geometry = ChunkGeometry::new(2).unwrap();
        for index in 0..geometry.volume() {
            let local = geometry.local_from_index(index);
            assert_eq!(geometry.index(local.x, local.y, local.z).unwrap(), index);
        }
    }

    #[test]
    fn serializes_as_bits() {
        let geometry = ChunkGeometry::new(5).unwrap();
        assert_eq!(serde_json::to_string(&geometry).unwrap(), "5");
        let parsed: ChunkGeometry = serde_json::from_str("3").unwrap();
        assert_eq!(parsed.size(), 8);
        assert!(serde_json::from_str::<ChunkGeometry>("0").is_err());
    }
}
