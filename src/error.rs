//! # Error Types
//!
//! Every fallible operation in the crate returns [`Result`], whose error type is
//! [`WorldError`]. Failures reported by a generation collaborator are described by
//! [`GenerationError`] and wrapped into [`WorldError::ChunkLoad`] by the chunk store.

use thiserror::Error;

use crate::voxels::ChunkCoord;

/// Errors raised while addressing or loading world data.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("local coordinate ({x}, {y}, {z}) is outside a chunk of size {size}")]
    LocalOutOfRange {
        x: usize,
        y: usize,
        z: usize,
        size: usize,
    },

    #[error("chunk {axis} coordinate {value} is outside the addressable range")]
    ChunkCoordinateOutOfRange { axis: char, value: i64 },

    #[error("invalid chunk geometry: {bits_per_axis} bits per axis")]
    InvalidGeometry { bits_per_axis: u32 },

    #[error("chunk data has {actual} blocks, expected {expected}")]
    GenerationSizeMismatch { expected: usize, actual: usize },

    #[error("failed to load chunk ({}, {}, {}): {source}", .coord.x, .coord.y, .coord.z)]
    ChunkLoad {
        coord: ChunkCoord,
        #[source]
        source: GenerationError,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors reported by a chunk generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("generation failed: {0}")]
    Failed(String),

    #[error("generator produced {actual} blocks, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, WorldError>;
