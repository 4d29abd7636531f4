//! # Voxel World Core
//!
//! Addressing and storage for a chunked voxel world.
//!
//! ## Architecture
//!
//! * **Geometry**: chunk dimensions derived from a bit width
//! * **Spatial hash**: collision-free `u64` keys for signed chunk coordinates
//! * **Chunk**: flat, fixed-size block storage indexed by local coordinates
//! * **Chunk store**: sparse, lazily populated map from chunk coordinate to chunk
//! * **Addressing / World**: global coordinates split into chunk and local parts
//! * **Generation**: the collaborator that fills a chunk on first access
//!
//! ## Data Flow
//!
//! 1. World receives a block query in global coordinates
//! 2. The coordinate is split into chunk and local coordinates, per axis
//! 3. The chunk store returns the chunk, generating it if it was never loaded
//! 4. The chunk is indexed with the local coordinate
//!
//! ## Thread Safety
//!
//! * The chunk store runs at most one generation per coordinate, even under
//!   concurrent requests
//! * Published chunks are shared through [`crate::core::MtResource`]; their
//!   block contents are mutated under its write lock

use cgmath::Point3;

pub mod addressing;
pub mod block;
pub mod chunk;
pub mod chunk_store;
pub mod generation;
pub mod geometry;
pub mod spatial_hash;
pub mod world;

/// Identifies one chunk in the unbounded chunk grid.
pub type ChunkCoord = Point3<i32>;
/// A global block position.
pub type WorldCoord = Point3<i32>;
/// A block position inside one chunk, each component in `[0, size)`.
pub type LocalCoord = Point3<usize>;

pub use addressing::{chunk_to_world, world_to_chunk, world_to_local};
pub use block::{block_type::BlockType, Block};
pub use chunk::{Chunk, ChunkBuilder};
pub use chunk_store::{ChunkStore, LoadOutcome};
pub use generation::{ChunkGenerator, GenerationMethod, TerrainGenerator};
pub use geometry::ChunkGeometry;
pub use spatial_hash::{spatial_hash, spatial_unhash};
pub use world::World;
