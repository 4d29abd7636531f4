//! # World Module
//!
//! This module provides the `World` struct, the entry point for block and chunk
//! queries in global coordinates.
//!
//! ## Architecture
//!
//! The world uses a sparse storage approach where only chunks that have been
//! accessed are kept in memory. A query:
//!
//! 1. splits the world coordinate into chunk and local coordinates, per axis
//! 2. fetches the chunk from the [`ChunkStore`], generating it on first access
//! 3. indexes the chunk with the local coordinate
//!
//! Everything the world depends on (geometry, generator, event listeners) is
//! handed in at construction; there is no global state.

use cgmath::Point3;
use log::{info, warn};

use crate::config::WorldConfig;
use crate::core::MtResource;
use crate::error::{Result, WorldError};
use crate::events::{EventRegistry, WorldEvent};

use super::addressing::{world_to_chunk, world_to_local};
use super::block::Block;
use super::chunk::Chunk;
use super::chunk_store::{ChunkStore, LoadOutcome};
use super::generation::{ChunkGenerator, TerrainGenerator};
use super::{ChunkCoord, ChunkGeometry, LocalCoord, WorldCoord};

/// Returns `true` if `name` consists only of ASCII letters, digits and `_`,
/// and is not empty.
pub fn is_valid_world_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Deterministic replacement for an invalid world name: `world_` followed by
/// the FNV-1a hash of the proposed name in eight hex digits.
pub fn fallback_world_name(proposed: &str) -> String {
    const FNV_OFFSET: u32 = 0x811c_9dc5;
    const FNV_PRIME: u32 = 0x0100_0193;

    let hash = proposed
        .bytes()
        .fold(FNV_OFFSET, |hash, byte| (hash ^ byte as u32).wrapping_mul(FNV_PRIME));
    format!("world_{:08x}", hash)
}

/// A voxel world composed of lazily generated chunks.
///
/// # Examples
///
/// ```
/// use chunk_world::voxels::{ChunkGeometry, World};
/// use chunk_world::error::GenerationError;
/// use chunk_world::voxels::ChunkCoord;
///
/// let geometry = ChunkGeometry::new(4).unwrap();
/// let world = World::with_geometry("demo", geometry, move |coord: ChunkCoord| {
///     Ok::<_, GenerationError>(vec![coord.y; geometry.volume()])
/// });
///
/// assert_eq!(world.get_block(20, -1, 3).unwrap(), -1);
/// assert_eq!(world.store().len(), 1);
/// ```
pub struct World<B: Send + Sync> {
    name: String,
    geometry: ChunkGeometry,
    store: ChunkStore<B>,
    generator: Box<dyn ChunkGenerator<B>>,
    events: EventRegistry,
}

impl<B: Copy + Send + Sync + 'static> World<B> {
    /// Creates a world whose geometry comes from `config`.
    ///
    /// Only `config.bits_per_axis` is read: chunks are produced by `generator`,
    /// so `config.generation` and `config.seed` do not apply. Use
    /// [`World::from_config`] for the built-in [`TerrainGenerator`].
    ///
    /// # Errors
    /// [`WorldError::InvalidGeometry`] when the configured bit width is unsupported.
    pub fn new(name: &str, config: &WorldConfig, generator: impl ChunkGenerator<B> + 'static) -> Result<Self> {
        Ok(Self::with_geometry(name, config.geometry()?, generator))
    }

    pub fn with_geometry(
        name: &str,
        geometry: ChunkGeometry,
        generator: impl ChunkGenerator<B> + 'static,
    ) -> Self {
        Self::with_events(name, geometry, generator, EventRegistry::new())
    }

    /// Creates a world with listeners already registered, so they also observe
    /// events raised during construction.
    pub fn with_events(
        name: &str,
        geometry: ChunkGeometry,
        generator: impl ChunkGenerator<B> + 'static,
        events: EventRegistry,
    ) -> Self {
        let name = if is_valid_world_name(name) {
            name.to_string()
        } else {
            let fallback = fallback_world_name(name);
            warn!("Invalid world name {:?}, using {} instead", name, fallback);
            events.dispatch(&WorldEvent::NameFallback {
                proposed: name.to_string(),
                fallback: fallback.clone(),
            });
            fallback
        };

        info!(
            "Created world {} with {}x{}x{} chunks",
            name,
            geometry.size(),
            geometry.size(),
            geometry.size()
        );

        World {
            name,
            geometry,
            store: ChunkStore::new(geometry),
            generator: Box::new(generator),
            events,
        }
    }

    /// Reads the block at a global coordinate, loading its chunk if needed.
    pub fn get_block(&self, wx: i32, wy: i32, wz: i32) -> Result<B> {
        let (chunk, local) = self.resolve(Point3::new(wx, wy, wz))?;
        let block = chunk.get().get_at(local)?;
        Ok(block)
    }

    /// Writes the block at a global coordinate, loading its chunk if needed.
    pub fn set_block(&self, wx: i32, wy: i32, wz: i32, value: B) -> Result<()> {
        let (chunk, local) = self.resolve(Point3::new(wx, wy, wz))?;
        chunk.get_mut().set_at(local, value)?;
        Ok(())
    }

    fn resolve(&self, world: WorldCoord) -> Result<(MtResource<Chunk<B>>, LocalCoord)> {
        let chunk = self.load_chunk(world_to_chunk(&self.geometry, world))?;
        Ok((chunk, world_to_local(&self.geometry, world)))
    }

    /// Returns the chunk at a chunk coordinate, generating it on first access.
    pub fn get_chunk(&self, cx: i32, cy: i32, cz: i32) -> Result<MtResource<Chunk<B>>> {
        self.load_chunk(Point3::new(cx, cy, cz))
    }

    fn load_chunk(&self, coord: ChunkCoord) -> Result<MtResource<Chunk<B>>> {
        match self.store.get_or_create_with_status(coord, &*self.generator) {
            Ok((chunk, LoadOutcome::Generated)) => {
                self.events.dispatch(&WorldEvent::ChunkLoaded { coord });
                Ok(chunk)
            }
            Ok((chunk, LoadOutcome::Cached)) => Ok(chunk),
            Err(err @ WorldError::ChunkLoad { .. }) => {
                self.events.dispatch(&WorldEvent::ChunkLoadFailed {
                    coord,
                    reason: err.to_string(),
                });
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Returns the chunk at a chunk coordinate only if it is already loaded.
    pub fn loaded_chunk(&self, cx: i32, cy: i32, cz: i32) -> Option<MtResource<Chunk<B>>> {
        self.store.get(Point3::new(cx, cy, cz))
    }

    pub fn world_to_chunk(&self, coord: WorldCoord) -> ChunkCoord {
        world_to_chunk(&self.geometry, coord)
    }

    pub fn world_to_local(&self, coord: WorldCoord) -> LocalCoord {
        world_to_local(&self.geometry, coord)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &ChunkGeometry {
        &self.geometry
    }

    pub fn store(&self) -> &ChunkStore<B> {
        &self.store
    }

    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventRegistry {
        &mut self.events
    }
}

impl World<Block> {
    /// Creates a world backed by the built-in [`TerrainGenerator`] configured
    /// by `config`.
    pub fn from_config(name: &str, config: &WorldConfig) -> Result<Self> {
        let geometry = config.geometry()?;
        let generator = TerrainGenerator::new(config.generation, geometry, config.seed);
        Ok(Self::with_geometry(name, geometry, generator))
    }
}

impl<B: Send + Sync> std::fmt::Debug for World<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("name", &self.name)
            .field("geometry", &self.geometry)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
