//! # Chunk Store
//!
//! Sparse mapping from chunk coordinates to loaded chunks, keyed by
//! [`spatial_hash`]. Chunks are created lazily: the first request for a
//! coordinate runs the generation collaborator, later requests return the same
//! published chunk.
//!
//! ## Thread Safety
//!
//! Every operation takes `&self`. Each key owns a slot holding a once-set chunk
//! handle and a generation lock:
//!
//! * the map lock is only held to find or create a slot, never while generating,
//!   so distinct coordinates generate in parallel
//! * the first requester of a missing coordinate takes the slot's generation
//!   lock and runs the generator; concurrent requesters for the same coordinate
//!   block on that lock and then return the winner's chunk
//! * a chunk is published only after it is fully built, so no caller can
//!   observe a partially populated chunk
//! * a failed generation publishes nothing and retires its slot from the map;
//!   requesters that were already waiting on that slot return the same
//!   failure, later requests start a fresh attempt

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use log::{debug, warn};
use parking_lot::{Mutex, RwLock};
use web_time::Instant;

use crate::core::MtResource;
use crate::error::{GenerationError, Result, WorldError};

use super::chunk::Chunk;
use super::generation::ChunkGenerator;
use super::spatial_hash::{spatial_hash, spatial_unhash};
use super::{ChunkCoord, ChunkGeometry};

/// How a chunk returned by [`ChunkStore::get_or_create_with_status`] was obtained.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The chunk was already loaded.
    Cached,
    /// This call ran the generator and published the chunk.
    Generated,
}

struct ChunkSlot<B: Send + Sync> {
    chunk: OnceLock<MtResource<Chunk<B>>>,
    /// Held while generating. Set to the failure once an attempt fails, after
    /// which the slot is no longer reachable from the map.
    generation: Mutex<Option<GenerationError>>,
}

impl<B: Send + Sync> ChunkSlot<B> {
    fn new() -> Self {
        Self {
            chunk: OnceLock::new(),
            generation: Mutex::new(None),
        }
    }
}

/// Lazily populated, thread-safe chunk storage.
pub struct ChunkStore<B: Send + Sync> {
    geometry: ChunkGeometry,
    slots: RwLock<HashMap<u64, Arc<ChunkSlot<B>>>>,
    loaded: AtomicUsize,
}

impl<B: Copy + Send + Sync> ChunkStore<B> {
    pub fn new(geometry: ChunkGeometry) -> Self {
        Self {
            geometry,
            slots: RwLock::new(HashMap::new()),
            loaded: AtomicUsize::new(0),
        }
    }

    pub fn geometry(&self) -> &ChunkGeometry {
        &self.geometry
    }

    /// Returns the chunk at `coord`, generating it on first access.
    ///
    /// # Errors
    /// - [`WorldError::ChunkCoordinateOutOfRange`] when `coord` cannot be hashed
    /// - [`WorldError::ChunkLoad`] when the generator fails or returns the wrong
    ///   number of blocks; nothing is stored in that case
    pub fn get_or_create<G>(&self, coord: ChunkCoord, generator: &G) -> Result<MtResource<Chunk<B>>>
    where
        G: ChunkGenerator<B> + ?Sized,
    {
        self.get_or_create_with_status(coord, generator)
            .map(|(chunk, _)| chunk)
    }

    /// Same as [`ChunkStore::get_or_create`], also reporting whether this call
    /// generated the chunk.
    pub fn get_or_create_with_status<G>(
        &self,
        coord: ChunkCoord,
        generator: &G,
    ) -> Result<(MtResource<Chunk<B>>, LoadOutcome)>
    where
        G: ChunkGenerator<B> + ?Sized,
    {
        let key = spatial_hash(coord)?;
        let slot = self.slot_for(key);

        if let Some(chunk) = slot.chunk.get() {
            return Ok((chunk.clone(), LoadOutcome::Cached));
        }

        let mut failure = slot.generation.lock();
        // Another requester may have finished while we waited for the lock.
        if let Some(chunk) = slot.chunk.get() {
            return Ok((chunk.clone(), LoadOutcome::Cached));
        }
        if let Some(source) = &*failure {
            return Err(WorldError::ChunkLoad {
                coord,
                source: source.clone(),
            });
        }

        match self.generate(coord, generator) {
            Ok(chunk) => {
                let chunk = slot.chunk.get_or_init(|| MtResource::new(chunk)).clone();
                self.loaded.fetch_add(1, Ordering::Release);
                Ok((chunk, LoadOutcome::Generated))
            }
            Err(source) => {
                *failure = Some(source.clone());
                self.retire_slot(key, &slot);
                Err(WorldError::ChunkLoad { coord, source })
            }
        }
    }

    fn slot_for(&self, key: u64) -> Arc<ChunkSlot<B>> {
        if let Some(slot) = self.slots.read().get(&key) {
            return slot.clone();
        }
        self.slots
            .write()
            .entry(key)
            .or_insert_with(|| Arc::new(ChunkSlot::new()))
            .clone()
    }

    /// Drops a failed slot from the map unless it was already replaced.
    fn retire_slot(&self, key: u64, slot: &Arc<ChunkSlot<B>>) {
        let mut slots = self.slots.write();
        if slots
            .get(&key)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && current.chunk.get().is_none())
        {
            slots.remove(&key);
        }
    }

    fn generate<G>(
        &self,
        coord: ChunkCoord,
        generator: &G,
    ) -> std::result::Result<Chunk<B>, GenerationError>
    where
        G: ChunkGenerator<B> + ?Sized,
    {
        let started = Instant::now();
        let blocks = generator.generate(coord).map_err(|source| {
            warn!(
                "Chunk ({}, {}, {}) failed to generate: {}",
                coord.x, coord.y, coord.z, source
            );
            source
        })?;

        if blocks.len() != self.geometry.volume() {
            warn!(
                "Chunk ({}, {}, {}) generated {} blocks, expected {}",
                coord.x,
                coord.y,
                coord.z,
                blocks.len(),
                self.geometry.volume()
            );
            return Err(GenerationError::SizeMismatch {
                expected: self.geometry.volume(),
                actual: blocks.len(),
            });
        }

        let chunk = Chunk::from_blocks(coord, self.geometry, blocks)
            .map_err(|e| GenerationError::Failed(e.to_string()))?;
        debug!(
            "Generated chunk ({}, {}, {}) in {:?}",
            coord.x,
            coord.y,
            coord.z,
            started.elapsed()
        );
        Ok(chunk)
    }

    /// Returns the chunk at `coord` if it is loaded, without generating.
    pub fn get(&self, coord: ChunkCoord) -> Option<MtResource<Chunk<B>>> {
        let key = spatial_hash(coord).ok()?;
        self.slots.read().get(&key)?.chunk.get().cloned()
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.get(coord).is_some()
    }

    /// Number of loaded chunks.
    pub fn len(&self) -> usize {
        self.loaded.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coordinates of every loaded chunk, in no particular order.
    pub fn coords(&self) -> Vec<ChunkCoord> {
        self.slots
            .read()
            .iter()
            .filter(|(_, slot)| slot.chunk.get().is_some())
            .map(|(key, _)| spatial_unhash(*key))
            .collect()
    }
}
