//! # Chunk Generation
//!
//! The store never decides what a chunk contains. It asks a [`ChunkGenerator`]
//! for the full block vector of a chunk the first time that chunk is requested.
//!
//! Any `Fn(ChunkCoord) -> Result<Vec<B>, GenerationError>` closure is a
//! generator. [`TerrainGenerator`] provides the built-in methods:
//! - `perlin`: 3D Perlin noise for natural-looking terrain
//! - `checkerboard`: alternates solid and air blocks
//! - `solid`: every block filled
//! - `empty`: every block air
//! - `random`: sparse random blocks, reproducible per chunk

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

use super::block::block_type::{BlockType, SOLID_TYPES};
use super::block::Block;
use super::chunk::ChunkBuilder;
use super::spatial_hash::spatial_hash;
use super::{ChunkCoord, ChunkGeometry};

/// Threshold above which Perlin noise is considered solid for terrain generation.
pub const PERLIN_POSITIVE_THRESHOLD: f64 = 0.2;
/// Threshold below which Perlin noise is considered solid for terrain generation.
pub const PERLIN_NEGATIVE_THRESHOLD: f64 = -0.2;
/// Scaling factor applied to world coordinates when sampling Perlin noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.02;
/// Fraction of blocks the `random` method leaves as air.
pub const RANDOM_SPARSENESS: f64 = 0.9;

/// Produces the blocks of a chunk that has never been loaded.
///
/// Implementations must return exactly `geometry.volume()` blocks in flat-index
/// order; the store rejects anything else.
pub trait ChunkGenerator<B>: Send + Sync {
    fn generate(&self, coord: ChunkCoord) -> Result<Vec<B>, GenerationError>;
}

impl<B, F> ChunkGenerator<B> for F
where
    F: Fn(ChunkCoord) -> Result<Vec<B>, GenerationError> + Send + Sync,
{
    fn generate(&self, coord: ChunkCoord) -> Result<Vec<B>, GenerationError> {
        self(coord)
    }
}

/// The built-in generation strategies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMethod {
    #[default]
    Perlin,
    Checkerboard,
    Solid,
    Empty,
    Random,
}

/// Generator for [`Block`] chunks using one of the [`GenerationMethod`]s.
pub struct TerrainGenerator {
    method: GenerationMethod,
    geometry: ChunkGeometry,
    seed: u32,
    perlin: Perlin,
}

impl TerrainGenerator {
    pub fn new(method: GenerationMethod, geometry: ChunkGeometry, seed: u32) -> Self {
        TerrainGenerator {
            method,
            geometry,
            seed,
            perlin: Perlin::new(seed),
        }
    }

    pub fn method(&self) -> GenerationMethod {
        self.method
    }

    /// Fills a builder, handing each block's world position to `block_at`.
    fn fill(&self, coord: ChunkCoord, block_at: impl Fn([i64; 3]) -> BlockType) -> Vec<Block> {
        let size = self.geometry.size() as i64;
        let mut builder = ChunkBuilder::new(coord, self.geometry);
        while !builder.is_complete() {
            let local = builder.next_local();
            let world = [
                coord.x as i64 * size + local.x as i64,
                coord.y as i64 * size + local.y as i64,
                coord.z as i64 * size + local.z as i64,
            ];
            builder.push_block(Block::new(block_at(world)));
        }
        builder.into_blocks()
    }

    fn perlin_block(&self, world: [i64; 3]) -> BlockType {
        let sample = self.perlin.get(to_perlin_pos(world, PERLIN_SCALE_FACTOR));
        if (PERLIN_NEGATIVE_THRESHOLD..=PERLIN_POSITIVE_THRESHOLD).contains(&sample) {
            return BlockType::AIR;
        }
        // Material follows the noise magnitude so regeneration is reproducible.
        let band = ((sample.abs() - PERLIN_POSITIVE_THRESHOLD) * 10.0) as usize;
        SOLID_TYPES[band.min(SOLID_TYPES.len() - 1)]
    }
}

fn to_perlin_pos(pos: [i64; 3], scale_factor: f64) -> [f64; 3] {
    [
        pos[0] as f64 * scale_factor,
        pos[1] as f64 * scale_factor,
        pos[2] as f64 * scale_factor,
    ]
}

impl ChunkGenerator<Block> for TerrainGenerator {
    fn generate(&self, coord: ChunkCoord) -> Result<Vec<Block>, GenerationError> {
        let blocks = match self.method {
            GenerationMethod::Perlin => self.fill(coord, |world| self.perlin_block(world)),
            GenerationMethod::Checkerboard => self.fill(coord, |[x, y, z]| {
                if (x + y + z).rem_euclid(2) == 0 {
                    BlockType::DIRT
                } else {
                    BlockType::AIR
                }
            }),
            GenerationMethod::Solid => vec![Block::new(BlockType::DIRT); self.geometry.volume()],
            GenerationMethod::Empty => vec![Block::AIR; self.geometry.volume()],
            GenerationMethod::Random => {
                let key = spatial_hash(coord).map_err(|e| GenerationError::Failed(e.to_string()))?;
                let mut rng = fastrand::Rng::with_seed(key ^ ((self.seed as u64) << 32));
                (0..self.geometry.volume())
                    .map(|_| {
                        if rng.f64() < RANDOM_SPARSENESS {
                            Block::AIR
                        } else {
                            Block::new(BlockType::random_solid(&mut rng))
                        }
                    })
                    .collect()
            }
        };
        Ok(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    fn generator(method: GenerationMethod) -> TerrainGenerator {
        TerrainGenerator::new(method, ChunkGeometry::new(3).unwrap(), 1234)
    }

    #[test]
    fn every_method_fills_the_volume() {
        for method in [
            GenerationMethod::Perlin,
            GenerationMethod::Checkerboard,
            GenerationMethod::Solid,
            GenerationMethod::Empty,
            GenerationMethod::Random,
        ] {
            let blocks = generator(method).generate(Point3::new(-2, 1, 5)).unwrap();
            assert_eq!(blocks.len(), 512, "{method:?}");
        }
    }

    #[test]
    fn checkerboard_alternates_across_chunk_borders() {
        let generator = generator(GenerationMethod::Checkerboard);
        let geometry = ChunkGeometry::new(3).unwrap();
        let origin = generator.generate(Point3::new(0, 0, 0)).unwrap();
        let west = generator.generate(Point3::new(-1, 0, 0)).unwrap();

        // world (0, 0, 0) is solid, world (-1, 0, 0) is not
        assert_eq!(origin[geometry.index(0, 0, 0).unwrap()], Block::new(BlockType::DIRT));
        assert!(west[geometry.index(7, 0, 0).unwrap()].is_air());
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generator(GenerationMethod::Random).generate(Point3::new(3, 3, 3)).unwrap();
        let b = generator(GenerationMethod::Random).generate(Point3::new(3, 3, 3)).unwrap();
        assert_eq!(a, b);

        let a = generator(GenerationMethod::Perlin).generate(Point3::new(0, -1, 9)).unwrap();
        let b = generator(GenerationMethod::Perlin).generate(Point3::new(0, -1, 9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn closures_are_generators() {
        let closure = |coord: ChunkCoord| -> Result<Vec<u8>, GenerationError> {
            Ok(vec![coord.x as u8; 8])
        };
        assert_eq!(closure.generate(Point3::new(3, 0, 0)).unwrap(), vec![3u8; 8]);
    }

    #[test]
    fn method_names_deserialize_lowercase() {
        let method: GenerationMethod = serde_json::from_str("\"checkerboard\"").unwrap();
        assert_eq!(method, GenerationMethod::Checkerboard);
        assert_eq!(GenerationMethod::default(), GenerationMethod::Perlin);
    }
}
