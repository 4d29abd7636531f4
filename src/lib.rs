//! # Chunk World
//!
//! Addressing and storage for an unbounded, chunked voxel world.
//!
//! A world is divided into cubic chunks whose edge length is a power of two.
//! Global block coordinates split into a chunk coordinate and a local offset
//! with shifts and masks; chunks are kept in a sparse store keyed by a
//! collision-free spatial hash and generated on first access.
//!
//! ## Key Modules
//!
//! * `voxels` - Geometry, spatial hashing, chunks, the chunk store and the world
//! * `core` - Shared-ownership primitives used throughout the crate
//! * `events` - Typed callbacks fired by the world
//! * `config` - JSON-loadable world configuration
//! * `error` - Error types
//!
//! ## Usage
//!
//! ```rust
//! use chunk_world::config::WorldConfig;
//! use chunk_world::voxels::World;
//!
//! let world = World::from_config("overworld", &WorldConfig::default()).unwrap();
//! let block = world.get_block(20, 5, -3).unwrap();
//! assert_eq!(world.store().len(), 1);
//! # let _ = block;
//! ```

use log::{error, info};

pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod voxels;

use config::WorldConfig;
use voxels::World;

pub const DEFAULT_WORLD_NAME: &str = "world";

/// Initializes logging, builds a world from the configuration file named by the
/// first command-line argument (or the defaults) and samples a few blocks.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => match WorldConfig::load(&path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path);
                config
            }
            Err(e) => {
                error!("{}", e);
                return;
            }
        },
        None => WorldConfig::default(),
    };

    let world = match World::from_config(DEFAULT_WORLD_NAME, &config) {
        Ok(world) => world,
        Err(e) => {
            error!("Failed to create world: {}", e);
            return;
        }
    };

    for (x, y, z) in [(0, 0, 0), (20, 5, -3), (-1, -1, -1), (100, -40, 7)] {
        match world.get_block(x, y, z) {
            Ok(block) => info!(
                "Block at ({}, {}, {}) in chunk {:?}: {:?}",
                x,
                y,
                z,
                world.world_to_chunk(cgmath::Point3::new(x, y, z)),
                block.block_type()
            ),
            Err(e) => error!("Block at ({}, {}, {}): {}", x, y, z, e),
        }
    }

    info!("{} chunks loaded in world {}", world.store().len(), world.name());
}
