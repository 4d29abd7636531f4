//! # World Configuration
//!
//! Everything a world needs at construction time, loadable from JSON:
//!
//! ```json
//! { "bits_per_axis": 4, "generation": "perlin", "seed": 0 }
//! ```
//!
//! Missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WorldError};
use crate::voxels::geometry::DEFAULT_BITS_PER_AXIS;
use crate::voxels::{ChunkGeometry, GenerationMethod};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunk edge length is `2^bits_per_axis`.
    pub bits_per_axis: u32,
    pub generation: GenerationMethod,
    pub seed: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bits_per_axis: DEFAULT_BITS_PER_AXIS,
            generation: GenerationMethod::default(),
            seed: 0,
        }
    }
}

impl WorldConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| WorldError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| WorldError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&contents)
    }

    /// Validated chunk geometry for this configuration.
    pub fn geometry(&self) -> Result<ChunkGeometry> {
        ChunkGeometry::new(self.bits_per_axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let config = WorldConfig::from_json_str(r#"{ "generation": "solid" }"#).unwrap();
        assert_eq!(config.generation, GenerationMethod::Solid);
        assert_eq!(config.bits_per_axis, 4);
        assert_eq!(config.seed, 0);
        assert_eq!(config.geometry().unwrap().size(), 16);
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        assert!(matches!(
            WorldConfig::from_json_str(r#"{ "generation": "lava" }"#),
            Err(WorldError::Config(_))
        ));
    }

    #[test]
    fn zero_bits_fail_geometry() {
        let config = WorldConfig {
            bits_per_axis: 0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            config.geometry(),
            Err(WorldError::InvalidGeometry { bits_per_axis: 0 })
        ));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = WorldConfig::load("/nonexistent/world.json").unwrap_err();
        assert!(matches!(err, WorldError::Config(message) if message.contains("world.json")));
    }
}
