//! # World Addressing
//!
//! Conversions between global block coordinates and `(chunk, local)` pairs.
//!
//! Because chunk edges are powers of two, floor division is an arithmetic right
//! shift and floor modulo is a bitwise AND with the mask. Both round towards
//! negative infinity, so for every world coordinate `c`:
//!
//! ```text
//! chunk(c) * size + local(c) == c      and      0 <= local(c) < size
//! ```
//!
//! With `size = 16`, `c = -1` lands in chunk `-1` at local `15`.
//! Each axis is converted independently.

use cgmath::Point3;

use super::{ChunkCoord, ChunkGeometry, LocalCoord, WorldCoord};

/// Floor-divides one world axis by the chunk size.
#[inline]
pub fn axis_to_chunk(geometry: &ChunkGeometry, coord: i32) -> i32 {
    coord >> geometry.bits_per_axis()
}

/// Floor-modulo of one world axis by the chunk size.
#[inline]
pub fn axis_to_local(geometry: &ChunkGeometry, coord: i32) -> usize {
    (coord & geometry.mask() as i32) as usize
}

/// Chunk containing the block at `coord`.
pub fn world_to_chunk(geometry: &ChunkGeometry, coord: WorldCoord) -> ChunkCoord {
    Point3::new(
        axis_to_chunk(geometry, coord.x),
        axis_to_chunk(geometry, coord.y),
        axis_to_chunk(geometry, coord.z),
    )
}

/// Position of the block at `coord` inside its chunk.
pub fn world_to_local(geometry: &ChunkGeometry, coord: WorldCoord) -> LocalCoord {
    Point3::new(
        axis_to_local(geometry, coord.x),
        axis_to_local(geometry, coord.y),
        axis_to_local(geometry, coord.z),
    )
}

/// Recomposes a world coordinate from a chunk and a local offset.
///
/// Returns `None` when the result does not fit in an `i32`.
pub fn chunk_to_world(
    geometry: &ChunkGeometry,
    chunk: ChunkCoord,
    local: LocalCoord,
) -> Option<WorldCoord> {
    let axis = |c: i32, l: usize| -> Option<i32> {
        let base = (c as i64) << geometry.bits_per_axis();
        i32::try_from(base + l as i64).ok()
    };
    Some(Point3::new(
        axis(chunk.x, local.x)?,
        axis(chunk.y, local.y)?,
        axis(chunk.z, local.z)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_one_is_last_block_of_previous_chunk() {
        let geometry = ChunkGeometry::new(4).unwrap();
        assert_eq!(axis_to_chunk(&geometry, -1), -1);
        assert_eq!(axis_to_local(&geometry, -1), 15);
        assert_eq!(axis_to_chunk(&geometry, -16), -1);
        assert_eq!(axis_to_local(&geometry, -16), 0);
        assert_eq!(axis_to_chunk(&geometry, -17), -2);
        assert_eq!(axis_to_local(&geometry, -17), 15);
        assert_eq!(axis_to_chunk(&geometry, 15), 0);
        assert_eq!(axis_to_chunk(&geometry, 16), 1);
    }

    #[test]
    fn round_trip_for_every_geometry() {
        let mut rng = fastrand::Rng::with_seed(42);
        for bits in 1..=10 {
            let geometry = ChunkGeometry::new(bits).unwrap();
            let size = geometry.size() as i64;
            let mut samples: Vec<i32> = (-300..300).collect();
            samples.extend([i32::MIN, i32::MIN + 1, i32::MAX - 1, i32::MAX]);
            samples.extend((0..500).map(|_| rng.i32(..)));

            for coord in samples {
                let chunk = axis_to_chunk(&geometry, coord) as i64;
                let local = axis_to_local(&geometry, coord) as i64;
                assert!((0..size).contains(&local), "local {local} for {coord}");
                assert_eq!(chunk * size + local, coord as i64);
            }
        }
    }

    #[test]
    fn axes_are_independent() {
        let geometry = ChunkGeometry::new(4).unwrap();
        let world = Point3::new(20, 5, -3);
        assert_eq!(world_to_chunk(&geometry, world), Point3::new(1, 0, -1));
        assert_eq!(world_to_local(&geometry, world), Point3::new(4, 5, 13));
    }

    #[test]
    fn chunk_to_world_inverts_split() {
        let geometry = ChunkGeometry::new(5).unwrap();
        let world = Point3::new(-1000, 77, 31);
        let chunk = world_to_chunk(&geometry, world);
        let local = world_to_local(&geometry, world);
        assert_eq!(chunk_to_world(&geometry, chunk, local), Some(world));
        assert_eq!(
            chunk_to_world(&geometry, Point3::new(i32::MAX, 0, 0), Point3::new(0, 0, 0)),
            None
        );
    }
}
