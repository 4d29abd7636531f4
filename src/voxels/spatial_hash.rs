//! # Spatial Hash
//!
//! Packs a chunk coordinate into a single `u64` key for sparse chunk storage.
//!
//! Each axis is biased by `2^20` so that the supported signed range
//! `[-2^20, 2^20 - 1]` maps onto `[0, 2^21 - 1]`, then the three 21-bit fields
//! are laid out without overlap:
//!
//! ```text
//!  63  62          42 41          21 20           0
//! | 0 |    x + bias  |    y + bias  |    z + bias  |
//! ```
//!
//! Coordinates outside the supported range are rejected rather than wrapped, so
//! two distinct coordinates can never share a key.

use cgmath::Point3;

use crate::error::{Result, WorldError};

use super::ChunkCoord;

/// Width of each axis field in bits.
pub const AXIS_BITS: u32 = 21;
/// Offset added to each axis before packing.
pub const AXIS_BIAS: i64 = 1 << (AXIS_BITS - 1);
/// Smallest chunk coordinate representable on any axis.
pub const MIN_CHUNK_COORD: i32 = -(AXIS_BIAS as i32);
/// Largest chunk coordinate representable on any axis.
pub const MAX_CHUNK_COORD: i32 = (AXIS_BIAS - 1) as i32;

const AXIS_MASK: u64 = (1 << AXIS_BITS) - 1;

#[inline]
fn bias_axis(axis: char, value: i32) -> Result<u64> {
    if !(MIN_CHUNK_COORD..=MAX_CHUNK_COORD).contains(&value) {
        return Err(WorldError::ChunkCoordinateOutOfRange {
            axis,
            value: value as i64,
        });
    }
    Ok((value as i64 + AXIS_BIAS) as u64)
}

#[inline]
fn unbias_axis(field: u64) -> i32 {
    ((field & AXIS_MASK) as i64 - AXIS_BIAS) as i32
}

/// Returns `true` when every component of `coord` fits in its hash field.
pub fn is_hashable(coord: ChunkCoord) -> bool {
    [coord.x, coord.y, coord.z]
        .iter()
        .all(|v| (MIN_CHUNK_COORD..=MAX_CHUNK_COORD).contains(v))
}

/// Packs `coord` into its unique storage key.
///
/// # Errors
/// [`WorldError::ChunkCoordinateOutOfRange`] naming the first offending axis.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use chunk_world::voxels::spatial_hash::{spatial_hash, spatial_unhash};
///
/// let key = spatial_hash(Point3::new(1, 0, -1)).unwrap();
/// assert_eq!(spatial_unhash(key), Point3::new(1, 0, -1));
/// ```
pub fn spatial_hash(coord: ChunkCoord) -> Result<u64> {
    let x = bias_axis('x', coord.x)?;
    let y = bias_axis('y', coord.y)?;
    let z = bias_axis('z', coord.z)?;
    Ok((x << (2 * AXIS_BITS)) | (y << AXIS_BITS) | z)
}

/// Recovers the chunk coordinate a key was produced from.
pub fn spatial_unhash(key: u64) -> ChunkCoord {
    Point3::new(
        unbias_axis(key >> (2 * AXIS_BITS)),
        unbias_axis(key >> AXIS_BITS),
        unbias_axis(key),
    )
}
