//! Coordinate mathematics for dense scalar grids.
//!
//! Handles flattening of 3D grid indices into a contiguous buffer, extent
//! computation from world dimensions, and the grid-to-world mapping.

use crate::types::{GridIndex, Point3};

/// Flatten a grid index into an offset into a contiguous `[x][y][z]` buffer.
///
/// Uses `index = x * ny * nz + y * nz + z`, so `z` varies fastest. Does not
/// check bounds; see [`checked_flat_index`].
///
/// # Example
/// ```
/// use isomesh_core::coords::flat_index;
/// use isomesh_core::types::GridIndex;
///
/// let extents = [4, 3, 2];
/// assert_eq!(flat_index(GridIndex::new(0, 0, 1), extents), 1);
/// assert_eq!(flat_index(GridIndex::new(0, 1, 0), extents), 2);
/// assert_eq!(flat_index(GridIndex::new(1, 0, 0), extents), 6);
/// ```
#[inline]
pub const fn flat_index(index: GridIndex, extents: [usize; 3]) -> usize {
    index.x * extents[1] * extents[2] + index.y * extents[2] + index.z
}

/// Flatten a grid index, returning `None` if any coordinate is outside
/// `[0, extent)` for its axis.
#[inline]
pub const fn checked_flat_index(index: GridIndex, extents: [usize; 3]) -> Option<usize> {
    if index.x < extents[0] && index.y < extents[1] && index.z < extents[2] {
        Some(flat_index(index, extents))
    } else {
        None
    }
}

/// Inverse of [`flat_index`].
#[inline]
pub const fn unflatten_index(offset: usize, extents: [usize; 3]) -> GridIndex {
    let plane = extents[1] * extents[2];
    GridIndex::new(
        offset / plane,
        (offset % plane) / extents[2],
        offset % extents[2],
    )
}

/// Number of grid points along one axis: `ceil(dimension * resolution)`.
///
/// Returns `None` when the product is not finite or resolves to zero or less.
#[inline]
pub fn axis_extent(dimension: f32, resolution: f32) -> Option<usize> {
    let samples = libm::ceilf(dimension * resolution);
    if !samples.is_finite() || samples < 1.0 {
        return None;
    }
    Some(samples as usize)
}

/// Total number of grid points for the given extents.
///
/// Returns `None` if the product does not fit in a `usize`.
#[inline]
pub const fn point_count(extents: [usize; 3]) -> Option<usize> {
    match extents[0].checked_mul(extents[1]) {
        Some(plane) => plane.checked_mul(extents[2]),
        None => None,
    }
}

/// Map a position in grid units to world space.
///
/// `world = origin + grid / resolution`.
#[inline]
pub fn grid_to_world(grid: Point3, resolution: f32, origin: Point3) -> Point3 {
    origin + grid / resolution
}

/// Map a world-space position back to (fractional) grid units.
#[inline]
pub fn world_to_grid(world: Point3, resolution: f32, origin: Point3) -> Point3 {
    (world - origin) * resolution
}

/// World-space position of a grid point.
#[inline]
pub fn grid_point_position(index: GridIndex, resolution: f32, origin: Point3) -> Point3 {
    grid_to_world(index.to_point(), resolution, origin)
}
