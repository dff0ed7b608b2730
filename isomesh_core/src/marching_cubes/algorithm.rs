//! Marching Cubes mesh extraction algorithm.
//!
//! Provides functions to classify cells, place edge crossings and emit
//! triangles for a whole [`ScalarSource`].

use crate::coords::grid_to_world;
use crate::traits::ScalarSource;
use crate::types::{CubeSample, GridIndex, Point3};

use super::tables::{
    CORNER_OFFSETS, EDGE_TABLE, EDGE_VERTICES, MAX_TRIANGLES_PER_CELL, TRI_SENTINEL, TRI_TABLE,
};

/// A triangle represented by three world-space vertices.
pub type Triangle = [Point3; 3];

/// How the surface crossing point is placed along a crossed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossingMode {
    /// Always the midpoint of the edge, regardless of corner values.
    #[default]
    Midpoint,
    /// Linear interpolation by where the isovalue falls between the two
    /// corner values.
    Linear,
}

/// Parameters shared by every cell of one extraction pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchParams {
    /// Inside/outside threshold.
    pub isovalue: f32,
    /// Samples per world unit.
    pub resolution: f32,
    /// World-space position of grid point `(0, 0, 0)`.
    pub origin: Point3,
    /// Edge crossing placement.
    pub crossing: CrossingMode,
}

impl MarchParams {
    /// Read the placement parameters from a source.
    #[inline]
    pub fn from_source<S: ScalarSource + ?Sized>(source: &S, crossing: CrossingMode) -> Self {
        Self {
            isovalue: source.isovalue(),
            resolution: source.resolution(),
            origin: source.origin(),
            crossing,
        }
    }
}

/// Interpolate vertex position along an edge where the field crosses the iso-value.
///
/// Uses linear interpolation to find the crossing point.
///
/// # Arguments
/// * `p0` - Position of the first corner
/// * `p1` - Position of the second corner
/// * `v0` - Scalar value at the first corner
/// * `v1` - Scalar value at the second corner
/// * `iso_value` - The iso-surface value
///
/// # Returns
/// The interpolated position where the surface crosses the edge.
#[inline]
pub fn interpolate_vertex(p0: Point3, p1: Point3, v0: f32, v1: f32, iso_value: f32) -> Point3 {
    // Equal corner values give no direction to interpolate in.
    let denom = v1 - v0;
    if libm::fabsf(denom) < 1e-10 {
        return p0.lerp(p1, 0.5);
    }

    let t = (iso_value - v0) / denom;

    // Clamp to [0, 1] to handle numerical errors
    let t = t.clamp(0.0, 1.0);

    p0.lerp(p1, t)
}

/// Position of an edge's midpoint in grid units.
///
/// # Arguments
/// * `cell` - Minimum corner of the cell
/// * `edge` - Edge index (0-11)
#[inline]
pub fn edge_midpoint(cell: GridIndex, edge: usize) -> Point3 {
    let (c0, c1) = EDGE_VERTICES[edge];
    let a = cell.offset(CORNER_OFFSETS[c0]).to_point();
    let b = cell.offset(CORNER_OFFSETS[c1]).to_point();
    a.lerp(b, 0.5)
}

/// Position where the surface crosses an edge, in grid units.
#[inline]
pub fn edge_crossing(
    cell: GridIndex,
    edge: usize,
    sample: &CubeSample,
    isovalue: f32,
    crossing: CrossingMode,
) -> Point3 {
    match crossing {
        CrossingMode::Midpoint => edge_midpoint(cell, edge),
        CrossingMode::Linear => {
            let (c0, c1) = EDGE_VERTICES[edge];
            interpolate_vertex(
                cell.offset(CORNER_OFFSETS[c0]).to_point(),
                cell.offset(CORNER_OFFSETS[c1]).to_point(),
                sample.values[c0],
                sample.values[c1],
                isovalue,
            )
        }
    }
}

/// Bitmask of edges crossed by the surface for a configuration code.
#[inline]
pub fn edge_flags(code: u8) -> u16 {
    EDGE_TABLE[code as usize]
}

/// Number of triangles the table emits for a configuration code.
#[inline]
pub fn triangle_count(code: u8) -> usize {
    TRI_TABLE[code as usize]
        .iter()
        .take_while(|&&e| e != TRI_SENTINEL)
        .count()
        / 3
}

/// Read the eight corner values of the cell anchored at `cell`.
///
/// Returns `None` if any corner lies outside the source's extents.
#[inline]
pub fn sample_cube<S: ScalarSource + ?Sized>(source: &S, cell: GridIndex) -> Option<CubeSample> {
    let mut values = [0.0f32; 8];
    for (value, &corner) in values.iter_mut().zip(CORNER_OFFSETS.iter()) {
        *value = source.value_at(cell.offset(corner))?;
    }
    Some(CubeSample::new(values))
}

/// Compute the 12 edge crossings of a cell in world space.
///
/// Only edges flagged in `flags` are computed; the rest stay at the origin.
#[inline]
fn edge_positions(
    sample: &CubeSample,
    cell: GridIndex,
    flags: u16,
    params: &MarchParams,
) -> [Point3; 12] {
    let mut positions = [Point3::ZERO; 12];
    for (edge, position) in positions.iter_mut().enumerate() {
        if flags & (1 << edge) != 0 {
            let grid = edge_crossing(cell, edge, sample, params.isovalue, params.crossing);
            *position = grid_to_world(grid, params.resolution, params.origin);
        }
    }
    positions
}

/// Emit the triangles of one classified cell through `emit`.
///
/// Returns the number of triangles emitted.
#[inline]
pub fn polygonise_cell_with<F>(
    sample: &CubeSample,
    cell: GridIndex,
    params: &MarchParams,
    mut emit: F,
) -> usize
where
    F: FnMut(Triangle),
{
    let code = sample.configuration(params.isovalue);
    let flags = edge_flags(code);
    if flags == 0 {
        return 0;
    }

    let positions = edge_positions(sample, cell, flags, params);

    let mut count = 0;
    for tri in TRI_TABLE[code as usize].chunks_exact(3) {
        if tri[0] == TRI_SENTINEL {
            break;
        }
        emit([
            positions[tri[0] as usize],
            positions[tri[1] as usize],
            positions[tri[2] as usize],
        ]);
        count += 1;
    }
    count
}

/// Process a single cell without dynamic allocation.
///
/// Returns a fixed-size array that can hold up to 5 triangles (the maximum
/// for any marching cubes configuration) and the number of valid entries.
pub fn polygonise_cell_no_alloc(
    sample: &CubeSample,
    cell: GridIndex,
    params: &MarchParams,
) -> ([Triangle; MAX_TRIANGLES_PER_CELL], usize) {
    let mut triangles = [[Point3::ZERO; 3]; MAX_TRIANGLES_PER_CELL];
    let mut count = 0;
    polygonise_cell_with(sample, cell, params, |tri| {
        triangles[count] = tri;
        count += 1;
    });
    (triangles, count)
}

/// Process a single cell, returning its triangles in table order.
#[cfg(any(feature = "std", feature = "alloc"))]
pub fn polygonise_cell(
    sample: &CubeSample,
    cell: GridIndex,
    params: &MarchParams,
) -> crate::alloc_prelude::Vec<Triangle> {
    let mut triangles = crate::alloc_prelude::Vec::new();
    polygonise_cell_with(sample, cell, params, |tri| triangles.push(tri));
    triangles
}

/// March every cell in the `x = slab` plane of cells.
///
/// Cells are visited in `y`-then-`z` order. Returns the number of triangles
/// emitted. A slab outside the cell extents emits nothing.
///
/// # Errors
/// Stops at the first cell with a corner the source cannot sample and returns
/// that cell. Triangles of earlier cells have already been emitted.
pub fn march_slab<S, F>(
    source: &S,
    slab: usize,
    params: &MarchParams,
    mut emit: F,
) -> Result<usize, GridIndex>
where
    S: ScalarSource + ?Sized,
    F: FnMut(Triangle),
{
    let [cx, cy, cz] = source.cell_extents();
    if slab >= cx {
        return Ok(0);
    }

    let mut count = 0;
    for y in 0..cy {
        for z in 0..cz {
            let cell = GridIndex::new(slab, y, z);
            let sample = sample_cube(source, cell).ok_or(cell)?;
            count += polygonise_cell_with(&sample, cell, params, &mut emit);
        }
    }
    Ok(count)
}

/// March every cell of `source`, emitting triangles in cell order.
///
/// Cells anchored at `(x, y, z)` with `x < extent_x - 1` (and likewise for
/// `y`, `z`) are visited with `x` outermost and `z` innermost, so the output
/// is fully deterministic. Returns the number of triangles emitted.
///
/// # Errors
/// Returns the first cell whose corners `source` reports as unsampled, see
/// [`march_slab`].
pub fn march<S, F>(source: &S, crossing: CrossingMode, mut emit: F) -> Result<usize, GridIndex>
where
    S: ScalarSource + ?Sized,
    F: FnMut(Triangle),
{
    let params = MarchParams::from_source(source, crossing);
    let [cx, _, _] = source.cell_extents();
    let mut count = 0;
    for slab in 0..cx {
        count += march_slab(source, slab, &params, &mut emit)?;
    }
    Ok(count)
}
