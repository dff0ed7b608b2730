//! # isomesh_core
//!
//! Pure marching cubes algorithms for dense scalar fields.
//!
//! This crate classifies grid cells against an isovalue, looks their
//! configuration up in the canonical 256-entry case table and places surface
//! crossings on the cube edges. It owns no storage: any dense grid that
//! implements [`ScalarSource`] can be meshed.
//!
//! ## Features
//!
//! - **no_std compatible**: Works in embedded environments with the `alloc` feature
//! - **Pure algorithms**: No storage implementation, just math
//! - **Marching cubes**: Zero-runtime-cost lookup tables
//! - **Deterministic**: Cells are visited in a fixed order, so output is reproducible
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables standard library support
//! - `alloc`: Enables heap allocation (Vec, etc.) without full std
//!
//! ## Modules
//!
//! - [`types`]: Core data types (Point3, GridIndex, CubeSample)
//! - [`traits`]: Storage abstraction trait (ScalarSource)
//! - [`coords`]: Index flattening and grid/world conversion
//! - [`marching_cubes`]: Lookup tables and the extraction scan
//!
//! ## Usage
//!
//! ```ignore
//! use isomesh_core::prelude::*;
//!
//! let params = MarchParams {
//!     isovalue: 0.5,
//!     resolution: 1.0,
//!     origin: Point3::ZERO,
//!     crossing: CrossingMode::Midpoint,
//! };
//! let sample = CubeSample::new([1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
//! let (triangles, count) = polygonise_cell_no_alloc(&sample, GridIndex::new(0, 0, 0), &params);
//! assert_eq!(count, 1);
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Conditional std/alloc support
#[cfg(feature = "std")]
extern crate std;

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

// Internal alloc prelude for conditional compilation
#[cfg(feature = "std")]
mod alloc_prelude {
    pub use std::vec::Vec;
}

#[cfg(all(feature = "alloc", not(feature = "std")))]
mod alloc_prelude {
    pub use alloc::vec::Vec;
}

pub mod coords;
pub mod marching_cubes;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
///
/// Provides the most commonly used types and functions.
pub mod prelude {
    pub use crate::coords::{
        axis_extent, checked_flat_index, flat_index, grid_point_position, grid_to_world,
        world_to_grid,
    };
    pub use crate::marching_cubes::{
        edge_crossing, interpolate_vertex, march, polygonise_cell_no_alloc, sample_cube,
        CrossingMode, MarchParams, Triangle,
    };
    pub use crate::traits::{corner_from_index, index_from_corner, ScalarSource};
    pub use crate::types::{CubeSample, GridIndex, Point3};

    #[cfg(any(feature = "std", feature = "alloc"))]
    pub use crate::marching_cubes::polygonise_cell;
}

// Re-export everything at crate root for convenience
pub use coords::{
    axis_extent, checked_flat_index, flat_index, grid_point_position, grid_to_world,
    point_count, unflatten_index, world_to_grid,
};
pub use marching_cubes::{march, march_slab, CrossingMode, MarchParams, Triangle};
pub use traits::{corner_from_index, index_from_corner, ScalarSource};
pub use types::{CubeSample, GridIndex, Point3};
