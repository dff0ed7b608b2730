//! Marching Cubes mesh extraction.
//!
//! This module provides the marching cubes algorithm for extracting triangle
//! soups from dense scalar fields. It includes:
//!
//! - Compile-time lookup tables for cube configurations
//! - Edge crossing placement (fixed midpoint or linear by value)
//! - Functions for processing individual cells
//! - A deterministic full-grid scan over any [`ScalarSource`](crate::traits::ScalarSource)
//!
//! # Example
//!
//! ```ignore
//! use isomesh_core::marching_cubes::{march, CrossingMode};
//!
//! let mut vertices = Vec::new();
//! march(&field, CrossingMode::Midpoint, |tri| vertices.extend_from_slice(&tri))
//!     .expect("every grid point is sampled");
//! assert_eq!(vertices.len() % 3, 0);
//! ```

mod algorithm;
mod tables;

pub use algorithm::{
    edge_crossing, edge_flags, edge_midpoint, interpolate_vertex, march, march_slab,
    polygonise_cell_no_alloc, polygonise_cell_with, sample_cube, triangle_count, CrossingMode,
    MarchParams, Triangle,
};
pub use tables::{
    CORNER_OFFSETS, EDGE_TABLE, EDGE_VERTICES, MAX_TRIANGLES_PER_CELL, TRI_SENTINEL, TRI_TABLE,
};

#[cfg(any(feature = "std", feature = "alloc"))]
pub use algorithm::polygonise_cell;
