//! # isomesh_rs
//!
//! Isosurface extraction runtime for dense scalar fields.
//!
//! This crate owns the storage side of the isomesh workspace: a dense
//! [`ScalarField`] with bounds-checked accessors, and an
//! [`IsosurfaceExtractor`] that turns a field snapshot into a triangle soup
//! using the marching cubes scan from `isomesh_core`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use isomesh_rs::{FieldBuilder, FieldConfig, IsosurfaceExtractor, MeshStats};
//! use isomesh_core::Point3;
//!
//! // 2x2x2 world units sampled 8 times per unit
//! let center = Point3::splat(1.0);
//! let field = FieldBuilder::new(FieldConfig::new(8.0, [2.0; 3], 0.0, Point3::ZERO))
//!     .with_fn(move |pos| 0.75 - pos.distance(center))
//!     .build()?;
//!
//! // Every 3 consecutive vertices form one triangle
//! let vertices = IsosurfaceExtractor::new().extract(&field)?;
//! let stats = MeshStats::from_vertices(&vertices)?;
//! println!("{} triangles, area {:.3}", stats.triangle_count, stats.surface_area);
//! ```
//!
//! ## Architecture
//!
//! - **Storage**: one contiguous `Vec<f32>` indexed `x * ny * nz + y * nz + z`
//! - **Extraction**: a single deterministic pass over every cell, `x` outermost
//! - **Output**: unindexed vertex list, handed to mesh adapters or written as OBJ
//!
//! Extraction never returns partial output. Either the whole vertex list is
//! produced or an [`IsoError`] is returned and the caller's state is untouched.
//!
//! ## Feature Flags
//!
//! - `parallel` (default): rayon-backed [`IsosurfaceExtractor::extract_parallel`]
//!
//! ## Concurrency
//!
//! Extraction only reads the field. Callers must not mutate a field while an
//! extraction over it is running; the borrow checker enforces this for
//! `&mut ScalarField` access.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod builder;
mod config;
mod error;
mod extractor;
mod field;
mod mesh;

pub use builder::FieldBuilder;
pub use config::{ExtractorConfig, FieldConfig};
pub use error::{IsoError, Result};
pub use extractor::IsosurfaceExtractor;
pub use field::ScalarField;
pub use mesh::{
    face_normal, triangle_area, triangles_from_vertices, vertices_to_obj, write_obj, MeshBuffers,
    MeshStats,
};

// Re-export isomesh_core types for convenience
pub use isomesh_core::{CrossingMode, GridIndex, Point3, ScalarSource, Triangle};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use isomesh_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::builder::FieldBuilder;
    pub use crate::config::{ExtractorConfig, FieldConfig};
    pub use crate::error::{IsoError, Result};
    pub use crate::extractor::IsosurfaceExtractor;
    pub use crate::field::ScalarField;
    pub use crate::mesh::{MeshBuffers, MeshStats};

    pub use isomesh_core::{CrossingMode, GridIndex, Point3, ScalarSource, Triangle};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_workflow() {
        let mut field = ScalarField::new(1.0, [3.0; 3], 0.5, Point3::ZERO).unwrap();
        field.mark_inside(1, 1, 1).unwrap();

        let vertices = IsosurfaceExtractor::new().extract(&field).unwrap();
        assert_eq!(vertices.len() % 3, 0);
        assert!(!vertices.is_empty());
    }

    #[test]
    fn test_builder_to_obj() {
        let center = Point3::splat(1.0);
        let field = FieldBuilder::new(FieldConfig::new(4.0, [2.0; 3], 0.0, Point3::ZERO))
            .with_fn(move |pos| 0.6 - pos.distance(center))
            .build()
            .unwrap();

        let vertices = IsosurfaceExtractor::new().extract(&field).unwrap();
        let stats = MeshStats::from_vertices(&vertices).unwrap();
        let obj = vertices_to_obj(&vertices).unwrap();

        assert!(stats.triangle_count > 10);
        assert_eq!(
            obj.lines().filter(|l| l.starts_with("f ")).count(),
            stats.triangle_count
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<IsoError>();
    }
}
