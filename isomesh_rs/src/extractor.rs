//! Isosurface extraction using marching cubes.
//!
//! Wraps isomesh_core's cell scan with vertex-list assembly, the
//! post-extraction invariant check and optional parallel processing.

use isomesh_core::{march, CrossingMode, GridIndex, Point3, ScalarSource, Triangle};

use crate::config::ExtractorConfig;
use crate::error::{IsoError, Result};

/// Converts a scalar field snapshot into a triangle-soup vertex list.
///
/// The extractor borrows the field read-only for the duration of each call and
/// keeps no state between calls. Every three consecutive output vertices form
/// one triangle, emitted in cell order (`x` outermost, `z` innermost).
///
/// # Example
///
/// ```ignore
/// use isomesh_rs::{IsosurfaceExtractor, ScalarField};
///
/// let mut field = ScalarField::new(1.0, [2.0; 3], 0.5, Point3::ZERO)?;
/// field.mark_inside(0, 0, 0)?;
///
/// let vertices = IsosurfaceExtractor::new().extract(&field)?;
/// assert_eq!(vertices.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsosurfaceExtractor {
    config: ExtractorConfig,
}

impl IsosurfaceExtractor {
    /// Create an extractor with fixed-midpoint edge crossings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with the given configuration.
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Create an extractor with the given edge crossing mode.
    pub fn with_crossing(crossing: CrossingMode) -> Self {
        Self::with_config(ExtractorConfig::new(crossing))
    }

    /// Get the extractor configuration.
    #[inline]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract the isosurface of `source` as a flat vertex list.
    ///
    /// # Errors
    /// Returns `InvalidState` if `source` has no sample for a grid point
    /// inside its extents, or if the vertex count is not a multiple of 3. No
    /// partial output is returned.
    pub fn extract<S>(&self, source: &S) -> Result<Vec<Point3>>
    where
        S: ScalarSource + ?Sized,
    {
        let mut vertices = Vec::new();
        let triangles = march(source, self.config.crossing, |tri| {
            vertices.extend_from_slice(&tri)
        })
        .map_err(unsampled_cell)?;
        check_vertex_count(vertices.len())?;

        log::debug!(
            "extracted {} triangles from {} cells",
            triangles,
            source.cell_count()
        );
        Ok(vertices)
    }

    /// Extract into `out`, replacing its contents.
    ///
    /// `out` is only touched once a complete, valid vertex list exists; on
    /// error it keeps whatever it held before the call.
    pub fn extract_into<S>(&self, source: &S, out: &mut Vec<Point3>) -> Result<()>
    where
        S: ScalarSource + ?Sized,
    {
        let vertices = self.extract(source)?;
        *out = vertices;
        Ok(())
    }

    /// Extract without building a vertex list.
    ///
    /// Each triangle is passed to `callback` as it is produced, in the same
    /// order `extract` would emit it. Returns the number of triangles.
    ///
    /// # Errors
    /// Returns `InvalidState` if `source` has no sample for a grid point
    /// inside its extents. Triangles of the cells before it have already been
    /// passed to `callback`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut area = 0.0;
    /// extractor.extract_with(&field, |[a, b, c]| {
    ///     area += (b - a).cross(c - a).length() * 0.5;
    /// })?;
    /// ```
    pub fn extract_with<S, F>(&self, source: &S, callback: F) -> Result<usize>
    where
        S: ScalarSource + ?Sized,
        F: FnMut(Triangle),
    {
        march(source, self.config.crossing, callback).map_err(unsampled_cell)
    }

    /// Extract using the rayon thread pool.
    ///
    /// Each `x` slab of cells is meshed independently and the per-slab vertex
    /// lists are concatenated in slab order, so the result is identical to
    /// [`IsosurfaceExtractor::extract`].
    #[cfg(feature = "parallel")]
    pub fn extract_parallel<S>(&self, source: &S) -> Result<Vec<Point3>>
    where
        S: ScalarSource + Sync + ?Sized,
    {
        use isomesh_core::{march_slab, MarchParams};
        use rayon::prelude::*;

        let params = MarchParams::from_source(source, self.config.crossing);
        let [slabs, _, _] = source.cell_extents();

        let chunks: Vec<Vec<Point3>> = (0..slabs)
            .into_par_iter()
            .map(|slab| -> std::result::Result<Vec<Point3>, GridIndex> {
                let mut chunk = Vec::new();
                march_slab(source, slab, &params, |tri| chunk.extend_from_slice(&tri))?;
                Ok(chunk)
            })
            .collect::<std::result::Result<_, _>>()
            .map_err(unsampled_cell)?;

        let total = chunks.iter().map(Vec::len).sum();
        let mut vertices = Vec::with_capacity(total);
        for (slab, chunk) in chunks.into_iter().enumerate() {
            log::trace!("merging slab {} ({} vertices)", slab, chunk.len());
            vertices.extend(chunk);
        }
        check_vertex_count(vertices.len())?;

        log::debug!(
            "extracted {} triangles from {} cells across {} slabs",
            vertices.len() / 3,
            source.cell_count(),
            slabs
        );
        Ok(vertices)
    }
}

/// Error for a cell whose corners the source could not sample.
fn unsampled_cell(cell: GridIndex) -> IsoError {
    let message = format!("source has no sample for a corner of cell {:?}", cell);
    log::warn!("{}", message);
    IsoError::InvalidState { message }
}

/// Reject a vertex list that cannot be read as whole triangles.
pub(crate) fn check_vertex_count(count: usize) -> Result<()> {
    if count % 3 != 0 {
        let message = format!("vertex count {} is not a multiple of 3", count);
        log::warn!("{}", message);
        return Err(IsoError::InvalidState { message });
    }
    Ok(())
}
