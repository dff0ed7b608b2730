//! ScalarField implementation.
//!
//! A dense 3D grid of scalar samples stored in one contiguous buffer, with
//! bounds-checked accessors at the public boundary.

use isomesh_core::{
    checked_flat_index, grid_point_position, unflatten_index, GridIndex, Point3,
    ScalarSource,
};

use crate::config::{sample_count, FieldConfig};
use crate::error::{IsoError, Result};

/// Dense scalar field sampled on a regular grid.
///
/// Values are indexed `[x][y][z]` with extents `ceil(dimension * resolution)`
/// along each axis, flattened as `x * ny * nz + y * nz + z`.
///
/// # Example
///
/// ```ignore
/// use isomesh_rs::{FieldConfig, ScalarField};
///
/// let mut field = ScalarField::initialize(FieldConfig::new(1.0, [3.0; 3], 0.5, Point3::ZERO))?;
/// field.mark_inside(1, 1, 1)?;
/// assert!(field.get(1, 1, 1)? > field.isovalue());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    config: FieldConfig,
    extents: [usize; 3],
    values: Vec<f32>,
}

impl ScalarField {
    /// Allocate a field with every sample set to the outside value.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if the configuration is rejected by
    /// [`FieldConfig::extents`].
    pub fn initialize(config: FieldConfig) -> Result<Self> {
        let extents = config.extents()?;
        let values = vec![config.outside_value(); sample_count(extents)?];

        log::debug!(
            "initialized scalar field: extents {:?}, resolution {}, isovalue {}",
            extents,
            config.resolution,
            config.isovalue
        );

        Ok(Self {
            config,
            extents,
            values,
        })
    }

    /// Allocate a field from its four construction parameters.
    pub fn new(resolution: f32, dimensions: [f32; 3], isovalue: f32, origin: Point3) -> Result<Self> {
        Self::initialize(FieldConfig::new(resolution, dimensions, isovalue, origin))
    }

    /// Build a field around an existing value buffer.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if the configuration is invalid or
    /// `values.len()` does not match the extents.
    pub fn from_values(config: FieldConfig, values: Vec<f32>) -> Result<Self> {
        let extents = config.extents()?;
        let expected = sample_count(extents)?;
        if values.len() != expected {
            return Err(IsoError::invalid_parameter(
                "values",
                format!(
                    "expected {} samples for extents {:?}, got {}",
                    expected,
                    extents,
                    values.len()
                ),
            ));
        }
        Ok(Self {
            config,
            extents,
            values,
        })
    }

    /// Discard all samples and rebuild the field for a new configuration.
    ///
    /// On error the field is left unchanged.
    pub fn reinitialize(&mut self, config: FieldConfig) -> Result<()> {
        *self = Self::initialize(config)?;
        Ok(())
    }

    /// Get the field configuration.
    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Number of grid points along each axis.
    #[inline]
    pub fn extents(&self) -> [usize; 3] {
        self.extents
    }

    /// Total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the field holds no samples. Never true for a valid field.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Samples per world unit.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.config.resolution
    }

    /// Surface threshold.
    #[inline]
    pub fn isovalue(&self) -> f32 {
        self.config.isovalue
    }

    /// World-space offset of grid point `(0, 0, 0)`.
    #[inline]
    pub fn origin(&self) -> Point3 {
        self.config.origin
    }

    /// Value this field was filled with on initialization.
    #[inline]
    pub fn outside_value(&self) -> f32 {
        self.config.outside_value()
    }

    /// Value used by [`ScalarField::mark_inside`].
    #[inline]
    pub fn inside_value(&self) -> f32 {
        self.config.inside_value()
    }

    /// Read-only view of the flat sample buffer.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    fn offset(&self, x: usize, y: usize, z: usize) -> Result<usize> {
        checked_flat_index(GridIndex::new(x, y, z), self.extents).ok_or(IsoError::IndexOutOfRange {
            x,
            y,
            z,
            extents: self.extents,
        })
    }

    /// Read the sample at a grid index.
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` if any coordinate is outside `[0, extent)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Result<f32> {
        let offset = self.offset(x, y, z)?;
        Ok(self.values[offset])
    }

    /// Write the sample at a grid index.
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` if any coordinate is outside `[0, extent)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: f32) -> Result<()> {
        let offset = self.offset(x, y, z)?;
        self.values[offset] = value;
        Ok(())
    }

    /// Set a grid point to the inside value.
    pub fn mark_inside(&mut self, x: usize, y: usize, z: usize) -> Result<()> {
        let value = self.inside_value();
        self.set(x, y, z, value)
    }

    /// Set a grid point back to the outside value.
    pub fn mark_outside(&mut self, x: usize, y: usize, z: usize) -> Result<()> {
        let value = self.outside_value();
        self.set(x, y, z, value)
    }

    /// Overwrite every sample with `value`.
    pub fn fill(&mut self, value: f32) {
        self.values.fill(value);
    }

    /// Overwrite every sample with a function of its world-space position.
    pub fn fill_with<F>(&mut self, mut f: F)
    where
        F: FnMut(Point3) -> f32,
    {
        let extents = self.extents;
        let resolution = self.config.resolution;
        let origin = self.config.origin;
        for (offset, value) in self.values.iter_mut().enumerate() {
            let index = unflatten_index(offset, extents);
            *value = f(grid_point_position(index, resolution, origin));
        }
    }

    /// World-space position of a grid point.
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` if any coordinate is outside `[0, extent)`.
    pub fn world_position(&self, x: usize, y: usize, z: usize) -> Result<Point3> {
        self.offset(x, y, z)?;
        Ok(grid_point_position(
            GridIndex::new(x, y, z),
            self.config.resolution,
            self.config.origin,
        ))
    }

    /// World-space corners of the sampled region.
    pub fn world_bounds(&self) -> (Point3, Point3) {
        let [nx, ny, nz] = self.extents;
        let far = GridIndex::new(nx - 1, ny - 1, nz - 1);
        (
            self.config.origin,
            grid_point_position(far, self.config.resolution, self.config.origin),
        )
    }

    /// Number of samples strictly above the isovalue.
    pub fn count_inside(&self) -> usize {
        let iso = self.config.isovalue;
        self.values.iter().filter(|&&v| v > iso).count()
    }
}

// -----------------------------------------------------------------------------
// ScalarSource Implementation
// -----------------------------------------------------------------------------

impl ScalarSource for ScalarField {
    #[inline]
    fn extents(&self) -> [usize; 3] {
        self.extents
    }

    #[inline]
    fn value_at(&self, index: GridIndex) -> Option<f32> {
        checked_flat_index(index, self.extents).map(|offset| self.values[offset])
    }

    #[inline]
    fn isovalue(&self) -> f32 {
        self.config.isovalue
    }

    #[inline]
    fn resolution(&self) -> f32 {
        self.config.resolution
    }

    #[inline]
    fn origin(&self) -> Point3 {
        self.config.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_config(side: f32) -> FieldConfig {
        FieldConfig::new(1.0, [side; 3], 0.5, Point3::ZERO)
    }

    #[test]
    fn test_initialize_fills_outside() {
        let field = ScalarField::initialize(cube_config(3.0)).unwrap();
        assert_eq!(field.extents(), [3, 3, 3]);
        assert_eq!(field.len(), 27);
        assert!(field.values().iter().all(|&v| v < field.isovalue()));
        assert_eq!(field.count_inside(), 0);
    }

    #[test]
    fn test_initialize_rejects_bad_parameters() {
        assert!(matches!(
            ScalarField::new(0.0, [1.0; 3], 0.5, Point3::ZERO),
            Err(IsoError::InvalidParameter { .. })
        ));
        assert!(matches!(
            ScalarField::new(1.0, [1.0, 0.0, 1.0], 0.5, Point3::ZERO),
            Err(IsoError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut field = ScalarField::initialize(cube_config(3.0)).unwrap();
        field.set(2, 1, 0, 7.5).unwrap();
        assert_eq!(field.get(2, 1, 0).unwrap(), 7.5);

        // Flat layout: x * ny * nz + y * nz + z
        assert_eq!(field.values()[2 * 9 + 3], 7.5);
    }

    #[test]
    fn test_out_of_range_access() {
        let mut field = ScalarField::initialize(cube_config(2.0)).unwrap();

        let err = field.get(2, 0, 0).unwrap_err();
        assert_eq!(
            err,
            IsoError::IndexOutOfRange {
                x: 2,
                y: 0,
                z: 0,
                extents: [2, 2, 2]
            }
        );
        assert!(field.set(0, 5, 0, 1.0).is_err());
        assert!(field.set(0, 0, usize::MAX, 1.0).is_err());

        // Failed writes leave the field untouched.
        assert_eq!(field.count_inside(), 0);
    }

    #[test]
    fn test_mark_inside_and_outside() {
        let mut field = ScalarField::initialize(cube_config(3.0)).unwrap();
        field.mark_inside(1, 1, 1).unwrap();
        assert!(field.get(1, 1, 1).unwrap() > field.isovalue());
        assert_eq!(field.count_inside(), 1);

        field.mark_outside(1, 1, 1).unwrap();
        assert_eq!(field.count_inside(), 0);
    }

    #[test]
    fn test_reinitialize_rebuilds() {
        let mut field = ScalarField::initialize(cube_config(2.0)).unwrap();
        field.mark_inside(0, 0, 0).unwrap();

        field
            .reinitialize(cube_config(2.0).with_resolution(2.0))
            .unwrap();
        assert_eq!(field.extents(), [4, 4, 4]);
        assert_eq!(field.count_inside(), 0);

        let before = field.clone();
        assert!(field.reinitialize(cube_config(2.0).with_resolution(-1.0)).is_err());
        assert_eq!(field, before);
    }

    #[test]
    fn test_from_values_checks_length() {
        let config = cube_config(2.0);
        assert!(ScalarField::from_values(config, vec![0.0; 8]).is_ok());
        assert!(matches!(
            ScalarField::from_values(config, vec![0.0; 7]),
            Err(IsoError::InvalidParameter { name: "values", .. })
        ));
    }

    #[test]
    fn test_fill_with_world_positions() {
        let config = FieldConfig::new(2.0, [1.0; 3], 0.0, Point3::new(1.0, 0.0, 0.0));
        let mut field = ScalarField::initialize(config).unwrap();
        field.fill_with(|p| p.x);

        assert_eq!(field.get(0, 0, 0).unwrap(), 1.0);
        assert_eq!(field.get(1, 1, 1).unwrap(), 1.5);
        assert_eq!(field.world_position(1, 0, 1).unwrap(), Point3::new(1.5, 0.0, 0.5));
    }

    #[test]
    fn test_world_bounds() {
        let config = FieldConfig::new(2.0, [1.0, 2.0, 1.5], 0.5, Point3::new(-1.0, 0.0, 0.0));
        let field = ScalarField::initialize(config).unwrap();
        assert_eq!(field.extents(), [2, 4, 3]);
        let (min, max) = field.world_bounds();
        assert_eq!(min, Point3::new(-1.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(-0.5, 1.5, 1.0));
    }

    #[test]
    fn test_scalar_source_view() {
        let mut field = ScalarField::initialize(cube_config(2.0)).unwrap();
        field.set(1, 0, 1, 3.0).unwrap();
        assert_eq!(field.value_at(GridIndex::new(1, 0, 1)), Some(3.0));
        assert_eq!(field.value_at(GridIndex::new(2, 0, 1)), None);
        assert_eq!(field.cell_count(), 1);
    }
}
