//! Field and extractor configuration types.

use isomesh_core::{axis_extent, point_count, CrossingMode, Point3};

use crate::error::{IsoError, Result};

/// Scalar field configuration parameters (immutable once a field is built).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    /// Samples per world unit. Must be positive.
    pub resolution: f32,
    /// World-space size (width, height, depth). Each must be positive.
    pub dimensions: [f32; 3],
    /// Inside/outside threshold.
    pub isovalue: f32,
    /// World-space position of grid point `(0, 0, 0)`.
    pub origin: Point3,
}

impl FieldConfig {
    /// Create a new field configuration.
    ///
    /// # Arguments
    /// * `resolution` - Samples per world unit
    /// * `dimensions` - World-space width, height and depth
    /// * `isovalue` - Surface threshold
    /// * `origin` - World-space offset of the grid
    #[inline]
    pub const fn new(resolution: f32, dimensions: [f32; 3], isovalue: f32, origin: Point3) -> Self {
        Self {
            resolution,
            dimensions,
            isovalue,
            origin,
        }
    }

    /// Replace the resolution.
    #[inline]
    pub fn with_resolution(mut self, resolution: f32) -> Self {
        self.resolution = resolution;
        self
    }

    /// Replace the world-space dimensions.
    #[inline]
    pub fn with_dimensions(mut self, dimensions: [f32; 3]) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Replace the isovalue.
    #[inline]
    pub fn with_isovalue(mut self, isovalue: f32) -> Self {
        self.isovalue = isovalue;
        self
    }

    /// Replace the origin.
    #[inline]
    pub fn with_origin(mut self, origin: Point3) -> Self {
        self.origin = origin;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.extents().map(|_| ())
    }

    /// Grid extents: `ceil(dimension * resolution)` points per axis.
    ///
    /// # Errors
    /// Returns `InvalidParameter` for a non-positive or non-finite resolution,
    /// dimension, isovalue or origin, when an axis resolves to no samples, or
    /// when the total number of samples does not fit in a `usize`.
    pub fn extents(&self) -> Result<[usize; 3]> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(IsoError::invalid_parameter(
                "resolution",
                format!("must be positive and finite, got {}", self.resolution),
            ));
        }
        if !self.isovalue.is_finite() {
            return Err(IsoError::invalid_parameter(
                "isovalue",
                format!("must be finite, got {}", self.isovalue),
            ));
        }
        if !self.origin.is_finite() {
            return Err(IsoError::invalid_parameter(
                "origin",
                format!("must be finite, got {:?}", self.origin),
            ));
        }

        let mut extents = [0usize; 3];
        let axes = self.dimensions.iter().zip(extents.iter_mut()).enumerate();
        for (axis, (&dimension, extent)) in axes {
            if !(dimension.is_finite() && dimension > 0.0) {
                return Err(IsoError::invalid_parameter(
                    "dimensions",
                    format!("axis {} must be positive and finite, got {}", axis, dimension),
                ));
            }
            *extent = axis_extent(dimension, self.resolution).ok_or_else(|| {
                IsoError::invalid_parameter(
                    "dimensions",
                    format!(
                        "axis {} resolves to no samples ({} * {})",
                        axis, dimension, self.resolution
                    ),
                )
            })?;
        }
        sample_count(extents)?;
        Ok(extents)
    }

    /// Margin used to derive the inside and outside values from the isovalue.
    #[inline]
    fn margin(&self) -> f32 {
        1.0f32.max(self.isovalue.abs())
    }

    /// Value strictly below the isovalue used to fill a fresh field.
    #[inline]
    pub fn outside_value(&self) -> f32 {
        self.isovalue - self.margin()
    }

    /// Value strictly above the isovalue used to seed the surface.
    #[inline]
    pub fn inside_value(&self) -> f32 {
        self.isovalue + self.margin()
    }
}

/// Number of samples in a grid with the given extents.
///
/// Rejects grids whose `f32` buffer could not be allocated at all.
pub(crate) fn sample_count(extents: [usize; 3]) -> Result<usize> {
    point_count(extents)
        .filter(|&count| count <= isize::MAX as usize / core::mem::size_of::<f32>())
        .ok_or_else(|| {
            IsoError::invalid_parameter(
                "dimensions",
                format!("extents {:?} hold too many samples", extents),
            )
        })
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            dimensions: [1.0, 1.0, 1.0],
            isovalue: 0.5,
            origin: Point3::ZERO,
        }
    }
}

/// Extractor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractorConfig {
    /// Edge crossing placement. Defaults to the fixed midpoint.
    pub crossing: CrossingMode,
}

impl ExtractorConfig {
    /// Create an extractor configuration with the given crossing mode.
    #[inline]
    pub const fn new(crossing: CrossingMode) -> Self {
        Self { crossing }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_config_extents() {
        let config = FieldConfig::new(1.0, [3.0, 3.0, 3.0], 0.5, Point3::ZERO);
        assert_eq!(config.extents().unwrap(), [3, 3, 3]);

        let config = config.with_resolution(2.5);
        assert_eq!(config.extents().unwrap(), [8, 8, 8]);

        let config = FieldConfig::default().with_dimensions([1.0, 0.5, 2.2]);
        assert_eq!(config.extents().unwrap(), [1, 1, 3]);
    }

    #[test]
    fn test_field_config_default() {
        let config = FieldConfig::default();
        assert_eq!(config.resolution, 1.0);
        assert_eq!(config.isovalue, 0.5);
        assert_eq!(config.origin, Point3::ZERO);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let valid = FieldConfig::default();

        let bad_resolution = valid.with_resolution(0.0);
        assert!(matches!(
            bad_resolution.validate(),
            Err(IsoError::InvalidParameter { name: "resolution", .. })
        ));
        assert!(valid.with_resolution(-1.0).validate().is_err());
        assert!(valid.with_resolution(f32::NAN).validate().is_err());

        let bad_dimension = valid.with_dimensions([1.0, 0.0, 1.0]);
        assert!(matches!(
            bad_dimension.validate(),
            Err(IsoError::InvalidParameter { name: "dimensions", .. })
        ));
        assert!(valid.with_dimensions([1.0, 1.0, -2.0]).validate().is_err());

        assert!(valid.with_isovalue(f32::INFINITY).validate().is_err());
        assert!(valid
            .with_origin(Point3::new(0.0, f32::NAN, 0.0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let huge = FieldConfig::new(1.0, [1.0e7; 3], 0.5, Point3::ZERO);
        assert!(matches!(
            huge.extents(),
            Err(IsoError::InvalidParameter { name: "dimensions", .. })
        ));
        assert!(sample_count([1 << 21, 1 << 21, 1 << 21]).is_err());
        assert_eq!(sample_count([3, 4, 5]).unwrap(), 60);
    }

    #[test]
    fn test_sentinels_straddle_isovalue() {
        for iso in [0.0, 0.5, -3.0, 1e9, -1e9] {
            let config = FieldConfig::default().with_isovalue(iso);
            assert!(config.outside_value() < iso, "outside for {}", iso);
            assert!(config.inside_value() > iso, "inside for {}", iso);
        }
    }

    #[test]
    fn test_extractor_config_default() {
        assert_eq!(ExtractorConfig::default().crossing, CrossingMode::Midpoint);
        assert_eq!(
            ExtractorConfig::new(CrossingMode::Linear).crossing,
            CrossingMode::Linear
        );
    }
}
