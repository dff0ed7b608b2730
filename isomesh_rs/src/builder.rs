//! FieldBuilder pattern for constructing a ScalarField.
//!
//! Provides a fluent API that records seeding operations and validates them
//! all at once when the field is built.

use isomesh_core::{GridIndex, Point3};

use crate::config::FieldConfig;
use crate::error::Result;
use crate::field::ScalarField;

type ValueFn = Box<dyn Fn(Point3) -> f32>;

enum Seed {
    Fill(f32),
    Function(ValueFn),
    Set(GridIndex, f32),
    Inside(GridIndex),
    Outside(GridIndex),
}

/// Builder for constructing `ScalarField` instances.
///
/// Operations are applied in the order they were added, on top of a field
/// initialized to the outside value.
///
/// # Example
///
/// ```ignore
/// use isomesh_rs::{FieldBuilder, FieldConfig};
///
/// let field = FieldBuilder::new(FieldConfig::new(4.0, [2.0; 3], 0.0, Point3::ZERO))
///     .with_fn(|p| 0.8 - p.distance(Point3::splat(1.0)))
///     .mark_inside(0, 0, 0)
///     .build()?;
/// ```
pub struct FieldBuilder {
    config: FieldConfig,
    seeds: Vec<Seed>,
}

impl FieldBuilder {
    /// Create a new builder for the given field parameters.
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            seeds: Vec::new(),
        }
    }

    /// Set every sample to a constant value.
    pub fn fill(mut self, value: f32) -> Self {
        self.seeds.push(Seed::Fill(value));
        self
    }

    /// Set every sample from a function of its world-space position.
    ///
    /// # Example
    ///
    /// ```ignore
    /// // Signed sphere: positive inside, zero on the surface
    /// let center = Point3::splat(1.0);
    /// let builder = builder.with_fn(move |pos| 0.5 - pos.distance(center));
    /// ```
    pub fn with_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(Point3) -> f32 + 'static,
    {
        self.seeds.push(Seed::Function(Box::new(f)));
        self
    }

    /// Write a single sample.
    pub fn set(mut self, x: usize, y: usize, z: usize, value: f32) -> Self {
        self.seeds.push(Seed::Set(GridIndex::new(x, y, z), value));
        self
    }

    /// Mark a grid point as inside the surface.
    pub fn mark_inside(mut self, x: usize, y: usize, z: usize) -> Self {
        self.seeds.push(Seed::Inside(GridIndex::new(x, y, z)));
        self
    }

    /// Mark a grid point as outside the surface.
    pub fn mark_outside(mut self, x: usize, y: usize, z: usize) -> Self {
        self.seeds.push(Seed::Outside(GridIndex::new(x, y, z)));
        self
    }

    /// Get the number of seeding operations added so far.
    pub fn num_seeds(&self) -> usize {
        self.seeds.len()
    }

    /// Get the configuration the field will be built with.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Build the final field.
    ///
    /// # Errors
    /// - `InvalidParameter` if the configuration is rejected
    /// - `IndexOutOfRange` if any recorded index falls outside the extents
    pub fn build(self) -> Result<ScalarField> {
        let mut field = ScalarField::initialize(self.config)?;
        for seed in self.seeds {
            match seed {
                Seed::Fill(value) => field.fill(value),
                Seed::Function(f) => field.fill_with(f),
                Seed::Set(i, value) => field.set(i.x, i.y, i.z, value)?,
                Seed::Inside(i) => field.mark_inside(i.x, i.y, i.z)?,
                Seed::Outside(i) => field.mark_outside(i.x, i.y, i.z)?,
            }
        }
        Ok(field)
    }
}
