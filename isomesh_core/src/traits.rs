//! Traits for storage abstraction in isomesh_core.
//!
//! The marching cubes scan only needs read access to a dense grid of scalars
//! plus the parameters that place that grid in world space. Downstream crates
//! (isomesh_rs) implement [`ScalarSource`] for their own storage.

use crate::types::{GridIndex, Point3};

/// Read-only view of a dense 3D scalar field.
///
/// Grid points are addressed by [`GridIndex`] with `0 <= index < extent` on
/// each axis. World position of a grid point is `origin + index / resolution`.
pub trait ScalarSource {
    /// Number of grid points along each axis.
    fn extents(&self) -> [usize; 3];

    /// Scalar value at a grid point.
    ///
    /// # Returns
    /// * `Some(value)` - The value stored at `index`
    /// * `None` - If `index` is outside the extents
    fn value_at(&self, index: GridIndex) -> Option<f32>;

    /// Threshold that separates inside (above) from outside (at or below).
    fn isovalue(&self) -> f32;

    /// Samples per world unit. Always positive.
    fn resolution(&self) -> f32;

    /// World-space position of grid point `(0, 0, 0)`.
    #[inline]
    fn origin(&self) -> Point3 {
        Point3::ZERO
    }

    /// Number of cells along each axis (`extent - 1`, saturating at zero).
    #[inline]
    fn cell_extents(&self) -> [usize; 3] {
        let [nx, ny, nz] = self.extents();
        [
            nx.saturating_sub(1),
            ny.saturating_sub(1),
            nz.saturating_sub(1),
        ]
    }

    /// Total number of cells the scan visits, saturating at `usize::MAX`.
    #[inline]
    fn cell_count(&self) -> usize {
        let [cx, cy, cz] = self.cell_extents();
        cx.saturating_mul(cy).saturating_mul(cz)
    }
}

impl<T: ScalarSource + ?Sized> ScalarSource for &T {
    #[inline]
    fn extents(&self) -> [usize; 3] {
        (**self).extents()
    }

    #[inline]
    fn value_at(&self, index: GridIndex) -> Option<f32> {
        (**self).value_at(index)
    }

    #[inline]
    fn isovalue(&self) -> f32 {
        (**self).isovalue()
    }

    #[inline]
    fn resolution(&self) -> f32 {
        (**self).resolution()
    }

    #[inline]
    fn origin(&self) -> Point3 {
        (**self).origin()
    }
}

/// Convert a corner index (0-7) to a corner offset tuple (i, j, k).
///
/// The corner ordering follows the standard marching cubes convention:
/// ```text
/// Corner:  0      1      2      3      4      5      6      7
/// Offset: (0,0,0)(1,0,0)(1,1,0)(0,1,0)(0,0,1)(1,0,1)(1,1,1)(0,1,1)
/// ```
#[inline]
pub const fn corner_from_index(idx: usize) -> (usize, usize, usize) {
    crate::marching_cubes::CORNER_OFFSETS[idx & 7]
}

/// Convert a corner offset tuple (i, j, k) to a corner index (0-7).
///
/// This is the inverse of `corner_from_index`.
#[inline]
pub const fn index_from_corner(corner: (usize, usize, usize)) -> usize {
    match (corner.0 & 1, corner.1 & 1, corner.2 & 1) {
        (0, 0, 0) => 0,
        (1, 0, 0) => 1,
        (1, 1, 0) => 2,
        (0, 1, 0) => 3,
        (0, 0, 1) => 4,
        (1, 0, 1) => 5,
        (1, 1, 1) => 6,
        _ => 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant {
        extents: [usize; 3],
        value: f32,
    }

    impl ScalarSource for Constant {
        fn extents(&self) -> [usize; 3] {
            self.extents
        }

        fn value_at(&self, index: GridIndex) -> Option<f32> {
            let [nx, ny, nz] = self.extents;
            (index.x < nx && index.y < ny && index.z < nz).then_some(self.value)
        }

        fn isovalue(&self) -> f32 {
            0.0
        }

        fn resolution(&self) -> f32 {
            1.0
        }
    }

    #[test]
    fn test_corner_index_roundtrip() {
        for i in 0..8 {
            let corner = corner_from_index(i);
            let back = index_from_corner(corner);
            assert_eq!(i, back, "Roundtrip failed for index {}", i);
        }
    }

    #[test]
    fn test_corner_from_index_order() {
        assert_eq!(corner_from_index(0), (0, 0, 0));
        assert_eq!(corner_from_index(2), (1, 1, 0));
        assert_eq!(corner_from_index(3), (0, 1, 0));
        assert_eq!(corner_from_index(7), (0, 1, 1));
    }

    #[test]
    fn test_cell_extents() {
        let source = Constant {
            extents: [3, 1, 0],
            value: 1.0,
        };
        assert_eq!(source.cell_extents(), [2, 0, 0]);
        assert_eq!(source.cell_count(), 0);

        let source = Constant {
            extents: [4, 3, 2],
            value: 1.0,
        };
        assert_eq!(source.cell_count(), 3 * 2 * 1);
        assert_eq!(source.origin(), Point3::ZERO);
    }

    #[test]
    fn test_reference_forwarding() {
        let source = Constant {
            extents: [2, 2, 2],
            value: 4.0,
        };
        let by_ref = &source;
        assert_eq!(by_ref.extents(), [2, 2, 2]);
        assert_eq!(by_ref.value_at(GridIndex::new(1, 1, 1)), Some(4.0));
        assert_eq!(by_ref.value_at(GridIndex::new(2, 0, 0)), None);
    }
}
