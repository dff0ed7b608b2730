//! Core types for isosurface extraction.
//!
//! Provides the world-space point type, integer grid indices and the transient
//! per-cell cube sample used by the marching cubes scan.

use core::ops::{Add, Div, Mul, Neg, Sub};

/// A 3D point with named fields for clarity.
///
/// Used both for world-space vertex positions and for direction vectors
/// (face normals, edge vectors).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Point3 {
    /// The origin `(0, 0, 0)`.
    pub const ZERO: Self = Self::splat(0.0);

    /// Create a new Point3.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a Point3 with all components set to the same value.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Linear interpolation between two points.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Dot product with another point (treating both as vectors).
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another point (treating both as vectors).
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Squared length of the vector.
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length (magnitude) of the vector.
    #[inline]
    pub fn length(self) -> f32 {
        libm::sqrtf(self.length_squared())
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Normalize the vector to unit length.
    /// Returns a zero vector if the length is zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            Self::ZERO
        } else {
            self / len
        }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self {
            x: if self.x < other.x { self.x } else { other.x },
            y: if self.y < other.y { self.y } else { other.y },
            z: if self.z < other.z { self.z } else { other.z },
        }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self {
            x: if self.x > other.x { self.x } else { other.x },
            y: if self.y > other.y { self.y } else { other.y },
            z: if self.z > other.z { self.z } else { other.z },
        }
    }

    /// Returns true if every component is finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Point3 {
    #[inline]
    fn from(arr: [f32; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl From<Point3> for [f32; 3] {
    #[inline]
    fn from(p: Point3) -> Self {
        p.as_array()
    }
}

impl From<(f32, f32, f32)> for Point3 {
    #[inline]
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self { x, y, z }
    }
}

impl Add for Point3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Point3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Point3 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Mul<Point3> for f32 {
    type Output = Point3;

    #[inline]
    fn mul(self, point: Point3) -> Point3 {
        point * self
    }
}

impl Div<f32> for Point3 {
    type Output = Self;

    #[inline]
    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl Neg for Point3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Integer grid-point index into a dense scalar field.
///
/// A cell is addressed by the index of its minimum corner, so the same type
/// names both grid points and cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridIndex {
    /// Index along the X axis.
    pub x: usize,
    /// Index along the Y axis.
    pub y: usize,
    /// Index along the Z axis.
    pub z: usize,
}

impl GridIndex {
    /// Create a new GridIndex.
    #[inline]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }

    /// Offset this index by a corner offset (each component 0 or 1).
    #[inline]
    pub const fn offset(&self, corner: (usize, usize, usize)) -> Self {
        Self {
            x: self.x + corner.0,
            y: self.y + corner.1,
            z: self.z + corner.2,
        }
    }

    /// Convert to a point in grid units (no resolution scaling).
    #[inline]
    pub fn to_point(&self) -> Point3 {
        Point3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl From<[usize; 3]> for GridIndex {
    #[inline]
    fn from(arr: [usize; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl From<(usize, usize, usize)> for GridIndex {
    #[inline]
    fn from((x, y, z): (usize, usize, usize)) -> Self {
        Self { x, y, z }
    }
}

/// The eight scalar values read at a cell's corners.
///
/// `values[i]` belongs to corner `i` in the canonical marching cubes corner
/// ordering (see [`crate::marching_cubes::CORNER_OFFSETS`]).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CubeSample {
    /// Scalar value at each corner.
    pub values: [f32; 8],
}

impl CubeSample {
    /// Create a sample from eight corner values.
    #[inline]
    pub const fn new(values: [f32; 8]) -> Self {
        Self { values }
    }

    /// Create a sample with every corner set to `value`.
    #[inline]
    pub const fn uniform(value: f32) -> Self {
        Self { values: [value; 8] }
    }

    /// 8-bit configuration code: bit `i` is set iff corner `i` is strictly
    /// above `isovalue`.
    #[inline]
    pub fn configuration(&self, isovalue: f32) -> u8 {
        let mut code = 0u8;
        for (i, &value) in self.values.iter().enumerate() {
            if value > isovalue {
                code |= 1 << i;
            }
        }
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(0.5, 0.5, 0.5);

        assert_eq!(a + b, Point3::new(1.5, 2.5, 3.5));
        assert_eq!(a - b, Point3::new(0.5, 1.5, 2.5));
        assert_eq!(a * 2.0, Point3::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(a / 2.0, Point3::new(0.5, 1.0, 1.5));
        assert_eq!(-a, Point3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_point_lerp_and_distance() {
        let a = Point3::ZERO;
        let b = Point3::new(2.0, 0.0, 0.0);

        assert_eq!(a.lerp(b, 0.5), Point3::new(1.0, 0.0, 0.0));
        assert!((a.distance(b) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_cross_product_orthogonal() {
        let x = Point3::new(1.0, 0.0, 0.0);
        let y = Point3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(Point3::ZERO.normalize(), Point3::ZERO);
        let n = Point3::new(3.0, 4.0, 0.0).normalize();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_grid_index_offset() {
        let idx = GridIndex::new(2, 3, 4);
        assert_eq!(idx.offset((1, 0, 1)), GridIndex::new(3, 3, 5));
        assert_eq!(idx.to_point(), Point3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_configuration_code() {
        assert_eq!(CubeSample::uniform(0.0).configuration(0.5), 0);
        assert_eq!(CubeSample::uniform(1.0).configuration(0.5), 255);

        let mut sample = CubeSample::uniform(0.0);
        sample.values[0] = 1.0;
        assert_eq!(sample.configuration(0.5), 1);

        sample.values[7] = 1.0;
        assert_eq!(sample.configuration(0.5), 0b1000_0001);
    }

    #[test]
    fn test_configuration_is_strict() {
        // A corner exactly at the isovalue is not above it.
        let sample = CubeSample::uniform(0.5);
        assert_eq!(sample.configuration(0.5), 0);
    }
}
