//! Core types for isomesh_core.
//!
//! Provides the point/vector type, integer grid coordinates, grid dimensions and
//! the vertex/triangle records emitted by the marching cubes algorithm.

use core::ops::{Add, Div, Mul, Sub};

use crate::error::CoreError;

/// Maximum number of triangles a single cube configuration can produce.
pub const MAX_TRIANGLES_PER_CELL: usize = 5;

/// A 3D point with named fields for clarity.
///
/// Used for both positions and direction vectors (normals, gradients).
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
    /// The zero vector.
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

    /// Normalize the vector to unit length.
    ///
    /// Returns the zero vector if the length is zero or not finite, so a flat
    /// gradient never turns into NaN.
    #[inline]
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            self / len
        } else {
            Self::ZERO
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

    /// True if every component is finite.
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

impl From<GridCoord> for Point3 {
    #[inline]
    fn from(c: GridCoord) -> Self {
        Self::new(c.x as f32, c.y as f32, c.z as f32)
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

/// Integer voxel coordinate.
///
/// Signed so that `coord - axis` can be formed at the grid boundary before
/// clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridCoord {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl GridCoord {
    /// Create a new GridCoord.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Offset this coordinate by a (dx, dy, dz) triple.
    #[inline]
    pub const fn offset(self, (dx, dy, dz): (i32, i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

impl From<[i32; 3]> for GridCoord {
    #[inline]
    fn from(arr: [i32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

/// Dimensions of a regular voxel grid (samples per axis).
///
/// Only constructible through [`GridDims::new`] and friends, so every axis
/// holds at least 2 samples and the cell counts never underflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridDims {
    x: u32,
    y: u32,
    z: u32,
}

impl GridDims {
    /// Create grid dimensions, rejecting any axis with fewer than 2 samples.
    ///
    /// Two samples per axis is the minimum that yields one interior cell.
    pub const fn new(x: u32, y: u32, z: u32) -> Result<Self, CoreError> {
        if x < 2 || y < 2 || z < 2 {
            return Err(CoreError::InvalidDimensions {
                x: x as i64,
                y: y as i64,
                z: z as i64,
            });
        }
        Ok(Self { x, y, z })
    }

    /// Create grid dimensions from signed extents (as read from configuration).
    pub fn from_signed(x: i64, y: i64, z: i64) -> Result<Self, CoreError> {
        let invalid = CoreError::InvalidDimensions { x, y, z };
        let cast = |v: i64| u32::try_from(v).map_err(|_| invalid);
        Self::new(cast(x)?, cast(y)?, cast(z)?)
    }

    /// Cube grid with the same number of samples on every axis.
    pub const fn cube(n: u32) -> Result<Self, CoreError> {
        Self::new(n, n, n)
    }

    /// Samples along X.
    #[inline]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Samples along Y.
    #[inline]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Samples along Z.
    #[inline]
    pub const fn z(&self) -> u32 {
        self.z
    }

    /// Total number of voxel samples (`x·y·z`).
    #[inline]
    pub const fn voxel_count(&self) -> usize {
        self.x as usize * self.y as usize * self.z as usize
    }

    /// Number of marching cubes cells (`(x-1)·(y-1)·(z-1)`).
    #[inline]
    pub const fn cell_count(&self) -> usize {
        (self.x as usize - 1) * (self.y as usize - 1) * (self.z as usize - 1)
    }

    /// Worst-case triangle count for a full extraction.
    #[inline]
    pub const fn max_triangles(&self) -> usize {
        self.cell_count() * MAX_TRIANGLES_PER_CELL
    }
}

/// A single emitted mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    /// Position on the cube edge where the iso-surface crosses.
    pub position: Point3,
    /// Unit normal estimated from the density gradient (zero if the gradient vanishes).
    pub normal: Point3,
}

impl Vertex {
    /// Create a new vertex.
    #[inline]
    pub const fn new(position: Point3, normal: Point3) -> Self {
        Self { position, normal }
    }
}

/// A triangle as three independent vertices (triangle soup).
pub type Triangle = [Vertex; 3];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point3_arithmetic() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Point3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Point3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Point3::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, Point3::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Point3::new(2.0, 2.5, 3.0));
    }

    #[test]
    fn test_point3_dot_cross() {
        let a = Point3::new(1.0, 0.0, 0.0);
        let b = Point3::new(0.0, 1.0, 0.0);

        assert_eq!(a.dot(b), 0.0);
        assert_eq!(a.dot(a), 1.0);
        assert_eq!(a.cross(b), Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_normalize_or_zero() {
        let p = Point3::new(3.0, 4.0, 0.0);
        assert_eq!(p.length(), 5.0);
        assert!((p.normalize_or_zero().length() - 1.0).abs() < 1e-6);

        assert_eq!(Point3::ZERO.normalize_or_zero(), Point3::ZERO);
        assert_eq!(
            Point3::new(f32::INFINITY, 0.0, 0.0).normalize_or_zero(),
            Point3::ZERO
        );
    }

    #[test]
    fn test_point3_lerp() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(10.0, 10.0, 10.0);

        assert_eq!(a.lerp(b, 0.5), Point3::new(5.0, 5.0, 5.0));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_grid_coord_offset() {
        let c = GridCoord::new(1, 2, 3);
        assert_eq!(c.offset((1, 0, -1)), GridCoord::new(2, 2, 2));
        assert_eq!(Point3::from(c), Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_grid_dims_counts() {
        let dims = GridDims::new(8, 8, 8).unwrap();
        assert_eq!(dims.voxel_count(), 512);
        assert_eq!(dims.cell_count(), 343);
        assert_eq!(dims.max_triangles(), 1715);

        let flat = GridDims::new(2, 3, 4).unwrap();
        assert_eq!(flat.cell_count(), 6);
        assert_eq!((flat.x(), flat.y(), flat.z()), (2, 3, 4));

        // Smallest accepted grid still has exactly one cell
        let minimal = GridDims::cube(2).unwrap();
        assert_eq!(minimal.cell_count(), 1);
        assert_eq!(minimal.max_triangles(), 5);
    }

    #[test]
    fn test_grid_dims_rejects_degenerate_axes() {
        assert!(GridDims::new(1, 8, 8).is_err());
        assert!(GridDims::new(8, 0, 8).is_err());
        assert!(GridDims::from_signed(8, 8, -4).is_err());
        assert!(GridDims::from_signed(0, 2, 2).is_err());
        assert!(GridDims::cube(0).is_err());
        assert_eq!(
            GridDims::from_signed(2, 2, 2),
            GridDims::new(2, 2, 2)
        );
    }
}
