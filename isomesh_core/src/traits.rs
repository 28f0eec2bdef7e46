//! Traits for density storage and density sampling.
//!
//! These traits let downstream crates (isomesh_rs) supply their own voxel
//! storage while sharing the core marching cubes algorithm.

use crate::coords::clamp_coord;
use crate::types::{GridCoord, GridDims, Point3};

/// Trait for types that hold one scalar density sample per grid coordinate.
///
/// Implementors provide read-only access to a dense, regular voxel grid.
/// The marching cubes routines only ever read through this trait, so an
/// implementation shared between threads needs no locking.
pub trait DensitySource {
    /// The dimensions of the grid (samples per axis).
    fn dims(&self) -> GridDims;

    /// Get the density at an in-range grid coordinate.
    ///
    /// Callers guarantee `0 <= coord < dims` on every axis.
    fn density(&self, coord: GridCoord) -> f32;

    /// Get the density with each axis clamped into the grid.
    ///
    /// Used for the `coord ± 1` neighbor reads of normal estimation, so that
    /// boundary voxels fall back to one-sided differences.
    #[inline]
    fn density_clamped(&self, coord: GridCoord) -> f32 {
        self.density(clamp_coord(coord, self.dims()))
    }
}

/// A continuous scalar function used to fill a voxel grid.
///
/// The only contract is coordinate in, scalar out; the gradient-noise field in
/// [`crate::noise`] is one implementation, any closure `Fn(Point3) -> f32` is another.
pub trait ScalarField {
    /// Sample the field at a point given in grid coordinates.
    fn sample(&self, point: Point3) -> f32;
}

impl<F> ScalarField for F
where
    F: Fn(Point3) -> f32,
{
    #[inline]
    fn sample(&self, point: Point3) -> f32 {
        self(point)
    }
}
