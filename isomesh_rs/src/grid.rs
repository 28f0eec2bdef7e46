//! Dense voxel storage.

use isomesh_core::{coord_from_index, linear_index, DensitySource, GridCoord, GridDims};
use rayon::prelude::*;

use crate::error::{IsoError, Result};

/// Flat array of density samples, indexed `z·dimY·dimX + y·dimX + x`.
///
/// Immutable once built, so it can be shared by reference across every
/// extraction worker.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    dims: GridDims,
    values: Vec<f32>,
}

impl VoxelGrid {
    /// Fill a grid by evaluating `f` once per coordinate, in parallel.
    pub fn from_fn<F>(dims: GridDims, f: F) -> Self
    where
        F: Fn(GridCoord) -> f32 + Sync,
    {
        let values = (0..dims.voxel_count())
            .into_par_iter()
            .map(|index| f(coord_from_index(index, dims)))
            .collect();
        Self { dims, values }
    }

    /// Wrap existing samples; `values.len()` must equal the voxel count.
    pub fn from_values(dims: GridDims, values: Vec<f32>) -> Result<Self> {
        if values.len() != dims.voxel_count() {
            return Err(IsoError::InvalidVoxelCount {
                expected: dims.voxel_count(),
                got: values.len(),
            });
        }
        Ok(Self { dims, values })
    }

    /// Grid with every sample set to `value`.
    pub fn constant(dims: GridDims, value: f32) -> Self {
        Self {
            dims,
            values: vec![value; dims.voxel_count()],
        }
    }

    /// Density at `coord`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<f32> {
        if !isomesh_core::contains(coord, self.dims) {
            return None;
        }
        self.values.get(linear_index(coord, self.dims)).copied()
    }

    /// Grid dimensions.
    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Raw samples in flat-index order.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Smallest and largest sample.
    pub fn value_range(&self) -> (f32, f32) {
        self.values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// True if every sample lies on one side of `iso_level`.
    ///
    /// Such a grid yields an empty mesh.
    pub fn is_homogeneous(&self, iso_level: f32) -> bool {
        let above = |v: &f32| *v > iso_level;
        self.values.iter().all(above) || !self.values.iter().any(above)
    }
}

impl DensitySource for VoxelGrid {
    #[inline]
    fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    fn density(&self, coord: GridCoord) -> f32 {
        self.values[linear_index(coord, self.dims)]
    }
}
