//! Density field sampling into voxel grids.

use isomesh_core::{FbmField, GridDims, Point3, ScalarField};
use log::debug;

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::grid::VoxelGrid;

/// A scalar field bound to grid dimensions.
///
/// [`generate`](Self::generate) evaluates the field once per grid coordinate,
/// passing integer grid coordinates as a [`Point3`]. The result depends only
/// on the field, so a fixed field and seed always give the same grid.
#[derive(Debug, Clone)]
pub struct DensityField<F> {
    dims: GridDims,
    field: F,
}

impl<F: ScalarField + Sync> DensityField<F> {
    /// Bind a field to a grid size.
    pub fn new(dims: GridDims, field: F) -> Self {
        Self { dims, field }
    }

    /// Grid dimensions this field fills.
    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// The underlying scalar field.
    #[inline]
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Sample the field at every grid coordinate.
    pub fn generate(&self) -> VoxelGrid {
        debug!(
            "sampling density field into {}x{}x{} grid",
            self.dims.x(), self.dims.y(), self.dims.z()
        );
        VoxelGrid::from_fn(self.dims, |coord| self.field.sample(Point3::from(coord)))
    }
}

impl DensityField<TerrainField> {
    /// Noise terrain described by a configuration.
    pub fn terrain(config: &ExtractionConfig) -> Result<Self> {
        config.validate()?;
        let dims = config.grid_dims()?;
        let field = TerrainField::new(dims, config.seed, config.noise_octaves, config.frequency);
        Ok(Self::new(dims, field))
    }
}

/// `0.5 + fbm(coord / dims)`: noise over normalized grid coordinates.
///
/// Centered on 0.5 so the default iso-level cuts through the noise.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainField {
    noise: FbmField,
    extent: Point3,
}

impl TerrainField {
    /// Terrain for a grid of the given size.
    pub fn new(dims: GridDims, seed: Option<u32>, octaves: u32, frequency: f32) -> Self {
        Self {
            noise: FbmField::new(seed, octaves, frequency),
            extent: Point3::new(dims.x() as f32, dims.y() as f32, dims.z() as f32),
        }
    }
}

impl ScalarField for TerrainField {
    #[inline]
    fn sample(&self, point: Point3) -> f32 {
        let normalized = Point3::new(
            point.x / self.extent.x,
            point.y / self.extent.y,
            point.z / self.extent.z,
        );
        0.5 + self.noise.sample(normalized)
    }
}
