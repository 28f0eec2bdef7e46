//! Extraction configuration.

use isomesh_core::{GridDims, MAX_TRIANGLES_PER_CELL};

use crate::error::{IsoError, Result};

/// Parameters of one density-generation plus extraction run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionConfig {
    /// Density threshold defining the surface.
    pub iso_level: f32,
    /// Samples per axis (X, Y, Z).
    pub dimensions: [i64; 3],
    /// Octaves summed by the terrain noise.
    pub noise_octaves: u32,
    /// Noise seed; `None` uses the reference permutation.
    pub seed: Option<u32>,
    /// Noise frequency applied to normalized grid coordinates.
    pub frequency: f32,
    /// World units per voxel, applied to emitted positions.
    pub resolution: f32,
    /// Worker threads; 0 uses the global rayon pool.
    pub num_threads: usize,
}

impl ExtractionConfig {
    /// Configuration for a grid of the given size with default noise settings.
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self {
            dimensions: [x, y, z],
            ..Self::default()
        }
    }

    /// Set the iso-level.
    pub fn with_iso_level(mut self, iso_level: f32) -> Self {
        self.iso_level = iso_level;
        self
    }

    /// Set the grid dimensions.
    pub fn with_dimensions(mut self, x: i64, y: i64, z: i64) -> Self {
        self.dimensions = [x, y, z];
        self
    }

    /// Set the number of noise octaves.
    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.noise_octaves = octaves;
        self
    }

    /// Set the noise seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the noise frequency.
    pub fn with_frequency(mut self, frequency: f32) -> Self {
        self.frequency = frequency;
        self
    }

    /// Set the world size of one voxel.
    pub fn with_resolution(mut self, resolution: f32) -> Self {
        self.resolution = resolution;
        self
    }

    /// Run extraction on a dedicated pool of `num_threads` workers.
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Validated grid dimensions.
    pub fn grid_dims(&self) -> Result<GridDims> {
        let [x, y, z] = self.dimensions;
        GridDims::from_signed(x, y, z).map_err(|_| IsoError::InvalidDimensions { x, y, z })
    }

    /// Check every parameter before any work starts.
    pub fn validate(&self) -> Result<()> {
        let dims = self.grid_dims()?;

        if !self.iso_level.is_finite() {
            return Err(IsoError::config(format!(
                "iso_level must be finite, got {}",
                self.iso_level
            )));
        }
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(IsoError::config(format!(
                "frequency must be positive, got {}",
                self.frequency
            )));
        }
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(IsoError::config(format!(
                "resolution must be positive, got {}",
                self.resolution
            )));
        }
        if self.noise_octaves == 0 {
            return Err(IsoError::config("noise_octaves must be at least 1"));
        }

        check_index_range(dims)
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            iso_level: 0.5,
            dimensions: [8, 8, 8],
            noise_octaves: 1,
            seed: None,
            frequency: 1.0,
            resolution: 1.0,
            num_threads: 0,
        }
    }
}

/// The worst-case vertex count must be addressable by a `u32` index.
pub(crate) fn check_index_range(dims: GridDims) -> Result<()> {
    let max_vertices = dims
        .cell_count()
        .checked_mul(MAX_TRIANGLES_PER_CELL * 3)
        .filter(|&n| n <= u32::MAX as usize);
    match max_vertices {
        Some(_) => Ok(()),
        None => Err(IsoError::config(format!(
            "grid {}x{}x{} can exceed the u32 vertex index range",
            dims.x(), dims.y(), dims.z()
        ))),
    }
}
