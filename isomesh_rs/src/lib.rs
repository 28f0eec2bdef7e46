//! # isomesh_rs
//!
//! Parallel marching cubes extraction over procedurally generated voxel grids.
//!
//! This crate is the runtime side of isomesh: it owns the voxel storage, the
//! rayon-driven cell fan-out and the lock-free triangle output buffer, and
//! hands back a flat triangle-soup [`Mesh`]. The per-cell algorithm, lookup
//! tables and noise live in `isomesh_core`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use isomesh_rs::{generate_mesh, ExtractionConfig};
//!
//! let config = ExtractionConfig::new(32, 32, 32)
//!     .with_octaves(3)
//!     .with_seed(42);
//!
//! let mesh = generate_mesh(&config)?;
//! println!("{} triangles", mesh.triangle_count());
//! mesh.write_obj("terrain.obj")?;
//! ```
//!
//! ## Pipeline
//!
//! 1. [`DensityField`] evaluates a scalar field once per grid coordinate
//!    into a [`VoxelGrid`].
//! 2. [`SurfaceExtractor`] visits all `(dimX-1)(dimY-1)(dimZ-1)` cells in
//!    parallel. Each cell emits 0 to 5 triangles.
//! 3. Each triangle reserves a slot from the [`TriangleAllocator`] inside a
//!    worst-case sized [`TriangleBuffer`].
//! 4. The buffer is truncated to the reserved count and assembled into a [`Mesh`].
//!
//! Any [`DensitySource`] can be extracted directly, and any
//! `Fn(Point3) -> f32 + Sync` can drive a [`DensityField`].

#![warn(missing_docs)]
#![warn(clippy::all)]

mod allocator;
mod buffer;
mod config;
mod error;
mod extractor;
mod field;
mod grid;
mod mesh;

pub use allocator::TriangleAllocator;
pub use buffer::TriangleBuffer;
pub use config::ExtractionConfig;
pub use error::{IsoError, Result};
pub use extractor::SurfaceExtractor;
pub use field::{DensityField, TerrainField};
pub use grid::VoxelGrid;
pub use mesh::{Mesh, MeshStats};

// Re-export isomesh_core types for convenience
pub use isomesh_core::{
    DensitySource, GridCoord, GridDims, Point3, ScalarField, Triangle, Vertex,
    MAX_TRIANGLES_PER_CELL,
};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use isomesh_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::ExtractionConfig;
    pub use crate::error::{IsoError, Result};
    pub use crate::extractor::SurfaceExtractor;
    pub use crate::field::{DensityField, TerrainField};
    pub use crate::generate_mesh;
    pub use crate::grid::VoxelGrid;
    pub use crate::mesh::{Mesh, MeshStats};

    pub use isomesh_core::{DensitySource, GridCoord, GridDims, Point3, ScalarField};
}

/// Generate noise terrain from a configuration and extract its surface.
///
/// Validates the configuration, fills the grid with
/// `0.5 + fbm(coord / dims)` and runs the parallel extractor.
pub fn generate_mesh(config: &ExtractionConfig) -> Result<Mesh> {
    let extractor = SurfaceExtractor::new(config)?;
    let grid = DensityField::terrain(config)?.generate();
    extractor.extract(&grid)
}
