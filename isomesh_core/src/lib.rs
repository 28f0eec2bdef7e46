//! # isomesh_core
//!
//! Pure algorithms for marching cubes iso-surface extraction over dense voxel grids.
//!
//! This crate holds everything that does not need a thread pool or an
//! allocator: the lookup tables, per-cell triangulation, vertex normals and the
//! gradient noise used to synthesize density fields. The parallel runtime
//! lives in `isomesh_rs`.
//!
//! ## Features
//!
//! - **no_std compatible**: Works in embedded environments with the `alloc` feature
//! - **Zero-cost tables**: The 12-edge and 256×16 triangulation tables are `const` data
//! - **Boundary safe**: Normal estimation clamps neighbor reads at the grid edge
//! - **Replaceable density**: Any `Fn(Point3) -> f32` is a [`ScalarField`]
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables standard library support
//! - `alloc`: Enables heap allocation (Vec, etc.) without full std
//!
//! ## Modules
//!
//! - [`types`]: Core data types (Point3, GridCoord, GridDims, Vertex, Triangle)
//! - [`traits`]: Storage and sampling abstractions (DensitySource, ScalarField)
//! - [`coords`]: Flat-index and cell-domain conversions
//! - [`marching_cubes`]: Tables, classification, interpolation, cell triangulation
//! - [`noise`]: Gradient noise with an explicit permutation table, fBm
//! - [`hash`]: FNV-1a seed hashing
//! - [`error`]: Error types
//!
//! ## Usage
//!
//! ```ignore
//! use isomesh_core::prelude::*;
//!
//! // Triangulate one cell of a grid implementing DensitySource
//! let (triangles, count) = process_cell_no_alloc(&grid, GridCoord::new(0, 0, 0), 0.5);
//! for tri in &triangles[..count] {
//!     println!("{:?}", tri[0].position);
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Conditional std/alloc support
#[cfg(feature = "std")]
extern crate std;

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

// Internal alloc prelude for conditional compilation
#[cfg(feature = "std")]
mod alloc_prelude {
    pub use std::vec::Vec;
}

#[cfg(all(feature = "alloc", not(feature = "std")))]
mod alloc_prelude {
    pub use alloc::vec::Vec;
}

pub mod coords;
pub mod error;
pub mod hash;
pub mod marching_cubes;
pub mod noise;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
///
/// Provides the most commonly used types and functions.
pub mod prelude {
    pub use crate::coords::{cell_from_index, clamp_coord, coord_from_index, linear_index};
    pub use crate::error::CoreError;
    pub use crate::marching_cubes::{
        classify_cube, corner_normal, interpolate_vertex, interpolation_factor,
        process_cell_no_alloc, validate_tables,
    };
    pub use crate::noise::{FbmField, GradientNoise, PermutationTable};
    pub use crate::traits::{DensitySource, ScalarField};
    pub use crate::types::{
        GridCoord, GridDims, Point3, Triangle, Vertex, MAX_TRIANGLES_PER_CELL,
    };

    #[cfg(any(feature = "std", feature = "alloc"))]
    pub use crate::marching_cubes::process_cell;
}

// Re-export everything at crate root for convenience
pub use coords::{
    cell_from_index, clamp_coord, contains, coord_from_index, is_cell_in_domain, linear_index,
};
pub use error::CoreError;
pub use hash::{fnv1a_32, fnv1a_64, hash_seed, seed_offset};
pub use noise::{fade, FbmField, GradientNoise, PermutationTable};
pub use traits::{DensitySource, ScalarField};
pub use types::{GridCoord, GridDims, Point3, Triangle, Vertex, MAX_TRIANGLES_PER_CELL};
