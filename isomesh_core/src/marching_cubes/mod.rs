//! Marching Cubes mesh extraction.
//!
//! This module provides the marching cubes algorithm for extracting triangle
//! soups from a dense voxel grid. It includes:
//!
//! - Compile-time lookup tables for cube configurations, plus a validator
//! - Cell classification and edge interpolation
//! - Central-difference vertex normals with boundary clamping
//! - Both allocating and no-alloc per-cell variants
//!
//! # Example
//!
//! ```ignore
//! use isomesh_core::marching_cubes::{process_cell, process_cell_no_alloc};
//! use isomesh_core::GridCoord;
//!
//! // Process a cell with allocation
//! let triangles = process_cell(&grid, GridCoord::new(3, 4, 5), 0.5);
//!
//! // Process a cell without allocation (for embedded/no_std)
//! let (triangles, count) = process_cell_no_alloc(&grid, GridCoord::new(3, 4, 5), 0.5);
//! ```

mod algorithm;
mod tables;

pub use algorithm::{
    classify_cube, corner_normal, cube_corners, density_gradient, interpolate_vertex,
    interpolation_factor, process_cell_no_alloc,
};
pub use tables::{
    crossing_edges, triangle_count, validate_tables, CORNER_OFFSETS, EDGE_CORNERS, EDGE_TABLE,
    SENTINEL, TRI_TABLE,
};

#[cfg(any(feature = "std", feature = "alloc"))]
pub use algorithm::process_cell;
