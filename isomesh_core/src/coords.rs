//! Coordinate conversion functions.
//!
//! Voxels are stored flat in x-fastest order:
//! `index = z·dimY·dimX + y·dimX + x`.
//! Cells (the cubes between voxels) use the same ordering over the
//! `(dimX-1)·(dimY-1)·(dimZ-1)` extraction domain.

use crate::types::{GridCoord, GridDims};

/// Convert an in-range grid coordinate to its flat voxel index.
#[inline]
pub fn linear_index(coord: GridCoord, dims: GridDims) -> usize {
    let dx = dims.x() as usize;
    let dy = dims.y() as usize;
    coord.z as usize * dy * dx + coord.y as usize * dx + coord.x as usize
}

/// Convert a flat voxel index back to its grid coordinate.
///
/// Inverse of [`linear_index`].
#[inline]
pub fn coord_from_index(index: usize, dims: GridDims) -> GridCoord {
    let dx = dims.x() as usize;
    let dy = dims.y() as usize;
    GridCoord::new(
        (index % dx) as i32,
        (index / dx % dy) as i32,
        (index / (dx * dy)) as i32,
    )
}

/// Convert a flat cell index to the grid coordinate of the cell's minimum corner.
///
/// Cell indices run over `0..dims.cell_count()`, so every returned coordinate
/// has all 8 cube corners inside the grid.
#[inline]
pub fn cell_from_index(index: usize, dims: GridDims) -> GridCoord {
    let cx = dims.x() as usize - 1;
    let cy = dims.y() as usize - 1;
    GridCoord::new(
        (index % cx) as i32,
        (index / cx % cy) as i32,
        (index / (cx * cy)) as i32,
    )
}

/// True if the coordinate addresses a voxel inside the grid.
#[inline]
pub fn contains(coord: GridCoord, dims: GridDims) -> bool {
    coord.x >= 0
        && coord.y >= 0
        && coord.z >= 0
        && (coord.x as u32) < dims.x()
        && (coord.y as u32) < dims.y()
        && (coord.z as u32) < dims.z()
}

/// True if the coordinate is the minimum corner of a cell in the extraction domain.
#[inline]
pub fn is_cell_in_domain(cell: GridCoord, dims: GridDims) -> bool {
    cell.x >= 0
        && cell.y >= 0
        && cell.z >= 0
        && (cell.x as u32) < dims.x() - 1
        && (cell.y as u32) < dims.y() - 1
        && (cell.z as u32) < dims.z() - 1
}

/// Clamp each axis of a coordinate into `[0, dim-1]`.
#[inline]
pub fn clamp_coord(coord: GridCoord, dims: GridDims) -> GridCoord {
    GridCoord::new(
        coord.x.clamp(0, dims.x() as i32 - 1),
        coord.y.clamp(0, dims.y() as i32 - 1),
        coord.z.clamp(0, dims.z() as i32 - 1),
    )
}
