//! Marching cubes cell triangulation.
//!
//! Provides functions to classify a cell, place vertices on crossed edges and
//! estimate vertex normals from the density gradient.

use crate::coords::is_cell_in_domain;
use crate::traits::DensitySource;
use crate::types::{GridCoord, Point3, Triangle, Vertex, MAX_TRIANGLES_PER_CELL};

use super::tables::{CORNER_OFFSETS, EDGE_CORNERS, EDGE_TABLE, SENTINEL, TRI_TABLE};

/// Density differences smaller than this are treated as a flat edge.
const DEGENERATE_EPSILON: f32 = 1e-10;

/// Compute the cube configuration index from corner densities.
///
/// # Arguments
/// * `corner_values` - Densities at the 8 corners, in [`CORNER_OFFSETS`] order
/// * `iso_level` - The iso-surface threshold
///
/// # Returns
/// An 8-bit index where bit i is set iff corner i is strictly above the iso-level.
#[inline]
pub fn classify_cube(corner_values: &[f32; 8], iso_level: f32) -> u8 {
    let mut index = 0u8;
    for (i, &val) in corner_values.iter().enumerate() {
        if val > iso_level {
            index |= 1 << i;
        }
    }
    index
}

/// Parameter `t` of the iso-crossing along an edge from corner A to corner B.
///
/// `t = (iso - a) / (b - a)`, clamped to `[0, 1]`. A near-zero denominator
/// (both corners at the same density) yields the midpoint.
#[inline]
pub fn interpolation_factor(value_a: f32, value_b: f32, iso_level: f32) -> f32 {
    let denom = value_b - value_a;
    if libm::fabsf(denom) < DEGENERATE_EPSILON {
        return 0.5;
    }

    let t = (iso_level - value_a) / denom;
    if t.is_nan() {
        return 0.5;
    }
    t.clamp(0.0, 1.0)
}

/// Interpolate vertex position along an edge where the density crosses the iso-level.
///
/// # Arguments
/// * `p0` - Position of the first corner
/// * `p1` - Position of the second corner
/// * `v0` - Density at the first corner
/// * `v1` - Density at the second corner
/// * `iso_level` - The iso-surface threshold
///
/// # Returns
/// The crossing point, always on the segment `p0..=p1`.
#[inline]
pub fn interpolate_vertex(p0: Point3, p1: Point3, v0: f32, v1: f32, iso_level: f32) -> Point3 {
    p0.lerp(p1, interpolation_factor(v0, v1, iso_level))
}

/// Central-difference density gradient at a voxel.
///
/// Neighbor reads are clamped into the grid, so on the outer layer this
/// degrades to a one-sided difference instead of reading out of range.
#[inline]
pub fn density_gradient<S: DensitySource + ?Sized>(source: &S, coord: GridCoord) -> Point3 {
    let dx = source.density_clamped(coord.offset((1, 0, 0)))
        - source.density_clamped(coord.offset((-1, 0, 0)));
    let dy = source.density_clamped(coord.offset((0, 1, 0)))
        - source.density_clamped(coord.offset((0, -1, 0)));
    let dz = source.density_clamped(coord.offset((0, 0, 1)))
        - source.density_clamped(coord.offset((0, 0, -1)));
    Point3::new(dx, dy, dz)
}

/// Unit normal at a voxel (zero vector where the gradient vanishes).
#[inline]
pub fn corner_normal<S: DensitySource + ?Sized>(source: &S, coord: GridCoord) -> Point3 {
    density_gradient(source, coord).normalize_or_zero()
}

/// The 8 corner coordinates of a cell, in [`CORNER_OFFSETS`] order.
#[inline]
pub fn cube_corners(cell: GridCoord) -> [GridCoord; 8] {
    let mut corners = [cell; 8];
    for (corner, &offset) in corners.iter_mut().zip(CORNER_OFFSETS.iter()) {
        *corner = cell.offset(offset);
    }
    corners
}

/// Process a single cell without dynamic allocation.
///
/// Returns a fixed-size array that can hold up to 5 triangles (the maximum
/// for any marching cubes configuration). Positions are in grid units.
///
/// # Arguments
/// * `source` - Voxel storage (must implement `DensitySource`)
/// * `cell` - Minimum corner of the cell to process
/// * `iso_level` - The iso-surface threshold
///
/// # Returns
/// A tuple of (triangles, count) where triangles is a fixed array and count
/// is the number of valid triangles. Returns (default, 0) if the cell lies
/// outside the extraction domain or the surface does not cross it.
pub fn process_cell_no_alloc<S: DensitySource + ?Sized>(
    source: &S,
    cell: GridCoord,
    iso_level: f32,
) -> ([Triangle; MAX_TRIANGLES_PER_CELL], usize) {
    let mut triangles = [[Vertex::default(); 3]; MAX_TRIANGLES_PER_CELL];

    if !is_cell_in_domain(cell, source.dims()) {
        return (triangles, 0);
    }

    // Gather corner values
    let corners = cube_corners(cell);
    let mut corner_values = [0.0f32; 8];
    for (value, &corner) in corner_values.iter_mut().zip(corners.iter()) {
        *value = source.density(corner);
    }

    let config = classify_cube(&corner_values, iso_level) as usize;

    // Check if the surface intersects this cell
    let edge_flags = EDGE_TABLE[config];
    if edge_flags == 0 {
        return (triangles, 0);
    }

    // Normals at corners touching a crossed edge
    let mut corner_normals = [Point3::ZERO; 8];
    let mut normal_done = 0u8;
    for (edge, &(a, b)) in EDGE_CORNERS.iter().enumerate() {
        if edge_flags & (1 << edge) == 0 {
            continue;
        }
        for corner in [a, b] {
            if normal_done & (1 << corner) == 0 {
                corner_normals[corner] = corner_normal(source, corners[corner]);
                normal_done |= 1 << corner;
            }
        }
    }

    // Compute edge intersection vertices
    let mut edge_vertices = [Vertex::default(); 12];
    for (edge, &(a, b)) in EDGE_CORNERS.iter().enumerate() {
        if edge_flags & (1 << edge) == 0 {
            continue;
        }
        let t = interpolation_factor(corner_values[a], corner_values[b], iso_level);
        let position = Point3::from(corners[a]).lerp(Point3::from(corners[b]), t);
        let normal = corner_normals[a].lerp(corner_normals[b], t).normalize_or_zero();
        edge_vertices[edge] = Vertex::new(position, normal);
    }

    // Generate triangles from the triangle table
    let tri_list = &TRI_TABLE[config];
    let mut count = 0;
    let mut i = 0;
    while i + 2 < tri_list.len() && tri_list[i] != SENTINEL && count < MAX_TRIANGLES_PER_CELL {
        let e0 = tri_list[i] as usize;
        let e1 = tri_list[i + 1] as usize;
        let e2 = tri_list[i + 2] as usize;

        triangles[count] = [edge_vertices[e0], edge_vertices[e1], edge_vertices[e2]];
        count += 1;
        i += 3;
    }

    (triangles, count)
}

/// Process a single cell and collect its triangles into a vector.
///
/// Same output as [`process_cell_no_alloc`], convenient for tests and
/// sequential callers.
#[cfg(any(feature = "std", feature = "alloc"))]
pub fn process_cell<S: DensitySource + ?Sized>(
    source: &S,
    cell: GridCoord,
    iso_level: f32,
) -> crate::alloc_prelude::Vec<Triangle> {
    let (triangles, count) = process_cell_no_alloc(source, cell, iso_level);
    triangles[..count].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::linear_index;
    use crate::types::GridDims;

    /// Mock grid with explicit voxel values
    struct ArrayGrid<const N: usize> {
        dims: GridDims,
        values: [f32; N],
    }

    impl<const N: usize> DensitySource for ArrayGrid<N> {
        fn dims(&self) -> GridDims {
            self.dims
        }

        fn density(&self, coord: GridCoord) -> f32 {
            self.values[linear_index(coord, self.dims)]
        }
    }

    /// 2x2x2 grid whose voxel values are given in cube-corner order
    fn single_cell(corner_values: [f32; 8]) -> ArrayGrid<8> {
        let dims = GridDims::cube(2).unwrap();
        let mut values = [0.0; 8];
        for (i, &corner) in cube_corners(GridCoord::default()).iter().enumerate() {
            values[linear_index(corner, dims)] = corner_values[i];
        }
        ArrayGrid { dims, values }
    }

    #[test]
    fn test_classify_cube() {
        assert_eq!(classify_cube(&[0.0; 8], 0.5), 0);
        assert_eq!(classify_cube(&[1.0; 8], 0.5), 255);

        let mut values = [0.0; 8];
        values[0] = 1.0;
        assert_eq!(classify_cube(&values, 0.5), 1);

        values[1] = 1.0;
        assert_eq!(classify_cube(&values, 0.5), 3);
    }

    #[test]
    fn test_classify_is_strict() {
        // A corner exactly at the iso-level counts as below
        assert_eq!(classify_cube(&[0.5; 8], 0.5), 0);
    }

    #[test]
    fn test_interpolation_factor() {
        assert!((interpolation_factor(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((interpolation_factor(0.0, 1.0, 0.25) - 0.25).abs() < 1e-6);
        assert!((interpolation_factor(1.0, 0.0, 0.25) - 0.75).abs() < 1e-6);
        assert_eq!(interpolation_factor(0.3, 0.3, 0.3), 0.5);
        assert_eq!(interpolation_factor(0.0, 1.0, 2.0), 1.0);
        assert_eq!(interpolation_factor(0.0, 1.0, -2.0), 0.0);
    }

    #[test]
    fn test_interpolate_vertex_at_corners() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let p1 = Point3::new(1.0, 0.0, 0.0);

        let result = interpolate_vertex(p0, p1, 0.5, 1.0, 0.5);
        assert!(result.x.abs() < 1e-6);

        let result = interpolate_vertex(p0, p1, 0.0, 0.5, 0.5);
        assert!((result.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cube_corners_order() {
        let corners = cube_corners(GridCoord::new(2, 3, 4));
        assert_eq!(corners[0], GridCoord::new(2, 3, 4));
        assert_eq!(corners[2], GridCoord::new(3, 3, 5));
        assert_eq!(corners[6], GridCoord::new(3, 4, 5));
        assert_eq!(corners[7], GridCoord::new(2, 4, 5));
    }

    #[test]
    fn test_single_corner_gives_one_triangle() {
        let mut values = [0.0; 8];
        values[6] = 1.0;
        let grid = single_cell(values);

        let (triangles, count) = process_cell_no_alloc(&grid, GridCoord::default(), 0.5);
        assert_eq!(count, 1);

        // Each vertex sits halfway along an edge leaving corner 6 = (1,1,1)
        for v in &triangles[0] {
            let p = v.position;
            let halves = [p.x, p.y, p.z]
                .iter()
                .filter(|&&c| (c - 0.5).abs() < 1e-6)
                .count();
            let ones = [p.x, p.y, p.z]
                .iter()
                .filter(|&&c| (c - 1.0).abs() < 1e-6)
                .count();
            assert_eq!((halves, ones), (1, 2), "vertex {:?} not on an edge of corner 6", p);
        }
    }

    #[test]
    fn test_top_face_gives_planar_quad() {
        let grid = single_cell([0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);

        let triangles = process_cell(&grid, GridCoord::default(), 0.5);
        assert_eq!(triangles.len(), 2);

        for tri in &triangles {
            for v in tri {
                assert!((v.position.y - 0.5).abs() < 1e-6);
                assert!((v.normal.y - 1.0).abs() < 1e-6, "normal {:?}", v.normal);
            }
        }
    }

    #[test]
    fn test_cell_outside_domain_is_empty() {
        let grid = single_cell([0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
        let (_, count) = process_cell_no_alloc(&grid, GridCoord::new(1, 0, 0), 0.5);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_flat_gradient_gives_zero_normal() {
        let grid = single_cell([0.7; 8]);
        assert_eq!(corner_normal(&grid, GridCoord::default()), Point3::ZERO);
    }

    #[test]
    fn test_alloc_and_no_alloc_match() {
        let grid = single_cell([0.9, 0.1, 0.6, 0.2, 0.4, 0.8, 0.0, 0.3]);

        let alloc = process_cell(&grid, GridCoord::default(), 0.5);
        let (fixed, count) = process_cell_no_alloc(&grid, GridCoord::default(), 0.5);

        assert_eq!(alloc.len(), count);
        assert_eq!(&alloc[..], &fixed[..count]);
    }
}
