//! Integration tests for isomesh_rs.
//!
//! End-to-end scenarios: density generation, parallel extraction and mesh
//! assembly against known closed-form answers.

use isomesh_core::marching_cubes::{cube_corners, EDGE_CORNERS};
use isomesh_rs::prelude::*;

// =============================================================================
// Test Helpers
// =============================================================================

fn extractor(iso_level: f32) -> SurfaceExtractor {
    SurfaceExtractor::new(&ExtractionConfig::default().with_iso_level(iso_level)).unwrap()
}

/// 2x2x2 grid with the given values in cube-corner order.
fn single_cell(corner_values: [f32; 8]) -> VoxelGrid {
    let corners = cube_corners(GridCoord::default());
    VoxelGrid::from_fn(GridDims::cube(2).unwrap(), |c| {
        let i = corners.iter().position(|&k| k == c).unwrap();
        corner_values[i]
    })
}

/// Triangle geometries as sortable bit patterns.
fn geometry_multiset(mesh: &Mesh) -> Vec<[u32; 18]> {
    let mut tris: Vec<[u32; 18]> = mesh
        .triangles()
        .map(|tri| {
            let mut key = [0u32; 18];
            for (i, v) in tri.iter().enumerate() {
                let p = v.position.as_array();
                let n = v.normal.as_array();
                for axis in 0..3 {
                    key[i * 6 + axis] = p[axis].to_bits();
                    key[i * 6 + 3 + axis] = n[axis].to_bits();
                }
            }
            key
        })
        .collect();
    tris.sort_unstable();
    tris
}

fn on_segment(p: Point3, a: Point3, b: Point3) -> bool {
    let ab = b - a;
    let t = (p - a).dot(ab) / ab.length_squared();
    (-1e-6..=1.0 + 1e-6).contains(&t) && (a.lerp(b, t) - p).length() < 1e-5
}

// =============================================================================
// Homogeneous Fields
// =============================================================================

#[test]
fn test_uniform_below_iso_is_empty() {
    let grid = VoxelGrid::constant(GridDims::cube(8).unwrap(), 0.0);
    let mesh = extractor(0.5).extract(&grid).unwrap();
    assert!(mesh.is_empty());
    assert!(mesh.positions.is_empty());
}

#[test]
fn test_uniform_above_iso_is_empty() {
    let grid = VoxelGrid::constant(GridDims::cube(8).unwrap(), 1.0);
    let mesh = extractor(0.5).extract(&grid).unwrap();
    assert_eq!(mesh.triangle_count(), 0);
}

#[test]
fn test_uniform_at_iso_is_empty() {
    // Strict classification: equal to iso counts as below
    let grid = VoxelGrid::constant(GridDims::cube(4).unwrap(), 0.5);
    assert!(extractor(0.5).extract(&grid).unwrap().is_empty());
}

// =============================================================================
// Single Cell Scenarios
// =============================================================================

#[test]
fn test_single_corner_gives_one_triangle() {
    let corners = cube_corners(GridCoord::default());

    for corner in 0..8 {
        let mut values = [0.0; 8];
        values[corner] = 1.0;
        let mesh = extractor(0.5).extract(&single_cell(values)).unwrap();
        assert_eq!(mesh.triangle_count(), 1, "corner {}", corner);

        for &p in &mesh.positions {
            let adjacent = EDGE_CORNERS
                .iter()
                .filter(|&&(a, b)| a == corner || b == corner)
                .any(|&(a, b)| {
                    on_segment(p, Point3::from(corners[a]), Point3::from(corners[b]))
                });
            assert!(adjacent, "corner {}: vertex {:?} off adjacent edges", corner, p);
        }
    }
}

#[test]
fn test_top_face_gives_planar_quad() {
    let grid = single_cell([0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
    let mesh = extractor(0.5).extract(&grid).unwrap();

    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
    for p in &mesh.positions {
        assert!((p.y - 0.5).abs() < 1e-6, "vertex {:?} off the y = 0.5 plane", p);
    }
    for n in &mesh.normals {
        assert!((*n - Point3::new(0.0, 1.0, 0.0)).length() < 1e-6);
    }
    assert!((mesh.stats().surface_area - 1.0).abs() < 1e-5);
}

// =============================================================================
// Noise Terrain Scenario
// =============================================================================

#[test]
fn test_noise_terrain_8x8x8() {
    let config = ExtractionConfig::default();
    let mesh = generate_mesh(&config).unwrap();

    assert!(mesh.triangle_count() <= 5 * 7 * 7 * 7);
    assert_eq!(mesh.vertex_count(), mesh.triangle_count() * 3);
    for (i, &index) in mesh.indices.iter().enumerate() {
        assert_eq!(index as usize, i);
    }
    for n in &mesh.normals {
        let len = n.length();
        assert!(len == 0.0 || (len - 1.0).abs() < 1e-4);
    }
    // Vertices stay inside the sampled volume
    for p in &mesh.positions {
        for v in p.as_array() {
            assert!((0.0..=7.0).contains(&v));
        }
    }
}

#[test]
fn test_seeded_terrain_produces_surface() {
    let config = ExtractionConfig::new(24, 24, 24)
        .with_octaves(3)
        .with_frequency(4.0)
        .with_seed(42);
    let mesh = generate_mesh(&config).unwrap();
    assert!(mesh.triangle_count() > 0);
    assert!(mesh.triangle_count() <= 5 * 23 * 23 * 23);
}

#[test]
fn test_resolution_scales_world_size() {
    let base = ExtractionConfig::new(16, 16, 16)
        .with_octaves(2)
        .with_frequency(3.0)
        .with_seed(5);
    let unit = generate_mesh(&base).unwrap();
    let scaled = generate_mesh(&base.with_resolution(0.5)).unwrap();

    assert_eq!(unit.triangle_count(), scaled.triangle_count());
    let (u, s) = (unit.stats(), scaled.stats());
    assert!((u.surface_area * 0.25 - s.surface_area).abs() < 1e-2 * u.surface_area.max(1.0));
}

// =============================================================================
// Idempotence
// =============================================================================

#[test]
fn test_repeated_extraction_same_multiset() {
    let config = ExtractionConfig::new(20, 20, 20)
        .with_octaves(3)
        .with_frequency(3.0)
        .with_seed(7);
    let grid = DensityField::terrain(&config).unwrap().generate();
    let extractor = SurfaceExtractor::new(&config).unwrap();

    let first = extractor.extract(&grid).unwrap();
    let second = extractor.extract(&grid).unwrap();
    let sequential = extractor.extract_sequential(&grid).unwrap();

    assert_eq!(first.triangle_count(), second.triangle_count());
    assert_eq!(geometry_multiset(&first), geometry_multiset(&second));
    assert_eq!(geometry_multiset(&first), geometry_multiset(&sequential));
}

#[test]
fn test_flip_winding_reverses_every_triangle() {
    let grid = single_cell([1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    let original = extractor(0.5).extract(&grid).unwrap();
    let mut flipped = original.clone();
    flipped.flip_winding();

    let a: Vec<_> = original.triangles().collect();
    let b: Vec<_> = flipped.triangles().collect();
    assert_eq!(a[0][0], b[0][2]);
    assert_eq!(a[0][2], b[0][0]);
}

// =============================================================================
// OBJ Export
// =============================================================================

#[test]
fn test_obj_export_of_extracted_mesh() {
    let grid = single_cell([0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
    let mesh = extractor(0.5).extract(&grid).unwrap();
    let obj = mesh.to_obj();

    assert_eq!(obj.lines().filter(|l| l.starts_with("v ")).count(), 6);
    assert_eq!(obj.lines().filter(|l| l.starts_with("vn ")).count(), 6);
    assert_eq!(obj.lines().filter(|l| l.starts_with("f ")).count(), 2);
}

#[test]
fn test_custom_closure_field() {
    // Plane z = 2.5 crossing a 6x6x6 grid: two triangles per column
    let dims = GridDims::cube(6).unwrap();
    let grid = DensityField::new(dims, |p: Point3| 2.5 - p.z).generate();
    let mesh = extractor(0.0).extract(&grid).unwrap();

    assert_eq!(mesh.triangle_count(), 2 * 5 * 5);
    for p in &mesh.positions {
        assert!((p.z - 2.5).abs() < 1e-5);
    }
    for n in &mesh.normals {
        assert!((*n - Point3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }
}
