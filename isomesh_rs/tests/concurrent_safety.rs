//! Concurrent safety tests for isomesh_rs.
//!
//! These tests verify that slot reservation and the shared output buffer stay
//! correct when hammered from many OS threads at once.

use isomesh_rs::prelude::*;
use isomesh_rs::{TriangleAllocator, TriangleBuffer, Vertex};
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

// =============================================================================
// Test Grid Factories
// =============================================================================

/// Create a sphere grid for concurrent testing
fn create_sphere_grid(n: u32) -> VoxelGrid {
    let c = (n as f32 - 1.0) * 0.5;
    let r = n as f32 * 0.35;
    VoxelGrid::from_fn(GridDims::cube(n).unwrap(), |p| {
        let d = Point3::new(p.x as f32 - c, p.y as f32 - c, p.z as f32 - c).length();
        r - d
    })
}

// =============================================================================
// Allocator Tests
// =============================================================================

#[test]
fn test_concurrent_reserve_unique() {
    let num_threads = 8;
    let per_thread = 10_000;
    let alloc = Arc::new(TriangleAllocator::new(num_threads * per_thread));
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let alloc = Arc::clone(&alloc);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..per_thread)
                    .map(|_| alloc.reserve().unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for slot in handle.join().unwrap() {
            assert!(seen.insert(slot), "slot {} handed out twice", slot);
        }
    }

    assert_eq!(seen.len(), num_threads * per_thread);
    assert_eq!(alloc.count(), num_threads * per_thread);
    assert!(seen.iter().all(|&s| s < alloc.capacity()));
}

#[test]
fn test_concurrent_reserve_respects_capacity() {
    let num_threads = 8;
    let capacity = 1000;
    let alloc = Arc::new(TriangleAllocator::new(capacity));

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let alloc = Arc::clone(&alloc);
            thread::spawn(move || {
                let mut granted = 0;
                let mut refused = 0;
                for _ in 0..500 {
                    match alloc.reserve() {
                        Ok(_) => granted += 1,
                        Err(IsoError::CapacityOverflow { .. }) => refused += 1,
                        Err(e) => panic!("unexpected error {}", e),
                    }
                }
                (granted, refused)
            })
        })
        .collect();

    let (granted, refused) = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .fold((0, 0), |(g, r), (dg, dr)| (g + dg, r + dr));

    assert_eq!(granted, capacity);
    assert_eq!(refused, num_threads * 500 - capacity);
    assert_eq!(alloc.count(), capacity);
    assert!(alloc.overflowed());
}

// =============================================================================
// Buffer Tests
// =============================================================================

#[test]
fn test_concurrent_emit_from_threads() {
    let num_threads = 4;
    let per_thread = 2_500;
    let buffer = Arc::new(TriangleBuffer::with_capacity(num_threads * per_thread));

    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || {
                for i in 0..per_thread {
                    let id = (t * per_thread + i) as f32;
                    let v = Vertex::new(Point3::splat(id), Point3::ZERO);
                    buffer.emit([v, v, v]).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let buffer = Arc::try_unwrap(buffer).ok().unwrap();
    let mesh = buffer.into_mesh(1.0);
    assert_eq!(mesh.triangle_count(), num_threads * per_thread);

    let ids: HashSet<u32> = mesh.triangles().map(|tri| tri[0].position.x as u32).collect();
    assert_eq!(ids.len(), num_threads * per_thread);
}

// =============================================================================
// Concurrent Extraction Tests
// =============================================================================

#[test]
fn test_concurrent_extractions_share_grid() {
    let grid = Arc::new(create_sphere_grid(16));
    let expected = SurfaceExtractor::new(&ExtractionConfig::default().with_iso_level(0.0))
        .unwrap()
        .extract_sequential(grid.as_ref())
        .unwrap()
        .triangle_count();
    assert!(expected > 0);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let grid = Arc::clone(&grid);
            thread::spawn(move || {
                let config = ExtractionConfig::default()
                    .with_iso_level(0.0)
                    .with_threads(t % 2 + 1);
                let extractor = SurfaceExtractor::new(&config).unwrap();
                extractor.extract(grid.as_ref()).unwrap().triangle_count()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_repeated_parallel_runs_stable() {
    let grid = create_sphere_grid(20);
    let extractor =
        SurfaceExtractor::new(&ExtractionConfig::default().with_iso_level(0.0)).unwrap();

    let first = extractor.extract(&grid).unwrap().triangle_count();
    for _ in 0..10 {
        assert_eq!(extractor.extract(&grid).unwrap().triangle_count(), first);
    }
}
