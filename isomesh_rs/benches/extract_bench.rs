//! Criterion benchmarks for isomesh_rs extraction performance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use isomesh_rs::prelude::*;

/// Noise terrain grid of the given size
fn make_terrain(n: i64) -> (ExtractionConfig, VoxelGrid) {
    let config = ExtractionConfig::new(n, n, n)
        .with_octaves(4)
        .with_frequency(4.0)
        .with_seed(42);
    let grid = DensityField::terrain(&config).unwrap().generate();
    (config, grid)
}

fn bench_density_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("density_fill");

    for n in [16i64, 32, 64] {
        let config = ExtractionConfig::new(n, n, n).with_octaves(4).with_seed(42);
        let field = DensityField::terrain(&config).unwrap();
        group.throughput(Throughput::Elements((n * n * n) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &field, |b, field| {
            b.iter(|| black_box(field.generate()))
        });
    }

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for n in [16i64, 32, 64] {
        let (config, grid) = make_terrain(n);
        let extractor = SurfaceExtractor::new(&config).unwrap();
        group.throughput(Throughput::Elements(grid.dims().cell_count() as u64));

        group.bench_with_input(BenchmarkId::new("parallel", n), &grid, |b, grid| {
            b.iter(|| black_box(extractor.extract(black_box(grid)).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("sequential", n), &grid, |b, grid| {
            b.iter(|| black_box(extractor.extract_sequential(black_box(grid)).unwrap()))
        });
    }

    group.finish();
}

fn bench_callback(c: &mut Criterion) {
    let (config, grid) = make_terrain(32);
    let extractor = SurfaceExtractor::new(&config).unwrap();

    c.bench_function("extract_callback_32", |b| {
        b.iter(|| {
            let mut area = 0.0f32;
            extractor.extract_with_callback(black_box(&grid), |tri| {
                let e1 = tri[1].position - tri[0].position;
                let e2 = tri[2].position - tri[0].position;
                area += e1.cross(e2).length();
            });
            black_box(area)
        })
    });
}

fn bench_obj_export(c: &mut Criterion) {
    let (config, grid) = make_terrain(32);
    let mesh = SurfaceExtractor::new(&config)
        .unwrap()
        .extract(&grid)
        .unwrap();

    c.bench_function("to_obj_32", |b| b.iter(|| black_box(mesh.to_obj())));
}

criterion_group!(
    benches,
    bench_density_fill,
    bench_extract,
    bench_callback,
    bench_obj_export
);
criterion_main!(benches);
