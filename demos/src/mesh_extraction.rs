//! Terrain Mesh Extraction Demo
//!
//! This demo runs the full isomesh pipeline on procedural noise terrain:
//! 1. Fill a voxel grid with `0.5 + fbm(coord / dims)`
//! 2. Extract the iso-surface sequentially and in parallel
//! 3. Stream it through the callback path
//! 4. Report mesh statistics
//! 5. Export to OBJ
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --bin mesh_extraction -- [dim] [octaves] [seed] [iso] [output.obj]
//! RUST_LOG=debug cargo run --release --bin mesh_extraction -- 64 4 42
//! ```

use std::env;
use std::path::Path;
use std::str::FromStr;

use instant::Instant;
use log::error;

use isomesh_rs::{DensityField, ExtractionConfig, SurfaceExtractor};

/// Parse positional argument `index`, falling back to `default`.
fn arg<T: FromStr>(args: &[String], index: usize, default: T) -> T {
    args.get(index)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn main() {
    env_logger::init();

    println!("═══════════════════════════════════════════════════════════════");
    println!("          isomesh Terrain Extraction Demo");
    println!("═══════════════════════════════════════════════════════════════");
    println!();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: {} [dim] [octaves] [seed] [iso] [output.obj]", args[0]);
        println!();
        println!("Using defaults: 64³ grid, 4 octaves, seed 42, iso 0.5 → output/terrain.obj");
        println!();
    }

    let dim: i64 = arg(&args, 1, 64);
    let octaves: u32 = arg(&args, 2, 4);
    let seed: u32 = arg(&args, 3, 42);
    let iso_level: f32 = arg(&args, 4, 0.5);
    let output_path: String = arg(&args, 5, "output/terrain.obj".to_string());

    let config = ExtractionConfig::new(dim, dim, dim)
        .with_octaves(octaves)
        .with_seed(seed)
        .with_iso_level(iso_level)
        .with_frequency(4.0);

    if let Err(e) = config.validate() {
        error!("invalid configuration: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Ensure output directory exists
    if let Some(parent) = Path::new(&output_path).parent() {
        std::fs::create_dir_all(parent).ok();
    }

    // =========================================================================
    // Step 1: Generate density grid
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 1: Generate Density Grid                               │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let field = match DensityField::terrain(&config) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error building density field: {}", e);
            std::process::exit(1);
        }
    };

    let start = Instant::now();
    let grid = field.generate();
    let fill_time = start.elapsed();

    let dims = grid.dims();
    let (lo, hi) = grid.value_range();
    println!("  Grid:            {}×{}×{}", dims.x(), dims.y(), dims.z());
    println!("  Voxels:          {}", dims.voxel_count());
    println!("  Cells:           {}", dims.cell_count());
    println!("  Octaves / seed:  {} / {}", octaves, seed);
    println!("  Density range:   {:.4} → {:.4}", lo, hi);
    println!("  Fill time:       {:.3}s", fill_time.as_secs_f64());
    if grid.is_homogeneous(iso_level) {
        println!("  Warning:         iso-level {} does not cross the field", iso_level);
    }
    println!();

    // =========================================================================
    // Step 2: Extraction Benchmarks
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 2: Surface Extraction                                  │");
    println!("└─────────────────────────────────────────────────────────────┘");
    println!();

    let extractor = match SurfaceExtractor::new(&config) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error creating extractor: {}", e);
            std::process::exit(1);
        }
    };

    // Sequential extraction (single-threaded)
    println!("  [Sequential Extraction]");
    let start = Instant::now();
    let mesh_seq = match extractor.extract_sequential(&grid) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error during sequential extraction: {}", e);
            std::process::exit(1);
        }
    };
    let seq_time = start.elapsed();
    println!("    Triangles:     {}", mesh_seq.triangle_count());
    println!("    Time:          {:.3}s", seq_time.as_secs_f64());
    println!("    Throughput:    {:.0} cells/sec",
             dims.cell_count() as f64 / seq_time.as_secs_f64());
    println!();

    // Parallel extraction (rayon, lock-free slot reservation)
    println!("  [Parallel Extraction]");
    let start = Instant::now();
    let mesh = match extractor.extract(&grid) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error during parallel extraction: {}", e);
            std::process::exit(1);
        }
    };
    let par_time = start.elapsed();
    println!("    Triangles:     {}", mesh.triangle_count());
    println!("    Time:          {:.3}s", par_time.as_secs_f64());
    println!("    Throughput:    {:.0} cells/sec",
             dims.cell_count() as f64 / par_time.as_secs_f64());
    println!("    Speedup:       {:.2}x", seq_time.as_secs_f64() / par_time.as_secs_f64());
    println!();

    // Callback-based extraction (no mesh buffers)
    println!("  [Callback Extraction]");
    let start = Instant::now();
    let mut degenerate = 0usize;
    let callback_count = extractor.extract_with_callback(&grid, |tri| {
        if tri[0].normal.length_squared() == 0.0 {
            degenerate += 1;
        }
    });
    let callback_time = start.elapsed();
    println!("    Triangles:     {}", callback_count);
    println!("    Zero normals:  {}", degenerate);
    println!("    Time:          {:.3}s", callback_time.as_secs_f64());
    println!();

    // =========================================================================
    // Step 3: Mesh Statistics
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 3: Mesh Statistics                                     │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let stats = mesh.stats();
    println!("  Triangle count:  {}", stats.triangle_count);
    println!("  Vertex count:    {}", stats.vertex_count);
    println!("  Capacity used:   {:.2}%",
             100.0 * stats.triangle_count as f64 / dims.max_triangles() as f64);
    println!("  Surface area:    {:.4}", stats.surface_area);
    println!("  Bounding box:    ({:.2}, {:.2}, {:.2}) → ({:.2}, {:.2}, {:.2})",
             stats.bbox_min.x, stats.bbox_min.y, stats.bbox_min.z,
             stats.bbox_max.x, stats.bbox_max.y, stats.bbox_max.z);
    println!();

    // =========================================================================
    // Step 4: Export to OBJ
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 4: Export to OBJ                                       │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let start = Instant::now();
    if let Err(e) = mesh.write_obj(&output_path) {
        eprintln!("Error writing output file: {}", e);
        std::process::exit(1);
    }
    let write_time = start.elapsed();

    let file_size = std::fs::metadata(&output_path).map(|m| m.len()).unwrap_or(0);
    println!("  Output file:     {}", output_path);
    println!("  File size:       {} bytes ({:.2} MB)",
             file_size, file_size as f64 / 1_000_000.0);
    println!("  Write time:      {:.3}s", write_time.as_secs_f64());
    println!();

    // =========================================================================
    // Summary
    // =========================================================================
    println!("═══════════════════════════════════════════════════════════════");
    println!("                        SUMMARY");
    println!("═══════════════════════════════════════════════════════════════");

    let total_time = fill_time + par_time + write_time;

    println!();
    println!("  Pipeline:");
    println!("    {} voxels → {} cells → {} triangles",
             dims.voxel_count(), dims.cell_count(), mesh.triangle_count());
    println!();
    println!("  Total time (parallel):  {:.3}s", total_time.as_secs_f64());
    println!();
    println!("  Extraction comparison:");
    println!("    Sequential:    {:.3}s", seq_time.as_secs_f64());
    println!("    Parallel:      {:.3}s ({:.2}x speedup)",
             par_time.as_secs_f64(),
             seq_time.as_secs_f64() / par_time.as_secs_f64());
    println!("    Callback:      {:.3}s", callback_time.as_secs_f64());
    println!();
    println!("═══════════════════════════════════════════════════════════════");
}
