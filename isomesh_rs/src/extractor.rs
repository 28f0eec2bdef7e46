//! Parallel marching cubes over a whole grid.

use instant::Instant;
use isomesh_core::marching_cubes::{process_cell_no_alloc, validate_tables};
use isomesh_core::{cell_from_index, DensitySource, Triangle};
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::buffer::TriangleBuffer;
use crate::config::{check_index_range, ExtractionConfig};
use crate::error::{IsoError, Result};
use crate::mesh::Mesh;

/// Extracts the iso-surface of a density grid.
///
/// Every cell is processed independently; the only shared mutable state is
/// the output buffer's slot counter, so the parallel path needs no locks.
/// All three extraction methods produce the same multiset of triangles.
///
/// # Example
///
/// ```ignore
/// let extractor = SurfaceExtractor::new(&config)?;
/// let mesh = extractor.extract(&grid)?;
/// println!("Generated {} triangles", mesh.triangle_count());
/// ```
#[derive(Debug)]
pub struct SurfaceExtractor {
    iso_level: f32,
    resolution: f32,
    pool: Option<rayon::ThreadPool>,
}

impl SurfaceExtractor {
    /// Create an extractor, validating the configuration and lookup tables.
    ///
    /// Fails before any work starts if either is invalid. A non-zero
    /// `num_threads` builds a dedicated worker pool of that size.
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        config.validate()?;
        validate_tables()?;

        let pool = if config.num_threads > 0 {
            debug!("building extraction pool with {} threads", config.num_threads);
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(config.num_threads)
                    .build()?,
            )
        } else {
            None
        };

        Ok(Self {
            iso_level: config.iso_level,
            resolution: config.resolution,
            pool,
        })
    }

    /// The surface threshold.
    #[inline]
    pub fn iso_level(&self) -> f32 {
        self.iso_level
    }

    /// World units per voxel applied to output positions.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Extract the mesh, processing cells in parallel.
    ///
    /// Output buffers are sized for the worst case of 5 triangles per cell
    /// before the pass starts and truncated to the emitted count afterwards.
    /// Triangle order is unspecified.
    pub fn extract<S>(&self, source: &S) -> Result<Mesh>
    where
        S: DensitySource + Sync + ?Sized,
    {
        let dims = source.dims();
        check_index_range(dims)?;

        let start = Instant::now();
        let buffer = TriangleBuffer::with_capacity(dims.max_triangles());
        debug!(
            "extracting {} cells, capacity {} triangles",
            dims.cell_count(),
            buffer.capacity()
        );

        let iso_level = self.iso_level;
        let run = || {
            (0..dims.cell_count()).into_par_iter().try_for_each(|index| {
                let cell = cell_from_index(index, dims);
                let (triangles, count) = process_cell_no_alloc(source, cell, iso_level);
                for triangle in &triangles[..count] {
                    buffer.emit(*triangle)?;
                }
                Ok::<(), IsoError>(())
            })
        };

        match &self.pool {
            Some(pool) => pool.install(run)?,
            None => run()?,
        }

        let mesh = buffer.into_mesh(self.resolution);
        self.report(&mesh, start);
        Ok(mesh)
    }

    /// Extract the mesh on the calling thread, in cell order.
    pub fn extract_sequential<S>(&self, source: &S) -> Result<Mesh>
    where
        S: DensitySource + ?Sized,
    {
        check_index_range(source.dims())?;

        let start = Instant::now();
        let mut triangles = Vec::new();
        self.for_each_triangle(source, |tri| triangles.push(tri));

        let mesh = Mesh::from_triangles(triangles, self.resolution);
        self.report(&mesh, start);
        Ok(mesh)
    }

    /// Stream triangles to a callback without building a mesh.
    ///
    /// Positions are scaled by the resolution, as in the other paths.
    /// Returns the number of triangles delivered.
    pub fn extract_with_callback<S, F>(&self, source: &S, mut callback: F) -> usize
    where
        S: DensitySource + ?Sized,
        F: FnMut(Triangle),
    {
        let scale = self.resolution;
        let mut count = 0;
        self.for_each_triangle(source, |mut tri| {
            for v in &mut tri {
                v.position = v.position * scale;
            }
            callback(tri);
            count += 1;
        });
        count
    }

    fn for_each_triangle<S, F>(&self, source: &S, mut f: F)
    where
        S: DensitySource + ?Sized,
        F: FnMut(Triangle),
    {
        let dims = source.dims();
        for index in 0..dims.cell_count() {
            let cell = cell_from_index(index, dims);
            let (triangles, count) = process_cell_no_alloc(source, cell, self.iso_level);
            for triangle in triangles.iter().take(count) {
                f(*triangle);
            }
        }
    }

    fn report(&self, mesh: &Mesh, start: Instant) {
        if mesh.is_empty() {
            warn!(
                "iso-level {} does not cross the density field; mesh is empty",
                self.iso_level
            );
        }
        info!(
            "extracted {} triangles in {:.2?}",
            mesh.triangle_count(),
            start.elapsed()
        );
    }
}
