//! Pre-sized output buffer shared by all extraction workers.

use std::cell::UnsafeCell;

use isomesh_core::{Triangle, Vertex};

use crate::allocator::TriangleAllocator;
use crate::error::Result;
use crate::mesh::Mesh;

/// Worst-case sized triangle storage with slot reservation built in.
///
/// Workers call [`emit`](Self::emit) concurrently through a shared reference.
/// Each call reserves a fresh slot from the allocator and writes only that
/// slot, so no two writers ever touch the same memory and no lock is needed.
pub struct TriangleBuffer {
    slots: Box<[UnsafeCell<Triangle>]>,
    allocator: TriangleAllocator,
}

// Safety: slots are only written through `emit`, which writes the single index
// returned by `TriangleAllocator::reserve`. Reserved indices are unique, so
// concurrent writers never alias. Reads happen only in `into_mesh`, which
// takes `self` by value after all writers are gone.
unsafe impl Sync for TriangleBuffer {}

impl TriangleBuffer {
    /// Allocate storage for `capacity` triangles.
    pub fn with_capacity(capacity: usize) -> Self {
        let empty = [Vertex::default(); 3];
        let slots = (0..capacity).map(|_| UnsafeCell::new(empty)).collect();
        Self {
            slots,
            allocator: TriangleAllocator::new(capacity),
        }
    }

    /// Reserve a slot and store one triangle in it.
    ///
    /// Returns the slot index, or `CapacityOverflow` if the buffer is full.
    #[inline]
    pub fn emit(&self, triangle: Triangle) -> Result<usize> {
        let slot = self.allocator.reserve()?;
        // Safety: `slot` is unique to this call and below capacity.
        unsafe {
            *self.slots[slot].get() = triangle;
        }
        Ok(slot)
    }

    /// Number of triangles written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.allocator.count()
    }

    /// True if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Triangle slots pre-allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.allocator.capacity()
    }

    /// Truncate to the written range and assemble the mesh.
    ///
    /// `scale` multiplies every position (world units per voxel).
    pub fn into_mesh(self, scale: f32) -> Mesh {
        let count = self.allocator.count();
        let triangles = self
            .slots
            .into_vec()
            .into_iter()
            .take(count)
            .map(UnsafeCell::into_inner);
        Mesh::from_triangles(triangles, scale)
    }
}
