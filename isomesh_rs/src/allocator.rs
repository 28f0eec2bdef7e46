//! Lock-free triangle slot allocation.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{IsoError, Result};

/// Hands out unique triangle slot indices to concurrent workers.
///
/// A single atomic counter; `reserve` is one `fetch_add`, so any number of
/// threads can call it without locking. Slots below `capacity` are granted,
/// anything past it is reported as [`IsoError::CapacityOverflow`].
#[derive(Debug)]
pub struct TriangleAllocator {
    next: AtomicUsize,
    capacity: usize,
}

impl TriangleAllocator {
    /// Create an allocator for `capacity` triangle slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            next: AtomicUsize::new(0),
            capacity,
        }
    }

    /// Reserve the next free slot.
    ///
    /// Returns the previous counter value. No two calls ever return the same
    /// index.
    #[inline]
    pub fn reserve(&self) -> Result<usize> {
        let slot = self.next.fetch_add(1, Ordering::Relaxed);
        if slot >= self.capacity {
            return Err(IsoError::CapacityOverflow {
                requested: slot,
                capacity: self.capacity,
            });
        }
        Ok(slot)
    }

    /// Number of slots granted so far (never more than `capacity`).
    #[inline]
    pub fn count(&self) -> usize {
        self.next.load(Ordering::Acquire).min(self.capacity)
    }

    /// Total number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether a reservation was ever refused.
    #[inline]
    pub fn overflowed(&self) -> bool {
        self.next.load(Ordering::Acquire) > self.capacity
    }

    /// Reset the counter to zero for another run.
    ///
    /// Takes `&mut self`, so it cannot race with outstanding reservations.
    pub fn reset(&mut self) {
        *self.next.get_mut() = 0;
    }
}
