//! Error types for isomesh_core operations.
//!
//! Provides a simple error enum with no external dependencies for no_std compatibility.

use core::fmt;

/// Error types that can occur during isomesh_core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// Grid dimensions are non-positive or too small to contain a single cell.
    InvalidDimensions {
        /// Requested samples along X.
        x: i64,
        /// Requested samples along Y.
        y: i64,
        /// Requested samples along Z.
        z: i64,
    },
    /// A lookup table row violates the marching cubes table invariants.
    MalformedTable {
        /// The offending row (cube configuration).
        row: usize,
        /// What was wrong with it.
        reason: &'static str,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidDimensions { x, y, z } => {
                write!(
                    f,
                    "invalid grid dimensions {}x{}x{}: every axis needs at least 2 samples",
                    x, y, z
                )
            }
            CoreError::MalformedTable { row, reason } => {
                write!(f, "malformed triangulation table at row {}: {}", row, reason)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}
