//! Error types for isomesh_rs.

use isomesh_core::CoreError;
use thiserror::Error;

/// Errors that can occur while building a density grid or extracting a mesh.
#[derive(Error, Debug)]
pub enum IsoError {
    /// A grid axis has fewer than the 2 samples needed for one interior cell.
    #[error("invalid grid dimensions {x}x{y}x{z}: every axis needs at least 2 samples")]
    InvalidDimensions {
        /// Samples along X.
        x: i64,
        /// Samples along Y.
        y: i64,
        /// Samples along Z.
        z: i64,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// More triangles were reserved than the output buffers can hold.
    #[error("triangle capacity overflow: slot {requested} requested but capacity is {capacity}")]
    CapacityOverflow {
        /// The slot index handed out by the counter.
        requested: usize,
        /// Number of triangle slots pre-allocated.
        capacity: usize,
    },

    /// Voxel data length does not match the grid dimensions.
    #[error("invalid voxel count: expected {expected} values, got {got}")]
    InvalidVoxelCount {
        /// dimX·dimY·dimZ.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// The dedicated worker pool could not be started.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Error reported by isomesh_core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// I/O error while writing a mesh.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for isomesh_rs operations.
pub type Result<T> = std::result::Result<T, IsoError>;

impl IsoError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        IsoError::InvalidConfig {
            message: message.into(),
        }
    }
}
