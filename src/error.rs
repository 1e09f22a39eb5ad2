//! Error taxonomy for startup, compute dispatch, the interop protocol and mutations.

use thiserror::Error;

/// Invalid startup configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("world must have non-zero dimensions, got {width}x{height}")]
    EmptyWorld { width: u32, height: u32 },
    #[error("target frame rate must be non-zero")]
    ZeroFrameRate,
    #[error("cell size must be non-zero")]
    ZeroCellSize,
}

/// Fatal failures while bringing the engine up. No partial engine survives one.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to build compute context: {0}")]
    Device(String),
    #[error("failed to allocate {what} ({cells} cells)")]
    Allocation { what: &'static str, cells: usize },
}

/// A single compute submission failed. The frame is skipped, the loop continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("kernel shape mismatch: expected {expected} cells, found {found}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("device error: {0}")]
    Device(String),
}

/// Violations of the graphics/compute ownership protocol.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InteropError {
    #[error("shared surfaces are already held by the compute context")]
    AlreadyAcquired,
    #[error("shared surfaces cannot be displayed while held by the compute context")]
    HeldByCompute,
}

/// Errors returned by engine operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    Interop(#[from] InteropError),
    #[error("could not allocate {cells} cells for the randomness field")]
    Starved { cells: usize },
    #[error("cell ({row}, {col}) lies outside the world")]
    OutOfBounds { row: usize, col: usize },
}

impl EngineError {
    /// Whether the frame loop must stop. Everything else is logged and skipped.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::Interop(_))
    }
}
