//! Error types

use thiserror::Error;

/// Errors that can occur in matrix operations and factorizations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Operation requires a square matrix, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("Matrix is singular or nearly singular")]
    SingularMatrix,
    #[error("Matrix dimensions mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("Index {index} out of range for dimension {len}")]
    IndexError { index: usize, len: usize },
}

/// Errors that can occur while loading a [`Precision`](crate::Precision) policy
#[derive(Error, Debug)]
pub enum PrecisionError {
    #[error("Failed to read precision config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse precision config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid {name}: {value} (must be finite and non-negative)")]
    InvalidLimit { name: &'static str, value: f64 },
}
