//! Error taxonomy for matrix and network operations.
//!
//! All errors are local, synchronous failures of a single call. None are
//! retryable: the same arguments will fail the same way, so callers are
//! expected to treat them as configuration bugs rather than runtime
//! conditions.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by [`Matrix`](crate::Matrix) and
/// [`NeuralNetwork`](crate::NeuralNetwork) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A matrix was constructed with a zero dimension.
    #[error("matrix dimensions must be non-zero, got {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },

    /// An elementwise operation was applied to operands of different shapes.
    #[error("shape mismatch: {lhs_rows}x{lhs_cols} does not match {rhs_rows}x{rhs_cols}")]
    ShapeMismatch {
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },

    /// Incompatible inner dimensions for a matrix product, or a vector of the
    /// wrong length passed to `predict`/`train`.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
