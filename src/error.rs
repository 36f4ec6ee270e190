//! Error types for the LU solver.
//!
//! This module provides structured error handling for factorization and
//! solving, using `thiserror` for library error types with helper methods
//! for error categorization.

use thiserror::Error;

/// Errors that can occur while factorizing or solving a linear system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Coefficient matrix is not square.
    #[error("matrix must be square: got {rows} rows and {cols} columns")]
    NotSquare {
        /// Number of rows in the supplied matrix
        rows: usize,
        /// Number of columns in the supplied matrix
        cols: usize,
    },

    /// Right-hand side length does not match the matrix dimension.
    #[error("right-hand side length mismatch: expected {expected}, got {got}")]
    RhsLengthMismatch {
        /// The matrix dimension n
        expected: usize,
        /// Actual number of elements provided
        got: usize,
    },

    /// A pivot was exactly zero: the active column has no nonzero entry at or
    /// below the diagonal, so no valid pivot exists even after row reordering.
    #[error("zero pivot encountered at row {row}: matrix is singular")]
    SingularMatrix {
        /// 1-based row of the zero pivot
        row: usize,
    },
}

/// A specialized `Result` type for solver operations.
pub type Result<T> = std::result::Result<T, SolveError>;

impl SolveError {
    /// Returns `true` if this is a shape error.
    ///
    /// This includes `NotSquare` and `RhsLengthMismatch` variants.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            SolveError::NotSquare { .. } | SolveError::RhsLengthMismatch { .. }
        )
    }

    /// Returns `true` if this is a singular matrix error.
    pub fn is_singular_error(&self) -> bool {
        matches!(self, SolveError::SingularMatrix { .. })
    }
}
