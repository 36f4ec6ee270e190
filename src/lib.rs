//! Dense LU solver with partial pivoting and a step-by-step computation trace
//!
//! This crate factors a square system `A·x = b` as `L·U` of the row-permuted
//! matrix, then solves the two triangular systems by forward and backward
//! substitution. Every arithmetic step (pivot swaps, each computed L and U
//! entry, each substitution step) is recorded in an append-only [`Trace`]
//! that a display layer can render line by line.
//!
//! # Features
//!
//! - **Partial pivoting**: each elimination step moves the largest-magnitude
//!   candidate of the active column onto the diagonal, with a deterministic
//!   lowest-index tie-break
//! - **Full trace**: structured records carrying full-precision operands;
//!   rounding to 4 decimals happens only when rendering
//! - **Structured errors**: singular and malformed inputs surface as
//!   [`SolveError`] values, never as fabricated solutions
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use traced_lu::solve;
//!
//! let a = array![[0.0, 1.0], [1.0, 0.0]];
//! let b = array![1.0, 1.0];
//!
//! let solution = solve(&a, &b).unwrap();
//! assert_eq!(solution.x[0], 1.0);
//! assert_eq!(solution.permutation, vec![1, 0]);
//!
//! for line in solution.trace.lines() {
//!     println!("{line}");
//! }
//! ```

mod error;
mod factorize;
mod pivot;
mod solve;
mod substitute;
mod trace;

// Re-export main types
pub use error::{Result, SolveError};
pub use factorize::{Factorization, factorize};
pub use pivot::select_pivot_row;
pub use solve::{Solution, solve};
pub use substitute::{backward_substitute, forward_substitute};
pub use trace::{DISPLAY_DECIMALS, Term, Trace, TraceEntry, TraceKind, round_for_display};
