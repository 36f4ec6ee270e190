//! Top-level solve: shape validation, factorization, and both substitution
//! phases sharing a single trace.

use crate::error::Result;
use crate::factorize::factorize;
use crate::substitute::{backward_substitute, forward_substitute};
use crate::trace::Trace;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Complete result of one solve: the triangular factors, the permutation,
/// both solution vectors, and the full computation trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Unit lower triangular factor
    pub l: Array2<f64>,
    /// Upper triangular factor
    pub u: Array2<f64>,
    /// `permutation[i]` is the original index of the row that ended in
    /// position `i`. Informational only: `x` already solves the original
    /// system and never needs the permutation re-applied.
    pub permutation: Vec<usize>,
    /// Intermediate solution of `L·y = b` (with `b` permuted)
    pub y: Array1<f64>,
    /// Solution of `A·x = b`
    pub x: Array1<f64>,
    /// Ordered record of every computation step
    pub trace: Trace,
}

/// Solve `A·x = b` by LU factorization with partial pivoting.
///
/// The inputs are left untouched; the solver works on its own copies. Shapes
/// are re-validated before any arithmetic even though callers are expected to
/// supply a square system. On a singular matrix the error reports the 1-based
/// row of the failing pivot and no solution vectors are fabricated.
pub fn solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Solution> {
    let mut trace = Trace::new();

    log::debug!("solving {}x{} dense system", a.nrows(), a.ncols());
    let factors = factorize(a, b, &mut trace)?;
    let y = forward_substitute(&factors.l, &factors.permuted_b, &mut trace);
    let x = backward_substitute(&factors.u, &y, &mut trace);
    log::debug!("solve finished with {} recorded steps", trace.len());

    Ok(Solution {
        l: factors.l,
        u: factors.u,
        permutation: factors.permutation,
        y,
        x,
        trace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolveError;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_solve_small_system() {
        let a = array![[2.0, 1.0], [1.0, 3.0]];
        let b = array![3.0, 5.0];

        let solution = solve(&a, &b).expect("solve should succeed");

        // Check A·x = b against the original inputs.
        for i in 0..2 {
            let ax: f64 = (0..2).map(|j| a[[i, j]] * solution.x[j]).sum();
            assert_relative_eq!(ax, b[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_solve_leaves_inputs_untouched() {
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let b = array![1.0, 2.0];
        let a_before = a.clone();
        let b_before = b.clone();

        solve(&a, &b).expect("solve should succeed");

        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_shape_errors_surface_before_any_arithmetic() {
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let b = array![1.0, 2.0];

        let err = solve(&a, &b).unwrap_err();
        assert_eq!(err, SolveError::NotSquare { rows: 2, cols: 3 });

        let a = array![[1.0, 0.0], [0.0, 1.0]];
        let b = array![1.0];
        let err = solve(&a, &b).unwrap_err();
        assert_eq!(
            err,
            SolveError::RhsLengthMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_singular_system_reports_no_solution() {
        let a = array![[0.0, 0.0], [0.0, 1.0]];
        let b = array![1.0, 1.0];

        let err = solve(&a, &b).unwrap_err();
        assert!(err.is_singular_error());
    }

    #[test]
    fn test_one_by_one_system() {
        let a = array![[4.0]];
        let b = array![2.0];

        let solution = solve(&a, &b).expect("solve should succeed");
        assert_relative_eq!(solution.x[0], 0.5);
        assert_eq!(solution.l[[0, 0]], 1.0);
        assert_eq!(solution.u[[0, 0]], 4.0);
        assert_eq!(solution.permutation, vec![0]);
    }

    #[test]
    fn test_one_by_one_zero_is_singular() {
        let a = array![[0.0]];
        let b = array![1.0];

        let err = solve(&a, &b).unwrap_err();
        assert_eq!(err, SolveError::SingularMatrix { row: 1 });
    }
}
