//! LU factorization with partial pivoting (Doolittle elimination).
//!
//! Each elimination step selects a pivot row, fills one row of U left to
//! right and one column of L top to bottom, and records every computed entry
//! in the trace. The working copy of the matrix is row-swapped during
//! pivoting but never eliminated in place: it keeps its permuted original
//! values, and only L and U accumulate the reduction.

use crate::error::{Result, SolveError};
use crate::pivot::select_pivot_row;
use crate::trace::{Term, Trace, TraceEntry};
use ndarray::{Array1, Array2};

/// LU factors of a row-permuted square matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Factorization {
    /// Unit lower triangular factor
    pub l: Array2<f64>,
    /// Upper triangular factor
    pub u: Array2<f64>,
    /// `permutation[i]` is the original index of the row now in position `i`
    pub permutation: Vec<usize>,
    /// Right-hand side co-permuted with the matrix rows
    pub permuted_b: Array1<f64>,
}

/// Factor a square matrix as `L·U` of its row-permuted form.
///
/// Shapes are validated before any arithmetic: the matrix must be square and
/// `b` must have the matrix dimension. Fails with
/// [`SolveError::SingularMatrix`] at the first exactly-zero pivot, in which
/// case the partially filled factors are discarded and nothing more is
/// appended to the trace.
pub fn factorize(a: &Array2<f64>, b: &Array1<f64>, trace: &mut Trace) -> Result<Factorization> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(SolveError::NotSquare { rows, cols });
    }
    if b.len() != rows {
        return Err(SolveError::RhsLengthMismatch {
            expected: rows,
            got: b.len(),
        });
    }

    let n = rows;
    let mut a = a.clone();
    let mut b = b.clone();
    let mut l: Array2<f64> = Array2::zeros((n, n));
    let mut u: Array2<f64> = Array2::zeros((n, n));
    let mut permutation: Vec<usize> = (0..n).collect();

    for i in 0..n {
        let pivot_row = select_pivot_row(&a, i);
        if pivot_row != i {
            swap_rows(&mut a, i, pivot_row);
            b.swap(i, pivot_row);
            permutation.swap(i, pivot_row);
            log::debug!("step {}: swapped row {} with row {}", i, i, pivot_row);
            trace.push(TraceEntry::PivotSwap {
                row: i,
                with: pivot_row,
            });
        }

        // Row i of U, left to right.
        for j in i..n {
            let terms: Vec<Term> = (0..i).map(|k| Term::new(l[[i, k]], u[[k, j]])).collect();
            let sum: f64 = terms.iter().map(Term::product).sum();
            let value = a[[i, j]] - sum;
            u[[i, j]] = value;
            trace.push(TraceEntry::UEntry {
                row: i,
                col: j,
                minuend: a[[i, j]],
                terms,
                value,
            });
        }

        // Exact equality: near-zero pivots still divide, only a true zero
        // (no usable row exchange left) is a failure.
        if u[[i, i]] == 0.0 {
            return Err(SolveError::SingularMatrix { row: i + 1 });
        }

        l[[i, i]] = 1.0;
        trace.push(TraceEntry::LUnit { row: i });

        // Column i of L, top to bottom.
        let pivot = u[[i, i]];
        for j in (i + 1)..n {
            let terms: Vec<Term> = (0..i).map(|k| Term::new(l[[j, k]], u[[k, i]])).collect();
            let sum: f64 = terms.iter().map(Term::product).sum();
            let value = (a[[j, i]] - sum) / pivot;
            l[[j, i]] = value;
            trace.push(TraceEntry::LEntry {
                row: j,
                col: i,
                minuend: a[[j, i]],
                terms,
                pivot,
                value,
            });
        }
    }

    Ok(Factorization {
        l,
        u,
        permutation,
        permuted_b: b,
    })
}

fn swap_rows(a: &mut Array2<f64>, i: usize, j: usize) {
    for col in 0..a.ncols() {
        let tmp = a[[i, col]];
        a[[i, col]] = a[[j, col]];
        a[[j, col]] = tmp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::TraceKind;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_factorize_without_pivoting() {
        let a = array![[2.0, 1.0], [1.0, 3.0]];
        let b = array![1.0, 2.0];
        let mut trace = Trace::new();

        let f = factorize(&a, &b, &mut trace).expect("factorization should succeed");

        assert_eq!(f.permutation, vec![0, 1]);
        assert_relative_eq!(f.u[[0, 0]], 2.0);
        assert_relative_eq!(f.u[[0, 1]], 1.0);
        assert_relative_eq!(f.l[[1, 0]], 0.5);
        assert_relative_eq!(f.u[[1, 1]], 2.5);
        assert_eq!(f.l[[0, 0]], 1.0);
        assert_eq!(f.l[[1, 1]], 1.0);
        // No swap happened, so no pivot entry was recorded.
        assert!(trace.iter().all(|e| e.kind() != TraceKind::PivotSwap));
    }

    #[test]
    fn test_factorize_swaps_rows_and_permutes_b() {
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let b = array![5.0, 7.0];
        let mut trace = Trace::new();

        let f = factorize(&a, &b, &mut trace).expect("factorization should succeed");

        assert_eq!(f.permutation, vec![1, 0]);
        assert_eq!(f.permuted_b, array![7.0, 5.0]);
        assert_relative_eq!(f.u[[0, 0]], 1.0);
        assert_relative_eq!(f.u[[1, 1]], 1.0);
        assert_relative_eq!(f.l[[1, 0]], 0.0);
    }

    #[test]
    fn test_entry_order_within_one_step() {
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let b = array![1.0, 1.0];
        let mut trace = Trace::new();

        factorize(&a, &b, &mut trace).expect("factorization should succeed");

        let kinds: Vec<TraceKind> = trace.iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                TraceKind::PivotSwap,
                TraceKind::UEntry,
                TraceKind::UEntry,
                TraceKind::LEntry,
                TraceKind::LEntry,
                TraceKind::UEntry,
                TraceKind::LEntry,
            ]
        );
    }

    #[test]
    fn test_zero_column_is_singular_at_first_step() {
        let a = array![[0.0, 0.0], [0.0, 1.0]];
        let b = array![1.0, 1.0];
        let mut trace = Trace::new();

        let err = factorize(&a, &b, &mut trace).unwrap_err();
        assert_eq!(err, SolveError::SingularMatrix { row: 1 });
    }

    #[test]
    fn test_singularity_found_during_elimination() {
        // Second column becomes dependent after the first elimination step.
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        let b = array![1.0, 2.0];
        let mut trace = Trace::new();

        let err = factorize(&a, &b, &mut trace).unwrap_err();
        assert_eq!(err, SolveError::SingularMatrix { row: 2 });
    }

    #[test]
    fn test_rejects_non_square_matrix() {
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let b = array![1.0, 2.0];
        let mut trace = Trace::new();

        let err = factorize(&a, &b, &mut trace).unwrap_err();
        assert_eq!(err, SolveError::NotSquare { rows: 2, cols: 3 });
        assert!(trace.is_empty());
    }

    #[test]
    fn test_rejects_wrong_rhs_length() {
        let a = array![[1.0, 0.0], [0.0, 1.0]];
        let b = array![1.0, 2.0, 3.0];
        let mut trace = Trace::new();

        let err = factorize(&a, &b, &mut trace).unwrap_err();
        assert_eq!(
            err,
            SolveError::RhsLengthMismatch {
                expected: 2,
                got: 3
            }
        );
        assert!(trace.is_empty());
    }
}
