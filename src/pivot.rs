//! Pivot row selection for partial pivoting.

use ndarray::Array2;

/// Select the pivot row for elimination step `step`.
///
/// Scans column `step` at and below the diagonal of the (already permuted)
/// matrix and returns the row holding the largest absolute value. Ties break
/// to the lowest row index, so repeated solves of the same input produce
/// identical permutations and traces.
///
/// The swap itself is the caller's job; this function has no side effects.
pub fn select_pivot_row(a: &Array2<f64>, step: usize) -> usize {
    let n = a.nrows();
    debug_assert!(step < n);

    let mut max_row = step;
    let mut max_val = a[[step, step]].abs();
    for row in (step + 1)..n {
        let val = a[[row, step]].abs();
        if val > max_val {
            max_val = val;
            max_row = row;
        }
    }
    max_row
}
