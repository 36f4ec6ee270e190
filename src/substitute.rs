//! Forward and backward substitution over the triangular factors.

use crate::trace::{Term, Trace, TraceEntry};
use ndarray::{Array1, Array2};

/// Solve `L·y = b` top to bottom.
///
/// `l` must be unit lower triangular, so no division is needed. Each computed
/// `y[i]` is appended to the trace with the products it subtracted.
pub fn forward_substitute(l: &Array2<f64>, b: &Array1<f64>, trace: &mut Trace) -> Array1<f64> {
    let n = b.len();
    let mut y: Array1<f64> = Array1::zeros(n);

    for i in 0..n {
        let terms: Vec<Term> = (0..i).map(|k| Term::new(l[[i, k]], y[k])).collect();
        let sum: f64 = terms.iter().map(Term::product).sum();
        let value = b[i] - sum;
        y[i] = value;
        trace.push(TraceEntry::YEntry {
            row: i,
            minuend: b[i],
            terms,
            value,
        });
    }
    y
}

/// Solve `U·x = y` bottom to top.
///
/// Every diagonal entry of `u` is nonzero when the factorization succeeded,
/// so no zero check is repeated here. Steps are recorded in computation
/// order, from the last row up.
pub fn backward_substitute(u: &Array2<f64>, y: &Array1<f64>, trace: &mut Trace) -> Array1<f64> {
    let n = y.len();
    let mut x: Array1<f64> = Array1::zeros(n);

    for i in (0..n).rev() {
        let terms: Vec<Term> = ((i + 1)..n).map(|k| Term::new(u[[i, k]], x[k])).collect();
        let sum: f64 = terms.iter().map(Term::product).sum();
        let pivot = u[[i, i]];
        let value = (y[i] - sum) / pivot;
        x[i] = value;
        trace.push(TraceEntry::XEntry {
            row: i,
            minuend: y[i],
            terms,
            pivot,
            value,
        });
    }
    x
}
