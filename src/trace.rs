//! Step-by-step trace of the factorization and substitution phases.
//!
//! Every arithmetic step is recorded as a [`TraceEntry`] in the order it was
//! computed. Entries store full-precision operands; rounding to
//! [`DISPLAY_DECIMALS`] decimal places happens only when an entry is formatted
//! for display, never to values that later arithmetic consumes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of decimal places used when formatting trace values for display.
pub const DISPLAY_DECIMALS: i32 = 4;

/// Round a value for display only.
pub fn round_for_display(value: f64) -> f64 {
    let scale = 10f64.powi(DISPLAY_DECIMALS);
    (value * scale).round() / scale
}

/// One product `lhs·rhs` inside the Σ sum of a trace entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// Left factor (an L or U entry)
    pub lhs: f64,
    /// Right factor (an L/U entry or an already-computed y/x value)
    pub rhs: f64,
}

impl Term {
    pub(crate) fn new(lhs: f64, rhs: f64) -> Self {
        Self { lhs, rhs }
    }

    /// The product this term contributes to the Σ sum.
    pub fn product(&self) -> f64 {
        self.lhs * self.rhs
    }
}

/// Operation kind of a trace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraceKind {
    /// Row swap performed by partial pivoting
    PivotSwap,
    /// One computed entry of U
    UEntry,
    /// One entry of L (unit diagonal or computed multiplier)
    LEntry,
    /// One forward-substitution step
    YEntry,
    /// One backward-substitution step
    XEntry,
}

/// A single recorded computation step.
///
/// Indices are 0-based in the data and rendered 1-based by the `Display`
/// implementation, matching the `U[i,j]` / `L[i,j]` / `y[i]` / `x[i]`
/// notation of the rendered lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TraceEntry {
    /// Rows `row` and `with` were swapped while pivoting elimination step `row`.
    PivotSwap { row: usize, with: usize },

    /// `U[row,col] = minuend − Σ terms`
    UEntry {
        row: usize,
        col: usize,
        /// `A[row,col]` of the permuted matrix
        minuend: f64,
        /// Products `L[row,k]·U[k,col]` for `k < row`
        terms: Vec<Term>,
        /// Full-precision result stored in U
        value: f64,
    },

    /// `L[row,row] = 1` (unit diagonal)
    LUnit { row: usize },

    /// `L[row,col] = (minuend − Σ terms) / pivot`
    LEntry {
        row: usize,
        col: usize,
        /// `A[row,col]` of the permuted matrix
        minuend: f64,
        /// Products `L[row,k]·U[k,col]` for `k < col`
        terms: Vec<Term>,
        /// Divisor `U[col,col]`
        pivot: f64,
        /// Full-precision result stored in L
        value: f64,
    },

    /// `y[row] = minuend − Σ terms`
    YEntry {
        row: usize,
        /// `b[row]` of the permuted right-hand side
        minuend: f64,
        /// Products `L[row,k]·y[k]` for `k < row`
        terms: Vec<Term>,
        /// Full-precision result stored in y
        value: f64,
    },

    /// `x[row] = (minuend − Σ terms) / pivot`
    XEntry {
        row: usize,
        /// `y[row]`
        minuend: f64,
        /// Products `U[row,k]·x[k]` for `k > row`
        terms: Vec<Term>,
        /// Divisor `U[row,row]`
        pivot: f64,
        /// Full-precision result stored in x
        value: f64,
    },
}

impl TraceEntry {
    /// The operation kind of this entry.
    ///
    /// The unit-diagonal form counts as an L entry.
    pub fn kind(&self) -> TraceKind {
        match self {
            TraceEntry::PivotSwap { .. } => TraceKind::PivotSwap,
            TraceEntry::UEntry { .. } => TraceKind::UEntry,
            TraceEntry::LUnit { .. } | TraceEntry::LEntry { .. } => TraceKind::LEntry,
            TraceEntry::YEntry { .. } => TraceKind::YEntry,
            TraceEntry::XEntry { .. } => TraceKind::XEntry,
        }
    }
}

/// Format a Σ of products as `(a·b) + (c·d)`, or `0` when the sum is empty.
fn format_terms(terms: &[Term]) -> String {
    if terms.is_empty() {
        return "0".to_string();
    }
    terms
        .iter()
        .map(|t| {
            format!(
                "({}·{})",
                round_for_display(t.lhs),
                round_for_display(t.rhs)
            )
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEntry::PivotSwap { row, with } => {
                write!(f, "Pivoting: swap row {} with row {}", row + 1, with + 1)
            }
            TraceEntry::UEntry {
                row,
                col,
                minuend,
                terms,
                value,
            } => write!(
                f,
                "U[{i},{j}] = A[{i},{j}] - Σ(L[{i},k]·U[k,{j}]) = {a} - ({sum}) = {v}",
                i = row + 1,
                j = col + 1,
                a = round_for_display(*minuend),
                sum = format_terms(terms),
                v = round_for_display(*value),
            ),
            TraceEntry::LUnit { row } => {
                write!(f, "L[{i},{i}] = 1 (diagonal)", i = row + 1)
            }
            TraceEntry::LEntry {
                row,
                col,
                minuend,
                terms,
                pivot,
                value,
            } => write!(
                f,
                "L[{j},{i}] = (A[{j},{i}] - Σ(L[{j},k]·U[k,{i}])) / U[{i},{i}] = ({a} - ({sum})) / {p} = {v}",
                j = row + 1,
                i = col + 1,
                a = round_for_display(*minuend),
                sum = format_terms(terms),
                p = round_for_display(*pivot),
                v = round_for_display(*value),
            ),
            TraceEntry::YEntry {
                row,
                minuend,
                terms,
                value,
            } => write!(
                f,
                "y[{i}] = b[{i}] - Σ(L[{i},k]·y[k]) = {b} - ({sum}) = {v}",
                i = row + 1,
                b = round_for_display(*minuend),
                sum = format_terms(terms),
                v = round_for_display(*value),
            ),
            TraceEntry::XEntry {
                row,
                minuend,
                terms,
                pivot,
                value,
            } => write!(
                f,
                "x[{i}] = (y[{i}] - Σ(U[{i},k]·x[k])) / U[{i},{i}] = ({y} - ({sum})) / {p} = {v}",
                i = row + 1,
                y = round_for_display(*minuend),
                sum = format_terms(terms),
                p = round_for_display(*pivot),
                v = round_for_display(*value),
            ),
        }
    }
}

/// Append-only ordered record of every computation step of one solve.
///
/// Entries are pushed by the numeric phases in execution order and are never
/// mutated, reordered, or removed. The recorder is a side channel: nothing in
/// the factorization or substitution reads it back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: TraceEntry) {
        self.entries.push(entry);
    }

    /// All recorded entries, in computation order.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in computation order.
    pub fn iter(&self) -> std::slice::Iter<'_, TraceEntry> {
        self.entries.iter()
    }

    /// Render every entry as a human-readable line.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
