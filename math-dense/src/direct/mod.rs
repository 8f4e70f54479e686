//! Direct solvers for dense square systems
//!
//! - [`lu_decompose`]: Gaussian elimination with partial pivoting, driven by an
//!   [`EliminationObserver`]
//! - [`DenseMatrix::solve`], [`DenseMatrix::invert`], [`DenseMatrix::determinant`]:
//!   closed forms up to 3x3, elimination above
//! - [`LuFactorization`]: factor once, solve many right-hand sides
//!
//! [`DenseMatrix::solve`]: crate::DenseMatrix::solve
//! [`DenseMatrix::invert`]: crate::DenseMatrix::invert
//! [`DenseMatrix::determinant`]: crate::DenseMatrix::determinant

mod algorithms;
mod elimination;
mod lu;
mod small;

pub use elimination::{EliminationObserver, PivotRecorder, RhsEliminator, SignTracker, lu_decompose};
pub use lu::{LuFactorization, lu_factorize, lu_factorize_with, lu_solve};
