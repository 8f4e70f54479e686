//! Dense square matrices with LU-based direct solvers
//!
//! This crate provides a small dense matrix kernel aimed at the many tiny
//! systems that show up inside discretization codes: per-element Jacobians,
//! local tensors, block entries of larger sparse operators.
//!
//! # Features
//!
//! - **Storage**: row-major [`DenseMatrix`] over any [`DenseVector`] row type,
//!   heap-sized ([`DynMatrix`]) or fixed-size ([`FieldMatrix`])
//! - **Linear maps**: `y = Ax`, `y += A^T x`, `y -= A^H x`, scaled variants
//! - **Direct solvers**: solve, invert and determinant with closed forms up to
//!   3x3 and LU with partial pivoting above, plus reusable [`LuFactorization`]
//! - **Precision policy**: relative pivoting and singularity limits, loadable
//!   from JSON
//! - **Generic Scalar Types**: Works with Complex64, Complex32, f64, f32
//!
//! # Cargo features
//!
//! - `checking` (default): dimension checks on linear maps and solves, and
//!   singularity checks on the closed-form paths
//!
//! # Example
//!
//! ```
//! use math_dense::{DynMatrix, MatrixError};
//! use ndarray::array;
//!
//! let a = DynMatrix::from(&array![[2.0_f64, 1.0], [1.0, 1.0]]);
//! let mut x = array![0.0, 0.0];
//! a.solve(&mut x, &array![3.0, 2.0])?;
//! assert!((x[0] - 1.0).abs() < 1e-12 && (x[1] - 1.0).abs() < 1e-12);
//! assert!((a.determinant()? - 1.0).abs() < 1e-12);
//! # Ok::<(), MatrixError>(())
//! ```

pub mod direct;
pub mod error;
pub mod matrix;
pub mod precision;
pub mod traits;
pub mod vector;

// Re-export main types
pub use error::{MatrixError, PrecisionError};
pub use matrix::{DenseMatrix, DynMatrix, FieldMatrix, RealOf};
pub use precision::Precision;
pub use traits::{ComplexField, LinearOperator};
pub use vector::DenseVector;

// Re-export direct solvers
pub use direct::{
    EliminationObserver, LuFactorization, PivotRecorder, RhsEliminator, SignTracker,
    lu_decompose, lu_factorize, lu_factorize_with, lu_solve,
};
