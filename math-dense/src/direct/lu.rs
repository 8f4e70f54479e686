//! Reusable LU factorization
//!
//! Factor once with [`lu_factorize`], then solve for as many right-hand sides
//! as needed. The factors come from [`lu_decompose`] with a [`PivotRecorder`],
//! so thresholds and pivot choices match [`DenseMatrix::solve`].

use super::elimination::{PivotRecorder, lu_decompose};
use crate::error::MatrixError;
use crate::matrix::DenseMatrix;
use crate::precision::Precision;
use crate::vector::DenseVector;
use num_traits::One;

/// LU factorization result
///
/// Stores L and U factors along with pivot information
#[derive(Debug, Clone)]
pub struct LuFactorization<V: DenseVector> {
    /// Combined L and U matrices (L is unit lower triangular, stored below diagonal)
    pub lu: DenseMatrix<V>,
    /// Row swapped with row `i` while eliminating column `i`
    pub pivots: Vec<usize>,
    /// Matrix dimension
    pub n: usize,
}

impl<V: DenseVector> LuFactorization<V> {
    /// Factor a square matrix
    pub fn factorize(a: &DenseMatrix<V>, precision: &Precision) -> Result<Self, MatrixError> {
        let n = a.nrows();
        let mut lu = a.clone();
        let mut pivots = vec![0; n];
        lu_decompose(&mut lu, &mut PivotRecorder::new(&mut pivots), precision)?;
        Ok(Self { lu, pivots, n })
    }

    pub fn dim(&self) -> usize {
        self.n
    }

    /// Solve Ax = b using the pre-computed LU factorization
    pub fn solve<X>(&self, b: &X) -> Result<X, MatrixError>
    where
        X: DenseVector<Field = V::Field>,
    {
        if b.len() != self.n {
            return Err(MatrixError::DimensionMismatch {
                expected: self.n,
                got: b.len(),
            });
        }

        let mut x = b.clone();

        // Replay the row swaps in elimination order
        for i in 0..self.n {
            let pivot = self.pivots[i];
            if pivot != i {
                x.swap_entries(i, pivot);
            }
        }

        // Forward substitution: Ly = Pb
        for i in 0..self.n {
            for j in 0..i {
                let l_ij = self.lu[i][j];
                let x_j = x[j];
                x[i] -= l_ij * x_j;
            }
        }

        // Backward substitution: Ux = y
        for i in (0..self.n).rev() {
            for j in (i + 1)..self.n {
                let u_ij = self.lu[i][j];
                let x_j = x[j];
                x[i] -= u_ij * x_j;
            }
            let u_ii = self.lu[i][i];
            x[i] /= u_ii;
        }

        Ok(x)
    }

    /// Determinant of the factored matrix
    pub fn determinant(&self) -> V::Field {
        let swaps = self
            .pivots
            .iter()
            .enumerate()
            .filter(|&(i, &p)| p != i)
            .count();

        let mut det = if swaps % 2 == 0 {
            V::Field::one()
        } else {
            -V::Field::one()
        };
        for i in 0..self.n {
            det *= self.lu[i][i];
        }
        det
    }

    /// Inverse of the factored matrix
    pub fn inverse(&self) -> DenseMatrix<V> {
        let mut out = DenseMatrix::zeros(self.n, self.n);
        self.write_inverse(&mut out);
        out
    }

    /// Overwrite `out` (n x n) with the inverse of the factored matrix
    pub(crate) fn write_inverse(&self, out: &mut DenseMatrix<V>) {
        let n = self.n;
        out.set_identity();

        // L^-1, one row at a time
        for i in 0..n {
            let (head, tail) = out.rows.split_at_mut(i);
            let row = &mut tail[0];
            for (j, done) in head.iter().enumerate() {
                row.axpy(-self.lu[i][j], done);
            }
        }

        // U^-1 L^-1
        for i in (0..n).rev() {
            let (head, tail) = out.rows.split_at_mut(i + 1);
            let row = &mut head[i];
            for (offset, done) in tail.iter().enumerate() {
                row.axpy(-self.lu[i][i + 1 + offset], done);
            }
            row.div_scalar(self.lu[i][i]);
        }

        // Undo the row swaps on the columns, last swap first
        for i in (0..n).rev() {
            let pivot = self.pivots[i];
            if pivot != i {
                out.swap_cols(i, pivot);
            }
        }
    }
}

/// Compute LU factorization with partial pivoting and the default [`Precision`]
pub fn lu_factorize<V: DenseVector>(
    a: &DenseMatrix<V>,
) -> Result<LuFactorization<V>, MatrixError> {
    lu_factorize_with(a, &Precision::default())
}

/// Compute LU factorization with partial pivoting
pub fn lu_factorize_with<V: DenseVector>(
    a: &DenseMatrix<V>,
    precision: &Precision,
) -> Result<LuFactorization<V>, MatrixError> {
    LuFactorization::factorize(a, precision)
}

/// Solve Ax = b using LU decomposition
///
/// This is a convenience function that combines factorization and solve.
/// Unlike [`DenseMatrix::solve`] it never takes the closed-form path.
pub fn lu_solve<V, X>(a: &DenseMatrix<V>, b: &X) -> Result<X, MatrixError>
where
    V: DenseVector,
    X: DenseVector<Field = V::Field>,
{
    let factorization = lu_factorize(a)?;
    factorization.solve(b)
}
