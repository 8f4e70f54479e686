//! Matrix-vector products and matrix-matrix multiplication
//!
//! Every product comes in a distinct named form (`mv`, `umtv`, `usmhv`, ...)
//! so hot per-cell loops never branch on the kind of product. Internally they
//! share one accumulation loop parameterized by the transpose mode and an
//! update closure.
//!
//! Operand sizes are checked when the `checking` feature is enabled.

use super::DenseMatrix;
use crate::error::MatrixError;
use crate::traits::{ComplexField, LinearOperator};
use crate::vector::DenseVector;
use ndarray::Array1;
use num_traits::Zero;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transpose {
    No,
    Yes,
    Conjugate,
}

impl<V: DenseVector> DenseMatrix<V> {
    #[inline]
    fn check_operands<X, Y>(&self, transpose: Transpose, x: &X, y: &Y) -> Result<(), MatrixError>
    where
        X: DenseVector<Field = V::Field>,
        Y: DenseVector<Field = V::Field>,
    {
        if cfg!(feature = "checking") {
            let (x_len, y_len) = match transpose {
                Transpose::No => (self.ncols(), self.nrows()),
                Transpose::Yes | Transpose::Conjugate => (self.nrows(), self.ncols()),
            };
            if x.len() != x_len {
                return Err(MatrixError::DimensionMismatch {
                    expected: x_len,
                    got: x.len(),
                });
            }
            if y.len() != y_len {
                return Err(MatrixError::DimensionMismatch {
                    expected: y_len,
                    got: y.len(),
                });
            }
        }
        Ok(())
    }

    /// Run `update(&mut y[.], a, x[.])` for every entry `a` of op(A)
    fn accumulate<X, Y, F>(
        &self,
        transpose: Transpose,
        x: &X,
        y: &mut Y,
        update: F,
    ) -> Result<(), MatrixError>
    where
        X: DenseVector<Field = V::Field>,
        Y: DenseVector<Field = V::Field>,
        F: Fn(&mut V::Field, V::Field, V::Field),
    {
        self.check_operands(transpose, x, y)?;
        match transpose {
            Transpose::No => {
                for (i, row) in self.rows.iter().enumerate() {
                    for j in 0..self.ncols {
                        update(&mut y[i], row[j], x[j]);
                    }
                }
            }
            Transpose::Yes => {
                for (i, row) in self.rows.iter().enumerate() {
                    for j in 0..self.ncols {
                        update(&mut y[j], row[j], x[i]);
                    }
                }
            }
            Transpose::Conjugate => {
                for (i, row) in self.rows.iter().enumerate() {
                    for j in 0..self.ncols {
                        update(&mut y[j], row[j].conj(), x[i]);
                    }
                }
            }
        }
        Ok(())
    }

    /// y = A x
    pub fn mv<X, Y>(&self, x: &X, y: &mut Y) -> Result<(), MatrixError>
    where
        X: DenseVector<Field = V::Field>,
        Y: DenseVector<Field = V::Field>,
    {
        self.check_operands(Transpose::No, x, y)?;
        y.fill(V::Field::zero());
        self.accumulate(Transpose::No, x, y, |yi, a, xj| *yi += a * xj)
    }

    /// y = A^T x
    pub fn mtv<X, Y>(&self, x: &X, y: &mut Y) -> Result<(), MatrixError>
    where
        X: DenseVector<Field = V::Field>,
        Y: DenseVector<Field = V::Field>,
    {
        self.check_operands(Transpose::Yes, x, y)?;
        y.fill(V::Field::zero());
        self.accumulate(Transpose::Yes, x, y, |yj, a, xi| *yj += a * xi)
    }

    /// y += A x
    pub fn umv<X, Y>(&self, x: &X, y: &mut Y) -> Result<(), MatrixError>
    where
        X: DenseVector<Field = V::Field>,
        Y: DenseVector<Field = V::Field>,
    {
        self.accumulate(Transpose::No, x, y, |yi, a, xj| *yi += a * xj)
    }

    /// y += A^T x
    pub fn umtv<X, Y>(&self, x: &X, y: &mut Y) -> Result<(), MatrixError>
    where
        X: DenseVector<Field = V::Field>,
        Y: DenseVector<Field = V::Field>,
    {
        self.accumulate(Transpose::Yes, x, y, |yj, a, xi| *yj += a * xi)
    }

    /// y += A^H x
    pub fn umhv<X, Y>(&self, x: &X, y: &mut Y) -> Result<(), MatrixError>
    where
        X: DenseVector<Field = V::Field>,
        Y: DenseVector<Field = V::Field>,
    {
        self.accumulate(Transpose::Conjugate, x, y, |yj, a, xi| *yj += a * xi)
    }

    /// y -= A x
    pub fn mmv<X, Y>(&self, x: &X, y: &mut Y) -> Result<(), MatrixError>
    where
        X: DenseVector<Field = V::Field>,
        Y: DenseVector<Field = V::Field>,
    {
        self.accumulate(Transpose::No, x, y, |yi, a, xj| *yi -= a * xj)
    }

    /// y -= A^T x
    pub fn mmtv<X, Y>(&self, x: &X, y: &mut Y) -> Result<(), MatrixError>
    where
        X: DenseVector<Field = V::Field>,
        Y: DenseVector<Field = V::Field>,
    {
        self.accumulate(Transpose::Yes, x, y, |yj, a, xi| *yj -= a * xi)
    }

    /// y -= A^H x
    pub fn mmhv<X, Y>(&self, x: &X, y: &mut Y) -> Result<(), MatrixError>
    where
        X: DenseVector<Field = V::Field>,
        Y: DenseVector<Field = V::Field>,
    {
        self.accumulate(Transpose::Conjugate, x, y, |yj, a, xi| *yj -= a * xi)
    }

    /// y += alpha A x
    pub fn usmv<X, Y>(&self, alpha: V::Field, x: &X, y: &mut Y) -> Result<(), MatrixError>
    where
        X: DenseVector<Field = V::Field>,
        Y: DenseVector<Field = V::Field>,
    {
        self.accumulate(Transpose::No, x, y, |yi, a, xj| *yi += alpha * a * xj)
    }

    /// y += alpha A^T x
    pub fn usmtv<X, Y>(&self, alpha: V::Field, x: &X, y: &mut Y) -> Result<(), MatrixError>
    where
        X: DenseVector<Field = V::Field>,
        Y: DenseVector<Field = V::Field>,
    {
        self.accumulate(Transpose::Yes, x, y, |yj, a, xi| *yj += alpha * a * xi)
    }

    /// y += alpha A^H x
    pub fn usmhv<X, Y>(&self, alpha: V::Field, x: &X, y: &mut Y) -> Result<(), MatrixError>
    where
        X: DenseVector<Field = V::Field>,
        Y: DenseVector<Field = V::Field>,
    {
        self.accumulate(Transpose::Conjugate, x, y, |yj, a, xi| {
            *yj += alpha * a * xi
        })
    }

    /// self = m * self, for a square `m` with as many rows as `self`
    pub fn left_multiply(&mut self, m: &DenseMatrix<V>) -> Result<&mut Self, MatrixError> {
        if !m.is_square() {
            return Err(MatrixError::NotSquare {
                rows: m.nrows(),
                cols: m.ncols(),
            });
        }
        if m.nrows() != self.nrows() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.nrows(),
                got: m.nrows(),
            });
        }

        let c = self.clone();
        for i in 0..self.nrows() {
            for j in 0..self.ncols {
                let mut sum = V::Field::zero();
                for k in 0..self.nrows() {
                    sum += m[i][k] * c[k][j];
                }
                self.rows[i][j] = sum;
            }
        }
        Ok(self)
    }

    /// self = self * m, for a square `m` with as many rows as `self` has columns
    pub fn right_multiply(&mut self, m: &DenseMatrix<V>) -> Result<&mut Self, MatrixError> {
        if !m.is_square() {
            return Err(MatrixError::NotSquare {
                rows: m.nrows(),
                cols: m.ncols(),
            });
        }
        if m.nrows() != self.ncols {
            return Err(MatrixError::DimensionMismatch {
                expected: self.ncols,
                got: m.nrows(),
            });
        }

        for row in &mut self.rows {
            let c = row.clone();
            for j in 0..m.ncols() {
                let mut sum = V::Field::zero();
                for k in 0..m.nrows() {
                    sum += c[k] * m[k][j];
                }
                row[j] = sum;
            }
        }
        Ok(self)
    }
}

impl<V> LinearOperator<V::Field> for DenseMatrix<V>
where
    V: DenseVector + Send + Sync,
{
    fn num_rows(&self) -> usize {
        self.nrows()
    }

    fn num_cols(&self) -> usize {
        self.ncols()
    }

    fn apply(&self, x: &Array1<V::Field>) -> Array1<V::Field> {
        assert_eq!(x.len(), self.ncols(), "Input vector size mismatch");
        let mut y = Array1::from_elem(self.nrows(), V::Field::zero());
        for (i, row) in self.rows.iter().enumerate() {
            for j in 0..self.ncols {
                y[i] += row[j] * x[j];
            }
        }
        y
    }

    fn apply_transpose(&self, x: &Array1<V::Field>) -> Array1<V::Field> {
        assert_eq!(x.len(), self.nrows(), "Input vector size mismatch");
        let mut y = Array1::from_elem(self.ncols(), V::Field::zero());
        for (i, row) in self.rows.iter().enumerate() {
            for j in 0..self.ncols {
                y[j] += row[j] * x[i];
            }
        }
        y
    }

    fn apply_hermitian(&self, x: &Array1<V::Field>) -> Array1<V::Field> {
        assert_eq!(x.len(), self.nrows(), "Input vector size mismatch");
        let mut y = Array1::from_elem(self.ncols(), V::Field::zero());
        for (i, row) in self.rows.iter().enumerate() {
            for j in 0..self.ncols {
                y[j] += row[j].conj() * x[i];
            }
        }
        y
    }
}
