//! Solve, invert and determinant for square dense matrices
//!
//! Sizes 1 to 3 use closed forms from [`small`](super::small); larger matrices
//! go through [`lu_decompose`] with the observer matching the algorithm.

use super::elimination::{RhsEliminator, SignTracker, lu_decompose};
use super::lu::LuFactorization;
use super::small;
use crate::error::MatrixError;
use crate::matrix::DenseMatrix;
use crate::precision::Precision;
use crate::vector::DenseVector;
use num_traits::Zero;

impl<V: DenseVector> DenseMatrix<V> {
    fn ensure_square(&self) -> Result<usize, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.nrows(),
                cols: self.ncols(),
            });
        }
        Ok(self.nrows())
    }

    /// Solve `A x = b` with the default [`Precision`]
    ///
    /// # Errors
    ///
    /// - [`MatrixError::NotSquare`] if the matrix is not square
    /// - [`MatrixError::DimensionMismatch`] if `x` or `b` has the wrong length
    ///   (with the `checking` feature)
    /// - [`MatrixError::SingularMatrix`] if the matrix is numerically singular;
    ///   `x` then holds unspecified values
    pub fn solve<X>(&self, x: &mut X, b: &X) -> Result<(), MatrixError>
    where
        X: DenseVector<Field = V::Field>,
    {
        self.solve_with(x, b, &Precision::default())
    }

    /// Solve `A x = b` with an explicit [`Precision`]
    pub fn solve_with<X>(&self, x: &mut X, b: &X, precision: &Precision) -> Result<(), MatrixError>
    where
        X: DenseVector<Field = V::Field>,
    {
        let n = self.ensure_square()?;
        if cfg!(feature = "checking") {
            for len in [b.len(), x.len()] {
                if len != n {
                    return Err(MatrixError::DimensionMismatch {
                        expected: n,
                        got: len,
                    });
                }
            }
        }

        match n {
            1 => small::solve1(self, x, b, precision),
            2 => small::solve2(self, x, b, precision),
            3 => small::solve3(self, x, b, precision),
            _ => {
                // x carries the right-hand side through the elimination
                x.clone_from(b);
                let mut a = self.clone();
                lu_decompose(&mut a, &mut RhsEliminator::new(x), precision)?;

                for i in (0..n).rev() {
                    let mut rhs = x[i];
                    for j in (i + 1)..n {
                        rhs -= a[i][j] * x[j];
                    }
                    x[i] = rhs / a[i][i];
                }
                Ok(())
            }
        }
    }

    /// Replace the matrix by its inverse, with the default [`Precision`]
    ///
    /// # Errors
    ///
    /// - [`MatrixError::NotSquare`] if the matrix is not square
    /// - [`MatrixError::SingularMatrix`] if the matrix is numerically singular;
    ///   the matrix is then left unchanged
    pub fn invert(&mut self) -> Result<(), MatrixError> {
        self.invert_with(&Precision::default())
    }

    /// Replace the matrix by its inverse, with an explicit [`Precision`]
    pub fn invert_with(&mut self, precision: &Precision) -> Result<(), MatrixError> {
        let n = self.ensure_square()?;
        match n {
            1 => small::invert1(self, precision),
            2 => small::invert2(self, precision),
            _ => {
                let lu = LuFactorization::factorize(self, precision)?;
                lu.write_inverse(self);
                Ok(())
            }
        }
    }

    /// Determinant, with the default [`Precision`]
    ///
    /// A matrix found singular during elimination has determinant zero.
    ///
    /// # Errors
    ///
    /// [`MatrixError::NotSquare`] if the matrix is not square
    pub fn determinant(&self) -> Result<V::Field, MatrixError> {
        self.determinant_with(&Precision::default())
    }

    /// Determinant, with an explicit [`Precision`] for matrices larger than 3x3
    pub fn determinant_with(&self, precision: &Precision) -> Result<V::Field, MatrixError> {
        let n = self.ensure_square()?;
        match n {
            1 => Ok(self[0][0]),
            2 => Ok(small::determinant2(self)),
            3 => Ok(small::determinant3(self)),
            _ => {
                let mut a = self.clone();
                let mut sign = SignTracker::new();
                match lu_decompose(&mut a, &mut sign, precision) {
                    Ok(()) => {}
                    Err(MatrixError::SingularMatrix) => return Ok(V::Field::zero()),
                    Err(e) => return Err(e),
                }

                let mut det = sign.sign();
                for i in 0..n {
                    det *= a[i][i];
                }
                Ok(det)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::MatrixError;
    use crate::matrix::{DynMatrix, FieldMatrix};
    use crate::precision::Precision;
    use crate::vector::DenseVector;
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};
    use num_complex::Complex64;

    fn well_conditioned(n: usize) -> DynMatrix<f64> {
        DynMatrix::from_fn(n, n, |i, j| {
            if i == j {
                n as f64 + 2.0
            } else {
                1.0 / (1.0 + i as f64 + 2.0 * j as f64)
            }
        })
    }

    fn residual(a: &DynMatrix<f64>, x: &Array1<f64>, b: &Array1<f64>) -> f64 {
        let mut r = b.clone();
        a.mmv(x, &mut r).unwrap();
        r.two_norm()
    }

    #[test]
    fn test_solve_scenario_2x2() {
        let a = FieldMatrix::from([[2.0_f64, 1.0], [1.0, 1.0]]);
        let mut x = [0.0; 2];
        a.solve(&mut x, &[3.0, 2.0]).unwrap();
        assert_relative_eq!(x[0], 1.0);
        assert_relative_eq!(x[1], 1.0);
        assert_relative_eq!(a.determinant().unwrap(), 1.0);
    }

    #[test]
    fn test_solve_general_engine() {
        for n in [4, 5, 8] {
            let a = well_conditioned(n);
            let b = Array1::from_iter((0..n).map(|i| (i as f64) - 1.5));
            let mut x = Array1::zeros(n);
            a.solve(&mut x, &b).expect("LU solve should succeed");
            assert!(residual(&a, &x, &b) < 1e-12 * a.infinity_norm());
        }
    }

    #[test]
    fn test_solve_complex() {
        let a = DynMatrix::from(&array![
            [Complex64::new(4.0, 1.0), Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0), Complex64::new(0.0, 1.0)],
            [Complex64::new(1.0, 0.0), Complex64::new(3.0, -1.0), Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0), Complex64::new(5.0, 2.0), Complex64::new(1.0, 0.0)],
            [Complex64::new(0.0, -1.0), Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)],
        ]);
        let b = array![
            Complex64::new(1.0, 1.0),
            Complex64::new(2.0, -1.0),
            Complex64::new(0.0, 3.0),
            Complex64::new(-1.0, 0.0)
        ];

        let mut x = Array1::from_elem(4, Complex64::new(0.0, 0.0));
        a.solve(&mut x, &b).expect("LU solve should succeed");

        let mut ax = Array1::from_elem(4, Complex64::new(0.0, 0.0));
        a.mv(&x, &mut ax).unwrap();
        for i in 0..4 {
            assert_relative_eq!((ax[i] - b[i]).norm(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_solve_not_square() {
        let a = DynMatrix::<f64>::zeros(2, 3);
        let mut x = array![0.0, 0.0];
        assert_eq!(
            a.solve(&mut x, &array![1.0, 1.0]),
            Err(MatrixError::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[cfg(feature = "checking")]
    #[test]
    fn test_solve_rejects_wrong_rhs_length() {
        let a = well_conditioned(4);
        let mut x = Array1::zeros(4);
        assert_eq!(
            a.solve(&mut x, &Array1::zeros(3)),
            Err(MatrixError::DimensionMismatch {
                expected: 4,
                got: 3
            })
        );
    }

    #[test]
    fn test_solve_singular_general() {
        let mut a = well_conditioned(4);
        a[3].fill(0.0);
        let mut x = Array1::zeros(4);
        assert_eq!(
            a.solve(&mut x, &Array1::ones(4)),
            Err(MatrixError::SingularMatrix)
        );
    }

    #[test]
    fn test_invert_all_paths() {
        for n in 1..=6 {
            let a = well_conditioned(n);
            let mut inv = a.clone();
            inv.invert().expect("inversion should succeed");

            let mut left = a.clone();
            left.left_multiply(&inv).unwrap();
            let mut right = a.clone();
            right.right_multiply(&inv).unwrap();

            let identity = DynMatrix::identity(n);
            for i in 0..n {
                for j in 0..n {
                    assert_relative_eq!(left[i][j], identity[i][j], epsilon = 1e-12);
                    assert_relative_eq!(right[i][j], identity[i][j], epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_invert_with_pivoting() {
        let mut a = FieldMatrix::from([
            [0.0_f64, 2.0, 0.0, 1.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 3.0],
            [0.0, 0.0, 4.0, 0.0],
        ]);
        let original = a.clone();
        a.invert().unwrap();

        let mut product = original.clone();
        product.right_multiply(&a).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(product[i][j], expected, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_invert_singular_leaves_matrix_unchanged() {
        let mut a = FieldMatrix::from([[1.0_f64, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 0.0, 1.0]]);
        let original = a.clone();
        assert_eq!(a.invert(), Err(MatrixError::SingularMatrix));
        assert_eq!(a, original);
    }

    #[test]
    fn test_determinant_general_path() {
        let a = FieldMatrix::from([
            [2.0_f64, 0.0, 0.0, 0.0],
            [0.0, 3.0, 0.0, 0.0],
            [0.0, 0.0, 4.0, 0.0],
            [1.0, 0.0, 0.0, 5.0],
        ]);
        assert_relative_eq!(a.determinant().unwrap(), 120.0, epsilon = 1e-12);
    }

    #[test]
    fn test_determinant_singular_is_zero() {
        let mut a = well_conditioned(5);
        let row = a[1].clone();
        a[3] = row;
        assert_eq!(a.determinant().unwrap(), 0.0);
    }

    #[test]
    fn test_determinant_not_square() {
        let a = DynMatrix::<f64>::zeros(3, 4);
        assert_eq!(
            a.determinant(),
            Err(MatrixError::NotSquare { rows: 3, cols: 4 })
        );
    }

    #[test]
    fn test_determinant_row_swap_negates() {
        for n in 2..=6 {
            let a = well_conditioned(n);
            let mut swapped = a.clone();
            swapped.swap_rows(0, n - 1);
            let det = a.determinant().unwrap();
            assert_relative_eq!(swapped.determinant().unwrap(), -det, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_explicit_precision() {
        // Infinity norm is below 6.8 and the first pivot is 6.0
        let a = well_conditioned(4);
        let strict = Precision::default().with_singular_limit(0.95);
        assert_eq!(a.determinant_with(&strict).unwrap(), 0.0);

        let mut x = Array1::zeros(4);
        assert_eq!(
            a.solve_with(&mut x, &Array1::ones(4), &strict),
            Err(MatrixError::SingularMatrix)
        );
    }

    #[test]
    fn test_empty_matrix() {
        let a = DynMatrix::<f64>::zeros(0, 0);
        assert_eq!(a.determinant().unwrap(), 1.0);
        let mut x = Array1::zeros(0);
        assert!(a.solve(&mut x, &Array1::zeros(0)).is_ok());
    }
}
