//! Closed-form solve, invert and determinant for 1x1, 2x2 and 3x3 matrices
//!
//! These sizes dominate call volume (permeability tensors, small Jacobians),
//! so they bypass the elimination engine. Singularity is judged against the
//! absolute limit of the precision policy only, and only with the `checking`
//! feature.

use crate::error::MatrixError;
use crate::matrix::DenseMatrix;
use crate::precision::Precision;
use crate::traits::ComplexField;
use crate::vector::DenseVector;
use num_traits::One;

fn check_nonsingular<T: ComplexField>(value: T, precision: &Precision) -> Result<(), MatrixError> {
    if cfg!(feature = "checking") && value.abs_real() < precision.absolute::<T::Real>() {
        log::debug!("Matrix is singular: closed-form pivot {:?}", value);
        return Err(MatrixError::SingularMatrix);
    }
    Ok(())
}

pub(crate) fn determinant2<V: DenseVector>(a: &DenseMatrix<V>) -> V::Field {
    a[0][0] * a[1][1] - a[0][1] * a[1][0]
}

pub(crate) fn determinant3<V: DenseVector>(a: &DenseMatrix<V>) -> V::Field {
    let t4 = a[0][0] * a[1][1];
    let t6 = a[0][0] * a[1][2];
    let t8 = a[0][1] * a[1][0];
    let t10 = a[0][2] * a[1][0];
    let t12 = a[0][1] * a[2][0];
    let t14 = a[0][2] * a[2][0];

    t4 * a[2][2] - t6 * a[2][1] - t8 * a[2][2] + t10 * a[2][1] + t12 * a[1][2] - t14 * a[1][1]
}

pub(crate) fn solve1<V, X>(
    a: &DenseMatrix<V>,
    x: &mut X,
    b: &X,
    precision: &Precision,
) -> Result<(), MatrixError>
where
    V: DenseVector,
    X: DenseVector<Field = V::Field>,
{
    check_nonsingular(a[0][0], precision)?;
    x[0] = b[0] / a[0][0];
    Ok(())
}

pub(crate) fn solve2<V, X>(
    a: &DenseMatrix<V>,
    x: &mut X,
    b: &X,
    precision: &Precision,
) -> Result<(), MatrixError>
where
    V: DenseVector,
    X: DenseVector<Field = V::Field>,
{
    let det = determinant2(a);
    check_nonsingular(det, precision)?;
    let detinv = V::Field::one() / det;

    x[0] = detinv * (a[1][1] * b[0] - a[0][1] * b[1]);
    x[1] = detinv * (a[0][0] * b[1] - a[1][0] * b[0]);
    Ok(())
}

pub(crate) fn solve3<V, X>(
    a: &DenseMatrix<V>,
    x: &mut X,
    b: &X,
    precision: &Precision,
) -> Result<(), MatrixError>
where
    V: DenseVector,
    X: DenseVector<Field = V::Field>,
{
    let d = determinant3(a);
    check_nonsingular(d, precision)?;

    x[0] = (b[0] * a[1][1] * a[2][2] - b[0] * a[2][1] * a[1][2] - b[1] * a[0][1] * a[2][2]
        + b[1] * a[2][1] * a[0][2]
        + b[2] * a[0][1] * a[1][2]
        - b[2] * a[1][1] * a[0][2])
        / d;

    x[1] = (a[0][0] * b[1] * a[2][2] - a[0][0] * b[2] * a[1][2] - a[1][0] * b[0] * a[2][2]
        + a[1][0] * b[2] * a[0][2]
        + a[2][0] * b[0] * a[1][2]
        - a[2][0] * b[1] * a[0][2])
        / d;

    x[2] = (a[0][0] * a[1][1] * b[2] - a[0][0] * a[2][1] * b[1] - a[1][0] * a[0][1] * b[2]
        + a[1][0] * a[2][1] * b[0]
        + a[2][0] * a[0][1] * b[1]
        - a[2][0] * a[1][1] * b[0])
        / d;
    Ok(())
}

pub(crate) fn invert1<V: DenseVector>(
    a: &mut DenseMatrix<V>,
    precision: &Precision,
) -> Result<(), MatrixError> {
    check_nonsingular(a[0][0], precision)?;
    a[0][0] = V::Field::one() / a[0][0];
    Ok(())
}

pub(crate) fn invert2<V: DenseVector>(
    a: &mut DenseMatrix<V>,
    precision: &Precision,
) -> Result<(), MatrixError> {
    let det = determinant2(a);
    check_nonsingular(det, precision)?;
    let detinv = V::Field::one() / det;

    let temp = a[0][0];
    a[0][0] = a[1][1] * detinv;
    a[0][1] = -a[0][1] * detinv;
    a[1][0] = -a[1][0] * detinv;
    a[1][1] = temp * detinv;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::FieldMatrix;
    use approx::assert_relative_eq;

    #[test]
    fn test_determinant2_formula() {
        let a = FieldMatrix::from([[3.0_f64, 8.0], [4.0, 6.0]]);
        assert_relative_eq!(determinant2(&a), 3.0 * 6.0 - 8.0 * 4.0);
    }

    #[test]
    fn test_determinant3_matches_cofactor_expansion() {
        let a = FieldMatrix::from([[6.0_f64, 1.0, 1.0], [4.0, -2.0, 5.0], [2.0, 8.0, 7.0]]);
        // 6(-14 - 40) - 1(28 - 10) + 1(32 + 4)
        assert_relative_eq!(determinant3(&a), -306.0);
    }

    #[test]
    fn test_solve2_cramer() {
        let a = FieldMatrix::from([[2.0_f64, 1.0], [1.0, 1.0]]);
        let mut x = [0.0; 2];
        solve2(&a, &mut x, &[3.0, 2.0], &Precision::default()).unwrap();
        assert_relative_eq!(x[0], 1.0);
        assert_relative_eq!(x[1], 1.0);
    }

    #[test]
    fn test_solve3_cramer() {
        let a = FieldMatrix::from([[2.0_f64, 0.0, 1.0], [0.0, 3.0, 0.0], [1.0, 0.0, 2.0]]);
        let mut x = [0.0; 3];
        // x = [1, 2, 3]
        solve3(&a, &mut x, &[5.0, 6.0, 7.0], &Precision::default()).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-14);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-14);
        assert_relative_eq!(x[2], 3.0, epsilon = 1e-14);
    }

    #[test]
    fn test_invert2_closed_form() {
        let mut a = FieldMatrix::from([[4.0_f64, 7.0], [2.0, 6.0]]);
        invert2(&mut a, &Precision::default()).unwrap();
        assert_relative_eq!(a[0][0], 0.6, epsilon = 1e-14);
        assert_relative_eq!(a[0][1], -0.7, epsilon = 1e-14);
        assert_relative_eq!(a[1][0], -0.2, epsilon = 1e-14);
        assert_relative_eq!(a[1][1], 0.4, epsilon = 1e-14);
    }

    #[cfg(feature = "checking")]
    #[test]
    fn test_closed_forms_report_singularity() {
        let precision = Precision::default();

        let mut zero = FieldMatrix::from([[0.0_f64]]);
        assert_eq!(invert1(&mut zero, &precision), Err(MatrixError::SingularMatrix));

        let singular = FieldMatrix::from([[1.0_f64, 2.0], [2.0, 4.0]]);
        let mut x = [0.0; 2];
        assert_eq!(
            solve2(&singular, &mut x, &[1.0, 1.0], &precision),
            Err(MatrixError::SingularMatrix)
        );
    }
}
