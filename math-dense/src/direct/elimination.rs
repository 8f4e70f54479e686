//! Gaussian elimination with partial pivoting
//!
//! [`lu_decompose`] factors a working copy of a square matrix in place into
//! combined LU storage: the strictly lower part holds the multipliers of the
//! unit lower-triangular `L`, the upper part and diagonal hold `U`.
//!
//! The bookkeeping each algorithm needs is delegated to an
//! [`EliminationObserver`]:
//! - [`PivotRecorder`] records row swaps into a pivot array (invert, reusable LU)
//! - [`RhsEliminator`] replays swaps and row operations on a right-hand side (solve)
//! - [`SignTracker`] tracks the sign of the row permutation (determinant)

use crate::error::MatrixError;
use crate::matrix::{DenseMatrix, RealOf};
use crate::precision::Precision;
use crate::traits::ComplexField;
use crate::vector::DenseVector;
use num_traits::{Float, One};

/// Receives the row operations performed by [`lu_decompose`]
pub trait EliminationObserver<T> {
    /// Rows `i` and `j` were swapped, with `i < j`
    fn on_swap(&mut self, i: usize, j: usize);

    /// Row `k` was reduced by `factor` times row `i`
    fn on_eliminate(&mut self, factor: T, k: usize, i: usize);
}

/// Records the row swapped into each position
///
/// Entry `i` starts at `i` and is overwritten with `j` when rows `i` and `j`
/// are swapped during elimination of column `i`.
#[derive(Debug)]
pub struct PivotRecorder<'a> {
    pivot: &'a mut [usize],
}

impl<'a> PivotRecorder<'a> {
    pub fn new(pivot: &'a mut [usize]) -> Self {
        for (i, p) in pivot.iter_mut().enumerate() {
            *p = i;
        }
        Self { pivot }
    }
}

impl<T> EliminationObserver<T> for PivotRecorder<'_> {
    fn on_swap(&mut self, i: usize, j: usize) {
        self.pivot[i] = j;
    }

    fn on_eliminate(&mut self, _factor: T, _k: usize, _i: usize) {}
}

/// Applies the elimination to a right-hand side in place
#[derive(Debug)]
pub struct RhsEliminator<'a, X> {
    rhs: &'a mut X,
}

impl<'a, X: DenseVector> RhsEliminator<'a, X> {
    pub fn new(rhs: &'a mut X) -> Self {
        Self { rhs }
    }
}

impl<X: DenseVector> EliminationObserver<X::Field> for RhsEliminator<'_, X> {
    fn on_swap(&mut self, i: usize, j: usize) {
        self.rhs.swap_entries(i, j);
    }

    fn on_eliminate(&mut self, factor: X::Field, k: usize, i: usize) {
        let ri = self.rhs[i];
        self.rhs[k] -= factor * ri;
    }
}

/// Tracks the sign of the row permutation
#[derive(Debug, Clone, Copy)]
pub struct SignTracker<T> {
    sign: T,
}

impl<T: ComplexField> SignTracker<T> {
    pub fn new() -> Self {
        Self { sign: T::one() }
    }

    /// `1` for an even number of swaps, `-1` for an odd number
    pub fn sign(&self) -> T {
        self.sign
    }
}

impl<T: ComplexField> Default for SignTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ComplexField> EliminationObserver<T> for SignTracker<T> {
    fn on_swap(&mut self, _i: usize, _j: usize) {
        self.sign = -self.sign;
    }

    fn on_eliminate(&mut self, _factor: T, _k: usize, _i: usize) {}
}

/// LU decomposition with partial pivoting, in place
///
/// Thresholds are relative to the infinity norm of `a` computed once before
/// elimination starts:
/// - a pivot search is done when `|a[i][i]| < max(absolute, norm * pivoting)`;
///   it picks the first row with the strictly largest magnitude in column `i`
/// - the matrix is singular when the chosen pivot is below
///   `max(absolute, norm * singular)`
///
/// Magnitudes are Manhattan magnitudes (see [`ComplexField::abs_real`]).
///
/// # Errors
///
/// - [`MatrixError::NotSquare`] if `a` is not square
/// - [`MatrixError::SingularMatrix`] if a pivot falls below the singular threshold;
///   `a` and the observer are then left partially eliminated
pub fn lu_decompose<V, O>(
    a: &mut DenseMatrix<V>,
    observer: &mut O,
    precision: &Precision,
) -> Result<(), MatrixError>
where
    V: DenseVector,
    O: EliminationObserver<V::Field>,
{
    let n = a.nrows();
    if n != a.ncols() {
        return Err(MatrixError::NotSquare {
            rows: n,
            cols: a.ncols(),
        });
    }

    let norm = a.infinity_norm_real();
    let absolute = precision.absolute::<RealOf<V>>();
    let pivthres = absolute.max(norm * precision.pivoting::<RealOf<V>>());
    let singthres = absolute.max(norm * precision.singular::<RealOf<V>>());

    for i in 0..n {
        let mut pivmax = a.rows[i][i].abs_real();

        if pivmax < pivthres {
            let mut imax = i;
            for k in (i + 1)..n {
                let abs = a.rows[k][i].abs_real();
                if abs > pivmax {
                    pivmax = abs;
                    imax = k;
                }
            }
            if imax != i {
                log::trace!("Pivoting: swapping rows {} and {}", i, imax);
                a.rows.swap(i, imax);
                observer.on_swap(i, imax);
            }
        }

        if pivmax < singthres {
            log::debug!(
                "Matrix is singular: pivot {:?} in column {} below threshold {:?}",
                pivmax,
                i,
                singthres
            );
            return Err(MatrixError::SingularMatrix);
        }

        let (head, tail) = a.rows.split_at_mut(i + 1);
        let pivot_row = &head[i];
        let pivot = pivot_row[i];
        for (offset, row) in tail.iter_mut().enumerate() {
            let k = i + 1 + offset;
            let factor = row[i] / pivot;
            row[i] = factor;
            for j in (i + 1)..n {
                row[j] -= factor * pivot_row[j];
            }
            observer.on_eliminate(factor, k, i);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{DynMatrix, FieldMatrix};
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_combined_lu_storage_without_pivoting() {
        let mut a = FieldMatrix::from([[4.0_f64, 3.0], [6.0, 3.0]]);
        let mut sign = SignTracker::new();
        lu_decompose(&mut a, &mut sign, &Precision::default()).unwrap();

        // |4| is above the pivoting threshold, so no swap happens
        assert_eq!(sign.sign(), 1.0);
        assert_relative_eq!(a[1][0], 1.5);
        assert_relative_eq!(a[1][1], -1.5);
        assert_relative_eq!(a[0][0], 4.0);
        assert_relative_eq!(a[0][1], 3.0);
    }

    #[test]
    fn test_zero_pivot_triggers_swap() {
        let mut a = FieldMatrix::from([[0.0_f64, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]]);
        let mut pivot = vec![0; 3];
        lu_decompose(&mut a, &mut PivotRecorder::new(&mut pivot), &Precision::default())
            .unwrap();

        assert_eq!(pivot, vec![2, 2, 2]);
        assert_eq!(a, FieldMatrix::identity(3));
    }

    #[test]
    fn test_pivot_search_takes_first_strict_maximum() {
        let mut a = FieldMatrix::from([[0.0_f64, 1.0, 1.0], [2.0, 1.0, 0.0], [-2.0, 0.0, 3.0]]);
        let mut pivot = vec![0; 3];
        lu_decompose(&mut a, &mut PivotRecorder::new(&mut pivot), &Precision::default())
            .unwrap();
        assert_eq!(pivot[0], 1);
    }

    #[test]
    fn test_sign_tracker_counts_swaps() {
        let mut a = FieldMatrix::from([[0.0_f64, 1.0], [1.0, 0.0]]);
        let mut sign = SignTracker::new();
        lu_decompose(&mut a, &mut sign, &Precision::default()).unwrap();
        assert_eq!(sign.sign(), -1.0);
    }

    #[test]
    fn test_rhs_eliminator_replays_operations() {
        let mut a = FieldMatrix::from([[0.0_f64, 2.0], [1.0, 1.0]]);
        let mut rhs = [4.0, 3.0];
        lu_decompose(
            &mut a,
            &mut RhsEliminator::new(&mut rhs),
            &Precision::default(),
        )
        .unwrap();

        // swapped: [[1, 1], [0, 2]], rhs [3, 4]; no further elimination needed
        assert_eq!(rhs, [3.0, 4.0]);
        assert_eq!(a, FieldMatrix::from([[1.0, 1.0], [0.0, 2.0]]));
    }

    #[test]
    fn test_singular_detected() {
        let mut a = DynMatrix::from(&array![[1.0_f64, 2.0], [2.0, 4.0]]);
        let result = lu_decompose(&mut a, &mut SignTracker::new(), &Precision::default());
        assert_eq!(result, Err(MatrixError::SingularMatrix));
    }

    #[test]
    fn test_not_square() {
        let mut a = DynMatrix::<f64>::zeros(2, 3);
        let result = lu_decompose(&mut a, &mut SignTracker::new(), &Precision::default());
        assert_eq!(result, Err(MatrixError::NotSquare { rows: 2, cols: 3 }));
    }

    #[test]
    fn test_thresholds_are_relative_to_norm() {
        // Same shape, scaled down: a fixed absolute tolerance would call it singular
        let scale = 1e-20;
        let mut a = FieldMatrix::from([[2.0 * scale, 1.0 * scale], [1.0 * scale, 1.0 * scale]]);
        assert!(lu_decompose(&mut a, &mut SignTracker::new(), &Precision::default()).is_ok());
    }

    #[test]
    fn test_pivoting_limit_controls_search() {
        // 0.5 is above 1e-8 * norm, so the default policy keeps row order
        let a = FieldMatrix::from([[0.5_f64, 1.0], [1.0, 1.0]]);

        let mut default_sign = SignTracker::new();
        lu_decompose(&mut a.clone(), &mut default_sign, &Precision::default()).unwrap();
        assert_eq!(default_sign.sign(), 1.0);

        // A pivoting limit of 0.5 (threshold 1.0) forces the search
        let eager = Precision::default().with_pivoting_limit(0.5);
        let mut eager_sign = SignTracker::new();
        lu_decompose(&mut a.clone(), &mut eager_sign, &eager).unwrap();
        assert_eq!(eager_sign.sign(), -1.0);
    }
}
