//! Dense matrix storage, vector-space arithmetic and norms
//!
//! [`DenseMatrix`] stores its rows as a `Vec` of a row type `V: DenseVector`.
//! Row access, arithmetic and norms are all expressed through the row type,
//! so the same code serves dynamically sized rows ([`DynMatrix`]) and
//! fixed-size rows ([`FieldMatrix`]).

mod linear_map;

use crate::error::MatrixError;
use crate::traits::ComplexField;
use crate::vector::DenseVector;
use ndarray::{Array1, Array2};
use num_traits::{Float, One, Zero};
use std::fmt;
use std::ops::{AddAssign, DivAssign, Index, IndexMut, MulAssign, SubAssign};

/// Real type of the scalar field of a row type
pub type RealOf<V> = <<V as DenseVector>::Field as ComplexField>::Real;

/// A dense `rows x cols` matrix whose rows are of type `V`
///
/// The shape is fixed at construction. Equality is exact element-wise comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<V: DenseVector> {
    pub(crate) rows: Vec<V>,
    pub(crate) ncols: usize,
}

/// Dense matrix with `ndarray::Array1` rows
pub type DynMatrix<T> = DenseMatrix<Array1<T>>;

/// Dense matrix with fixed-size `[T; N]` rows
pub type FieldMatrix<T, const N: usize> = DenseMatrix<[T; N]>;

impl<V: DenseVector> DenseMatrix<V> {
    /// Create a matrix with every entry equal to `value`
    pub fn from_elem(nrows: usize, ncols: usize, value: V::Field) -> Self {
        Self {
            rows: (0..nrows).map(|_| V::from_elem(ncols, value)).collect(),
            ncols,
        }
    }

    /// Create a zero matrix
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::from_elem(nrows, ncols, V::Field::zero())
    }

    /// Create the `n x n` identity matrix
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        m.set_identity();
        m
    }

    /// Create a matrix whose entry (i, j) is `f(i, j)`
    pub fn from_fn<F>(nrows: usize, ncols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> V::Field,
    {
        let mut m = Self::zeros(nrows, ncols);
        for (i, row) in m.rows.iter_mut().enumerate() {
            for j in 0..ncols {
                row[j] = f(i, j);
            }
        }
        m
    }

    /// Create a matrix from its rows
    ///
    /// All rows must have the same length.
    pub fn from_rows(rows: Vec<V>) -> Result<Self, MatrixError> {
        let ncols = rows.first().map_or(0, |row| row.len());
        if let Some(bad) = rows.iter().find(|row| row.len() != ncols) {
            return Err(MatrixError::DimensionMismatch {
                expected: ncols,
                got: bad.len(),
            });
        }
        Ok(Self { rows, ncols })
    }

    /// Number of rows
    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols
    }

    /// Whether (i, j) lies inside the matrix; every such entry is stored
    pub fn exists(&self, i: usize, j: usize) -> bool {
        i < self.nrows() && j < self.ncols
    }

    /// Row `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= nrows()`. See [`try_row`](Self::try_row) for a checked variant.
    #[inline]
    pub fn row(&self, i: usize) -> &V {
        &self.rows[i]
    }

    /// Mutable row `i`
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut V {
        &mut self.rows[i]
    }

    pub fn try_row(&self, i: usize) -> Result<&V, MatrixError> {
        let len = self.nrows();
        self.rows
            .get(i)
            .ok_or(MatrixError::IndexError { index: i, len })
    }

    pub fn try_row_mut(&mut self, i: usize) -> Result<&mut V, MatrixError> {
        let len = self.nrows();
        self.rows
            .get_mut(i)
            .ok_or(MatrixError::IndexError { index: i, len })
    }

    /// Checked element access
    pub fn get(&self, i: usize, j: usize) -> Result<V::Field, MatrixError> {
        let row = self.try_row(i)?;
        if j >= self.ncols {
            return Err(MatrixError::IndexError {
                index: j,
                len: self.ncols,
            });
        }
        Ok(row[j])
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &V> + '_ {
        self.rows.iter()
    }

    pub fn iter_rows_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.rows.iter_mut()
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.rows.swap(i, j);
    }

    pub fn swap_cols(&mut self, i: usize, j: usize) {
        for row in &mut self.rows {
            row.swap_entries(i, j);
        }
    }

    /// Broadcast a scalar to every entry
    pub fn fill(&mut self, value: V::Field) {
        for row in &mut self.rows {
            row.fill(value);
        }
    }

    /// Overwrite with the identity (ones on the diagonal, zeros elsewhere)
    pub fn set_identity(&mut self) {
        self.fill(V::Field::zero());
        let n = self.nrows().min(self.ncols);
        for i in 0..n {
            self.rows[i][i] = V::Field::one();
        }
    }

    /// self += k * y
    pub fn axpy(&mut self, k: V::Field, y: &Self) -> &mut Self {
        for (row, other) in self.rows.iter_mut().zip(&y.rows) {
            row.axpy(k, other);
        }
        self
    }

    /// Frobenius norm: sqrt(sum of squared magnitudes of all entries)
    pub fn frobenius_norm(&self) -> RealOf<V> {
        self.frobenius_norm2().sqrt()
    }

    /// Squared Frobenius norm
    pub fn frobenius_norm2(&self) -> RealOf<V> {
        let mut sum = RealOf::<V>::zero();
        for row in &self.rows {
            sum += row.two_norm2();
        }
        sum
    }

    /// Infinity norm (maximum row sum of magnitudes)
    pub fn infinity_norm(&self) -> RealOf<V> {
        let mut max = RealOf::<V>::zero();
        for row in &self.rows {
            max = max.max(row.one_norm());
        }
        max
    }

    /// Infinity norm using Manhattan magnitudes for complex entries
    ///
    /// Always real-valued; used as the scale of the relative thresholds.
    pub fn infinity_norm_real(&self) -> RealOf<V> {
        let mut max = RealOf::<V>::zero();
        for row in &self.rows {
            max = max.max(row.one_norm_real());
        }
        max
    }
}

impl<T: ComplexField> DynMatrix<T> {
    /// Copy into an `ndarray::Array2`
    pub fn to_array2(&self) -> Array2<T> {
        Array2::from_shape_fn((self.nrows(), self.ncols), |(i, j)| self.rows[i][j])
    }
}

impl<T: ComplexField> From<&Array2<T>> for DynMatrix<T> {
    fn from(a: &Array2<T>) -> Self {
        Self {
            rows: a.rows().into_iter().map(|row| row.to_owned()).collect(),
            ncols: a.ncols(),
        }
    }
}

impl<T: ComplexField, const N: usize> From<[[T; N]; N]> for FieldMatrix<T, N> {
    fn from(rows: [[T; N]; N]) -> Self {
        Self {
            rows: rows.to_vec(),
            ncols: N,
        }
    }
}

impl<V: DenseVector> Index<usize> for DenseMatrix<V> {
    type Output = V;

    #[inline]
    fn index(&self, i: usize) -> &V {
        &self.rows[i]
    }
}

impl<V: DenseVector> IndexMut<usize> for DenseMatrix<V> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut V {
        &mut self.rows[i]
    }
}

impl<V: DenseVector> Index<(usize, usize)> for DenseMatrix<V> {
    type Output = V::Field;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &V::Field {
        &self.rows[i][j]
    }
}

impl<V: DenseVector> IndexMut<(usize, usize)> for DenseMatrix<V> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut V::Field {
        &mut self.rows[i][j]
    }
}

impl<V: DenseVector> AddAssign<&DenseMatrix<V>> for DenseMatrix<V> {
    fn add_assign(&mut self, y: &DenseMatrix<V>) {
        for (row, other) in self.rows.iter_mut().zip(&y.rows) {
            row.add_vec(other);
        }
    }
}

impl<V: DenseVector> SubAssign<&DenseMatrix<V>> for DenseMatrix<V> {
    fn sub_assign(&mut self, y: &DenseMatrix<V>) {
        for (row, other) in self.rows.iter_mut().zip(&y.rows) {
            row.sub_vec(other);
        }
    }
}

impl<V: DenseVector> MulAssign<V::Field> for DenseMatrix<V> {
    fn mul_assign(&mut self, k: V::Field) {
        for row in &mut self.rows {
            row.scale(k);
        }
    }
}

impl<V: DenseVector> DivAssign<V::Field> for DenseMatrix<V> {
    fn div_assign(&mut self, k: V::Field) {
        for row in &mut self.rows {
            row.div_scalar(k);
        }
    }
}

impl<V> fmt::Display for DenseMatrix<V>
where
    V: DenseVector,
    V::Field: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for j in 0..self.ncols {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", row[j])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
