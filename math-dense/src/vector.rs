//! Row vector capability trait
//!
//! A [`DenseMatrix`](crate::DenseMatrix) is generic over the storage of its rows.
//! Any type implementing [`DenseVector`] can serve as a row, and also as the
//! operand or result of the linear maps and solvers.
//!
//! Implemented for:
//! - `ndarray::Array1<T>` (dynamic size, used by [`DynMatrix`](crate::DynMatrix))
//! - `Vec<T>`
//! - `[T; N]` (compile-time size, used by [`FieldMatrix`](crate::FieldMatrix))

use crate::traits::ComplexField;
use ndarray::Array1;
use num_traits::{Float, Zero};
use std::ops::{Index, IndexMut};

/// Indexable, sized vector of scalars with its own arithmetic and norms
pub trait DenseVector:
    Clone + PartialEq + Index<usize, Output = <Self as DenseVector>::Field> + IndexMut<usize>
{
    /// Scalar type of the entries
    type Field: ComplexField;

    /// Number of entries
    fn len(&self) -> usize;

    /// Create a vector of `len` entries all equal to `value`
    fn from_elem(len: usize, value: Self::Field) -> Self;

    /// Broadcast a scalar to every entry
    fn fill(&mut self, value: Self::Field) {
        for i in 0..self.len() {
            self[i] = value;
        }
    }

    /// Swap two entries
    fn swap_entries(&mut self, i: usize, j: usize) {
        let tmp = self[i];
        self[i] = self[j];
        self[j] = tmp;
    }

    /// self += y
    fn add_vec(&mut self, y: &Self) {
        for i in 0..self.len() {
            self[i] += y[i];
        }
    }

    /// self -= y
    fn sub_vec(&mut self, y: &Self) {
        for i in 0..self.len() {
            self[i] -= y[i];
        }
    }

    /// self *= k
    fn scale(&mut self, k: Self::Field) {
        for i in 0..self.len() {
            self[i] *= k;
        }
    }

    /// self /= k
    fn div_scalar(&mut self, k: Self::Field) {
        for i in 0..self.len() {
            self[i] /= k;
        }
    }

    /// self += k * y
    fn axpy(&mut self, k: Self::Field, y: &Self) {
        for i in 0..self.len() {
            self[i] += k * y[i];
        }
    }

    /// Squared Euclidean norm: Σ |x_i|²
    fn two_norm2(&self) -> <Self::Field as ComplexField>::Real {
        let mut sum = <Self::Field as ComplexField>::Real::zero();
        for i in 0..self.len() {
            sum += self[i].norm_sqr();
        }
        sum
    }

    /// Euclidean norm
    fn two_norm(&self) -> <Self::Field as ComplexField>::Real {
        self.two_norm2().sqrt()
    }

    /// Sum of magnitudes: Σ |x_i|
    fn one_norm(&self) -> <Self::Field as ComplexField>::Real {
        let mut sum = <Self::Field as ComplexField>::Real::zero();
        for i in 0..self.len() {
            sum += self[i].norm();
        }
        sum
    }

    /// Sum of Manhattan magnitudes: Σ (|re x_i| + |im x_i|)
    fn one_norm_real(&self) -> <Self::Field as ComplexField>::Real {
        let mut sum = <Self::Field as ComplexField>::Real::zero();
        for i in 0..self.len() {
            sum += self[i].abs_real();
        }
        sum
    }
}

impl<T: ComplexField> DenseVector for Array1<T> {
    type Field = T;

    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    fn from_elem(len: usize, value: T) -> Self {
        Array1::from_elem(len, value)
    }

    fn fill(&mut self, value: T) {
        Array1::fill(self, value);
    }

    fn swap_entries(&mut self, i: usize, j: usize) {
        self.swap(i, j);
    }
}

impl<T: ComplexField> DenseVector for Vec<T> {
    type Field = T;

    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    fn from_elem(len: usize, value: T) -> Self {
        vec![value; len]
    }

    fn swap_entries(&mut self, i: usize, j: usize) {
        self.swap(i, j);
    }
}

impl<T: ComplexField, const N: usize> DenseVector for [T; N] {
    type Field = T;

    #[inline]
    fn len(&self) -> usize {
        N
    }

    /// # Panics
    ///
    /// Panics if `len != N`.
    fn from_elem(len: usize, value: T) -> Self {
        assert_eq!(len, N, "fixed-size row has length {N}");
        [value; N]
    }

    fn swap_entries(&mut self, i: usize, j: usize) {
        self.swap(i, j);
    }
}
