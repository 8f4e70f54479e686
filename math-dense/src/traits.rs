//! Core traits for dense matrix operations
//!
//! This module defines the scalar and operator abstractions used throughout the crate:
//! - [`ComplexField`]: Trait for scalar types (complex and real numbers)
//! - [`LinearOperator`]: Trait for matrix-like objects that can perform matrix-vector products

use ndarray::Array1;
use num_complex::{Complex32, Complex64};
use num_traits::{Float, FromPrimitive, NumAssign, One, ToPrimitive, Zero};
use std::fmt::Debug;
use std::ops::Neg;

/// Trait for scalar types that can be stored in a dense matrix.
///
/// This trait abstracts over real and complex number types, providing
/// a unified interface for conjugation and magnitudes.
///
/// # Implementations
///
/// Provided for:
/// - `f64` (default for permeability tensors and local Jacobians)
/// - `f32`
/// - `Complex64`
/// - `Complex32`
pub trait ComplexField:
    NumAssign + Clone + Copy + Send + Sync + Debug + Zero + One + Neg<Output = Self> + 'static
{
    /// The real number type underlying this field
    type Real: Float + NumAssign + FromPrimitive + ToPrimitive + Send + Sync + Debug + 'static;

    /// Complex conjugate
    fn conj(&self) -> Self;

    /// Squared magnitude |z|²
    fn norm_sqr(&self) -> Self::Real;

    /// Magnitude |z|
    fn norm(&self) -> Self::Real {
        self.norm_sqr().sqrt()
    }

    /// Manhattan magnitude |re(z)| + |im(z)|
    ///
    /// Cheaper than [`norm`](Self::norm) and always real-valued, so it is the
    /// magnitude used for pivot selection and relative thresholds.
    fn abs_real(&self) -> Self::Real {
        self.re().abs() + self.im().abs()
    }

    /// Real part
    fn re(&self) -> Self::Real;

    /// Imaginary part
    fn im(&self) -> Self::Real;
}

macro_rules! impl_complex_field {
    ($complex:ty, $real:ty) => {
        impl ComplexField for $complex {
            type Real = $real;

            #[inline]
            fn conj(&self) -> Self {
                <$complex>::new(self.re, -self.im)
            }

            #[inline]
            fn norm_sqr(&self) -> $real {
                self.re * self.re + self.im * self.im
            }

            #[inline]
            fn re(&self) -> $real {
                self.re
            }

            #[inline]
            fn im(&self) -> $real {
                self.im
            }
        }
    };
}

macro_rules! impl_real_field {
    ($real:ty) => {
        impl ComplexField for $real {
            type Real = $real;

            #[inline]
            fn conj(&self) -> Self {
                *self
            }

            #[inline]
            fn norm_sqr(&self) -> $real {
                *self * *self
            }

            // |x| directly, skipping the zero imaginary part
            #[inline]
            fn abs_real(&self) -> $real {
                self.abs()
            }

            #[inline]
            fn re(&self) -> $real {
                *self
            }

            #[inline]
            fn im(&self) -> $real {
                0.0
            }
        }
    };
}

impl_complex_field!(Complex64, f64);
impl_complex_field!(Complex32, f32);
impl_real_field!(f64);
impl_real_field!(f32);

/// Trait for linear operators (matrices) that can perform matrix-vector products.
///
/// Lets a dense matrix be handed to any consumer that only needs its action
/// on a vector.
pub trait LinearOperator<T: ComplexField>: Send + Sync {
    /// Number of rows in the operator
    fn num_rows(&self) -> usize;

    /// Number of columns in the operator
    fn num_cols(&self) -> usize;

    /// Apply the operator: y = A * x
    fn apply(&self, x: &Array1<T>) -> Array1<T>;

    /// Apply the transpose: y = A^T * x
    fn apply_transpose(&self, x: &Array1<T>) -> Array1<T>;

    /// Apply the Hermitian (conjugate transpose): y = A^H * x
    fn apply_hermitian(&self, x: &Array1<T>) -> Array1<T> {
        // conj(A^T conj(x)) == A^H x
        let x_conj = x.mapv(|v| v.conj());
        self.apply_transpose(&x_conj).mapv(|v| v.conj())
    }

    /// Check if the operator is square
    fn is_square(&self) -> bool {
        self.num_rows() == self.num_cols()
    }
}
