//! Precision policy for the factorization engine
//!
//! Thresholds are relative to the infinity norm of the matrix being factored:
//! - pivoting is attempted when a diagonal entry is below `norm * pivoting_limit`
//! - the matrix is declared singular when the best pivot is below `norm * singular_limit`
//!
//! Both are floored by `absolute_limit`. The policy is an immutable value passed
//! to every `*_with` call; the plain calls use [`Precision::default`].
//!
//! # Example
//!
//! ```
//! use math_dense::{DynMatrix, Precision};
//! use ndarray::array;
//!
//! let precision = Precision::from_json_str(r#"{ "pivoting_limit": 1e-6 }"#)?;
//! assert_eq!(precision.singular_limit, 1e-14);
//!
//! let a = DynMatrix::from(&array![
//!     [4.0_f64, 1.0, 0.0, 0.0],
//!     [1.0, 4.0, 1.0, 0.0],
//!     [0.0, 1.0, 4.0, 1.0],
//!     [0.0, 0.0, 1.0, 4.0],
//! ]);
//! let b = array![5.0, 6.0, 6.0, 5.0];
//! let mut x = array![0.0, 0.0, 0.0, 0.0];
//! a.solve_with(&mut x, &b, &precision)?;
//! assert!(x.iter().all(|&xi| (xi - 1.0).abs() < 1e-12));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::PrecisionError;
use num_traits::{FromPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Thresholds controlling pivoting and singularity detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Precision {
    /// Relative threshold below which a pivot search is done
    #[serde(default = "default_pivoting_limit")]
    pub pivoting_limit: f64,
    /// Relative threshold below which the matrix is declared singular
    #[serde(default = "default_singular_limit")]
    pub singular_limit: f64,
    /// Absolute floor of both thresholds, and the singularity limit of the closed forms
    #[serde(default = "default_absolute_limit")]
    pub absolute_limit: f64,
}

fn default_pivoting_limit() -> f64 {
    1e-8
}

fn default_singular_limit() -> f64 {
    1e-14
}

fn default_absolute_limit() -> f64 {
    1e-80
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            pivoting_limit: default_pivoting_limit(),
            singular_limit: default_singular_limit(),
            absolute_limit: default_absolute_limit(),
        }
    }
}

impl Precision {
    /// Create a policy from explicit limits
    ///
    /// # Errors
    ///
    /// [`PrecisionError::InvalidLimit`] if a limit is negative or not finite
    pub fn new(
        pivoting_limit: f64,
        singular_limit: f64,
        absolute_limit: f64,
    ) -> Result<Self, PrecisionError> {
        let precision = Self {
            pivoting_limit,
            singular_limit,
            absolute_limit,
        };
        precision.validate()?;
        Ok(precision)
    }

    /// Replace one limit; the `with_*` builders do not validate, so call
    /// [`validate`](Self::validate) on a policy built from untrusted values
    pub fn with_pivoting_limit(self, pivoting_limit: f64) -> Self {
        Self {
            pivoting_limit,
            ..self
        }
    }

    pub fn with_singular_limit(self, singular_limit: f64) -> Self {
        Self {
            singular_limit,
            ..self
        }
    }

    pub fn with_absolute_limit(self, absolute_limit: f64) -> Self {
        Self {
            absolute_limit,
            ..self
        }
    }

    /// Parse a policy from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, PrecisionError> {
        let precision: Self = serde_json::from_str(json)?;
        precision.validate()?;
        Ok(precision)
    }

    /// Load a policy from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PrecisionError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serialize the policy to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String, PrecisionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every limit is finite and non-negative
    pub fn validate(&self) -> Result<(), PrecisionError> {
        for (name, value) in [
            ("pivoting_limit", self.pivoting_limit),
            ("singular_limit", self.singular_limit),
            ("absolute_limit", self.absolute_limit),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PrecisionError::InvalidLimit { name, value });
            }
        }
        Ok(())
    }

    /// Pivoting limit in the real type `R`
    pub fn pivoting<R: FromPrimitive + Zero>(&self) -> R {
        to_real(self.pivoting_limit)
    }

    /// Singular limit in the real type `R`
    pub fn singular<R: FromPrimitive + Zero>(&self) -> R {
        to_real(self.singular_limit)
    }

    /// Absolute limit in the real type `R`
    ///
    /// Values below the range of `R` (e.g. the default `1e-80` as `f32`) become zero.
    pub fn absolute<R: FromPrimitive + Zero>(&self) -> R {
        to_real(self.absolute_limit)
    }
}

fn to_real<R: FromPrimitive + Zero>(value: f64) -> R {
    R::from_f64(value).unwrap_or_else(R::zero)
}
