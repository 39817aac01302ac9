//! Numerical building blocks.

mod normal;

pub use normal::{normal_cdf_inverse, rational_approximation};

use num_traits::{Float, FromPrimitive};

/// Horner evaluation of `coeffs[0] + coeffs[1]·x + … + coeffs[k]·xᵏ`.
#[inline]
pub(crate) fn polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Converts an `f64` constant into the sample's float type.
///
/// Panics only for exotic `Float` types that cannot represent finite `f64` values.
#[inline(always)]
pub(crate) fn cast<F: Float + FromPrimitive>(x: f64) -> F {
    F::from_f64(x).expect("f64-to-float conversion failed")
}
