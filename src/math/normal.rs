//! Inverse of the standard normal CDF.
//!
//! Abramowitz & Stegun, formula 26.2.23. The absolute error of the
//! quantile is below 4.5·10⁻⁴ over the whole open unit interval, which is
//! enough for the order-statistic scores used by the Shapiro-Wilk weights.

use crate::error::{Error, Result};

const C: [f64; 3] = [2.515517, 0.802853, 0.010328];
const D: [f64; 3] = [1.432788, 0.189269, 0.001308];

/// Rational correction term `t - P(t) / Q(t)` of formula 26.2.23.
///
/// `t` is expected to be `√(-2 ln q)` for a tail probability `q ≤ 0.5`,
/// so it is non-negative in every call made by this crate.
#[inline]
pub fn rational_approximation(t: f64) -> f64 {
    let [c0, c1, c2] = C;
    let [d0, d1, d2] = D;
    t - ((c2 * t + c1) * t + c0) / (((d2 * t + d1) * t + d0) * t + 1.0)
}

/// Approximate quantile `x` with `Φ(x) = p` of the standard normal distribution.
///
/// # Errors
/// [`Error::ProbabilityOutOfRange`] unless `0 < p < 1` (NaN included).
pub fn normal_cdf_inverse(p: f64) -> Result<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(Error::ProbabilityOutOfRange(p));
    }

    // Φ⁻¹(p) = -G⁻¹(p) below the median, G⁻¹(1 - p) above it.
    if p < 0.5 {
        Ok(-rational_approximation((-2.0 * p.ln()).sqrt()))
    } else {
        Ok(rational_approximation((-2.0 * (1.0 - p).ln()).sqrt()))
    }
}
