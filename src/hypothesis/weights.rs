use std::f64::consts::FRAC_1_SQRT_2;

use log::debug;
use num_traits::{Float, FromPrimitive};

use crate::error::{Error, Result};
use crate::math::{cast, normal_cdf_inverse, polynomial};

// Royston (1992): polynomial corrections in u = 1/√n, ascending powers.
const LARGEST: [f64; 6] = [0.0, 0.221157, -0.147981, -2.207119, 4.434685, -2.706056];
const SECOND_LARGEST: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];

/// Shapiro-Wilk weights for a sample of size `n`, Royston's approximation.
///
/// Everything here depends on `n` alone, never on sample values.
///
/// # Algorithm
/// 1. Blom scores `mᵢ = Φ⁻¹((i - 3/8) / (n + 1/4))`, `i = 1..n`.
/// 2. The outermost coefficient (and, for `n > 5`, the next one) comes from
///    a degree-5 polynomial in `u = 1/√n` plus `mᵢ / √Σm²`.
/// 3. The remaining ranks are `mᵢ / √ε`, where `ε` rescales them so that
///    `Σaᵢ² = 1`.
/// 4. The anchored lower coefficients mirror the upper ones: `aᵢ = -a₍ₙ₋₁₋ᵢ₎`.
///
/// `n = 3` uses the exact weights `±1/√2`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoystonWeights {
    quantiles: Vec<f64>,
    sum_sq: f64,
    coefficients: Vec<f64>,
}

impl RoystonWeights {
    /// Smallest sample the weights are defined for.
    pub const MIN_N: usize = 3;

    /// Computes quantiles and coefficients for a sample of size `n`.
    ///
    /// # Errors
    /// [`Error::InsufficientSampleSize`] for `n < 3`; any failure of the
    /// normal quantile is propagated unchanged.
    pub fn new(n: usize) -> Result<Self> {
        if n < Self::MIN_N {
            return Err(Error::InsufficientSampleSize {
                needed: Self::MIN_N,
                given: n,
            });
        }

        let n_f = n as f64;
        let quantiles = (1..=n)
            .map(|i| normal_cdf_inverse((i as f64 - 0.375) / (n_f + 0.25)))
            .collect::<Result<Vec<f64>>>()?;
        let sum_sq: f64 = quantiles.iter().map(|m| m * m).sum();

        let coefficients = royston_coefficients(&quantiles, sum_sq);
        debug!(
            "royston weights: n = {n}, Σm² = {sum_sq:.6}, a(n) = {:.6}",
            coefficients.last().copied().unwrap_or(f64::NAN)
        );

        Ok(Self {
            quantiles,
            sum_sq,
            coefficients,
        })
    }

    /// Sample size these weights were built for.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Always `false`: construction rejects `n < 3`.
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Expected normal order-statistic scores `m`.
    pub fn quantiles(&self) -> &[f64] {
        &self.quantiles
    }

    /// `Σ mᵢ²`.
    pub fn sum_of_squared_quantiles(&self) -> f64 {
        self.sum_sq
    }

    /// Weight coefficients `a`, lowest rank first.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Consumes the weights, keeping only `a`.
    pub fn into_coefficients(self) -> Vec<f64> {
        self.coefficients
    }

    /// `Σ aᵢ·xᵢ` against an ascending sample of the same length.
    ///
    /// # Errors
    /// [`Error::LengthMismatch`] if `sorted` is not exactly [`len`](Self::len) long.
    pub fn combine<F: Float + FromPrimitive>(&self, sorted: &[F]) -> Result<F> {
        if sorted.len() != self.len() {
            return Err(Error::LengthMismatch {
                expected: self.len(),
                given: sorted.len(),
            });
        }
        Ok(self
            .coefficients
            .iter()
            .zip(sorted)
            .fold(F::zero(), |acc, (&a, &x)| acc + cast::<F>(a) * x))
    }
}

fn royston_coefficients(m: &[f64], sum_sq: f64) -> Vec<f64> {
    let n = m.len();
    if n == 3 {
        return vec![-FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2];
    }

    let u = (n as f64).sqrt().recip();
    let scale = sum_sq.sqrt().recip();

    // Largest coefficient first; the second one only pays off beyond n = 5.
    let anchors: &[[f64; 6]] = if n > 5 {
        &[LARGEST, SECOND_LARGEST]
    } else {
        &[LARGEST]
    };
    let tail: Vec<f64> = anchors
        .iter()
        .zip(m.iter().rev())
        .map(|(coeffs, &mi)| polynomial(coeffs, u) + mi * scale)
        .collect();
    let k = tail.len();

    // Rank independent, so computed once for every interior rank.
    let tail_m_sq: f64 = m.iter().rev().take(k).map(|x| x * x).sum();
    let tail_a_sq: f64 = tail.iter().map(|a| a * a).sum();
    let epsilon = (sum_sq - 2.0 * tail_m_sq) / (1.0 - 2.0 * tail_a_sq);
    let root = epsilon.sqrt();

    tail.iter()
        .map(|a| -a)
        .chain(m.iter().skip(k).take(n - 2 * k).map(|mi| mi / root))
        .chain(tail.iter().rev().copied())
        .collect()
}
