use log::{debug, warn};
use num_traits::{Float, FromPrimitive};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hypothesis::RoystonWeights;
use crate::sample::sort_ascending;
use crate::statistics::{Mean, Statistic, SumOfSquares};

/// What to do with a sample whose values are all identical.
///
/// W is then `0 / 0` (or `x / 0` after rounding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DegeneratePolicy {
    /// Fail with [`Error::DegenerateInput`].
    #[default]
    Reject,
    /// Return the raw, non-finite ratio.
    Propagate,
}

/// Result of the Shapiro-Wilk test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapiroWilkResult<F> {
    /// Statistic W; close to 1 → consistent with a normal sample.
    pub statistic: F,
    /// Sample size.
    pub n: usize,
    /// Weights applied to the order statistics, lowest rank first.
    pub coefficients: Vec<f64>,
}

/// Shapiro-Wilk W statistic with Royston's (1992) weights.
///
/// Tests the null hypothesis that the sample comes from a normal distribution.
/// Only the statistic is produced; no p-value.
///
/// ```text
/// W = (Σ aᵢ·x₍ᵢ₎)² / Σ (xᵢ - x̄)²
/// ```
/// where `x₍ᵢ₎` are the order statistics and `a` are [`RoystonWeights`].
///
/// # Example
/// ```rust
/// use royston::{ShapiroWilk, Statistic};
///
/// let data = vec![2.0, 4.0, 6.0, 8.0, 10.0];
/// let result = ShapiroWilk::new().compute(&data).unwrap();
/// assert!(result.statistic > 0.9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapiroWilk {
    min_n: usize,
    max_n: Option<usize>,
    degenerate: DegeneratePolicy,
}

impl Default for ShapiroWilk {
    fn default() -> Self {
        Self {
            min_n: RoystonWeights::MIN_N,
            max_n: None,
            degenerate: DegeneratePolicy::Reject,
        }
    }
}

impl ShapiroWilk {
    /// Default configuration: `n >= 3`, no upper bound, degenerate samples rejected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts accepted sample sizes to `[min_n, max_n]`.
    ///
    /// `min_n` is raised to 3 if smaller; `max_n` to `min_n`.
    pub fn with_bounds(mut self, min_n: usize, max_n: usize) -> Self {
        self.min_n = min_n.max(RoystonWeights::MIN_N);
        self.max_n = Some(max_n.max(self.min_n));
        self
    }

    /// Chooses how a zero-variance sample is reported.
    pub fn with_degenerate(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    /// Smallest accepted sample size.
    pub fn min_n(&self) -> usize {
        self.min_n
    }

    /// Largest accepted sample size, if bounded.
    pub fn max_n(&self) -> Option<usize> {
        self.max_n
    }

    /// Policy for zero-variance samples.
    pub fn degenerate(&self) -> DegeneratePolicy {
        self.degenerate
    }

    fn validate<F: Float>(&self, x: &[F]) -> Result<()> {
        let n = x.len();
        if n < self.min_n {
            return Err(Error::InsufficientSampleSize {
                needed: self.min_n,
                given: n,
            });
        }
        if let Some(limit) = self.max_n.filter(|&limit| n > limit) {
            return Err(Error::SampleTooLarge { limit, given: n });
        }
        if let Some(index) = x.iter().position(|v| !v.is_finite()) {
            return Err(Error::NonFinite { index });
        }
        Ok(())
    }
}

impl<D, F> Statistic<D, Result<ShapiroWilkResult<F>>> for ShapiroWilk
where
    D: AsRef<[F]>,
    F: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> Result<ShapiroWilkResult<F>> {
        let x = data.as_ref();
        self.validate(x)?;
        let n = x.len();

        // === Weights depend on n only ===
        let weights = RoystonWeights::new(n)?;

        // === Rescale into [-1, 1]; W is scale invariant and the squares cannot overflow ===
        let largest = x.iter().fold(F::zero(), |acc, v| acc.max(v.abs()));
        let scale = if largest > F::zero() { largest } else { F::one() };
        let scaled: Vec<F> = x.iter().map(|&v| v / scale).collect();

        // === Order statistics; the caller's sample stays as it is ===
        let sorted = sort_ascending(&scaled);

        // === W = (aᵀx₍·₎)² / Σ(xᵢ - x̄)² ===
        let mean = Mean.compute(&scaled);
        let numerator = weights.combine(&sorted)?;
        let denominator = SumOfSquares::about(mean).compute(&sorted);

        let spread = matches!((sorted.first(), sorted.last()), (Some(lo), Some(hi)) if hi > lo);
        if !(spread && denominator > F::zero()) {
            match self.degenerate {
                DegeneratePolicy::Reject => return Err(Error::DegenerateInput { n }),
                DegeneratePolicy::Propagate => {
                    warn!("shapiro-wilk: all {n} values are identical, W is not finite");
                }
            }
        }

        let statistic = numerator * numerator / denominator;
        debug!(
            "shapiro-wilk: n = {n}, W = {:.6}",
            statistic.to_f64().unwrap_or(f64::NAN)
        );

        Ok(ShapiroWilkResult {
            statistic,
            n,
            coefficients: weights.into_coefficients(),
        })
    }
}

/// Shapiro-Wilk W of `data` with the default configuration.
///
/// # Errors
/// See [`ShapiroWilk`]: fewer than 3 values, a NaN or infinite value, or a
/// zero-variance sample.
pub fn shapiro_wilk_w<F: Float + FromPrimitive>(data: &[F]) -> Result<F> {
    ShapiroWilk::default()
        .compute(&data)
        .map(|result| result.statistic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{math::normal_cdf_inverse, ErrorKind, Sample};
    use approx::assert_abs_diff_eq;
    use rand::{distributions::Distribution, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;
    use statrs::distribution::{Exp, Normal};

    fn draw<D: Distribution<f64>>(dist: D, n: usize, seed: u64) -> Vec<f64> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        dist.sample_iter(&mut rng).take(n).collect()
    }

    /// Idealised normal sample: the normal scores at midpoints (i + 1/2) / n.
    fn normal_scores(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| normal_cdf_inverse((i as f64 + 0.5) / n as f64).unwrap())
            .collect()
    }

    #[test]
    fn evenly_spaced_five_close_to_r() {
        let w = shapiro_wilk_w(&[2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();
        // R: shapiro.test(c(2, 4, 6, 8, 10)) gives W = 0.98676
        assert_abs_diff_eq!(w, 0.98676, epsilon = 0.01);
        assert_abs_diff_eq!(w, 0.995_337_633_652, epsilon = 1e-9);
    }

    #[test]
    fn textbook_skewed_sample() {
        let data = [148.0, 154.0, 158.0, 160.0, 161.0, 162.0, 166.0, 170.0, 182.0, 195.0, 236.0];
        assert_abs_diff_eq!(shapiro_wilk_w(&data).unwrap(), 0.785_884_697_030, epsilon = 1e-9);
    }

    #[test]
    fn constant_sample_is_rejected_by_default() {
        let err = shapiro_wilk_w(&[5.0, 5.0, 5.0, 5.0, 5.0]).unwrap_err();
        assert_eq!(err, Error::DegenerateInput { n: 5 });
        assert_eq!(err.kind(), ErrorKind::DegenerateInput);
    }

    #[test]
    fn constant_sample_propagates_non_finite_on_request() {
        let test = ShapiroWilk::new().with_degenerate(DegeneratePolicy::Propagate);
        let result = test.compute(&vec![5.0_f64; 5]).unwrap();
        assert!(!result.statistic.is_finite());
    }

    #[test]
    fn minimum_size_uses_extreme_pair() {
        assert_abs_diff_eq!(shapiro_wilk_w(&[3.0, 1.0, 2.0]).unwrap(), 1.0, epsilon = 1e-12);
        // (a₃·(x₃ - x₁))² / Σ(x - x̄)² = (3/√2)² / (14/3) = 27/28
        let w = shapiro_wilk_w(&[1.0, 2.0, 4.0]).unwrap();
        assert!(w.is_finite());
        assert_abs_diff_eq!(w, 27.0 / 28.0, epsilon = 1e-12);
    }

    #[test]
    fn fewer_than_three_values_is_invalid() {
        for data in [vec![], vec![1.0], vec![1.0, 2.0]] {
            let err = shapiro_wilk_w(&data).unwrap_err();
            assert!(err.is_invalid_argument());
            assert_eq!(err, Error::InsufficientSampleSize { needed: 3, given: data.len() });
        }
    }

    #[test]
    fn nan_is_invalid() {
        let err = shapiro_wilk_w(&[1.0, 2.0, f64::NAN, 4.0]).unwrap_err();
        assert_eq!(err, Error::NonFinite { index: 2 });
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn infinity_is_invalid_not_degenerate() {
        let err = shapiro_wilk_w(&[1.0, 2.0, f64::INFINITY]).unwrap_err();
        assert_eq!(err, Error::NonFinite { index: 2 });
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = shapiro_wilk_w(&[f64::NEG_INFINITY, 0.0, 1.0, 2.0]).unwrap_err();
        assert_eq!(err, Error::NonFinite { index: 0 });
    }

    #[test]
    fn propagate_policy_still_rejects_infinity() {
        let test = ShapiroWilk::new().with_degenerate(DegeneratePolicy::Propagate);
        let err = test.compute(&vec![1.0, f64::INFINITY, 3.0]).unwrap_err();
        assert_eq!(err, Error::NonFinite { index: 1 });
    }

    #[test]
    fn huge_finite_values_do_not_overflow() {
        // Σ(x - x̄)² is 2e400 here, beyond f64
        let w = shapiro_wilk_w(&[-1e200, 0.0, 1e200]).unwrap();
        assert_abs_diff_eq!(w, 1.0, epsilon = 1e-12);

        let data = [2.0, 4.0, 6.0, 8.0, 10.0];
        let huge: Vec<f64> = data.iter().map(|x| x * 1e300).collect();
        assert_abs_diff_eq!(
            shapiro_wilk_w(&huge).unwrap(),
            shapiro_wilk_w(&data).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn tiny_values_keep_their_spread() {
        let data = [3.0, 1.0, 2.0, 7.0, 5.0];
        let tiny: Vec<f64> = data.iter().map(|x| x * 1e-200).collect();
        assert_abs_diff_eq!(
            shapiro_wilk_w(&tiny).unwrap(),
            shapiro_wilk_w(&data).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn input_is_not_reordered() {
        let data = vec![9.0, 1.0, 5.0, 3.0, 7.0, 2.0];
        let before = data.clone();
        shapiro_wilk_w(&data).unwrap();
        assert_eq!(data, before);
    }

    #[test]
    fn order_of_input_does_not_matter() {
        let data = [5.0, -2.0, 7.0, 1.0, 1.5, 9.0, 0.5];
        let mut shuffled = data;
        shuffled.reverse();
        shuffled.swap(1, 4);
        assert_abs_diff_eq!(
            shapiro_wilk_w(&data).unwrap(),
            shapiro_wilk_w(&shuffled).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn location_and_scale_invariant() {
        let data = [5.0, -2.0, 7.0, 1.0, 1.5, 9.0, 0.5];
        let moved: Vec<f64> = data.iter().map(|x| 10.0 * x + 3.0).collect();
        assert_abs_diff_eq!(
            shapiro_wilk_w(&data).unwrap(),
            shapiro_wilk_w(&moved).unwrap(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn normal_scores_score_higher_than_uniform_or_skewed() {
        let normal = shapiro_wilk_w(&normal_scores(20)).unwrap();
        let uniform: Vec<f64> = (0..20).map(f64::from).collect();
        let skewed: Vec<f64> = (0..20).map(|i| (f64::from(i) / 3.0).exp()).collect();

        let w_uniform = shapiro_wilk_w(&uniform).unwrap();
        let w_skewed = shapiro_wilk_w(&skewed).unwrap();

        assert!(normal > 0.995, "normal scores: {normal}");
        assert!(w_uniform < normal, "uniform {w_uniform} vs normal {normal}");
        assert!(w_skewed < w_uniform, "skewed {w_skewed} vs uniform {w_uniform}");
    }

    #[test]
    fn random_normal_vs_exponential() {
        let normal = draw(Normal::new(10.0, 2.0).unwrap(), 200, 42);
        let exponential = draw(Exp::new(1.0).unwrap(), 200, 42);

        let w_normal = shapiro_wilk_w(&normal).unwrap();
        let w_exp = shapiro_wilk_w(&exponential).unwrap();

        assert!(w_normal > 0.97, "normal sample: {w_normal}");
        assert!(w_exp < 0.9, "exponential sample: {w_exp}");
    }

    #[test]
    fn statistic_within_unit_interval_for_ordinary_samples() {
        for seed in 0..20 {
            let data = draw(Normal::new(0.0, 1.0).unwrap(), 30, seed);
            let w = shapiro_wilk_w(&data).unwrap();
            assert!(w > 0.0 && w <= 1.0 + 1e-9, "seed {seed}: W = {w}");
        }
    }

    #[test]
    fn f32_agrees_with_f64() {
        let w32 = shapiro_wilk_w(&[2.0_f32, 4.0, 6.0, 8.0, 10.0]).unwrap();
        assert_abs_diff_eq!(w32, 0.995_337_6_f32, epsilon = 1e-5);
    }

    #[test]
    fn result_carries_coefficients() {
        let result = ShapiroWilk::new().compute(&vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(result.n, 4);
        assert_eq!(result.coefficients, RoystonWeights::new(4).unwrap().into_coefficients());
        assert_abs_diff_eq!(result.statistic, 0.999_995_561_135, epsilon = 1e-9);
    }

    #[test]
    fn bounds_are_enforced() {
        let test = ShapiroWilk::new().with_bounds(5, 8);
        assert_eq!(
            test.compute(&vec![1.0, 2.0, 3.0, 4.0]).unwrap_err(),
            Error::InsufficientSampleSize { needed: 5, given: 4 }
        );
        let long: Vec<f64> = (0..9).map(f64::from).collect();
        assert_eq!(
            test.compute(&long).unwrap_err(),
            Error::SampleTooLarge { limit: 8, given: 9 }
        );
        let fits: Vec<f64> = long.iter().copied().take(8).collect();
        assert!(test.compute(&fits).is_ok());
    }

    #[test]
    fn bounds_never_drop_below_three() {
        let test = ShapiroWilk::new().with_bounds(1, 0);
        assert_eq!(test.min_n(), 3);
        assert_eq!(test.max_n(), Some(3));
    }

    #[test]
    fn works_through_sample() {
        let sample: Sample<f64> = vec![2.0, 4.0, 6.0, 8.0, 10.0].into();
        let result: ShapiroWilkResult<f64> = sample.estimate(&ShapiroWilk::default()).unwrap();
        assert_abs_diff_eq!(result.statistic, 0.995_337_633_652, epsilon = 1e-9);
    }

    #[test]
    fn config_round_trips_through_json() {
        let test = ShapiroWilk::new()
            .with_bounds(4, 5000)
            .with_degenerate(DegeneratePolicy::Propagate);
        let json = serde_json::to_string(&test).unwrap();
        let back: ShapiroWilk = serde_json::from_str(&json).unwrap();
        assert_eq!(back, test);
    }
}
