use num_traits::Float;

use super::Statistic;

/// Sum of squared deviations `Σ(xᵢ - c)²` about a fixed centre `c`.
///
/// With `c` set to the sample mean this is the denominator of W. The
/// centre is supplied by the caller so the sorted copy of a sample can be
/// measured against the mean of the original.
#[derive(Debug, Clone, Copy)]
pub struct SumOfSquares<F> {
    /// Point the deviations are measured from.
    pub center: F,
}

impl<F: Float> SumOfSquares<F> {
    /// Sum of squares about `center`.
    pub fn about(center: F) -> Self {
        Self { center }
    }
}

impl<D, F> Statistic<D, F> for SumOfSquares<F>
where
    D: AsRef<[F]>,
    F: Float,
{
    fn compute(&self, data: &D) -> F {
        // Kahan summation for squared deviations
        let mut sq_sum = F::zero();
        let mut c = F::zero();
        for &x in data.as_ref() {
            let dev = x - self.center;
            let y = dev * dev - c;
            let t = sq_sum + y;
            c = (t - sq_sum) - y;
            sq_sum = t;
        }
        sq_sum
    }
}
