use num_traits::{Float, FromPrimitive};

use crate::math::cast;
use super::Statistic;

/// Arithmetic mean with Kahan-compensated summation.
///
/// The compensation keeps the centre of W's denominator accurate when the
/// sample is long or sits far from zero. An empty slice yields NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mean;

impl<D, T> Statistic<D, T> for Mean
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> T {
        let slice: &[T] = data.as_ref();

        let mut sum = T::zero();
        let mut c = T::zero();

        for &x in slice {
            let y = x - c;
            let t = sum + y;
            c = (t - sum) - y;
            sum = t;
        }

        sum / cast(slice.len() as f64)
    }
}
