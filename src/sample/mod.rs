mod sort;

use num_traits::Float;
use crate::statistics::Statistic;

pub use sort::{ascending, sort_ascending};

/// An owned univariate sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample<T> {
    pub data: Vec<T>,
}

impl<T> Sample<T> {
    /// Create a new sample from raw data
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Get the number of observations in the sample
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the sample contains no observations
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Estimate a statistic from the sample data
    pub fn estimate<Output>(&self, statistic: &impl Statistic<Self, Output>) -> Output {
        statistic.compute(self)
    }
}

impl<T: Float> Sample<T> {
    /// Order statistics of the sample as a new `Sample`.
    pub fn sorted(&self) -> Self {
        Self::new(sort_ascending(&self.data))
    }
}

impl<T> From<Vec<T>> for Sample<T> {
    fn from(data: Vec<T>) -> Self {
        Self::new(data)
    }
}

impl<T> FromIterator<T> for Sample<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Sample::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Sample<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<T> AsRef<[T]> for Sample<T> {
    fn as_ref(&self) -> &[T] { &self.data }
}
