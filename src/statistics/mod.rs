/// Anything that can be computed from a data set `D`.
pub trait Statistic<D, T> {
    /// Evaluates the statistic on `data`.
    fn compute(&self, data: &D) -> T;
}

mod mean;
mod deviation;

pub use mean::Mean;
pub use deviation::SumOfSquares;
