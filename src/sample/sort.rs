use std::cmp::Ordering;

use num_traits::Float;

/// Total order on floats: IEEE ordering for numbers, NaN after everything.
///
/// `-0.0` and `0.0` compare equal, so the stable sort keeps their input order.
#[inline]
pub fn ascending<F: Float>(a: &F, b: &F) -> Ordering {
    match a.partial_cmp(b) {
        Some(ord) => ord,
        None => a.is_nan().cmp(&b.is_nan()),
    }
}

/// Returns an ascending copy of `data`; `data` itself is left untouched.
///
/// The sort is stable. NaN values are moved to the end rather than
/// compared; the Shapiro-Wilk entry points reject them before sorting.
pub fn sort_ascending<F: Float>(data: &[F]) -> Vec<F> {
    let mut sorted = data.to_vec();
    sorted.sort_by(ascending);
    sorted
}
