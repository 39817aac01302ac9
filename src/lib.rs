//! Shapiro-Wilk W statistic for normality, with weights from Royston's
//! (1992) approximation and normal scores from Abramowitz & Stegun 26.2.23.
//!
//! ```rust
//! use royston::shapiro_wilk_w;
//!
//! let w = shapiro_wilk_w(&[2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();
//! assert!(w > 0.95);
//! ```
#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

mod error;
mod math;

mod sample;
mod statistics;
mod hypothesis;
mod display;

pub use error::{Error, ErrorKind, Result};
pub use math::{normal_cdf_inverse, rational_approximation};
pub use crate::sample::{ascending, sort_ascending, Sample};
pub use crate::statistics::*;
pub use crate::hypothesis::*;
