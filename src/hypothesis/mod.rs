mod shapiro;
mod weights;

pub use shapiro::{shapiro_wilk_w, DegeneratePolicy, ShapiroWilk, ShapiroWilkResult};
pub use weights::RoystonWeights;
