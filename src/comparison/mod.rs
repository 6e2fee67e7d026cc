//! Side-by-side evaluation of the annuity and the continuous model

mod engine;
mod result;
pub mod sweep;

pub use engine::{ComparisonEngine, ContributionSource, DEFAULT_DISPLAY_SAMPLES};
pub use result::{AlignedPoint, ComparisonResult};
pub use sweep::{sweep_rates, RateOutcome};
