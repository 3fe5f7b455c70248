pub mod config;
pub mod engine;
pub mod factors;
pub mod validation;

pub use config::*;
pub use engine::{assess, FactorContribution, ScoreBreakdown};
pub use factors::{Effect, RangeOp};
pub use validation::validate_scoring;
