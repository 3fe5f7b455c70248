pub mod types;

pub use types::{
    AssessmentInput, AssessmentOutput, QualitativeFlags, RiskLevel, CREDIT_SCORE_MAX,
    CREDIT_SCORE_MIN,
};
