use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

/// Bounds enforced on a supplied credit score (FICO range).
pub const CREDIT_SCORE_MIN: u16 = 300;
pub const CREDIT_SCORE_MAX: u16 = 850;

/// A loan application as submitted for risk assessment.
///
/// Only `company_id`, `requested_amount` and `purpose` are required. Call
/// sites populate different subsets of the financial factors; an absent
/// factor contributes nothing to the score.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssessmentInput {
    pub company_id: String,
    pub requested_amount: f64,
    pub purpose: String,

    #[serde(default)]
    pub annual_revenue: Option<f64>,
    #[serde(default)]
    pub employee_count: Option<u32>,
    #[serde(default)]
    pub years_in_business: Option<u32>,
    #[serde(default)]
    pub debt_to_equity_ratio: Option<f64>,
    #[serde(default)]
    pub credit_score: Option<u16>,
    #[serde(default)]
    pub cash_flow: Option<f64>,
    #[serde(default)]
    pub industry_risk_factor: Option<f64>,

    #[serde(default)]
    pub flags: QualitativeFlags,
}

/// Boolean business-judgment signals.
///
/// `Some(true)` earns the configured risk reduction. `Some(false)` is an
/// explicitly reported weak signal: it contributes no score delta but fires
/// the matching recommendation. `None` means the caller had no data.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QualitativeFlags {
    #[serde(default)]
    pub revenue_growth: Option<bool>,
    #[serde(default)]
    pub market_stability: Option<bool>,
    #[serde(default)]
    pub credit_history: Option<bool>,
    #[serde(default)]
    pub management_experience: Option<bool>,
    #[serde(default)]
    pub revenue_diversification: Option<bool>,
}

impl AssessmentInput {
    /// Check the two hard input constraints. Everything else is optional and
    /// treated as an absent signal rather than an error.
    pub fn validate(&self) -> Result<(), ScoreError> {
        if self.requested_amount <= 0.0 || !self.requested_amount.is_finite() {
            return Err(ScoreError::InvalidInput {
                field: "requested_amount",
                reason: format!("must be a positive number, got {}", self.requested_amount),
            });
        }
        if let Some(credit) = self.credit_score {
            if !(CREDIT_SCORE_MIN..=CREDIT_SCORE_MAX).contains(&credit) {
                return Err(ScoreError::InvalidInput {
                    field: "credit_score",
                    reason: format!(
                        "must be between {} and {}, got {}",
                        CREDIT_SCORE_MIN, CREDIT_SCORE_MAX, credit
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Categorical risk bucket derived from the score via fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a risk assessment. Echoes the request identity fields the way
/// the lending API response does, so the record is self-describing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssessmentOutput {
    pub company_id: String,
    pub requested_amount: f64,
    pub purpose: String,

    /// Risk score, 0-100, lower is safer
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub approved: bool,

    /// Lending cap, present only when annual revenue was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_approved_amount: Option<f64>,

    /// One entry per fired negative factor, in factor-application order
    pub recommendations: Vec<String>,

    pub breakdown: crate::scoring::ScoreBreakdown,
}
