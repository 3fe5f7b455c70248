use serde::{Deserialize, Serialize};

use super::config::{Band, ScoringConfig, Thresholds};
use super::factors::{Effect, RangeOp};
use crate::assessment::{AssessmentInput, AssessmentOutput, RiskLevel};
use crate::error::ScoreError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Credit history", "Cash flow"
    pub description: String, // e.g. "reported strong -> -20", "matched '<580' -> +20"
    pub before: f64,         // Score before this factor
    pub after: f64,          // Score after this factor
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoreBreakdown {
    pub base_score: f64,
    pub factors: Vec<FactorContribution>,
}

// Recommendations for explicitly-weak qualitative flags. Bands carry their
// advice in config; flag advice is fixed because a weak flag has no band row.
const ADVICE_REVENUE_GROWTH: &str = "Demonstrate consistent revenue growth";
const ADVICE_MARKET_STABILITY: &str = "Strengthen market position before expanding debt";
const ADVICE_CREDIT_HISTORY: &str = "Establish a stronger credit history";
const ADVICE_MANAGEMENT: &str = "Add experienced management to the leadership team";
const ADVICE_DIVERSIFICATION: &str = "Diversify revenue streams";

const ADVICE_AMOUNT_CAP: &str = "Reduce requested amount to within the lending cap";

/// Assess a loan application.
///
/// Pure and total over valid inputs: same input and config always yield the
/// same output, absent optional fields contribute zero, and the score is
/// clamped to 0-100. Fails only on a non-positive requested amount or an
/// out-of-range credit score.
pub fn assess(
    input: &AssessmentInput,
    config: &ScoringConfig,
) -> Result<AssessmentOutput, ScoreError> {
    input.validate()?;

    let base_score = config.base_score.unwrap_or(50.0);
    let mut score = base_score;
    let mut factors = Vec::new();
    let mut recommendations = Vec::new();

    // Qualitative flags, in the order the application form lists them
    let weights = config.flags.clone().unwrap_or_default();
    let flag_rows = [
        ("Revenue growth", input.flags.revenue_growth, weights.revenue_growth, ADVICE_REVENUE_GROWTH),
        ("Market stability", input.flags.market_stability, weights.market_stability, ADVICE_MARKET_STABILITY),
        ("Credit history", input.flags.credit_history, weights.credit_history, ADVICE_CREDIT_HISTORY),
        ("Management experience", input.flags.management_experience, weights.management_experience, ADVICE_MANAGEMENT),
        ("Revenue diversification", input.flags.revenue_diversification, weights.revenue_diversification, ADVICE_DIVERSIFICATION),
    ];

    for (label, state, weight, advice) in flag_rows {
        match state {
            Some(true) => {
                let delta = weight.unwrap_or(0.0);
                let before = score;
                score += delta;
                factors.push(FactorContribution {
                    label: label.to_string(),
                    description: format!("reported strong -> {:+}", delta),
                    before,
                    after: score,
                });
            }
            // An explicitly-weak flag fires advice but carries no delta,
            // so partial inputs are never penalized for what they omit
            Some(false) => {
                factors.push(FactorContribution {
                    label: label.to_string(),
                    description: "reported weak, no adjustment".to_string(),
                    before: score,
                    after: score,
                });
                recommendations.push(advice.to_string());
            }
            None => {}
        }
    }

    // Quantitative factors, each a first-match-wins band table. Non-finite
    // optional values are treated as absent.
    let band_rows: [(&str, Option<f64>, &Option<Vec<Band>>); 8] = [
        ("Requested amount", Some(input.requested_amount), &config.requested_amount),
        ("Credit score", input.credit_score.map(f64::from), &config.credit_score),
        ("Cash flow", finite(input.cash_flow), &config.cash_flow),
        ("Debt-to-equity", finite(input.debt_to_equity_ratio), &config.debt_to_equity),
        ("Years in business", input.years_in_business.map(f64::from), &config.years_in_business),
        ("Annual revenue", finite(input.annual_revenue), &config.annual_revenue),
        ("Employee count", input.employee_count.map(f64::from), &config.employee_count),
        ("Industry risk", finite(input.industry_risk_factor), &config.industry_risk),
    ];

    for (label, value, bands) in band_rows {
        let (Some(value), Some(bands)) = (value, bands.as_ref()) else {
            continue;
        };
        if let Some(matched) = match_band(value, bands) {
            let before = score;
            score = matched.effect_parsed.apply(score);
            factors.push(FactorContribution {
                label: label.to_string(),
                description: format!("matched '{}' -> {}", matched.band.range, matched.band.effect),
                before,
                after: score,
            });
            if let Some(advice) = &matched.band.advice {
                recommendations.push(advice.clone());
            }
        }
    }

    let score = score.clamp(0.0, 100.0);

    let thresholds = config.thresholds.clone().unwrap_or_default();
    let risk_level = level_for(score, &thresholds);

    let share = config.max_amount_revenue_share.unwrap_or(0.5);
    let max_approved_amount =
        finite(input.annual_revenue).map(|revenue| revenue * share * (100.0 - score) / 100.0);

    let mut approved = risk_level != RiskLevel::High;
    if approved && config.enforce_amount_cap.unwrap_or(false) {
        if let Some(cap) = max_approved_amount {
            if input.requested_amount > cap {
                approved = false;
                recommendations.push(ADVICE_AMOUNT_CAP.to_string());
            }
        }
    }

    Ok(AssessmentOutput {
        company_id: input.company_id.clone(),
        requested_amount: input.requested_amount,
        purpose: input.purpose.clone(),
        risk_score: score,
        risk_level,
        approved,
        max_approved_amount,
        recommendations,
        breakdown: ScoreBreakdown {
            base_score,
            factors,
        },
    })
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

struct MatchedBand<'a> {
    band: &'a Band,
    effect_parsed: Effect,
}

/// First band whose range matches the value, skipping entries that fail to
/// parse (startup validation reports those to the operator).
fn match_band(value: f64, bands: &[Band]) -> Option<MatchedBand<'_>> {
    for band in bands {
        if let Ok(range) = RangeOp::parse(&band.range) {
            if range.matches(value) {
                if let Ok(effect) = Effect::parse(&band.effect) {
                    return Some(MatchedBand {
                        band,
                        effect_parsed: effect,
                    });
                }
            }
        }
    }
    None
}

/// A score equal to a threshold stays in the lower band: 30 is low, 60 is
/// medium with the defaults.
fn level_for(score: f64, thresholds: &Thresholds) -> RiskLevel {
    if score <= thresholds.low_max {
        RiskLevel::Low
    } else if score <= thresholds.medium_max {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::QualitativeFlags;

    fn sample_input() -> AssessmentInput {
        AssessmentInput {
            company_id: "acme-17".to_string(),
            requested_amount: 10_000.0,
            purpose: "equipment".to_string(),
            annual_revenue: None,
            employee_count: None,
            years_in_business: None,
            debt_to_equity_ratio: None,
            credit_score: None,
            cash_flow: None,
            industry_risk_factor: None,
            flags: QualitativeFlags::default(),
        }
    }

    fn all_flags(value: bool) -> QualitativeFlags {
        QualitativeFlags {
            revenue_growth: Some(value),
            market_stability: Some(value),
            credit_history: Some(value),
            management_experience: Some(value),
            revenue_diversification: Some(value),
        }
    }

    #[test]
    fn test_minimal_input_scores_base() {
        let result = assess(&sample_input(), &ScoringConfig::default()).unwrap();
        assert_eq!(result.risk_score, 50.0);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert!(result.approved);
        assert!(result.max_approved_amount.is_none());
        assert!(result.recommendations.is_empty());
        assert_eq!(result.breakdown.base_score, 50.0);
        assert!(result.breakdown.factors.is_empty());
    }

    #[test]
    fn test_all_flags_strong_clamps_to_zero() {
        let mut input = sample_input();
        input.flags = all_flags(true);
        let result = assess(&input, &ScoringConfig::default()).unwrap();
        // 50 - 10 - 15 - 20 - 10 - 15 = -20, clamped
        assert_eq!(result.risk_score, 0.0);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result.approved);
        assert!(result.recommendations.is_empty());
        assert_eq!(result.breakdown.factors.len(), 5);
    }

    #[test]
    fn test_all_flags_weak_fires_advice_without_delta() {
        let mut input = sample_input();
        input.flags = all_flags(false);
        let result = assess(&input, &ScoringConfig::default()).unwrap();
        assert_eq!(result.risk_score, 50.0);
        assert_eq!(result.recommendations.len(), 5);
        assert_eq!(result.recommendations[4], "Diversify revenue streams");
    }

    #[test]
    fn test_single_flag_delta() {
        let mut input = sample_input();
        input.flags.credit_history = Some(true);
        let result = assess(&input, &ScoringConfig::default()).unwrap();
        assert_eq!(result.risk_score, 30.0);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_flag_monotonicity() {
        // Turning any single flag true never increases the score
        let config = ScoringConfig::default();
        let baseline = assess(&sample_input(), &config).unwrap().risk_score;

        let variants: [fn(&mut QualitativeFlags); 5] = [
            |f| f.revenue_growth = Some(true),
            |f| f.market_stability = Some(true),
            |f| f.credit_history = Some(true),
            |f| f.management_experience = Some(true),
            |f| f.revenue_diversification = Some(true),
        ];
        for set_flag in variants {
            let mut input = sample_input();
            set_flag(&mut input.flags);
            let score = assess(&input, &config).unwrap().risk_score;
            assert!(score <= baseline, "flag increased score: {score} > {baseline}");
        }
    }

    #[test]
    fn test_small_requested_amount_no_penalty() {
        let mut input = sample_input();
        input.requested_amount = 500.0;
        let result = assess(&input, &ScoringConfig::default()).unwrap();
        assert_eq!(result.risk_score, 50.0);
        assert!(result.breakdown.factors.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_large_requested_amount_penalty() {
        let mut input = sample_input();
        input.requested_amount = 2_000_000.0;
        let result = assess(&input, &ScoringConfig::default()).unwrap();
        assert_eq!(result.risk_score, 60.0);
        assert_eq!(result.breakdown.factors[0].label, "Requested amount");
        assert!(result.recommendations[0].contains("collateral"));
    }

    #[test]
    fn test_requested_amount_tiers() {
        let config = ScoringConfig::default();
        let expectations = [
            (600_000.0, 56.0),
            (250_000.0, 53.0),
            (100_000.0, 50.0), // tier boundary is exclusive
        ];
        for (amount, expected) in expectations {
            let mut input = sample_input();
            input.requested_amount = amount;
            let result = assess(&input, &config).unwrap();
            assert_eq!(result.risk_score, expected, "amount {amount}");
        }
    }

    #[test]
    fn test_low_credit_band_penalty_and_advice() {
        let mut input = sample_input();
        input.credit_score = Some(550);
        let result = assess(&input, &ScoringConfig::default()).unwrap();
        assert_eq!(result.risk_score, 70.0);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert!(!result.approved);
        assert!(result.recommendations[0].contains("Improve credit score"));
    }

    #[test]
    fn test_fair_credit_band_first_match_wins() {
        let mut input = sample_input();
        input.credit_score = Some(620);
        let result = assess(&input, &ScoringConfig::default()).unwrap();
        assert_eq!(result.risk_score, 60.0);
        assert_eq!(result.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_good_credit_no_band_match() {
        let mut input = sample_input();
        input.credit_score = Some(760);
        let result = assess(&input, &ScoringConfig::default()).unwrap();
        assert_eq!(result.risk_score, 50.0);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_negative_cash_flow_penalty() {
        let mut input = sample_input();
        input.cash_flow = Some(-12_000.0);
        let result = assess(&input, &ScoringConfig::default()).unwrap();
        assert_eq!(result.risk_score, 65.0);
        assert!(result.recommendations[0].contains("negative cash flow"));
    }

    #[test]
    fn test_positive_cash_flow_no_penalty() {
        let mut input = sample_input();
        input.cash_flow = Some(40_000.0);
        let result = assess(&input, &ScoringConfig::default()).unwrap();
        assert_eq!(result.risk_score, 50.0);
    }

    #[test]
    fn test_high_debt_to_equity_penalty() {
        let mut input = sample_input();
        input.debt_to_equity_ratio = Some(2.4);
        let result = assess(&input, &ScoringConfig::default()).unwrap();
        assert_eq!(result.risk_score, 65.0);
    }

    #[test]
    fn test_score_clamps_at_hundred() {
        let mut input = sample_input();
        input.credit_score = Some(500);
        input.cash_flow = Some(-5_000.0);
        input.debt_to_equity_ratio = Some(3.0);
        input.years_in_business = Some(1);
        input.annual_revenue = Some(50_000.0);
        input.employee_count = Some(3);
        input.industry_risk_factor = Some(0.9);
        // 50 + 20 + 15 + 15 + 10 + 8 + 8 + 10 = 136
        let result = assess(&input, &ScoringConfig::default()).unwrap();
        assert_eq!(result.risk_score, 100.0);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert!(!result.approved);
        assert_eq!(result.recommendations.len(), 7);
    }

    #[test]
    fn test_level_boundary_convention() {
        let thresholds = Thresholds::default();
        assert_eq!(level_for(30.0, &thresholds), RiskLevel::Low);
        assert_eq!(level_for(31.0, &thresholds), RiskLevel::Medium);
        assert_eq!(level_for(60.0, &thresholds), RiskLevel::Medium);
        assert_eq!(level_for(61.0, &thresholds), RiskLevel::High);
    }

    #[test]
    fn test_alternate_threshold_variant() {
        // The 50/75 variant from the other source revision, via config
        let mut config = ScoringConfig::default();
        config.thresholds = Some(Thresholds {
            low_max: 50.0,
            medium_max: 75.0,
        });
        let result = assess(&sample_input(), &config).unwrap();
        assert_eq!(result.risk_score, 50.0);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_invalid_amount_rejected() {
        let mut input = sample_input();
        input.requested_amount = -1.0;
        assert!(matches!(
            assess(&input, &ScoringConfig::default()),
            Err(ScoreError::InvalidInput { field: "requested_amount", .. })
        ));
    }

    #[test]
    fn test_invalid_credit_score_rejected() {
        let mut input = sample_input();
        input.credit_score = Some(900);
        assert!(matches!(
            assess(&input, &ScoringConfig::default()),
            Err(ScoreError::InvalidInput { field: "credit_score", .. })
        ));
    }

    #[test]
    fn test_non_finite_optionals_treated_as_absent() {
        let mut input = sample_input();
        input.annual_revenue = Some(f64::NAN);
        input.cash_flow = Some(f64::NEG_INFINITY);
        input.debt_to_equity_ratio = Some(f64::INFINITY);
        input.industry_risk_factor = Some(f64::NAN);
        let result = assess(&input, &ScoringConfig::default()).unwrap();
        assert_eq!(result.risk_score, 50.0);
        assert!(result.max_approved_amount.is_none());
        assert!(result.breakdown.factors.is_empty());
    }

    #[test]
    fn test_max_approved_amount_scales_with_score() {
        let mut input = sample_input();
        input.annual_revenue = Some(1_000_000.0);
        // Revenue >= 100k matches no band: score stays 50
        let result = assess(&input, &ScoringConfig::default()).unwrap();
        // 1M * 0.5 * (100 - 50) / 100 = 250k
        assert_eq!(result.max_approved_amount, Some(250_000.0));

        input.flags.credit_history = Some(true); // score 30
        let result = assess(&input, &ScoringConfig::default()).unwrap();
        // 1M * 0.5 * 0.7 = 350k
        assert_eq!(result.max_approved_amount, Some(350_000.0));
    }

    #[test]
    fn test_amount_cap_not_enforced_by_default() {
        let mut input = sample_input();
        input.annual_revenue = Some(100_000.0);
        input.requested_amount = 10_000_000.0;
        let result = assess(&input, &ScoringConfig::default()).unwrap();
        assert!(result.approved);
    }

    #[test]
    fn test_amount_cap_enforced_when_configured() {
        let mut config = ScoringConfig::default();
        config.enforce_amount_cap = Some(true);

        let mut input = sample_input();
        input.annual_revenue = Some(100_000.0);
        input.requested_amount = 10_000_000.0;
        let result = assess(&input, &config).unwrap();
        assert!(!result.approved);
        assert_eq!(result.risk_level, RiskLevel::Medium); // level unchanged
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.contains("lending cap")));

        input.requested_amount = 10_000.0; // well under the 25k cap
        let result = assess(&input, &config).unwrap();
        assert!(result.approved);
    }

    #[test]
    fn test_deterministic() {
        let mut input = sample_input();
        input.credit_score = Some(610);
        input.flags.market_stability = Some(true);
        let config = ScoringConfig::default();
        let a = assess(&input, &config).unwrap();
        let b = assess(&input, &config).unwrap();
        assert_eq!(a.risk_score, b.risk_score);
        assert_eq!(a.risk_level, b.risk_level);
        assert_eq!(a.recommendations, b.recommendations);
    }

    #[test]
    fn test_score_always_in_range() {
        // A spread of inputs, including extremes in both directions
        let config = ScoringConfig::default();
        let mut inputs = vec![sample_input()];

        let mut best = sample_input();
        best.flags = all_flags(true);
        best.credit_score = Some(820);
        best.annual_revenue = Some(5_000_000.0);
        inputs.push(best);

        let mut worst = sample_input();
        worst.credit_score = Some(400);
        worst.cash_flow = Some(-1.0);
        worst.debt_to_equity_ratio = Some(9.0);
        worst.years_in_business = Some(0);
        worst.annual_revenue = Some(1_000.0);
        worst.employee_count = Some(1);
        worst.industry_risk_factor = Some(1.0);
        inputs.push(worst);

        for input in inputs {
            let result = assess(&input, &config).unwrap();
            assert!((0.0..=100.0).contains(&result.risk_score));
        }
    }

    #[test]
    fn test_breakdown_tracks_running_score() {
        let mut input = sample_input();
        input.flags.credit_history = Some(true);
        input.credit_score = Some(550);
        let result = assess(&input, &ScoringConfig::default()).unwrap();

        let factors = &result.breakdown.factors;
        assert_eq!(factors.len(), 2);
        assert_eq!(factors[0].label, "Credit history");
        assert_eq!(factors[0].before, 50.0);
        assert_eq!(factors[0].after, 30.0);
        assert_eq!(factors[1].label, "Credit score");
        assert_eq!(factors[1].before, 30.0);
        assert_eq!(factors[1].after, 50.0);
        assert_eq!(factors[1].description, "matched '<580' -> +20");
    }

    #[test]
    fn test_output_echoes_request_fields() {
        let result = assess(&sample_input(), &ScoringConfig::default()).unwrap();
        assert_eq!(result.company_id, "acme-17");
        assert_eq!(result.requested_amount, 10_000.0);
        assert_eq!(result.purpose, "equipment");
    }

    #[test]
    fn test_malformed_band_skipped() {
        let mut config = ScoringConfig::default();
        config.credit_score = Some(vec![
            Band {
                range: "nonsense".to_string(),
                effect: "+99".to_string(),
                advice: None,
            },
            Band {
                range: "<580".to_string(),
                effect: "+20".to_string(),
                advice: None,
            },
        ]);
        let mut input = sample_input();
        input.credit_score = Some(550);
        let result = assess(&input, &config).unwrap();
        assert_eq!(result.risk_score, 70.0);
    }
}
