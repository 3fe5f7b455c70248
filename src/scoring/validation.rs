use super::config::{Band, ScoringConfig};
use super::factors::{Effect, RangeOp};

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(base) = config.base_score {
        if !(0.0..=100.0).contains(&base) {
            errors.push("scoring.base_score: must be between 0 and 100".to_string());
        }
    }

    if let Some(thresholds) = &config.thresholds {
        if thresholds.low_max >= thresholds.medium_max {
            errors.push(format!(
                "scoring.thresholds: low_max ({}) must be below medium_max ({})",
                thresholds.low_max, thresholds.medium_max
            ));
        }
    }

    if let Some(share) = config.max_amount_revenue_share {
        if !(0.0..=1.0).contains(&share) {
            errors.push("scoring.max_amount_revenue_share: must be between 0 and 1".to_string());
        }
    }

    let tables: [(&str, &Option<Vec<Band>>); 8] = [
        ("requested_amount", &config.requested_amount),
        ("credit_score", &config.credit_score),
        ("cash_flow", &config.cash_flow),
        ("debt_to_equity", &config.debt_to_equity),
        ("years_in_business", &config.years_in_business),
        ("annual_revenue", &config.annual_revenue),
        ("employee_count", &config.employee_count),
        ("industry_risk", &config.industry_risk),
    ];

    for (name, bands) in tables {
        let Some(bands) = bands else { continue };
        for (i, band) in bands.iter().enumerate() {
            if let Err(e) = RangeOp::parse(&band.range) {
                errors.push(format!(
                    "scoring.{}[{}].range: invalid '{}' - {}",
                    name, i, band.range, e
                ));
            }
            if let Err(e) = Effect::parse(&band.effect) {
                errors.push(format!(
                    "scoring.{}[{}].effect: invalid '{}' - {}",
                    name, i, band.effect, e
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
