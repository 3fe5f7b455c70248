use serde::{Deserialize, Serialize};

/// Main scoring configuration.
///
/// Defines how application risk scores are calculated. Scoring starts from
/// `base_score` and applies additive adjustments: qualitative flag weights
/// when a flag is reported true, and the first matching band per quantitative
/// factor. The result is clamped to 0-100 and mapped to a level via
/// `thresholds`.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   base_score: 50
///   flags:
///     credit_history: -20
///     market_stability: -15
///   credit_score:
///     - { range: "<580", effect: "+20", advice: "Improve credit score" }
///   thresholds:
///     low_max: 30
///     medium_max: 60
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Base score before factors are applied (default: 50.0)
    #[serde(default)]
    pub base_score: Option<f64>,

    /// Qualitative flag weights, applied when the flag is reported true
    #[serde(default)]
    pub flags: Option<FlagWeights>,

    /// Requested amount bands (value in currency units)
    #[serde(default)]
    pub requested_amount: Option<Vec<Band>>,

    /// Credit score bands (value range 300-850)
    #[serde(default)]
    pub credit_score: Option<Vec<Band>>,

    /// Cash flow bands (value in currency units, may be negative)
    #[serde(default)]
    pub cash_flow: Option<Vec<Band>>,

    /// Debt-to-equity ratio bands
    #[serde(default)]
    pub debt_to_equity: Option<Vec<Band>>,

    /// Years-in-business bands
    #[serde(default)]
    pub years_in_business: Option<Vec<Band>>,

    /// Annual revenue bands
    #[serde(default)]
    pub annual_revenue: Option<Vec<Band>>,

    /// Employee count bands
    #[serde(default)]
    pub employee_count: Option<Vec<Band>>,

    /// Industry risk factor bands (value 0.0-1.0)
    #[serde(default)]
    pub industry_risk: Option<Vec<Band>>,

    /// Score-to-level thresholds
    #[serde(default)]
    pub thresholds: Option<Thresholds>,

    /// Fraction of annual revenue used as the lending cap base (default: 0.5)
    #[serde(default)]
    pub max_amount_revenue_share: Option<f64>,

    /// Reject otherwise-approved applications whose requested amount exceeds
    /// the computed cap (default: false)
    #[serde(default)]
    pub enforce_amount_cap: Option<bool>,
}

/// Additive weights for the five qualitative flags.
///
/// Negative values reduce risk. A weight only applies when the caller
/// reports the flag as true; absent or false flags contribute zero.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FlagWeights {
    #[serde(default)]
    pub revenue_growth: Option<f64>,

    #[serde(default)]
    pub market_stability: Option<f64>,

    #[serde(default)]
    pub credit_history: Option<f64>,

    #[serde(default)]
    pub management_experience: Option<f64>,

    #[serde(default)]
    pub revenue_diversification: Option<f64>,
}

/// Quantitative factor band.
///
/// Maps a value range to a score effect. First matching band wins.
/// Range format: "<N", "<=N", ">N", ">=N", "N-M" (inclusive range)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Band {
    /// Range expression (e.g., "<580", ">2", "1.5-2")
    pub range: String,

    /// Effect on score (e.g., "+20", "+8")
    pub effect: String,

    /// Recommendation emitted when this band matches
    #[serde(default)]
    pub advice: Option<String>,
}

/// Score-to-level mapping. A score equal to a threshold stays in the
/// lower band: score <= low_max is low, score <= medium_max is medium,
/// anything above is high.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Thresholds {
    pub low_max: f64,
    pub medium_max: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low_max: 30.0,
            medium_max: 60.0,
        }
    }
}

impl Default for FlagWeights {
    fn default() -> Self {
        Self {
            revenue_growth: Some(-10.0),
            market_stability: Some(-15.0),
            credit_history: Some(-20.0),
            management_experience: Some(-10.0),
            revenue_diversification: Some(-15.0),
        }
    }
}

fn band(range: &str, effect: &str, advice: &str) -> Band {
    Band {
        range: range.to_string(),
        effect: effect.to_string(),
        advice: Some(advice.to_string()),
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: Some(50.0),
            flags: Some(FlagWeights::default()),
            requested_amount: Some(vec![
                band(">1000000", "+10", "Large loan amount; additional collateral required"),
                band(">500000", "+6", "Moderate loan amount; verify stable income"),
                band(">100000", "+3", "Standard verification process recommended"),
            ]),
            credit_score: Some(vec![
                band(
                    "<580",
                    "+20",
                    "Improve credit score; a cosigner or additional collateral may be required",
                ),
                band("580-669", "+10", "Improve credit score to qualify for better rates"),
            ]),
            cash_flow: Some(vec![band(
                "<=0",
                "+15",
                "Address negative cash flow before taking on new debt",
            )]),
            debt_to_equity: Some(vec![
                band(">2", "+15", "Reduce debt-to-equity ratio"),
                band("1.5-2", "+8", "Monitor debt load; leverage is above the comfort band"),
            ]),
            years_in_business: Some(vec![
                band("<2", "+10", "Limited operating history; provide a detailed business plan"),
                band("2-4", "+5", "Young business; supply extended financial history"),
            ]),
            annual_revenue: Some(vec![band(
                "<100000",
                "+8",
                "Low annual revenue; additional income verification required",
            )]),
            employee_count: Some(vec![
                band("<10", "+8", "Very small team; key-person risk review recommended"),
                band("10-49", "+4", "Small business; financial history review recommended"),
            ]),
            industry_risk: Some(vec![
                band(">0.7", "+10", "High-risk industry; additional documentation required"),
                band("0.4-0.7", "+5", "Moderate industry risk; standard review applies"),
            ]),
            thresholds: Some(Thresholds::default()),
            max_amount_revenue_share: Some(0.5),
            enforce_amount_cap: Some(false),
        }
    }
}
