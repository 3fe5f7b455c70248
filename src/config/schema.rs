use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Scoring overrides. Override is per-section: a section present here
    /// replaces the built-in section wholesale, and fields omitted inside it
    /// stay unset rather than falling back field-by-field. Omit the whole
    /// `scoring` key to use the built-in defaults.
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}

impl Config {
    /// Effective scoring configuration: file overrides or defaults.
    pub fn effective_scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }
}
