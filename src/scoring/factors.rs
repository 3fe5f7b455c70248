use anyhow::{bail, Result};

#[derive(Debug, Clone)]
pub enum RangeOp {
    LessThan(f64),
    LessEqual(f64),
    GreaterThan(f64),
    GreaterEqual(f64),
    Equal(f64),
    Between(f64, f64), // Inclusive range: N-M
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(RangeOp::GreaterEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(RangeOp::LessEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix(">") {
            Ok(RangeOp::GreaterThan(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<") {
            Ok(RangeOp::LessThan(val.trim().parse()?))
        } else if s.contains('-') && !s.starts_with('-') {
            // Range format: "580-669"
            let parts: Vec<&str> = s.split('-').collect();
            if parts.len() == 2 {
                let low: f64 = parts[0].trim().parse()?;
                let high: f64 = parts[1].trim().parse()?;
                if low > high {
                    bail!("Inverted range: {}", s);
                }
                Ok(RangeOp::Between(low, high))
            } else {
                bail!("Invalid range format: {}", s)
            }
        } else {
            Ok(RangeOp::Equal(s.parse()?))
        }
    }

    pub fn matches(&self, value: f64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::LessEqual(n) => value <= *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Equal(n) => value == *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Effect {
    Add(f64),
    Multiply(f64),
}

impl Effect {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix('+') {
            Ok(Effect::Add(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('x') {
            Ok(Effect::Multiply(val.trim().parse()?))
        } else {
            bail!("Effect must start with + or x: {}", s)
        }
    }

    pub fn apply(&self, score: f64) -> f64 {
        match self {
            Effect::Add(n) => score + n,
            Effect::Multiply(n) => score * n,
        }
    }
}
