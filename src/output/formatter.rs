use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::assessment::{AssessmentOutput, RiskLevel};
use crate::scoring::ScoreBreakdown;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a currency amount in compact notation ($1.2M, $350k, $500)
pub fn format_amount(amount: f64) -> String {
    let formatted = if amount >= 1_000_000.0 {
        format!("${:.1}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("${:.1}k", amount / 1_000.0)
    } else {
        format!("${:.0}", amount)
    };

    // Trim trailing .0 (e.g., "$1.0k" -> "$1k")
    formatted.replace(".0M", "M").replace(".0k", "k")
}

/// Format a risk level, colored green/yellow/red when colors are enabled
pub fn format_level(level: RiskLevel, use_colors: bool) -> String {
    if !use_colors {
        return level.to_string();
    }
    match level {
        RiskLevel::Low => level.green().to_string(),
        RiskLevel::Medium => level.yellow().to_string(),
        RiskLevel::High => level.red().to_string(),
    }
}

/// Format an assessment as a multi-line report
pub fn format_report(output: &AssessmentOutput, use_colors: bool) -> String {
    let decision = if output.approved { "approved" } else { "rejected" };
    let decision = if use_colors {
        if output.approved {
            decision.green().bold().to_string()
        } else {
            decision.red().bold().to_string()
        }
    } else {
        decision.to_string()
    };

    let mut lines = vec![
        format!("Company: {}", output.company_id),
        format!(
            "Requested: {} ({})",
            format_amount(output.requested_amount),
            output.purpose
        ),
        format!("Risk score: {:.0}/100", output.risk_score),
        format!("Risk level: {}", format_level(output.risk_level, use_colors)),
        format!("Decision: {}", decision),
    ];

    if let Some(cap) = output.max_approved_amount {
        lines.push(format!("Max approved amount: {}", format_amount(cap)));
    }

    if !output.recommendations.is_empty() {
        lines.push("Recommendations:".to_string());
        for (i, rec) in output.recommendations.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, rec));
        }
    }

    lines.join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a description to fit available width, accounting for Unicode
fn truncate_description(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format the factor breakdown as a table: label, delta, running score,
/// description. Factor labels are left-aligned in a fixed column; the
/// description is truncated to the terminal width when on a TTY.
pub fn format_breakdown(breakdown: &ScoreBreakdown, use_colors: bool) -> String {
    let mut lines = vec![format!("Base score: {:.0}", breakdown.base_score)];

    if breakdown.factors.is_empty() {
        lines.push("No factors applied.".to_string());
        return lines.join("\n");
    }

    let label_width = 24;
    let term_width = get_terminal_width();

    for factor in &breakdown.factors {
        let delta = factor.after - factor.before;
        let delta_str = format!("{:+.0}", delta);
        let delta_str = if use_colors {
            if delta < 0.0 {
                delta_str.green().to_string()
            } else if delta > 0.0 {
                delta_str.red().to_string()
            } else {
                delta_str.dimmed().to_string()
            }
        } else {
            delta_str
        };

        // label(24) + delta(5) + running(8) + separators
        let fixed_width = label_width + 5 + 8 + 6;
        let description = if let Some(width) = term_width {
            if width > fixed_width + 10 {
                truncate_description(&factor.description, width - fixed_width)
            } else {
                truncate_description(&factor.description, 20)
            }
        } else {
            factor.description.clone()
        };

        lines.push(format!(
            "  {:<width$} {:>5}  -> {:>3.0}  {}",
            factor.label,
            delta_str,
            factor.after,
            description,
            width = label_width
        ));
    }

    lines.join("\n")
}
