mod formatter;

pub use formatter::{
    format_amount, format_breakdown, format_level, format_report, should_use_colors,
};
