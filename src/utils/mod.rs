use crate::models::{Aggregation, Stat};

/// Format a statistic for terminal output: percentages with a `%` suffix,
/// counts as whole numbers.
pub fn format_stat(stat: Stat, value: f64) -> String {
    match stat.aggregation() {
        Aggregation::MatchMean => format!("{:.1}%", value),
        Aggregation::Sum => format!("{:.0}", value),
    }
}

/// Render a value in `[0, 1]` as a fixed-width text bar.
pub fn unit_bar(value: f64, width: usize) -> String {
    let filled = (value.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "·".repeat(width - filled))
}
