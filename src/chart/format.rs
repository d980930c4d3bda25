//! Date labels shared by the X axis and the tooltip.

use chrono::NaiveDate;

/// Label used when a chart date cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// Format a `YYYY-MM-DD` chart date as abbreviated month and full year
/// (`"Mar 2024"`).
pub fn format_month_year(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%b %Y").to_string(),
        Err(_) => INVALID_DATE.to_string(),
    }
}
