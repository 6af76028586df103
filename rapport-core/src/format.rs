//! Formatting helpers shared across report surfaces.

use chrono::NaiveDate;

/// Format a reply delay in seconds as a short human label
/// (e.g., "45s", "12m", "3.5h").
pub fn format_delay_secs(secs: f64) -> String {
    if secs < 60.0 {
        format!("{}s", secs.round() as i64)
    } else if secs < 3600.0 {
        format!("{}m", (secs / 60.0).round() as i64)
    } else if secs < 86400.0 {
        format!("{:.1}h", secs / 3600.0)
    } else {
        format!("{:.1}d", secs / 86400.0)
    }
}

/// Format an optional date, or an em dash if missing.
pub fn format_date_opt(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => "—".to_string(),
    }
}
