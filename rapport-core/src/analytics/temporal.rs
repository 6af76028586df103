//! Temporal activity aggregation across all analyzed contacts.
//!
//! Consumes the flattened per-message [`TimeFeature`] stream the batch
//! orchestrator emits and produces heatmap, trend and peak statistics.
//! Feature tuples are not retained after aggregation.

use chrono::{DateTime, Datelike, Local, Timelike, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of most-recent year-month buckets kept in the monthly trend.
const TREND_MONTHS: usize = 12;

/// Weekday labels, index 0 = Monday.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Time features of one message, emitted once per valid message.
#[derive(Debug, Clone)]
pub struct TimeFeature {
    /// 0 = Monday .. 6 = Sunday
    pub weekday: u32,
    /// 0..=23
    pub hour: u32,
    /// Year-month label, e.g. "2024-03"
    pub month: String,
    pub year: i32,
}

impl TimeFeature {
    /// Extract features from a timestamp, in the account holder's local
    /// timezone.
    pub fn from_timestamp(ts: DateTime<Utc>) -> Self {
        let local = ts.with_timezone(&Local);
        Self {
            weekday: local.weekday().num_days_from_monday(),
            hour: local.hour(),
            month: format!("{:04}-{:02}", local.year(), local.month()),
            year: local.year(),
        }
    }
}

/// One point of the monthly trend.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTrendPoint {
    /// Year-month label, e.g. "2024-03"
    pub month: String,
    pub count: u64,
    /// Month-over-month growth in percent; 0 for the first point and when
    /// the previous bucket count is 0
    pub growth_pct: f64,
}

/// Total activity for one calendar year.
#[derive(Debug, Clone, Serialize)]
pub struct YearlyTotal {
    pub year: i32,
    pub count: u64,
}

/// Aggregated temporal activity patterns.
#[derive(Debug, Clone, Serialize)]
pub struct TemporalPatterns {
    /// 7×24 message counts, `heatmap[weekday][hour]`, zero-filled
    pub heatmap: [[u64; 24]; 7],
    /// At most the 12 most recent year-month buckets present, ascending
    pub monthly_trend: Vec<MonthlyTrendPoint>,
    /// Per-year totals, ascending by year
    pub yearly_totals: Vec<YearlyTotal>,
    /// Hour with the most activity; ties go to the earliest such hour
    pub peak_hour: u32,
    /// Weekday (0 = Monday) with the most activity; ties go to the first
    pub peak_weekday: u32,
    /// Hours of day (0..24) with any activity
    pub active_hours: u32,
    /// Messages in hours 0–5 divided by total messages
    pub night_owl_ratio: f64,
    pub total_messages: u64,
}

/// Aggregate the flattened feature stream. Empty input produces `None`,
/// never an error.
pub fn aggregate_temporal(features: &[TimeFeature]) -> Option<TemporalPatterns> {
    if features.is_empty() {
        return None;
    }

    let mut heatmap = [[0u64; 24]; 7];
    // Monthly/yearly keys are naturally unbounded; ordered maps keep the
    // buckets sorted so "most recent 12" is a suffix.
    let mut monthly: BTreeMap<String, u64> = BTreeMap::new();
    let mut yearly: BTreeMap<i32, u64> = BTreeMap::new();

    for feature in features {
        let weekday = (feature.weekday % 7) as usize;
        let hour = (feature.hour % 24) as usize;
        heatmap[weekday][hour] += 1;
        *monthly.entry(feature.month.clone()).or_insert(0) += 1;
        *yearly.entry(feature.year).or_insert(0) += 1;
    }

    let total = features.len() as u64;

    let mut hour_totals = [0u64; 24];
    let mut weekday_totals = [0u64; 7];
    for (weekday, row) in heatmap.iter().enumerate() {
        for (hour, &count) in row.iter().enumerate() {
            hour_totals[hour] += count;
            weekday_totals[weekday] += count;
        }
    }

    let recent_months: Vec<(String, u64)> = monthly
        .iter()
        .rev()
        .take(TREND_MONTHS)
        .map(|(month, &count)| (month.clone(), count))
        .collect();
    let mut monthly_trend = Vec::with_capacity(recent_months.len());
    for (i, (month, count)) in recent_months.iter().rev().enumerate() {
        let growth_pct = if i == 0 {
            0.0
        } else {
            let prev = recent_months[recent_months.len() - i].1;
            if prev == 0 {
                0.0
            } else {
                (*count as f64 - prev as f64) / prev as f64 * 100.0
            }
        };
        monthly_trend.push(MonthlyTrendPoint {
            month: month.clone(),
            count: *count,
            growth_pct,
        });
    }

    let night_count: u64 = hour_totals[..6].iter().sum();

    Some(TemporalPatterns {
        heatmap,
        monthly_trend,
        yearly_totals: yearly
            .into_iter()
            .map(|(year, count)| YearlyTotal { year, count })
            .collect(),
        peak_hour: first_max_index(&hour_totals) as u32,
        peak_weekday: first_max_index(&weekday_totals) as u32,
        active_hours: hour_totals.iter().filter(|&&c| c > 0).count() as u32,
        night_owl_ratio: night_count as f64 / total as f64,
        total_messages: total,
    })
}

/// Index of the maximum, taking the first occurrence on ties.
fn first_max_index(counts: &[u64]) -> usize {
    let mut best = 0;
    for (i, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(weekday: u32, hour: u32, month: &str, year: i32) -> TimeFeature {
        TimeFeature {
            weekday,
            hour,
            month: month.to_string(),
            year,
        }
    }

    #[test]
    fn test_empty_stream_is_none() {
        assert!(aggregate_temporal(&[]).is_none());
    }

    #[test]
    fn test_heatmap_total_matches_event_count() {
        let features: Vec<TimeFeature> = (0..100)
            .map(|i| feature(i % 7, (i * 3) % 24, "2024-03", 2024))
            .collect();
        let patterns = aggregate_temporal(&features).unwrap();

        let heatmap_total: u64 = patterns.heatmap.iter().flatten().sum();
        assert_eq!(heatmap_total, 100);
        assert_eq!(patterns.total_messages, 100);

        let monthly_total: u64 = patterns.monthly_trend.iter().map(|p| p.count).sum();
        assert_eq!(monthly_total, 100);
        let yearly_total: u64 = patterns.yearly_totals.iter().map(|y| y.count).sum();
        assert_eq!(yearly_total, 100);
    }

    #[test]
    fn test_monthly_trend_keeps_recent_twelve() {
        let mut features = Vec::new();
        for month in 1..=12 {
            features.push(feature(0, 10, &format!("2023-{:02}", month), 2023));
        }
        for month in 1..=3 {
            for _ in 0..month {
                features.push(feature(0, 10, &format!("2024-{:02}", month), 2024));
            }
        }

        let patterns = aggregate_temporal(&features).unwrap();
        assert_eq!(patterns.monthly_trend.len(), 12);
        assert_eq!(patterns.monthly_trend[0].month, "2023-04");
        assert_eq!(patterns.monthly_trend[11].month, "2024-03");
        // 2024-02 has 2 messages, 2024-03 has 3: +50%.
        let last = &patterns.monthly_trend[11];
        assert!((last.growth_pct - 50.0).abs() < 1e-9);
        // Window-initial point reports no growth.
        assert_eq!(patterns.monthly_trend[0].growth_pct, 0.0);
    }

    #[test]
    fn test_growth_from_zero_previous_is_zero() {
        let features = vec![
            feature(0, 10, "2024-02", 2024),
            feature(0, 10, "2024-02", 2024),
        ];
        let patterns = aggregate_temporal(&features).unwrap();
        assert_eq!(patterns.monthly_trend.len(), 1);
        assert_eq!(patterns.monthly_trend[0].growth_pct, 0.0);
    }

    #[test]
    fn test_peak_ties_break_to_first_encountered() {
        // Hours 3 and 17 both have two messages; weekdays 1 and 4 tie too.
        let features = vec![
            feature(1, 3, "2024-03", 2024),
            feature(1, 17, "2024-03", 2024),
            feature(4, 3, "2024-03", 2024),
            feature(4, 17, "2024-03", 2024),
        ];
        let patterns = aggregate_temporal(&features).unwrap();
        assert_eq!(patterns.peak_hour, 3);
        assert_eq!(patterns.peak_weekday, 1);
    }

    #[test]
    fn test_night_owl_ratio() {
        let mut features: Vec<TimeFeature> = (0..3).map(|_| feature(2, 2, "2024-03", 2024)).collect();
        features.extend((0..7).map(|_| feature(2, 15, "2024-03", 2024)));

        let patterns = aggregate_temporal(&features).unwrap();
        assert!((patterns.night_owl_ratio - 0.3).abs() < 1e-9);
        assert_eq!(patterns.active_hours, 2);
        assert!((0.0..=1.0).contains(&patterns.night_owl_ratio));
    }

    #[test]
    fn test_time_feature_extraction_is_consistent() {
        let ts = Utc::now();
        let f = TimeFeature::from_timestamp(ts);
        assert!(f.weekday < 7);
        assert!(f.hour < 24);
        assert_eq!(f.month.len(), 7);
        assert!(f.month.starts_with(&format!("{:04}", f.year)));
    }
}
