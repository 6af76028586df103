//! Interaction-pattern profiling for one contact.
//!
//! Consumes the session set produced by [`super::session`] together with
//! the raw time-ordered message sequence and derives initiator, reply-delay,
//! session-length and directionality statistics. All four sub-results are
//! computed from the same session set so they stay internally consistent.

use crate::analytics::session::Session;
use crate::types::ChatMessage;
use serde::Serialize;

/// Upper bounds (seconds, exclusive) of the reply-delay buckets; the last
/// bucket is open-ended.
const REPLY_DELAY_BOUNDS_SECS: [i64; 6] = [60, 300, 600, 1800, 3600, 10_800];

/// Session-initiator statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InitiatorStats {
    /// Sessions whose first message came from the account holder
    pub self_initiated: u64,
    /// Sessions opened by the contact
    pub contact_initiated: u64,
    pub total_sessions: u64,
    /// self_initiated / total_sessions, 0 when there are no sessions
    pub self_rate: f64,
}

/// Reply-delay histogram and percentiles.
///
/// A reply pair exists wherever the sender flips between two adjacent
/// messages of the full (ungrouped) sequence; the delay is that pair's time
/// gap. Percentiles use linear interpolation between closest ranks.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplyDelayStats {
    /// Counts per bucket: <1m, 1–5m, 5–10m, 10–30m, 30–60m, 1–3h, >3h
    /// (left-closed, right-open)
    pub buckets: [u64; 7],
    pub median_secs: f64,
    pub p90_secs: f64,
    pub pair_count: u64,
}

impl ReplyDelayStats {
    pub const BUCKET_LABELS: [&'static str; 7] =
        ["<1m", "1-5m", "5-10m", "10-30m", "30-60m", "1-3h", ">3h"];

    /// Median reply delay formatted for display (e.g. "12m").
    pub fn median_display(&self) -> String {
        crate::format::format_delay_secs(self.median_secs)
    }
}

/// Session-size histogram and averages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionLengthStats {
    /// Counts per bucket: 1, 2–3, 4–6, 7–10, >10 messages
    pub buckets: [u64; 5],
    pub mean: f64,
    pub median: f64,
    pub session_count: u64,
}

impl SessionLengthStats {
    pub const BUCKET_LABELS: [&'static str; 5] = ["1", "2-3", "4-6", "7-10", ">10"];
}

/// One-way vs two-way session counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectionalityStats {
    /// Sessions where only one party sent messages
    pub one_way: u64,
    pub two_way: u64,
    /// one_way / total sessions, 0 when there are no sessions
    pub one_way_rate: f64,
}

/// Full interaction profile for one contact. Immutable once computed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InteractionProfile {
    pub initiator: InitiatorStats,
    pub reply_delay: ReplyDelayStats,
    pub session_length: SessionLengthStats,
    pub directionality: DirectionalityStats,
    /// False when no message in the history is marked as sent by the
    /// account holder. Without sender identity the initiator and
    /// directionality metrics degrade to "entirely contact-initiated";
    /// the degradation is surfaced here rather than silently absorbed.
    pub sender_identity_available: bool,
}

/// Profile one contact's interaction patterns.
///
/// `messages` is the same sorted, timestamp-valid sequence the sessions
/// were segmented from.
pub fn profile_interactions(messages: &[ChatMessage], sessions: &[Session]) -> InteractionProfile {
    InteractionProfile {
        initiator: initiator_stats(sessions),
        reply_delay: reply_delay_stats(messages),
        session_length: session_length_stats(sessions),
        directionality: directionality_stats(sessions),
        sender_identity_available: messages.iter().any(|m| m.is_self),
    }
}

fn initiator_stats(sessions: &[Session]) -> InitiatorStats {
    let total = sessions.len() as u64;
    let self_initiated = sessions.iter().filter(|s| s.initiated_by_self()).count() as u64;
    InitiatorStats {
        self_initiated,
        contact_initiated: total - self_initiated,
        total_sessions: total,
        self_rate: ratio(self_initiated, total),
    }
}

fn reply_delay_stats(messages: &[ChatMessage]) -> ReplyDelayStats {
    let mut delays: Vec<f64> = Vec::new();
    let mut buckets = [0u64; 7];

    for pair in messages.windows(2) {
        if pair[0].is_self == pair[1].is_self {
            continue;
        }
        let (Some(prev), Some(cur)) = (pair[0].ts, pair[1].ts) else {
            continue;
        };
        let secs = cur.signed_duration_since(prev).num_seconds().max(0);
        buckets[delay_bucket(secs)] += 1;
        delays.push(secs as f64);
    }

    delays.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    ReplyDelayStats {
        buckets,
        median_secs: percentile(&delays, 0.5),
        p90_secs: percentile(&delays, 0.9),
        pair_count: delays.len() as u64,
    }
}

fn session_length_stats(sessions: &[Session]) -> SessionLengthStats {
    let mut buckets = [0u64; 5];
    let mut lengths: Vec<f64> = Vec::with_capacity(sessions.len());

    for session in sessions {
        let len = session.len();
        let bucket = match len {
            0..=1 => 0,
            2..=3 => 1,
            4..=6 => 2,
            7..=10 => 3,
            _ => 4,
        };
        buckets[bucket] += 1;
        lengths.push(len as f64);
    }

    lengths.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mean = if lengths.is_empty() {
        0.0
    } else {
        lengths.iter().sum::<f64>() / lengths.len() as f64
    };

    SessionLengthStats {
        buckets,
        mean,
        median: percentile(&lengths, 0.5),
        session_count: sessions.len() as u64,
    }
}

fn directionality_stats(sessions: &[Session]) -> DirectionalityStats {
    let total = sessions.len() as u64;
    let one_way = sessions.iter().filter(|s| s.is_one_way()).count() as u64;
    DirectionalityStats {
        one_way,
        two_way: total - one_way,
        one_way_rate: ratio(one_way, total),
    }
}

fn delay_bucket(secs: i64) -> usize {
    REPLY_DELAY_BOUNDS_SECS
        .iter()
        .position(|&bound| secs < bound)
        .unwrap_or(REPLY_DELAY_BOUNDS_SECS.len())
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

/// Percentile over an ascending-sorted slice, linearly interpolated between
/// the two closest ranks. Empty input yields 0.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::session::{default_session_gap, segment_sessions};
    use chrono::{Duration, TimeZone, Utc};

    fn msg_at_secs(offset: i64, is_self: bool) -> ChatMessage {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        ChatMessage {
            ts: Some(base + Duration::seconds(offset)),
            is_self,
            content: Some("hello".to_string()),
            type_code: Some(1),
            subtype_code: None,
        }
    }

    /// 40 messages alternating sender, each pair 30 seconds apart.
    fn alternating_messages() -> Vec<ChatMessage> {
        (0..40)
            .map(|i| msg_at_secs(i * 30, i % 2 == 1))
            .collect()
    }

    #[test]
    fn test_alternating_senders_scenario() {
        let messages = alternating_messages();
        let sessions = segment_sessions(&messages, default_session_gap());
        let profile = profile_interactions(&messages, &sessions);

        assert_eq!(profile.reply_delay.pair_count, 39);
        assert_eq!(profile.reply_delay.median_secs, 30.0);
        assert_eq!(profile.reply_delay.buckets[0], 39, "all pairs in <1m");
        assert_eq!(profile.reply_delay.buckets[1..].iter().sum::<u64>(), 0);
        assert_eq!(profile.directionality.one_way_rate, 0.0);
        assert_eq!(profile.directionality.two_way, 1);
        assert!(profile.sender_identity_available);
    }

    #[test]
    fn test_histogram_totals_match_event_counts() {
        let messages = alternating_messages();
        let sessions = segment_sessions(&messages, default_session_gap());
        let profile = profile_interactions(&messages, &sessions);

        let delay_total: u64 = profile.reply_delay.buckets.iter().sum();
        assert_eq!(delay_total, profile.reply_delay.pair_count);

        let length_total: u64 = profile.session_length.buckets.iter().sum();
        assert_eq!(length_total, profile.session_length.session_count);
    }

    #[test]
    fn test_missing_sender_identity_degrades_gracefully() {
        let messages: Vec<ChatMessage> = (0..6).map(|i| msg_at_secs(i * 60, false)).collect();
        let sessions = segment_sessions(&messages, default_session_gap());
        let profile = profile_interactions(&messages, &sessions);

        assert!(!profile.sender_identity_available);
        assert_eq!(profile.initiator.self_initiated, 0);
        assert_eq!(profile.initiator.self_rate, 0.0);
        assert_eq!(profile.directionality.one_way_rate, 1.0);
        assert_eq!(profile.reply_delay.pair_count, 0, "no sender flips, no pairs");
    }

    #[test]
    fn test_empty_input_yields_zeroes_not_nan() {
        let profile = profile_interactions(&[], &[]);
        assert_eq!(profile.initiator.self_rate, 0.0);
        assert_eq!(profile.reply_delay.median_secs, 0.0);
        assert_eq!(profile.reply_delay.p90_secs, 0.0);
        assert_eq!(profile.session_length.mean, 0.0);
        assert_eq!(profile.directionality.one_way_rate, 0.0);
        assert!(!profile.initiator.self_rate.is_nan());
    }

    #[test]
    fn test_rates_stay_in_unit_interval() {
        let messages = alternating_messages();
        let sessions = segment_sessions(&messages, default_session_gap());
        let profile = profile_interactions(&messages, &sessions);
        assert!((0.0..=1.0).contains(&profile.initiator.self_rate));
        assert!((0.0..=1.0).contains(&profile.directionality.one_way_rate));
    }

    #[test]
    fn test_delay_buckets_are_left_closed() {
        assert_eq!(delay_bucket(0), 0);
        assert_eq!(delay_bucket(59), 0);
        assert_eq!(delay_bucket(60), 1);
        assert_eq!(delay_bucket(299), 1);
        assert_eq!(delay_bucket(300), 2);
        assert_eq!(delay_bucket(600), 3);
        assert_eq!(delay_bucket(1800), 4);
        assert_eq!(delay_bucket(3600), 5);
        assert_eq!(delay_bucket(10_800), 6);
        assert_eq!(delay_bucket(1_000_000), 6);
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let values = vec![10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile(&values, 0.5), 25.0);
        assert!((percentile(&values, 0.9) - 37.0).abs() < 1e-9);
        assert_eq!(percentile(&[], 0.5), 0.0);
        assert_eq!(percentile(&[7.0], 0.9), 7.0);
    }

    #[test]
    fn test_session_length_buckets() {
        // Sessions of sizes 1, 3, 5 and 12, separated by long gaps.
        let mut messages = Vec::new();
        let mut offset = 0i64;
        for size in [1, 3, 5, 12] {
            for _ in 0..size {
                messages.push(msg_at_secs(offset, false));
                offset += 30;
            }
            offset += 4 * 3600;
        }
        let sessions = segment_sessions(&messages, default_session_gap());
        let stats = session_length_stats(&sessions);

        assert_eq!(stats.session_count, 4);
        assert_eq!(stats.buckets, [1, 1, 1, 0, 1]);
        assert_eq!(stats.median, 4.0, "interpolated median of [1,3,5,12]");
        assert!((stats.mean - 5.25).abs() < 1e-9);
    }
}
