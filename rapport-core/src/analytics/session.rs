//! Conversation session segmentation.
//!
//! A session is a bounded run of one contact's messages with no inactivity
//! gap of [`DEFAULT_SESSION_GAP_MINUTES`] or more between consecutive
//! records. Sessions are derived, never persisted; they live for one
//! analysis call and borrow the message slice they were cut from.

use crate::types::ChatMessage;
use chrono::Duration;

/// Inactivity threshold that closes a session.
pub const DEFAULT_SESSION_GAP_MINUTES: i64 = 45;

/// Default session gap as a [`Duration`].
pub fn default_session_gap() -> Duration {
    Duration::minutes(DEFAULT_SESSION_GAP_MINUTES)
}

/// A contiguous run of messages forming one conversation.
#[derive(Debug, Clone, Copy)]
pub struct Session<'a> {
    /// Deterministic index, starting at 0 in message order
    pub index: usize,
    /// The messages in this session (non-empty)
    pub messages: &'a [ChatMessage],
}

impl Session<'_> {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether the account holder sent the first message of this session.
    pub fn initiated_by_self(&self) -> bool {
        self.messages.first().is_some_and(|m| m.is_self)
    }

    /// One-way ⇔ every message in the session has the same sender.
    pub fn is_one_way(&self) -> bool {
        match self.messages.first() {
            Some(first) => self.messages.iter().all(|m| m.is_self == first.is_self),
            None => true,
        }
    }
}

/// Split a contact's time-ordered messages into sessions.
///
/// A new session starts at record 0 and at every record whose gap to the
/// immediately preceding record is at least `gap`. The caller must supply
/// messages sorted ascending by timestamp with unparseable timestamps
/// already dropped (see [`crate::types::normalize_messages`]); the
/// segmenter does not re-sort.
///
/// Zero messages produce an empty output, a single message one session of
/// size 1. Pure function, no failure modes.
pub fn segment_sessions(messages: &[ChatMessage], gap: Duration) -> Vec<Session<'_>> {
    let mut sessions = Vec::new();
    if messages.is_empty() {
        return sessions;
    }

    let mut start = 0;
    let mut prev_ts = messages[0].ts;
    for (i, msg) in messages.iter().enumerate().skip(1) {
        if let (Some(prev), Some(cur)) = (prev_ts, msg.ts) {
            if cur.signed_duration_since(prev) >= gap {
                sessions.push(Session {
                    index: sessions.len(),
                    messages: &messages[start..i],
                });
                start = i;
            }
        }
        prev_ts = msg.ts;
    }
    sessions.push(Session {
        index: sessions.len(),
        messages: &messages[start..],
    });

    sessions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn msg_at(minute_offset: i64, is_self: bool) -> ChatMessage {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        ChatMessage {
            ts: Some(base + Duration::minutes(minute_offset)),
            is_self,
            content: Some("hi".to_string()),
            type_code: Some(1),
            subtype_code: None,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(segment_sessions(&[], default_session_gap()).is_empty());
    }

    #[test]
    fn test_single_message_single_session() {
        let messages = vec![msg_at(0, false)];
        let sessions = segment_sessions(&messages, default_session_gap());
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].index, 0);
        assert_eq!(sessions[0].len(), 1);
    }

    #[test]
    fn test_boundary_at_exact_threshold() {
        // Gap of exactly 45 minutes closes the session; 44 does not.
        let messages = vec![msg_at(0, false), msg_at(45, true)];
        let sessions = segment_sessions(&messages, default_session_gap());
        assert_eq!(sessions.len(), 2);

        let messages = vec![msg_at(0, false), msg_at(44, true)];
        let sessions = segment_sessions(&messages, default_session_gap());
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].len(), 2);
    }

    #[test]
    fn test_session_indices_are_deterministic() {
        let messages = vec![
            msg_at(0, false),
            msg_at(10, true),
            msg_at(120, false),
            msg_at(300, true),
        ];
        let sessions = segment_sessions(&messages, default_session_gap());
        let indices: Vec<usize> = sessions.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        let total: usize = sessions.iter().map(|s| s.len()).sum();
        assert_eq!(total, messages.len(), "no message is dropped or duplicated");
    }

    #[test]
    fn test_session_count_monotone_in_threshold() {
        // Shrinking the inactivity threshold can only cut more boundaries.
        let messages: Vec<ChatMessage> = [0, 5, 30, 90, 95, 200, 600]
            .iter()
            .map(|&m| msg_at(m, false))
            .collect();

        let mut previous = 0;
        for minutes in [240, 90, 45, 20, 3] {
            let count = segment_sessions(&messages, Duration::minutes(minutes)).len();
            assert!(
                count >= previous,
                "sessions must not decrease as the gap shrinks ({} < {})",
                count,
                previous
            );
            previous = count;
        }
    }

    #[test]
    fn test_directionality_helpers() {
        let one_way = vec![msg_at(0, false), msg_at(1, false)];
        let sessions = segment_sessions(&one_way, default_session_gap());
        assert!(sessions[0].is_one_way());
        assert!(!sessions[0].initiated_by_self());

        let two_way = vec![msg_at(0, true), msg_at(1, false)];
        let sessions = segment_sessions(&two_way, default_session_gap());
        assert!(!sessions[0].is_one_way());
        assert!(sessions[0].initiated_by_self());
    }
}
