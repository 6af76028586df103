//! Gamified achievement evaluation.
//!
//! Exactly eight fixed achievements are evaluated per contact, in a fixed
//! order, each independently of the others. Evaluation is stateless and
//! recomputed on every call; `progress` is informative even when the
//! achievement is not earned and always clamps to [0, 1].

use crate::analytics::interaction::InteractionProfile;
use crate::types::ChatMessage;
use chrono::{Local, NaiveDate, Timelike};
use serde::Serialize;
use std::collections::BTreeSet;

/// The eight achievements, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKey {
    NightGuard,
    EmojiMaster,
    LongStreak,
    Initiator,
    FastReply,
    LongText,
    Multimedia,
    Balanced,
}

impl AchievementKey {
    pub const ALL: [AchievementKey; 8] = [
        AchievementKey::NightGuard,
        AchievementKey::EmojiMaster,
        AchievementKey::LongStreak,
        AchievementKey::Initiator,
        AchievementKey::FastReply,
        AchievementKey::LongText,
        AchievementKey::Multimedia,
        AchievementKey::Balanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementKey::NightGuard => "night_guard",
            AchievementKey::EmojiMaster => "emoji_master",
            AchievementKey::LongStreak => "long_streak",
            AchievementKey::Initiator => "initiator",
            AchievementKey::FastReply => "fast_reply",
            AchievementKey::LongText => "long_text",
            AchievementKey::Multimedia => "multimedia",
            AchievementKey::Balanced => "balanced",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AchievementKey::NightGuard => "Night Guard",
            AchievementKey::EmojiMaster => "Emoji Master",
            AchievementKey::LongStreak => "Unbroken Streak",
            AchievementKey::Initiator => "Conversation Starter",
            AchievementKey::FastReply => "Lightning Reply",
            AchievementKey::LongText => "Essayist",
            AchievementKey::Multimedia => "Multimedia Maven",
            AchievementKey::Balanced => "Perfectly Balanced",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementKey::NightGuard => "100 messages exchanged between midnight and 6am",
            AchievementKey::EmojiMaster => "At least 0.15 emoji per message on average",
            AchievementKey::LongStreak => "30 consecutive calendar days with at least one message",
            AchievementKey::Initiator => "Started 60% of conversations across 30+ sessions",
            AchievementKey::FastReply => "Median reply within a minute across 30+ sessions",
            AchievementKey::LongText => "Average message of 30+ characters over 500+ messages",
            AchievementKey::Multimedia => "20% non-text messages with at least 50 of them",
            AchievementKey::Balanced => "Send ratio within 10% of even over 200+ messages",
        }
    }
}

/// One evaluated achievement.
#[derive(Debug, Clone, Serialize)]
pub struct Achievement {
    pub key: AchievementKey,
    pub name: &'static str,
    pub achieved: bool,
    /// Progress toward the trigger, clamped to [0, 1]
    pub progress: f64,
    pub description: &'static str,
}

impl Achievement {
    fn new(key: AchievementKey, achieved: bool, progress: f64) -> Self {
        Self {
            key,
            name: key.display_name(),
            achieved,
            progress: progress.clamp(0.0, 1.0),
            description: key.description(),
        }
    }
}

/// Evaluate all eight achievements for one contact.
///
/// `messages` is the contact's full normalized history; `profile` is the
/// interaction profile computed from the same messages.
pub fn evaluate_achievements(
    messages: &[ChatMessage],
    profile: &InteractionProfile,
) -> Vec<Achievement> {
    AchievementKey::ALL
        .iter()
        .map(|&key| evaluate_one(key, messages, profile))
        .collect()
}

fn evaluate_one(
    key: AchievementKey,
    messages: &[ChatMessage],
    profile: &InteractionProfile,
) -> Achievement {
    let total = messages.len() as f64;
    match key {
        AchievementKey::NightGuard => {
            let night = messages
                .iter()
                .filter_map(|m| m.ts)
                .filter(|ts| ts.with_timezone(&Local).hour() <= 5)
                .count() as f64;
            Achievement::new(key, night >= 100.0, night / 100.0)
        }
        AchievementKey::EmojiMaster => {
            let glyphs: usize = messages
                .iter()
                .filter_map(|m| m.content.as_deref())
                .map(count_symbol_glyphs)
                .sum();
            let rate = if total > 0.0 { glyphs as f64 / total } else { 0.0 };
            Achievement::new(key, rate >= 0.15, rate / 0.15)
        }
        AchievementKey::LongStreak => {
            let streak = longest_daily_streak(messages) as f64;
            Achievement::new(key, streak >= 30.0, streak / 30.0)
        }
        AchievementKey::Initiator => {
            let rate = profile.initiator.self_rate;
            let sessions = profile.initiator.total_sessions as f64;
            let achieved = rate >= 0.6 && sessions >= 30.0;
            Achievement::new(key, achieved, (rate / 0.6) * (sessions / 30.0).min(1.0))
        }
        AchievementKey::FastReply => {
            let median = profile.reply_delay.median_secs;
            let sessions = profile.initiator.total_sessions as f64;
            let achieved =
                profile.reply_delay.pair_count > 0 && median <= 60.0 && sessions >= 30.0;
            Achievement::new(key, achieved, (60.0 / median.max(1.0)).min(1.0))
        }
        AchievementKey::LongText => {
            let chars: usize = messages.iter().map(|m| m.content_len()).sum();
            let mean = if total > 0.0 { chars as f64 / total } else { 0.0 };
            let achieved = mean >= 30.0 && total >= 500.0;
            Achievement::new(
                key,
                achieved,
                (mean / 30.0).min(1.0) * (total / 500.0).min(1.0),
            )
        }
        AchievementKey::Multimedia => {
            let non_text = messages.iter().filter(|m| !m.is_text()).count() as f64;
            let ratio = if total > 0.0 { non_text / total } else { 0.0 };
            let achieved = ratio >= 0.2 && non_text >= 50.0;
            Achievement::new(
                key,
                achieved,
                (ratio / 0.2).min(1.0) * (non_text / 50.0).min(1.0),
            )
        }
        AchievementKey::Balanced => {
            let self_count = messages.iter().filter(|m| m.is_self).count() as f64;
            let ratio = if total > 0.0 { self_count / total } else { 0.0 };
            let diff = (ratio - 0.5).abs();
            let achieved = diff <= 0.1 && total >= 200.0;
            Achievement::new(
                key,
                achieved,
                (1.0 - diff / 0.1) * (total / 200.0).min(1.0),
            )
        }
    }
}

/// Count characters in the fixed pictographic/symbol Unicode ranges.
///
/// Covers the emoticon, pictograph, transport, supplemental-symbol,
/// miscellaneous-symbol and dingbat blocks; no text content counts as 0.
fn count_symbol_glyphs(text: &str) -> usize {
    text.chars()
        .filter(|&c| {
            matches!(c,
                '\u{1F300}'..='\u{1F5FF}'
                | '\u{1F600}'..='\u{1F64F}'
                | '\u{1F680}'..='\u{1F6FF}'
                | '\u{1F900}'..='\u{1F9FF}'
                | '\u{2600}'..='\u{26FF}'
                | '\u{2700}'..='\u{27BF}')
        })
        .count()
}

/// Longest run of consecutive local calendar days with at least one message.
fn longest_daily_streak(messages: &[ChatMessage]) -> u64 {
    let dates: BTreeSet<NaiveDate> = messages.iter().filter_map(|m| m.local_date()).collect();

    let mut longest = 0u64;
    let mut run = 0u64;
    let mut prev: Option<NaiveDate> = None;
    for date in dates {
        run = match prev {
            Some(p) if (date - p).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }
    longest
}
