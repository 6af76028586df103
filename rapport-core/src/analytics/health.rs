//! Composite social-health scoring.
//!
//! Blends four sub-indices over the whole analyzed contact portfolio into
//! one 0–100 composite, a 4-tier level and up to three improvement
//! suggestions.

use crate::types::{ContactScoreSummary, Dimension};
use serde::Serialize;

/// Weights of (diversity, balance, maintenance, emotional) in the overall
/// composite; they sum to 1.0, so the overall score is a convex combination
/// of sub-indices and stays within [0, 100].
const WEIGHTS: [f64; 4] = [0.25, 0.25, 0.30, 0.20];

/// Neutral value used when a sub-index is undefined (too little data).
const NEUTRAL: f64 = 50.0;

/// Sub-indices below this threshold earn a suggestion.
const SUGGESTION_THRESHOLD: f64 = 60.0;

/// Per-dimension sample arrays accumulated across all analyzed contacts.
#[derive(Debug, Clone, Default)]
pub struct DimensionSamples {
    pub interaction: Vec<f64>,
    pub content: Vec<f64>,
    pub emotion: Vec<f64>,
    pub depth: Vec<f64>,
}

impl DimensionSamples {
    /// Record one contact's dimension scores.
    pub fn push(&mut self, scores: &crate::types::DimensionScores) {
        self.interaction.push(scores.interaction);
        self.content.push(scores.content);
        self.emotion.push(scores.emotion);
        self.depth.push(scores.depth);
    }

    pub fn get(&self, dim: Dimension) -> &[f64] {
        match dim {
            Dimension::Interaction => &self.interaction,
            Dimension::Content => &self.content,
            Dimension::Emotion => &self.emotion,
            Dimension::Depth => &self.depth,
        }
    }
}

/// Four-tier health level from fixed thresholds 80/60/40.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthLevel {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl HealthLevel {
    pub fn from_overall(overall: f64) -> Self {
        if overall >= 80.0 {
            HealthLevel::Excellent
        } else if overall >= 60.0 {
            HealthLevel::Good
        } else if overall >= 40.0 {
            HealthLevel::Fair
        } else {
            HealthLevel::NeedsImprovement
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLevel::Excellent => "excellent",
            HealthLevel::Good => "good",
            HealthLevel::Fair => "fair",
            HealthLevel::NeedsImprovement => "needs_improvement",
        }
    }
}

/// The composite social-health report.
#[derive(Debug, Clone, Serialize)]
pub struct SocialHealthReport {
    /// How evenly scores spread across the portfolio, 0–100
    pub diversity: f64,
    /// How close the strong-tie fraction is to the 25% ideal, 0–100
    pub balance: f64,
    /// Share of contacts the scorer labels "active", 0–100
    pub maintenance: f64,
    /// Scaled mean of the emotion dimension, 0–100
    pub emotional: f64,
    /// 0.25·diversity + 0.25·balance + 0.30·maintenance + 0.20·emotional
    pub overall_health: f64,
    pub level: HealthLevel,
    /// At most 3, in fixed priority order
    pub suggestions: Vec<String>,
}

/// Score the portfolio's social health.
///
/// Zero analyzed contacts yields a fully neutral report (all sub-indices at
/// 50, no suggestions) rather than an error.
pub fn score_social_health(
    summaries: &[ContactScoreSummary],
    dimensions: &DimensionSamples,
) -> SocialHealthReport {
    if summaries.is_empty() {
        return SocialHealthReport {
            diversity: NEUTRAL,
            balance: NEUTRAL,
            maintenance: NEUTRAL,
            emotional: NEUTRAL,
            overall_health: NEUTRAL,
            level: HealthLevel::from_overall(NEUTRAL),
            suggestions: Vec::new(),
        };
    }

    let scores: Vec<f64> = summaries.iter().map(|s| s.score).collect();
    let total = summaries.len() as f64;

    // Diversity: a healthy portfolio has a score spread near 2.5.
    let diversity = match stddev(&scores) {
        Some(sd) => (100.0 - (sd - 2.5).abs() * 20.0).clamp(0.0, 100.0),
        None => NEUTRAL,
    };

    // Balance: roughly a quarter of contacts should be strong ties (≥6).
    let strong_fraction = scores.iter().filter(|&&s| s >= 6.0).count() as f64 / total;
    let balance = (100.0 - (strong_fraction - 0.25).abs() * 200.0).clamp(0.0, 100.0);

    let active = summaries
        .iter()
        .filter(|s| s.relationship_status.eq_ignore_ascii_case("active"))
        .count() as f64;
    let maintenance = 100.0 * active / total;

    let emotion_samples = dimensions.get(Dimension::Emotion);
    let emotional = if emotion_samples.is_empty() {
        NEUTRAL
    } else {
        let mean = emotion_samples.iter().sum::<f64>() / emotion_samples.len() as f64;
        (mean * 10.0).min(100.0)
    };

    let sub_indices = [diversity, balance, maintenance, emotional];
    let overall_health: f64 = sub_indices
        .iter()
        .zip(WEIGHTS.iter())
        .map(|(s, w)| s * w)
        .sum();

    SocialHealthReport {
        diversity,
        balance,
        maintenance,
        emotional,
        overall_health,
        level: HealthLevel::from_overall(overall_health),
        suggestions: build_suggestions(&sub_indices),
    }
}

/// At most one suggestion per low sub-index, capped at 3, in fixed priority
/// order: diversity, balance, maintenance, emotional.
fn build_suggestions(sub_indices: &[f64; 4]) -> Vec<String> {
    const TEXTS: [&str; 4] = [
        "Your relationships cluster at similar strengths; mixing casual and close contacts makes the portfolio more resilient.",
        "Strong ties are out of proportion; aim for roughly a quarter of contacts in the close range.",
        "Many relationships are going quiet; reach out to a few dormant contacts this week.",
        "Emotional expression is low across your chats; sharing more of how you feel deepens connections.",
    ];

    sub_indices
        .iter()
        .zip(TEXTS.iter())
        .filter(|(&score, _)| score < SUGGESTION_THRESHOLD)
        .take(3)
        .map(|(_, &text)| text.to_string())
        .collect()
}

/// Population standard deviation; `None` for fewer than two samples.
fn stddev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt())
}
