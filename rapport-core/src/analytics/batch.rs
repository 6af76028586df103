//! Batch orchestration over the contact list.
//!
//! Drives the base scorer across contacts, collects partial failures, and
//! assembles the combined report: ranked friends, score statistics,
//! relationship categories, preference summary, temporal patterns, social
//! health and the network layout.
//!
//! Per-contact work (segmentation, profiling, achievements) is a pure
//! function of that contact's own message slice; the orchestrator is
//! single-threaded and synchronous, treating store and scorer calls as
//! blocking. A failed contact is recorded and skipped, never retried, and
//! never aborts the batch.

use crate::analytics::achievements::{evaluate_achievements, Achievement};
use crate::analytics::health::{score_social_health, DimensionSamples, SocialHealthReport};
use crate::analytics::interaction::{profile_interactions, InteractionProfile};
use crate::analytics::network::{build_network_graph, NetworkGraph};
use crate::analytics::session::{default_session_gap, segment_sessions};
use crate::analytics::temporal::{aggregate_temporal, TemporalPatterns, TimeFeature};
use crate::error::{Error, Result};
use crate::store::{MessageStore, RelationScorer};
use crate::types::{
    normalize_messages, Contact, ContactScoreSummary, Dimension, RelationScore,
    RelationshipCategory,
};
use chrono::Duration;
use rand::Rng;
use serde::Serialize;

// ============================================
// Request parameters
// ============================================

/// Parameters of a batch run. Zero means "unlimited" for both fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Truncate the ranked friend list to the top N (0 = return all)
    pub top_n: usize,
    /// Analyze at most this many contacts from the head of the list
    /// (0 = all contacts)
    pub limit: usize,
}

// ============================================
// Report shapes
// ============================================

/// Score-distribution histogram over fixed two-point bins.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScoreDistribution {
    /// Counts per bin: [0,2), [2,4), [4,6), [6,8), [8,10]
    pub buckets: [u64; 5],
}

impl ScoreDistribution {
    pub const BUCKET_LABELS: [&'static str; 5] = ["0-2", "2-4", "4-6", "6-8", "8-10"];

    fn record(&mut self, score: f64) {
        let bin = match score {
            s if s < 2.0 => 0,
            s if s < 4.0 => 1,
            s if s < 6.0 => 2,
            s if s < 8.0 => 3,
            _ => 4,
        };
        self.buckets[bin] += 1;
    }
}

/// Aggregate score statistics for the batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScoreStatistics {
    pub average_score: f64,
    /// Element at index n/2 of the ascending sort (upper median)
    pub median_score: f64,
    pub distribution: ScoreDistribution,
}

impl ScoreStatistics {
    fn from_summaries(summaries: &[ContactScoreSummary]) -> Self {
        if summaries.is_empty() {
            return Self::default();
        }

        let mut distribution = ScoreDistribution::default();
        let mut scores: Vec<f64> = Vec::with_capacity(summaries.len());
        for summary in summaries {
            distribution.record(summary.score);
            scores.push(summary.score);
        }
        scores.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Self {
            average_score: scores.iter().sum::<f64>() / scores.len() as f64,
            median_score: scores[scores.len() / 2],
            distribution,
        }
    }
}

/// One relationship-category bucket with its members.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBucket {
    pub category: RelationshipCategory,
    pub members: Vec<ContactScoreSummary>,
    pub count: usize,
}

/// All four category buckets, in fixed order, plus summary counts.
#[derive(Debug, Clone, Serialize)]
pub struct RelationshipCategories {
    pub buckets: Vec<CategoryBucket>,
}

impl RelationshipCategories {
    fn categorize(summaries: &[ContactScoreSummary]) -> Self {
        let mut members: [Vec<ContactScoreSummary>; 4] = Default::default();
        for summary in summaries {
            members[summary.category().index()].push(summary.clone());
        }

        let buckets = RelationshipCategory::ALL
            .iter()
            .zip(members)
            .map(|(&category, members)| CategoryBucket {
                category,
                count: members.len(),
                members,
            })
            .collect();
        Self { buckets }
    }

    /// Member count for one category.
    pub fn count(&self, category: RelationshipCategory) -> usize {
        self.buckets[category.index()].count
    }
}

/// Per-dimension aggregate used in the preference summary.
#[derive(Debug, Clone, Serialize)]
pub struct DimensionPreference {
    pub dimension: Dimension,
    pub average: f64,
    pub std: f64,
    /// average / 10
    pub strength: f64,
}

/// Which dimension dominates the account holder's scoring profile.
#[derive(Debug, Clone, Serialize)]
pub struct PreferenceSummary {
    /// Social-style label of the dominant dimension; "Unknown" when no
    /// contacts were analyzed
    pub user_type: String,
    /// Dominant dimension, if any contact was analyzed
    pub dominant: Option<Dimension>,
    /// Per-dimension aggregates in fixed order
    pub preferences: Vec<DimensionPreference>,
    pub description: String,
    pub analyzed_count: usize,
}

impl PreferenceSummary {
    fn from_samples(samples: &DimensionSamples, analyzed_count: usize) -> Self {
        if analyzed_count == 0 {
            return Self {
                user_type: "Unknown".to_string(),
                dominant: None,
                preferences: Vec::new(),
                description: "Not enough data to analyze preferences".to_string(),
                analyzed_count: 0,
            };
        }

        let preferences: Vec<DimensionPreference> = Dimension::ALL
            .iter()
            .map(|&dimension| {
                let values = samples.get(dimension);
                let average = mean(values);
                DimensionPreference {
                    dimension,
                    average,
                    std: population_std(values, average),
                    strength: average / 10.0,
                }
            })
            .collect();

        // Strict comparison keeps the first dimension on ties, matching the
        // fixed iteration order.
        let mut dominant = &preferences[0];
        for pref in &preferences[1..] {
            if pref.average > dominant.average {
                dominant = pref;
            }
        }

        let style = dominant.dimension.social_style();
        let description = format!(
            "Based on {} analyzed contacts, you are a {} who values {} most",
            analyzed_count,
            style,
            dominant.dimension.display_name()
        );

        Self {
            user_type: style.to_string(),
            dominant: Some(dominant.dimension),
            preferences,
            description,
            analyzed_count,
        }
    }
}

/// The combined batch-analysis report.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Ranked by score descending; ties keep contact-list order
    pub top_friends: Vec<ContactScoreSummary>,
    pub total_contacts: usize,
    pub total_analyzed: usize,
    pub failed_count: usize,
    pub statistics: ScoreStatistics,
    pub categories: RelationshipCategories,
    pub preference: PreferenceSummary,
    /// Absent when no analyzed contact contributed a valid message
    pub temporal: Option<TemporalPatterns>,
    pub health: SocialHealthReport,
    /// Absent when no contact was analyzed
    pub network: Option<NetworkGraph>,
}

/// Single-contact analysis result.
#[derive(Debug, Clone, Serialize)]
pub struct ContactReport {
    pub score: RelationScore,
    pub profile: InteractionProfile,
    pub achievements: Vec<Achievement>,
}

// ============================================
// Orchestrator
// ============================================

/// Runs the analytics pipeline over a message store and base scorer.
///
/// Both collaborators are injected at construction; the analyzer holds no
/// other state and can be constructed once and reused across requests.
pub struct BatchAnalyzer<S, C> {
    store: S,
    scorer: C,
    session_gap: Duration,
}

impl<S: MessageStore, C: RelationScorer> BatchAnalyzer<S, C> {
    pub fn new(store: S, scorer: C) -> Self {
        Self {
            store,
            scorer,
            session_gap: default_session_gap(),
        }
    }

    /// Override the session inactivity threshold.
    pub fn with_session_gap(mut self, gap: Duration) -> Self {
        self.session_gap = gap;
        self
    }

    /// Analyze a single contact: base score, interaction profile and
    /// achievements.
    ///
    /// Returns [`Error::NoHistory`] when the contact has no messages with
    /// parseable timestamps.
    pub fn analyze_contact(&self, contact_id: &str) -> Result<ContactReport> {
        let messages = normalize_messages(self.store.get_messages(contact_id)?);
        if messages.is_empty() {
            return Err(Error::NoHistory(contact_id.to_string()));
        }

        let score = self.scorer.score(&messages)?;
        let sessions = segment_sessions(&messages, self.session_gap);
        let profile = profile_interactions(&messages, &sessions);
        let achievements = evaluate_achievements(&messages, &profile);

        Ok(ContactReport {
            score,
            profile,
            achievements,
        })
    }

    /// Run the full batch analysis with a platform RNG for the graph
    /// layout.
    pub fn run_batch(&self, options: BatchOptions) -> Result<BatchReport> {
        self.run_batch_with_rng(options, &mut rand::thread_rng())
    }

    /// Run the full batch analysis with an injected RNG (seed it for a
    /// reproducible network layout).
    pub fn run_batch_with_rng<R: Rng + ?Sized>(
        &self,
        options: BatchOptions,
        rng: &mut R,
    ) -> Result<BatchReport> {
        let contacts = self.store.list_contacts()?;
        let total_contacts = contacts.len();

        let to_analyze: &[Contact] = if options.limit > 0 {
            &contacts[..contacts.len().min(options.limit)]
        } else {
            &contacts
        };

        tracing::info!(
            total = total_contacts,
            analyzing = to_analyze.len(),
            "Starting batch analysis"
        );

        let mut summaries: Vec<ContactScoreSummary> = Vec::new();
        let mut samples = DimensionSamples::default();
        let mut features: Vec<TimeFeature> = Vec::new();
        let mut failed_count = 0usize;

        for contact in to_analyze {
            match self.score_contact(contact, &mut features) {
                Ok(Some(summary)) => {
                    samples.push(&summary.dimensions);
                    summaries.push(summary);
                }
                Ok(None) => {
                    tracing::debug!(contact = %contact.id, "No messages, skipping");
                }
                Err(e) => {
                    tracing::warn!(contact = %contact.id, error = %e, "Contact analysis failed");
                    failed_count += 1;
                }
            }
        }

        let total_analyzed = summaries.len();
        // Stable sort: equal scores keep their contact-list order.
        summaries.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::info!(
            analyzed = total_analyzed,
            failed = failed_count,
            "Batch analysis complete"
        );

        let statistics = ScoreStatistics::from_summaries(&summaries);
        let categories = RelationshipCategories::categorize(&summaries);
        let preference = PreferenceSummary::from_samples(&samples, total_analyzed);
        let temporal = aggregate_temporal(&features);
        let health = score_social_health(&summaries, &samples);
        let network = build_network_graph(&summaries, rng);

        let top_friends = if options.top_n > 0 {
            summaries.truncate(options.top_n);
            summaries
        } else {
            summaries
        };

        Ok(BatchReport {
            top_friends,
            total_contacts,
            total_analyzed,
            failed_count,
            statistics,
            categories,
            preference,
            temporal,
            health,
            network,
        })
    }

    /// Score one contact for the batch, emitting its time features.
    ///
    /// `Ok(None)` means "no analyzable messages, skip", which is distinct
    /// from a failure.
    fn score_contact(
        &self,
        contact: &Contact,
        features: &mut Vec<TimeFeature>,
    ) -> Result<Option<ContactScoreSummary>> {
        let messages = normalize_messages(self.store.get_messages(&contact.id)?);
        if messages.is_empty() {
            return Ok(None);
        }

        let score = self.scorer.score(&messages)?;

        features.extend(
            messages
                .iter()
                .filter_map(|m| m.ts)
                .map(TimeFeature::from_timestamp),
        );

        Ok(Some(ContactScoreSummary::from_score(contact, &score)))
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn population_std(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
