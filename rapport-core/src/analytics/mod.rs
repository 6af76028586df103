//! Analytics pipeline for rapport
//!
//! Derives aggregate insights from raw chat history and base relation
//! scores:
//! - Session segmentation (gap-based conversation bursts)
//! - Interaction profiling (initiative, reply latency, directionality)
//! - Achievement evaluation over a fixed catalog
//! - Temporal activity patterns (heatmap, trends, peaks)
//! - Social health scoring across the whole contact portfolio
//! - Relationship network graph layout
//!
//! ## Orchestration
//!
//! [`batch::BatchAnalyzer`] drives the per-contact analyzers over a
//! [`crate::store::MessageStore`] and a [`crate::store::RelationScorer`],
//! tolerating per-contact failures, and assembles the combined
//! [`batch::BatchReport`].

pub mod achievements;
pub mod batch;
pub mod health;
pub mod interaction;
pub mod network;
pub mod session;
pub mod temporal;

pub use achievements::{evaluate_achievements, Achievement, AchievementKey};
pub use batch::{
    BatchAnalyzer, BatchOptions, BatchReport, ContactReport, PreferenceSummary,
    RelationshipCategories, ScoreDistribution, ScoreStatistics,
};
pub use health::{score_social_health, DimensionSamples, HealthLevel, SocialHealthReport};
pub use interaction::{profile_interactions, InteractionProfile, ReplyDelayStats};
pub use network::{build_network_graph, NetworkGraph, MAX_GRAPH_NODES};
pub use session::{default_session_gap, segment_sessions, Session, DEFAULT_SESSION_GAP_MINUTES};
pub use temporal::{aggregate_temporal, TemporalPatterns, TimeFeature};
