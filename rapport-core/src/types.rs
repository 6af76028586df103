//! Core domain types for rapport
//!
//! These types represent the canonical data model that normalizes one
//! contact's chat history into the shapes the analytics pipeline consumes.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Contact** | A person the account holder exchanges messages with |
//! | **ChatMessage** | One timestamped message in a contact's history |
//! | **Session** | A bounded run of messages with no gap ≥ the inactivity threshold |
//! | **RelationScore** | Output of the external base scorer (opaque formula) |
//! | **ContactScoreSummary** | One ranked row in the batch report |
//! | **Dimension** | One of the four fixed scoring facets |
//! | **RelationshipCategory** | Score-threshold bucket used for categorization and layout |

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Message type codes
// ============================================

/// Type code for a plain text message.
pub const TEXT_TYPE_CODE: i64 = 1;
/// Type code for rich/app messages; combined with [`QUOTE_SUBTYPE_CODE`]
/// it still counts as text (a quoted reply).
pub const RICH_TYPE_CODE: i64 = 49;
/// Subtype marking a quoted text reply inside a rich message.
pub const QUOTE_SUBTYPE_CODE: i64 = 57;

// ============================================
// Contacts and messages
// ============================================

/// A contact from the message store's address book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    /// Store-side identifier
    pub id: String,
    /// Human-friendly name
    pub display_name: String,
    /// Platform nickname, if set
    pub nickname: Option<String>,
    /// Account holder's private remark/alias, if set
    pub remark: Option<String>,
}

/// One message in a contact's chat history.
///
/// Records are immutable and sourced from the message store. A missing or
/// unparseable timestamp is represented as `None`; such records are dropped
/// before segmentation and never fail the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// When the message was sent, if the store could parse it
    pub ts: Option<DateTime<Utc>>,
    /// Whether the account holder sent this message.
    ///
    /// Stores that do not mark sender identity leave this `false` for every
    /// record, which degrades initiator and directionality metrics to
    /// "entirely contact-initiated". The interaction profile surfaces this
    /// via its `sender_identity_available` flag.
    pub is_self: bool,
    /// Text content, if any
    pub content: Option<String>,
    /// Store-specific message type code
    pub type_code: Option<i64>,
    /// Store-specific message subtype code
    pub subtype_code: Option<i64>,
}

impl ChatMessage {
    /// Whether this message is a text message.
    ///
    /// Text ⇔ `type_code == 1` or `(type_code, subtype_code) == (49, 57)`
    /// (quoted text reply). A missing type code counts as text. Every other
    /// type code is non-text (image, voice, video, sticker, ...).
    pub fn is_text(&self) -> bool {
        match self.type_code {
            None => true,
            Some(TEXT_TYPE_CODE) => true,
            Some(RICH_TYPE_CODE) => self.subtype_code == Some(QUOTE_SUBTYPE_CODE),
            Some(_) => false,
        }
    }

    /// Local calendar date of this message, if it has a timestamp.
    ///
    /// Streaks and active-day counts are date-granular in the account
    /// holder's timezone, not in UTC.
    pub fn local_date(&self) -> Option<NaiveDate> {
        self.ts.map(|ts| ts.with_timezone(&Local).date_naive())
    }

    /// Number of characters of text content (0 when content is absent).
    pub fn content_len(&self) -> usize {
        self.content.as_deref().map_or(0, |c| c.chars().count())
    }
}

/// Drop records without a parseable timestamp and sort ascending by time.
///
/// This is the normalization step every analysis entry point applies before
/// segmentation; malformed records are silently dropped, never counted as
/// failures.
pub fn normalize_messages(mut messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    messages.retain(|m| m.ts.is_some());
    messages.sort_by_key(|m| m.ts);
    messages
}

// ============================================
// Dimensions
// ============================================

/// The four fixed scoring dimensions produced by the base scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Interaction,
    Content,
    Emotion,
    Depth,
}

impl Dimension {
    /// Fixed iteration order; also the tie-break order for the dominant
    /// dimension in the preference summary.
    pub const ALL: [Dimension; 4] = [
        Dimension::Interaction,
        Dimension::Content,
        Dimension::Emotion,
        Dimension::Depth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Interaction => "interaction",
            Dimension::Content => "content",
            Dimension::Emotion => "emotion",
            Dimension::Depth => "depth",
        }
    }

    /// Display name for the dimension itself.
    pub fn display_name(&self) -> &'static str {
        match self {
            Dimension::Interaction => "interaction frequency",
            Dimension::Content => "content quality",
            Dimension::Emotion => "emotional expression",
            Dimension::Depth => "depth of exchange",
        }
    }

    /// Social-style label used when this dimension dominates the
    /// cross-contact averages.
    pub fn social_style(&self) -> &'static str {
        match self {
            Dimension::Interaction => "Connector",
            Dimension::Content => "Curator",
            Dimension::Emotion => "Empath",
            Dimension::Depth => "Confidant",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The four dimension sub-scores for one contact.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DimensionScores {
    pub interaction: f64,
    pub content: f64,
    pub emotion: f64,
    pub depth: f64,
}

impl DimensionScores {
    pub fn get(&self, dim: Dimension) -> f64 {
        match dim {
            Dimension::Interaction => self.interaction,
            Dimension::Content => self.content,
            Dimension::Emotion => self.emotion,
            Dimension::Depth => self.depth,
        }
    }
}

// ============================================
// Base scorer output
// ============================================

/// Descriptive statistics the base scorer reports alongside the score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactStatistics {
    /// Messages the scorer considered
    pub total_messages: u64,
    /// Distinct days with activity, if the scorer computes it
    pub total_days: Option<u64>,
    /// Date of the most recent message, if the scorer computes it
    pub last_chat_date: Option<NaiveDate>,
}

/// Fixed-shape result of the external per-contact base scorer.
///
/// The scoring formula is opaque to this crate; the core only relies on the
/// documented shape and value ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationScore {
    /// Base relationship score, 0–10
    pub total_score: f64,
    /// Four fixed dimension sub-scores
    pub dimensions: DimensionScores,
    /// Descriptive statistics
    pub statistics: ContactStatistics,
    /// Qualitative status label (e.g. "active", "dormant"); opaque except
    /// that "active" feeds the maintenance sub-index
    pub relationship_status: String,
    /// Recency measure, opaque to the core
    pub freshness: f64,
}

// ============================================
// Batch summary rows
// ============================================

/// One successfully analyzed contact in the batch report, ranked by score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactScoreSummary {
    pub contact_id: String,
    pub display_name: String,
    /// Base relationship score, 0–10
    pub score: f64,
    pub message_count: u64,
    pub active_days: u64,
    pub last_chat_date: Option<NaiveDate>,
    pub relationship_status: String,
    pub freshness: f64,
    pub dimensions: DimensionScores,
}

impl ContactScoreSummary {
    /// Build a summary row from a contact and its base-scorer result.
    pub fn from_score(contact: &Contact, score: &RelationScore) -> Self {
        Self {
            contact_id: contact.id.clone(),
            display_name: contact.display_name.clone(),
            score: score.total_score,
            message_count: score.statistics.total_messages,
            active_days: score.statistics.total_days.unwrap_or(0),
            last_chat_date: score.statistics.last_chat_date,
            relationship_status: score.relationship_status.clone(),
            freshness: score.freshness,
            dimensions: score.dimensions,
        }
    }

    /// Category bucket this contact falls into.
    pub fn category(&self) -> RelationshipCategory {
        RelationshipCategory::from_score(self.score)
    }
}

// ============================================
// Relationship categories
// ============================================

/// Score-threshold buckets used for categorization and the network legend.
///
/// The same thresholds (≥8, ≥6, ≥4, else) drive both the category summary
/// in the batch report and the node coloring in the network graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipCategory {
    /// Score ≥ 8
    InnerCircle,
    /// Score ≥ 6
    SocialCircle,
    /// Score ≥ 4
    WorkCircle,
    /// Everything else
    Acquaintance,
}

impl RelationshipCategory {
    /// Fixed order used for summaries and the graph legend.
    pub const ALL: [RelationshipCategory; 4] = [
        RelationshipCategory::InnerCircle,
        RelationshipCategory::SocialCircle,
        RelationshipCategory::WorkCircle,
        RelationshipCategory::Acquaintance,
    ];

    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            RelationshipCategory::InnerCircle
        } else if score >= 6.0 {
            RelationshipCategory::SocialCircle
        } else if score >= 4.0 {
            RelationshipCategory::WorkCircle
        } else {
            RelationshipCategory::Acquaintance
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipCategory::InnerCircle => "inner_circle",
            RelationshipCategory::SocialCircle => "social_circle",
            RelationshipCategory::WorkCircle => "work_circle",
            RelationshipCategory::Acquaintance => "acquaintance",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RelationshipCategory::InnerCircle => "Inner Circle",
            RelationshipCategory::SocialCircle => "Social Circle",
            RelationshipCategory::WorkCircle => "Work Circle",
            RelationshipCategory::Acquaintance => "Acquaintances",
        }
    }

    /// Position in [`Self::ALL`]; handy for fixed-size accumulators.
    pub fn index(&self) -> usize {
        match self {
            RelationshipCategory::InnerCircle => 0,
            RelationshipCategory::SocialCircle => 1,
            RelationshipCategory::WorkCircle => 2,
            RelationshipCategory::Acquaintance => 3,
        }
    }
}

impl std::fmt::Display for RelationshipCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
