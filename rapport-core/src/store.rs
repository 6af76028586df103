//! Capability traits for the external collaborators.
//!
//! The message store and the base scorer are modeled as polymorphic
//! collaborators: any implementation satisfying the documented contract is
//! substitutable, which is what lets the analytics core be unit-tested with
//! synthetic stores and scorers. The orchestrator receives both via
//! dependency injection; lifecycle (construct once, reuse) is owned by the
//! caller. Calls are treated as blocking.

use crate::error::Result;
use crate::types::{ChatMessage, Contact, RelationScore};

/// Supplies the contact list and per-contact message history.
pub trait MessageStore {
    /// Full contact list, in the store's own order. Batch analysis iterates
    /// this order and preserves it for equal scores.
    fn list_contacts(&self) -> Result<Vec<Contact>>;

    /// One contact's messages, ordered by time or orderable, possibly empty.
    /// Records with missing timestamps are allowed; the core drops them
    /// before segmentation.
    fn get_messages(&self, contact_id: &str) -> Result<Vec<ChatMessage>>;
}

/// The opaque per-contact base scorer.
pub trait RelationScorer {
    /// Score one contact's message history.
    ///
    /// Implementations must fail on an empty `messages` slice; the
    /// orchestrator never calls this for empty histories (it skips the
    /// contact instead of analyzing it).
    fn score(&self, messages: &[ChatMessage]) -> Result<RelationScore>;
}
