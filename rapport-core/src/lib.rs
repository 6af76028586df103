//! # rapport-core
//!
//! Core library for rapport - chat relationship analytics.
//!
//! This library provides:
//! - Domain types for contacts, messages, and relation scores
//! - Per-contact analyzers: session segmentation, interaction profiling,
//!   achievement evaluation
//! - Portfolio-level aggregation: temporal patterns, social health,
//!   network graph layout
//! - Batch orchestration with partial-failure tolerance
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! Message access and base relation scoring live behind the
//! [`MessageStore`] and [`RelationScorer`] traits; everything downstream
//! is a pure derivation from their outputs. The [`BatchAnalyzer`] wires
//! the analyzers together and produces the combined report.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rapport_core::{BatchAnalyzer, BatchOptions, Config};
//! # use rapport_core::{ChatMessage, Contact, MessageStore, RelationScorer, RelationScore, Result};
//! # struct MyStore;
//! # impl MessageStore for MyStore {
//! #     fn list_contacts(&self) -> Result<Vec<Contact>> { Ok(vec![]) }
//! #     fn get_messages(&self, _: &str) -> Result<Vec<ChatMessage>> { Ok(vec![]) }
//! # }
//! # struct MyScorer;
//! # impl RelationScorer for MyScorer {
//! #     fn score(&self, _: &[ChatMessage]) -> Result<RelationScore> { unimplemented!() }
//! # }
//!
//! let config = Config::load().expect("failed to load config");
//! let analyzer = BatchAnalyzer::new(MyStore, MyScorer);
//! let report = analyzer
//!     .run_batch(BatchOptions {
//!         top_n: config.analytics.top_n,
//!         limit: 0,
//!     })
//!     .expect("batch analysis failed");
//! println!("analyzed {} contacts", report.total_analyzed);
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{BatchAnalyzer, BatchOptions, BatchReport, ContactReport};
pub use config::Config;
pub use error::{Error, Result};
pub use store::{MessageStore, RelationScorer};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod store;
pub mod types;
