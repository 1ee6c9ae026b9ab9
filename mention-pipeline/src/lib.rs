//! # mention-pipeline
//!
//! Finds posts that mention a linked identity, classifies each one, and attaches author
//! metadata.
//!
//! - [`matcher`]: identity → [`MentionQuery`](storage::MentionQuery) → matching posts
//! - [`aggregator`]: posts → [`MentionReport`] (one entry per distinct post id)
//! - [`linker`]: user-typed handle → [`Identity`](guard_core::Identity) via the profile store
//! - [`pipeline`]: [`MentionPipeline`] tying the three together for one invocation

pub mod aggregator;
pub mod linker;
pub mod matcher;
pub mod pipeline;

pub use aggregator::{
    aggregate, aggregate_concurrent, aggregate_with_cancel, classify_post, enrich, MentionReport,
    ReportStats,
};
pub use linker::{link_identity, normalize_profile_input};
pub use matcher::{build_query, find_mentions};
pub use pipeline::MentionPipeline;
