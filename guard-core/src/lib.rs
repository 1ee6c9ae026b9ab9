//! # guard-core
//!
//! Core types shared by the mention-guard crates: [`Post`], [`Author`], [`Identity`],
//! [`Category`], [`ClassificationResult`], [`EnrichedResult`], the per-post [`PostState`]
//! machine, the error taxonomy, a cooperative [`CancellationToken`], and tracing initialization.
//! Transport- and storage-agnostic; used by storage, classifier and mention-pipeline.

pub mod cancellation;
pub mod error;
pub mod logger;
pub mod types;

pub use cancellation::{Cancellable, CancellationToken};
pub use error::{GuardError, MatchInputError, Result};
pub use logger::init_tracing;
pub use types::{
    Author, Category, Classification, ClassificationResult, EnrichedResult, Identity, Post,
    PostState,
};
