//! # classifier
//!
//! The per-post classification step. [`Classifier::classify`] never fails: any provider,
//! timeout, or decoding problem becomes the `Error / 0.0` sentinel so one bad post cannot stop
//! the others. [`LlmClassifier`] is the provider-backed implementation; [`decode_response`] is
//! the pure validation step it applies to every reply.

use async_trait::async_trait;
use guard_core::Classification;

mod config;
mod decode;
mod llm_classifier;

pub use config::ClassifierConfig;
pub use decode::{decode_response, ClassificationError};
pub use llm_classifier::{truncate_chars, LlmClassifier};

/// Classifies one post text.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str) -> Classification;
}

#[async_trait]
impl<T: Classifier + ?Sized> Classifier for std::sync::Arc<T> {
    async fn classify(&self, text: &str) -> Classification {
        (**self).classify(text).await
    }
}
