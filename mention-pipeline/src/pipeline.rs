//! MentionPipeline: one invocation = find mentions for an identity, classify, enrich.
//!
//! Collaborators are injected at construction; the pipeline keeps no state between runs.

use std::sync::Arc;

use classifier::Classifier;
use guard_core::{Cancellable, GuardError, Identity, Result};
use storage::PostStore;
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::aggregator::{aggregate, aggregate_concurrent, aggregate_with_cancel, MentionReport};
use crate::matcher::find_mentions;

#[derive(Clone)]
pub struct MentionPipeline {
    store: Arc<dyn PostStore>,
    classifier: Arc<dyn Classifier>,
    concurrency: usize,
}

impl MentionPipeline {
    /// Sequential pipeline (one classifier call at a time).
    pub fn new(store: Arc<dyn PostStore>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            store,
            classifier,
            concurrency: 1,
        }
    }

    /// Allows up to `concurrency` classifier calls in flight; values below 1 mean 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Runs to completion. Only identity and post-store query errors are returned.
    pub async fn run(&self, identity: &Identity) -> Result<MentionReport> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("mention_pipeline", %run_id, concurrency = self.concurrency);
        async {
            let posts = find_mentions(identity, self.store.as_ref()).await?;
            let report = if self.concurrency > 1 {
                aggregate_concurrent(
                    &posts,
                    self.classifier.as_ref(),
                    self.store.as_ref(),
                    self.concurrency,
                )
                .await
            } else {
                aggregate(&posts, self.classifier.as_ref(), self.store.as_ref()).await
            };
            info!(entries = report.len(), "Pipeline run finished");
            Ok::<_, GuardError>(report)
        }
        .instrument(span)
        .await
    }

    /// Sequential run that stops between posts once `token` is cancelled.
    pub async fn run_with_cancel(
        &self,
        identity: &Identity,
        token: &dyn Cancellable,
    ) -> Result<MentionReport> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("mention_pipeline", %run_id, cancellable = true);
        async {
            let posts = find_mentions(identity, self.store.as_ref()).await?;
            let report =
                aggregate_with_cancel(&posts, self.classifier.as_ref(), self.store.as_ref(), token)
                    .await?;
            info!(entries = report.len(), "Pipeline run finished");
            Ok::<_, GuardError>(report)
        }
        .instrument(span)
        .await
    }
}
