//! Result Aggregator: classifies posts one by one into a [`MentionReport`], then attaches
//! author metadata with a second store lookup per post id.
//!
//! Classification and enrichment failures never remove an entry: a failed classification
//! is the `Error / 0.0` sentinel, a failed or empty author lookup leaves `author` unset.

use std::collections::HashMap;

use classifier::Classifier;
use futures::stream::{self, StreamExt};
use guard_core::{
    Cancellable, ClassificationResult, EnrichedResult, GuardError, Post, PostState,
};
use serde::ser::{Serialize, SerializeMap, Serializer};
use storage::PostStore;
use tracing::{debug, info, instrument, warn};

/// Mapping `post_id → EnrichedResult` for one pipeline invocation.
///
/// Iteration follows the first insertion of each id; a later insert for the same id replaces
/// the value in place. Callers should not depend on the order.
#[derive(Debug, Clone, Default)]
pub struct MentionReport {
    entries: Vec<EnrichedResult>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ReportStats {
    pub total: usize,
    pub classified: usize,
    pub classification_failed: usize,
    pub enriched: usize,
    pub enrichment_skipped: usize,
}

impl MentionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a result; an existing entry with the same post id is overwritten and returned.
    pub fn insert(&mut self, result: ClassificationResult) -> Option<EnrichedResult> {
        let entry = EnrichedResult::new(result);
        match self.index.get(entry.post_id()) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot], entry)),
            None => {
                self.index
                    .insert(entry.post_id().to_string(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn get(&self, post_id: &str) -> Option<&EnrichedResult> {
        self.index.get(post_id).map(|&slot| &self.entries[slot])
    }

    pub fn contains(&self, post_id: &str) -> bool {
        self.index.contains_key(post_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnrichedResult> {
        self.entries.iter()
    }

    pub fn post_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.post_id())
    }

    pub fn into_entries(self) -> Vec<EnrichedResult> {
        self.entries
    }

    pub fn stats(&self) -> ReportStats {
        let mut stats = ReportStats {
            total: self.entries.len(),
            ..ReportStats::default()
        };
        for entry in &self.entries {
            if entry.classification_failed() {
                stats.classification_failed += 1;
            } else {
                stats.classified += 1;
            }
            match entry.state {
                PostState::Enriched => stats.enriched += 1,
                PostState::EnrichmentSkipped => stats.enrichment_skipped += 1,
                _ => {}
            }
        }
        stats
    }

    fn entries_mut(&mut self) -> impl Iterator<Item = &mut EnrichedResult> {
        self.entries.iter_mut()
    }
}

/// Serialized as a JSON object keyed by post id.
impl Serialize for MentionReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.post_id(), entry)?;
        }
        map.end()
    }
}

/// Classifies a single post. Independent of any report; callers may run it concurrently.
#[instrument(skip(post, classifier), fields(post_id = %post.id))]
pub async fn classify_post<C>(post: &Post, classifier: &C) -> ClassificationResult
where
    C: Classifier + ?Sized,
{
    debug!(state = ?PostState::Classifying, "Classifying post");
    let classification = classifier.classify(&post.text).await;
    let state = PostState::after_classification(&classification);
    if classification.is_error() {
        warn!(state = ?state, "Post classification failed; using Error label");
    } else {
        debug!(
            state = ?state,
            category = %classification.category,
            probability = classification.probability,
            "Post classified"
        );
    }
    ClassificationResult::new(post, classification)
}

/// Second pass: attaches author metadata to every entry that the store can resolve.
pub async fn enrich<S>(report: &mut MentionReport, store: &S)
where
    S: PostStore + ?Sized,
{
    for entry in report.entries_mut() {
        entry.state = PostState::Enriching;
        let author = match store.find_one(entry.post_id()).await {
            Ok(post) => post.and_then(|p| p.author),
            Err(e) => {
                warn!(post_id = %entry.post_id(), error = %e, "Author lookup failed");
                None
            }
        };
        entry.state = if author.is_some() {
            PostState::Enriched
        } else {
            PostState::EnrichmentSkipped
        };
        entry.author = author;
        debug!(post_id = %entry.post_id(), state = ?entry.state, "Post enrichment done");
    }
}

/// Classifies `posts` sequentially in order, then enriches. One entry per distinct post id;
/// duplicates are last-write-wins.
#[instrument(skip_all, fields(posts = posts.len()))]
pub async fn aggregate<C, S>(posts: &[Post], classifier: &C, store: &S) -> MentionReport
where
    C: Classifier + ?Sized,
    S: PostStore + ?Sized,
{
    let mut report = MentionReport::new();
    for post in posts {
        report.insert(classify_post(post, classifier).await);
    }
    enrich(&mut report, store).await;
    info!(stats = ?report.stats(), "Aggregation finished");
    report
}

/// Same contract as [`aggregate`] with up to `limit` classifier calls in flight. Results are
/// applied in input order, so duplicates resolve exactly as in the sequential version.
#[instrument(skip_all, fields(posts = posts.len(), limit = limit))]
pub async fn aggregate_concurrent<C, S>(
    posts: &[Post],
    classifier: &C,
    store: &S,
    limit: usize,
) -> MentionReport
where
    C: Classifier + ?Sized,
    S: PostStore + ?Sized,
{
    let results: Vec<ClassificationResult> = stream::iter(posts)
        .map(|post| classify_post(post, classifier))
        .buffered(limit.max(1))
        .collect()
        .await;

    let mut report = MentionReport::new();
    for result in results {
        report.insert(result);
    }
    enrich(&mut report, store).await;
    info!(stats = ?report.stats(), "Aggregation finished");
    report
}

/// Sequential aggregation that checks `token` before each post.
///
/// Returns [`GuardError::Cancelled`] with the number of posts already classified when
/// cancellation is observed; no partial report is returned.
#[instrument(skip_all, fields(posts = posts.len()))]
pub async fn aggregate_with_cancel<C, S>(
    posts: &[Post],
    classifier: &C,
    store: &S,
    token: &dyn Cancellable,
) -> Result<MentionReport, GuardError>
where
    C: Classifier + ?Sized,
    S: PostStore + ?Sized,
{
    let mut report = MentionReport::new();
    for (completed, post) in posts.iter().enumerate() {
        if token.is_cancelled() {
            info!(completed, "Aggregation cancelled");
            return Err(GuardError::Cancelled { completed });
        }
        report.insert(classify_post(post, classifier).await);
    }
    enrich(&mut report, store).await;
    info!(stats = ?report.stats(), "Aggregation finished");
    Ok(report)
}
