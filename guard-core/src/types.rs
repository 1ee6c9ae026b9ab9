//! Core types: posts, authors, identities, categories, and per-post classification results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Author metadata attached to a post. Opaque to the pipeline; also the shape of a linked
/// social profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// A post from the external post store. `author` is only populated by single-post lookups
/// that can resolve `author_ref`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
    pub author_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}

impl Post {
    pub fn new(id: impl Into<String>, text: impl Into<String>, author_ref: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            author_ref: author_ref.into(),
            author: None,
        }
    }

    pub fn with_author(mut self, author: Author) -> Self {
        self.author = Some(author);
        self
    }
}

/// The linking user's social identity. Only used to build the mention predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub handle: String,
    pub display_name: String,
}

impl Identity {
    pub fn new(handle: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            display_name: display_name.into(),
        }
    }

    /// Handle without surrounding whitespace or leading `@`.
    pub fn normalized_handle(&self) -> &str {
        self.handle.trim().trim_start_matches('@').trim()
    }
}

/// Safety category. `Error` is not a real category; it marks a post whose classification failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Harassment,
    Threat,
    Inappropriate,
    Safe,
    Error,
}

impl Category {
    /// The four categories a classifier may return.
    pub const CLASSIFIABLE: [Category; 4] = [
        Category::Harassment,
        Category::Threat,
        Category::Inappropriate,
        Category::Safe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Harassment => "Harassment",
            Category::Threat => "Threat",
            Category::Inappropriate => "Inappropriate",
            Category::Safe => "Safe",
            Category::Error => "Error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Category::Error)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one of the four classifiable names, ignoring case and surrounding whitespace.
/// `"Error"` is rejected: a provider cannot report the failure sentinel.
impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::CLASSIFIABLE
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// Classifier output for one text (no post id).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub probability: f64,
}

impl Classification {
    pub fn new(category: Category, probability: f64) -> Self {
        Self {
            category,
            probability,
        }
    }

    /// The `Error / 0.0` failure sentinel.
    pub fn error() -> Self {
        Self::new(Category::Error, 0.0)
    }

    pub fn is_error(&self) -> bool {
        self.category.is_error()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub post_id: String,
    pub post_text: String,
    pub category: Category,
    pub probability: f64,
}

impl ClassificationResult {
    pub fn new(post: &Post, classification: Classification) -> Self {
        Self {
            post_id: post.id.clone(),
            post_text: post.text.clone(),
            category: classification.category,
            probability: classification.probability,
        }
    }

    pub fn classification(&self) -> Classification {
        Classification::new(self.category, self.probability)
    }
}

/// Lifecycle of one post through the pipeline.
///
/// `Pending → Classifying → {Classified | ClassificationFailed} → Enriching → {Enriched | EnrichmentSkipped}`.
/// Both failure-adjacent outcomes still leave a usable result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostState {
    #[default]
    Pending,
    Classifying,
    Classified,
    ClassificationFailed,
    Enriching,
    Enriched,
    EnrichmentSkipped,
}

impl PostState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PostState::Enriched | PostState::EnrichmentSkipped)
    }

    /// State reached once classification returns.
    pub fn after_classification(classification: &Classification) -> Self {
        if classification.is_error() {
            PostState::ClassificationFailed
        } else {
            PostState::Classified
        }
    }
}

/// A classification result plus optional author metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedResult {
    #[serde(flatten)]
    pub result: ClassificationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(skip)]
    pub state: PostState,
}

impl EnrichedResult {
    pub fn new(result: ClassificationResult) -> Self {
        let state = PostState::after_classification(&result.classification());
        Self {
            result,
            author: None,
            state,
        }
    }

    pub fn post_id(&self) -> &str {
        &self.result.post_id
    }

    pub fn category(&self) -> Category {
        self.result.category
    }

    pub fn probability(&self) -> f64 {
        self.result.probability
    }

    pub fn classification_failed(&self) -> bool {
        self.result.category.is_error()
    }
}
