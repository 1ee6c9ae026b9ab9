//! Provider-backed classifier: truncation, bounded timeout, bounded attempts, strict decoding.

use std::sync::Arc;

use async_trait::async_trait;
use guard_core::Classification;
use llm_client::ClassificationProvider;
use prompt::ClassificationRequest;
use tracing::{debug, instrument, warn};

use crate::config::ClassifierConfig;
use crate::decode::{decode_response, ClassificationError};
use crate::Classifier;

/// Returns at most `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[derive(Clone)]
pub struct LlmClassifier {
    provider: Arc<dyn ClassificationProvider>,
    config: ClassifierConfig,
}

impl LlmClassifier {
    pub fn new(provider: Arc<dyn ClassificationProvider>, config: ClassifierConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Like [`Classifier::classify`] but reports why the last attempt failed.
    #[instrument(skip(self, text), fields(provider = %self.provider.name(), chars = text.chars().count()))]
    pub async fn try_classify(&self, text: &str) -> Result<Classification, ClassificationError> {
        if text.trim().is_empty() {
            return Err(ClassificationError::EmptyInput);
        }

        let input = truncate_chars(text, self.config.max_input_chars);
        if input.len() < text.len() {
            debug!(
                max_input_chars = self.config.max_input_chars,
                "Post text truncated before classification"
            );
        }
        let request = ClassificationRequest::for_post(input);

        let mut last_error = ClassificationError::EmptyResponse;
        for attempt in 1..=self.config.max_attempts {
            match self.attempt(&request).await {
                Ok(classification) => return Ok(classification),
                Err(e) => {
                    warn!(
                        attempt,
                        max_attempts = self.config.max_attempts,
                        error = %e,
                        "Classification attempt failed"
                    );
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }

    async fn attempt(
        &self,
        request: &ClassificationRequest,
    ) -> Result<Classification, ClassificationError> {
        let body = tokio::time::timeout(self.config.timeout, self.provider.complete(request))
            .await
            .map_err(|_| ClassificationError::Timeout(self.config.timeout))?
            .map_err(|e| ClassificationError::Transport(format!("{:#}", e)))?;
        debug!(body_len = body.len(), "Provider replied");
        decode_response(&body)
    }
}

#[async_trait]
impl Classifier for LlmClassifier {
    async fn classify(&self, text: &str) -> Classification {
        self.try_classify(text)
            .await
            .unwrap_or_else(|_| Classification::error())
    }
}
