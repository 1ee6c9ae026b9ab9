//! Strict decoding of a provider reply into a [`Classification`].
//!
//! Checks, in order: empty body, JSON syntax, required keys, category name, probability range.

use std::time::Duration;

use guard_core::{Category, Classification};
use serde_json::Value;
use thiserror::Error;

/// Why a post could not be classified. Never leaves the classifier; mapped to the sentinel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassificationError {
    #[error("post text is empty")]
    EmptyInput,
    #[error("provider call failed: {0}")]
    Transport(String),
    #[error("provider call timed out after {0:?}")]
    Timeout(Duration),
    #[error("empty response body")]
    EmptyResponse,
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("response JSON is not an object")]
    NotAnObject,
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("probability is not a number: {0}")]
    InvalidProbability(String),
    #[error("probability {0} is outside [0, 1]")]
    ProbabilityOutOfRange(f64),
}

/// Removes one surrounding Markdown code fence (```` ``` ```` or ```` ```json ````), if present.
fn strip_code_fence(body: &str) -> &str {
    let trimmed = body.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    let inner = inner.trim_start();
    let inner = inner
        .strip_prefix("json")
        .or_else(|| inner.strip_prefix("JSON"))
        .unwrap_or(inner);
    inner.trim()
}

/// Decodes a raw reply. On success category and probability are returned unchanged.
pub fn decode_response(body: &str) -> Result<Classification, ClassificationError> {
    if body.trim().is_empty() {
        return Err(ClassificationError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(strip_code_fence(body))
        .map_err(|e| ClassificationError::InvalidJson(e.to_string()))?;
    let object = value.as_object().ok_or(ClassificationError::NotAnObject)?;

    let category = object
        .get("category")
        .ok_or(ClassificationError::MissingField("category"))?;
    let probability = object
        .get("probability")
        .ok_or(ClassificationError::MissingField("probability"))?;

    let category = category
        .as_str()
        .ok_or_else(|| ClassificationError::UnknownCategory(category.to_string()))?
        .parse::<Category>()
        .map_err(|_| ClassificationError::UnknownCategory(category.to_string()))?;

    let probability = probability
        .as_f64()
        .ok_or_else(|| ClassificationError::InvalidProbability(probability.to_string()))?;
    if !(0.0..=1.0).contains(&probability) {
        return Err(ClassificationError::ProbabilityOutOfRange(probability));
    }

    Ok(Classification::new(category, probability))
}
