//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use openai_client::CompletionParams;
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn completion_params(&self) -> CompletionParams;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub llm_top_p: f32,
    pub llm_max_output_tokens: u32,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
    fn completion_params(&self) -> CompletionParams {
        CompletionParams {
            temperature: self.llm_temperature,
            top_p: self.llm_top_p,
            max_output_tokens: self.llm_max_output_tokens,
        }
    }
}

impl EnvLlmConfig {
    /// Load from environment variables. Unparseable numbers fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .context("OPENAI_API_KEY not set")?;
        let openai_base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let llm_model = env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let defaults = CompletionParams::default();
        let llm_temperature = parse_env("LLM_TEMPERATURE").unwrap_or(defaults.temperature);
        let llm_top_p = parse_env("LLM_TOP_P").unwrap_or(defaults.top_p);
        let llm_max_output_tokens =
            parse_env("LLM_MAX_OUTPUT_TOKENS").unwrap_or(defaults.max_output_tokens);
        Ok(Self {
            openai_api_key,
            openai_base_url,
            llm_model,
            llm_temperature,
            llm_top_p,
            llm_max_output_tokens,
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
