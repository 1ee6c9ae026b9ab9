//! Application config loaded from environment variables (after `.env`).
//!
//! LLM and classifier settings are loaded by their own crates
//! ([`llm_client::EnvLlmConfig`], [`classifier::ClassifierConfig`]) so that commands which
//! never call the provider do not require an API key.

use std::env;

pub const DEFAULT_DATABASE_URL: &str = "./data/posts.db";
pub const DEFAULT_LOG_FILE: &str = "logs/mention-guard.log";
pub const DEFAULT_PIPELINE_CONCURRENCY: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub log_file: String,
    pub pipeline_concurrency: usize,
}

impl AppConfig {
    /// Reads DATABASE_URL, LOG_FILE and PIPELINE_CONCURRENCY. Missing or invalid values use
    /// the defaults; a concurrency of 0 is treated as 1.
    pub fn load() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let pipeline_concurrency = env::var("PIPELINE_CONCURRENCY")
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_PIPELINE_CONCURRENCY)
            .max(1);
        Self {
            database_url,
            log_file,
            pipeline_concurrency,
        }
    }
}
