//! Classifier configuration: per-call timeout, attempt bound, input length limit.

use std::env;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;
pub const DEFAULT_MAX_INPUT_CHARS: usize = 4000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Upper bound for one provider call.
    pub timeout: Duration,
    /// Provider calls per post, including the first. 1 means no retry.
    pub max_attempts: u32,
    /// Post text longer than this (in chars) is truncated before the call.
    pub max_input_chars: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}

impl ClassifierConfig {
    /// Loads CLASSIFIER_TIMEOUT_SECS, CLASSIFIER_MAX_ATTEMPTS, CLASSIFIER_MAX_INPUT_CHARS.
    /// Missing, unparseable, or zero values use the defaults.
    pub fn from_env() -> Self {
        let timeout_secs = parse_positive("CLASSIFIER_TIMEOUT_SECS").unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self {
            timeout: Duration::from_secs(timeout_secs),
            max_attempts: parse_positive("CLASSIFIER_MAX_ATTEMPTS").unwrap_or(DEFAULT_MAX_ATTEMPTS),
            max_input_chars: parse_positive("CLASSIFIER_MAX_INPUT_CHARS")
                .unwrap_or(DEFAULT_MAX_INPUT_CHARS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars.max(1);
        self
    }
}

fn parse_positive<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<T>().ok())
        .filter(|v| *v > T::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var("CLASSIFIER_TIMEOUT_SECS");
        env::remove_var("CLASSIFIER_MAX_ATTEMPTS");
        env::remove_var("CLASSIFIER_MAX_INPUT_CHARS");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        assert_eq!(ClassifierConfig::from_env(), ClassifierConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_custom_values() {
        clear_env();
        env::set_var("CLASSIFIER_TIMEOUT_SECS", "5");
        env::set_var("CLASSIFIER_MAX_ATTEMPTS", "3");
        env::set_var("CLASSIFIER_MAX_INPUT_CHARS", "0");

        let config = ClassifierConfig::from_env();

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.max_input_chars, DEFAULT_MAX_INPUT_CHARS);
        clear_env();
    }

    #[test]
    fn test_builders_clamp_to_one() {
        let config = ClassifierConfig::default()
            .with_max_attempts(0)
            .with_max_input_chars(0);
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.max_input_chars, 1);
    }
}
