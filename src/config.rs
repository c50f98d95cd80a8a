//! Analyzer configuration.
//!
//! Values come from the environment first and are then overridden by
//! command-line flags in `main.rs`.

use crate::error::ConfigurationError;
use crate::llm::{CredentialRotator, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::stages::PipelineConfig;

pub const ENV_API_KEYS: &str = "GOOGLE_API_KEYS";
pub const ENV_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_MODEL: &str = "GEMINI_MODEL";
pub const ENV_BASE_URL: &str = "GEMINI_BASE_URL";
pub const ENV_CYCLES: &str = "IDEAVOTE_CYCLES";
pub const ENV_MAX_RETRIES: &str = "IDEAVOTE_MAX_RETRIES";
pub const ENV_TIMEOUT_SECS: &str = "IDEAVOTE_TIMEOUT_SECS";

/// Raw credential settings, parsed into a pool by [`AnalyzerConfig::rotator`]
#[derive(Debug, Clone, Default)]
pub struct CredentialSource {
    /// Comma-delimited list of keys
    pub list: Option<String>,
    /// Single key, used when the list is absent or blank
    pub single: Option<String>,
}

/// Everything needed to build an [`Analyzer`](crate::analysis::Analyzer)
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub credentials: CredentialSource,
    pub gemini: GeminiConfig,
    pub pipeline: PipelineConfig,
    /// Number of concurrent cycles per analysis
    pub cycles: usize,
    /// Deadline for a whole batch; unfinished cycles count as failed
    pub batch_timeout_secs: Option<u64>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            credentials: CredentialSource::default(),
            gemini: GeminiConfig::default(),
            pipeline: PipelineConfig::default(),
            cycles: 3,
            batch_timeout_secs: None,
        }
    }
}

impl AnalyzerConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create config from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.credentials = CredentialSource {
            list: lookup(ENV_API_KEYS),
            single: lookup(ENV_API_KEY),
        };

        if let Some(model) = lookup(ENV_MODEL).filter(|s| !s.trim().is_empty()) {
            config.gemini.model = model.trim().to_string();
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|s| !s.trim().is_empty()) {
            config.gemini.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_CYCLES) {
            config.cycles = parse_number(ENV_CYCLES, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            config.pipeline.max_retries = parse_number(ENV_MAX_RETRIES, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.batch_timeout_secs = Some(parse_number(ENV_TIMEOUT_SECS, &raw)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.cycles == 0 {
            return Err(ConfigurationError::InvalidSetting {
                name: "cycles".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.gemini.model.is_empty() {
            return Err(ConfigurationError::InvalidSetting {
                name: "model".to_string(),
                reason: format!("must not be empty (default {})", DEFAULT_MODEL),
            });
        }
        if self.gemini.base_url.is_empty() {
            return Err(ConfigurationError::InvalidSetting {
                name: "base_url".to_string(),
                reason: format!("must not be empty (default {})", DEFAULT_BASE_URL),
            });
        }
        Ok(())
    }

    /// Build the credential pool. Fails when no credential is configured.
    pub fn rotator(&self) -> Result<CredentialRotator, ConfigurationError> {
        CredentialRotator::from_config(
            self.credentials.list.as_deref(),
            self.credentials.single.as_deref(),
        )
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ConfigurationError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigurationError::InvalidSetting {
            name: name.to_string(),
            reason: format!("expected a non-negative integer, got {:?}", raw),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.cycles, 3);
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.pipeline.max_retries, 0);
        assert!(config.batch_timeout_secs.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = AnalyzerConfig::from_lookup(lookup(&[
            (ENV_API_KEYS, "a,b,c"),
            (ENV_MODEL, "gemini-2.5-pro"),
            (ENV_CYCLES, "5"),
            (ENV_MAX_RETRIES, "2"),
            (ENV_TIMEOUT_SECS, "90"),
        ]))
        .unwrap();

        assert_eq!(config.cycles, 5);
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert_eq!(config.pipeline.max_retries, 2);
        assert_eq!(config.batch_timeout_secs, Some(90));
        assert_eq!(config.rotator().unwrap().len(), 3);
    }

    #[test]
    fn test_zero_cycles_rejected() {
        let result = AnalyzerConfig::from_lookup(lookup(&[(ENV_CYCLES, "0")]));
        assert!(matches!(result, Err(ConfigurationError::InvalidSetting { .. })));
    }

    #[test]
    fn test_garbage_number_rejected() {
        let result = AnalyzerConfig::from_lookup(lookup(&[(ENV_CYCLES, "three")]));
        assert!(matches!(result, Err(ConfigurationError::InvalidSetting { .. })));
    }

    #[test]
    fn test_missing_credentials_fail_at_rotator() {
        let config = AnalyzerConfig::from_lookup(lookup(&[(ENV_API_KEY, "   ")])).unwrap();
        assert!(matches!(
            config.rotator(),
            Err(ConfigurationError::EmptyCredentialPool)
        ));
    }
}
