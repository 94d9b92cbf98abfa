//! Analysis configuration
//!
//! Loaded from an optional TOML file; command-line flags override it.
//!
//! # Example TOML
//! ```toml
//! min_case_size = 3
//! top_k = 10
//! parallel = true
//! ```

use crate::bottleneck::DEFAULT_TOP_K;
use crate::error::{AnalyticsError, Result};
use crate::trace_builder::{TraceBuilderConfig, DEFAULT_MIN_CASE_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for one analytics run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Cases with fewer events are excluded from every analysis
    ///
    /// Default: 2
    pub min_case_size: usize,

    /// Number of headline bottleneck transitions
    ///
    /// Default: 5
    pub top_k: usize,

    /// Run the analyzers on worker threads
    ///
    /// Results are identical to a sequential run.
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_case_size: DEFAULT_MIN_CASE_SIZE,
            top_k: DEFAULT_TOP_K,
            parallel: false,
        }
    }
}

impl AnalysisConfig {
    /// Parse a TOML configuration document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_case_size < 1 {
            return Err(AnalyticsError::InvalidConfig(format!(
                "min_case_size must be >= 1, got {}",
                self.min_case_size
            )));
        }

        if self.top_k == 0 {
            return Err(AnalyticsError::InvalidConfig(
                "top_k must be >= 1, got 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn trace_builder(&self) -> TraceBuilderConfig {
        TraceBuilderConfig {
            min_case_size: self.min_case_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.min_case_size, 2);
        assert_eq!(config.top_k, 5);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AnalysisConfig::from_toml_str("top_k = 10\n").unwrap();
        assert_eq!(config.top_k, 10);
        assert_eq!(config.min_case_size, 2);
    }

    #[test]
    fn test_full_toml() {
        let config =
            AnalysisConfig::from_toml_str("min_case_size = 3\ntop_k = 1\nparallel = true\n").unwrap();
        assert_eq!(
            config,
            AnalysisConfig {
                min_case_size: 3,
                top_k: 1,
                parallel: true,
            }
        );
        assert_eq!(config.trace_builder().min_case_size, 3);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = AnalysisConfig::from_toml_str("topk = 3\n").unwrap_err();
        assert!(matches!(err, AnalyticsError::ConfigParse(_)));
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_top_k() {
        let mut config = AnalysisConfig::default();
        config.top_k = 0;
        assert!(config.validate().is_err());
        assert!(AnalysisConfig::from_toml_str("top_k = 0\n").is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_min_case_size() {
        let mut config = AnalysisConfig::default();
        config.min_case_size = 0;
        assert!(matches!(
            config.validate(),
            Err(AnalyticsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("procmine.toml");
        std::fs::write(&path, "parallel = true\n").unwrap();

        let config = AnalysisConfig::from_file(&path).unwrap();
        assert!(config.parallel);

        assert!(matches!(
            AnalysisConfig::from_file(dir.path().join("missing.toml")),
            Err(AnalyticsError::Io(_))
        ));
    }
}
