use std::path::Path;

use serde::{Deserialize, Serialize};
use unitmatch_matcher::Operation;

use crate::error::{ConformanceError, Result};

/// Configuration for a conformance run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Stop at the first failing case
    pub fail_fast: bool,

    /// Operations to run (empty = all operations)
    pub operations: Vec<Operation>,

    /// Maximum number of failures kept in the report
    pub max_failures_reported: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            operations: vec![],
            max_failures_reported: 50,
        }
    }
}

impl RunnerConfig {
    /// Stop on the first failure and report it alone
    pub fn strict() -> Self {
        Self {
            fail_fast: true,
            max_failures_reported: 1,
            ..Default::default()
        }
    }

    /// Restrict the run to one operation
    pub fn only(operation: Operation) -> Self {
        Self {
            operations: vec![operation],
            ..Default::default()
        }
    }

    /// Whether cases for `operation` should be evaluated
    pub fn runs(&self, operation: Operation) -> bool {
        self.operations.is_empty() || self.operations.contains(&operation)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_failures_reported == 0 {
            return Err(ConformanceError::invalid_config(
                "max_failures_reported must be > 0",
            ));
        }

        for (idx, op) in self.operations.iter().enumerate() {
            if self.operations[..idx].contains(op) {
                return Err(ConformanceError::invalid_config(format!(
                    "operation {} listed more than once",
                    op.method_name()
                )));
            }
        }

        Ok(())
    }

    /// Parse configuration text, trying JSON first and then TOML
    pub fn from_text(text: &str) -> Result<Self> {
        let config: Self = match serde_json::from_str(text) {
            Ok(config) => config,
            Err(json_err) => toml::from_str(text).map_err(|toml_err| {
                ConformanceError::ConfigFormat {
                    json: json_err.to_string(),
                    toml: toml_err.to_string(),
                }
            })?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON or TOML file
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        log::debug!("Loading runner config from {}", path.display());
        Self::from_text(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_is_valid() {
        let config = RunnerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.runs(Operation::Includes));
    }

    #[test]
    fn presets() {
        let strict = RunnerConfig::strict();
        assert!(strict.fail_fast);
        assert_eq!(strict.max_failures_reported, 1);

        let only = RunnerConfig::only(Operation::EndsWith);
        assert!(only.runs(Operation::EndsWith));
        assert!(!only.runs(Operation::StartsWith));
    }

    #[test]
    fn parses_json_and_toml() {
        let json = RunnerConfig::from_text(r#"{"fail_fast": true, "operations": ["startsWith"]}"#)
            .unwrap();
        assert!(json.fail_fast);
        assert_eq!(json.operations, vec![Operation::StartsWith]);
        assert_eq!(json.max_failures_reported, 50);

        let toml = RunnerConfig::from_text(
            "operations = [\"includes\", \"endsWith\"]\nmax_failures_reported = 3\n",
        )
        .unwrap();
        assert!(!toml.fail_fast);
        assert_eq!(toml.operations, vec![Operation::Includes, Operation::EndsWith]);
        assert_eq!(toml.max_failures_reported, 3);
    }

    #[test]
    fn rejects_invalid_configs() {
        let err = RunnerConfig::from_text("max_failures_reported = 0").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: max_failures_reported must be > 0"
        );

        let err =
            RunnerConfig::from_text(r#"{"operations": ["includes", "includes"]}"#).unwrap_err();
        assert!(err.to_string().contains("includes listed more than once"));

        let err = RunnerConfig::from_text("not = [valid").unwrap_err();
        assert!(matches!(err, ConformanceError::ConfigFormat { .. }));
        assert!(err.to_string().starts_with("Config is not valid JSON or TOML"));
    }
}
