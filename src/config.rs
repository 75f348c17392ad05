//! Client settings
//!
//! Read from `initializationOptions` and `workspace/didChangeConfiguration`. Settings may be
//! nested under the `cssInJs` section or sent as a bare object. Missing fields keep their
//! defaults.

use serde::Deserialize;
use std::time::Duration;
use tower_lsp::lsp_types::DiagnosticSeverity;

use crate::css::diagnostics::LintOptions;
use crate::error::{StyledError, StyledResult};

/// Configuration section name
pub const SETTINGS_SECTION: &str = "cssInJs";

/// Reporting level of a lint rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Ignore,
    #[default]
    Warning,
    Error,
}

impl RuleLevel {
    pub fn severity(self) -> Option<DiagnosticSeverity> {
        match self {
            RuleLevel::Ignore => None,
            RuleLevel::Warning => Some(DiagnosticSeverity::WARNING),
            RuleLevel::Error => Some(DiagnosticSeverity::ERROR),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LintSettings {
    pub unknown_properties: RuleLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Publish diagnostics at all
    pub validate: bool,
    pub lint: LintSettings,
    /// Seconds without requests before the analysis service is torn down
    pub worker_idle_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            validate: true,
            lint: LintSettings::default(),
            worker_idle_timeout_secs: 120,
        }
    }
}

impl Settings {
    /// Parse settings sent by the client, `null` means defaults
    pub fn from_value(value: &serde_json::Value) -> StyledResult<Self> {
        let section = value.get(SETTINGS_SECTION).unwrap_or(value);
        if section.is_null() {
            return Ok(Self::default());
        }

        serde_json::from_value(section.clone()).map_err(|source| StyledError::InvalidSettings {
            message: source.to_string(),
            source,
        })
    }

    pub fn lint_options(&self) -> LintOptions {
        LintOptions {
            unknown_properties: self.lint.unknown_properties.severity(),
        }
    }

    pub fn worker_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.worker_idle_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.validate);
        assert_eq!(settings.lint.unknown_properties, RuleLevel::Warning);
        assert_eq!(settings.worker_idle_timeout(), Duration::from_secs(120));
        assert_eq!(Settings::from_value(&serde_json::Value::Null).unwrap(), settings);
    }

    #[test]
    fn test_section_and_bare_object() {
        let nested = json!({
            "cssInJs": { "validate": false, "lint": { "unknownProperties": "error" } }
        });
        let bare = json!({ "validate": false, "lint": { "unknownProperties": "error" } });

        let settings = Settings::from_value(&nested).unwrap();
        assert!(!settings.validate);
        assert_eq!(settings.lint.unknown_properties, RuleLevel::Error);
        assert_eq!(settings.worker_idle_timeout_secs, 120);
        assert_eq!(Settings::from_value(&bare).unwrap(), settings);
    }

    #[test]
    fn test_lint_options_from_rule_level() {
        let settings =
            Settings::from_value(&json!({ "lint": { "unknownProperties": "ignore" } })).unwrap();
        assert_eq!(settings.lint_options().unknown_properties, None);
    }

    #[test]
    fn test_invalid_settings() {
        let result = Settings::from_value(&json!({ "workerIdleTimeoutSecs": "soon" }));
        assert!(matches!(result, Err(StyledError::InvalidSettings { .. })));
    }
}
