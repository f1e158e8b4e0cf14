// SPDX-FileCopyrightText: 2026 Shadowgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes.

use tracing::warn;

use crate::diagnostic::ConfigError;
use crate::model::{ShadowgateConfig, CANARY_PCT_MAX, CANARY_PCT_MIN};

/// Log levels accepted by `service.log_level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
///
/// An out-of-range `routing.canary_pct` is reported with a warning only; the
/// router clamps it.
pub fn validate_config(config: &ShadowgateConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.service.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "service.name must not be empty".to_string(),
        });
    }

    let level = config.service.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level `{}` is not one of {}",
                config.service.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let pct = config.routing.canary_pct;
    if !(CANARY_PCT_MIN..=CANARY_PCT_MAX).contains(&pct) {
        warn!(
            canary_pct = pct,
            effective = config.routing.effective_canary_pct(),
            "routing.canary_pct outside [0, 100], clamping"
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[test]
    fn default_config_validates() {
        let config = ShadowgateConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_service_name_fails_validation() {
        let mut config = ShadowgateConfig::default();
        config.service.name = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("service.name"))));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = ShadowgateConfig::default();
        config.service.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("verbose"));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = ShadowgateConfig::default();
        config.service.log_level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn errors_are_collected_not_fail_fast() {
        let mut config = ShadowgateConfig::default();
        config.service.name = String::new();
        config.service.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    #[traced_test]
    fn out_of_range_canary_pct_warns_but_passes() {
        let mut config = ShadowgateConfig::default();
        config.routing.canary_pct = 250;
        assert!(validate_config(&config).is_ok());
        assert!(logs_contain("outside [0, 100]"));
    }

    #[test]
    #[traced_test]
    fn in_range_canary_pct_does_not_warn() {
        let mut config = ShadowgateConfig::default();
        config.routing.canary_pct = 100;
        assert!(validate_config(&config).is_ok());
        assert!(!logs_contain("clamping"));
    }
}
