#![allow(clippy::result_large_err)]

use super::BlueprintConfig;
use crate::core::error::AppError;
use crate::core::package::validate_entry_path;
use crate::core::types::ErrorCategory;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &BlueprintConfig) -> Result<(), AppError> {
        if let Some(document) = &config.output.document {
            if validate_entry_path(document).is_err() {
                return Err(AppError::new(
                    ErrorCategory::ConfigError,
                    format!(
                        "output.document '{}' must be a relative path without '..'",
                        document
                    ),
                )
                .with_code("CFG-002"));
            }
        }

        if config.output.archive.as_os_str().is_empty() {
            return Err(AppError::new(
                ErrorCategory::ConfigError,
                "output.archive cannot be empty",
            )
            .with_code("CFG-002"));
        }

        if config.defaults.provider.trim().is_empty() {
            return Err(AppError::new(
                ErrorCategory::ConfigError,
                "defaults.provider cannot be empty",
            )
            .with_code("CFG-002"));
        }

        Ok(())
    }
}
