#![allow(clippy::result_large_err)]

use super::BlueprintConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const CONFIG_FILE_NAME: &str = "blueprint.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from workspace root (workspace/blueprint.toml)
    /// Environment variables override config file values
    /// A missing file yields defaults + env vars
    pub fn load_from_workspace(workspace_path: &Path) -> Result<BlueprintConfig, AppError> {
        let config_path = workspace_path.join(CONFIG_FILE_NAME);
        let config_file = Self::load_from_file(&config_path)?;
        Self::finish(config_file.unwrap_or_default(), Some(workspace_path))
    }

    /// Load config from an explicit path, which must exist
    pub fn load_explicit(path: &Path) -> Result<BlueprintConfig, AppError> {
        let config = Self::load_from_file(path)?.ok_or_else(|| {
            AppError::new(
                ErrorCategory::ConfigError,
                format!("Config file {} does not exist", path.display()),
            )
            .with_code("CFG-001")
        })?;
        Self::finish(config, path.parent())
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<BlueprintConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
        })?;

        let config: BlueprintConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
            .with_code("CFG-001")
        })?;

        Ok(Some(config))
    }

    fn finish(
        mut config: BlueprintConfig,
        base_dir: Option<&Path>,
    ) -> Result<BlueprintConfig, AppError> {
        Self::apply_env_overrides(&mut config);
        if let (Some(dir), Some(base)) = (config.catalog.dir.as_ref(), base_dir) {
            if dir.is_relative() {
                config.catalog.dir = Some(base.join(dir));
            }
        }
        super::ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    /// Environment variables take precedence over config file values
    fn apply_env_overrides(config: &mut BlueprintConfig) {
        if let Ok(dir) = env::var("BLUEPRINT_CATALOG_DIR") {
            config.catalog.dir = Some(PathBuf::from(dir));
        }

        if let Ok(provider) = env::var("BLUEPRINT_PROVIDER") {
            config.defaults.provider = provider;
        }

        // Unparseable axis values keep the configured default
        if let Ok(runner) = env::var("BLUEPRINT_RUNNER") {
            match runner.parse() {
                Ok(runner) => config.defaults.runner = runner,
                Err(err) => warn!("ignoring BLUEPRINT_RUNNER: {}", err),
            }
        }

        if let Ok(workload) = env::var("BLUEPRINT_WORKLOAD") {
            match workload.parse() {
                Ok(workload) => config.defaults.workload = workload,
                Err(err) => warn!("ignoring BLUEPRINT_WORKLOAD: {}", err),
            }
        }

        if let Ok(practice) = env::var("BLUEPRINT_PRACTICE") {
            match practice.parse() {
                Ok(practice) => config.defaults.practice = practice,
                Err(err) => warn!("ignoring BLUEPRINT_PRACTICE: {}", err),
            }
        }

        if let Ok(addons) = env::var("BLUEPRINT_ADDONS") {
            config.defaults.addons = addons
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Ok(document) = env::var("BLUEPRINT_DOCUMENT_PATH") {
            config.output.document = Some(document);
        }
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "BLUEPRINT_CATALOG_DIR - Directory overlaid on the built-in catalog",
            "BLUEPRINT_PROVIDER - Override default cloud provider (default: aws)",
            "BLUEPRINT_RUNNER - Override default runner (actions/azdo)",
            "BLUEPRINT_WORKLOAD - Override default workload (application/container/iac)",
            "BLUEPRINT_PRACTICE - Override default practice (commercial/government)",
            "BLUEPRINT_ADDONS - Comma separated default add-on ids",
            "BLUEPRINT_DOCUMENT_PATH - Path of the pipeline document inside archives (default: pipeline.yaml or pipeline.json)",
        ]
    }
}
