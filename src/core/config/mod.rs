pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;

use crate::core::render::OutputFormat;
use blueprint_types::{Practice, Runner, Workload};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration loaded from blueprint.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BlueprintConfig {
    /// Catalog configuration
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Selection used when neither flags nor a state query choose one
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// Directory overlaid on the built-in templates and add-ons
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Default selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default)]
    pub runner: Runner,

    #[serde(default)]
    pub workload: Workload,

    #[serde(default)]
    pub practice: Practice,

    /// Add-on ids applied when none are requested
    #[serde(default)]
    pub addons: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the pipeline document inside archives; follows the output
    /// format when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,

    /// Archive written by `generate --archive` without a value
    #[serde(default = "default_archive_path")]
    pub archive: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            runner: Runner::default(),
            workload: Workload::default(),
            practice: Practice::default(),
            addons: Vec::new(),
        }
    }
}

impl OutputConfig {
    pub fn document_path(&self, format: OutputFormat) -> &str {
        self.document
            .as_deref()
            .unwrap_or_else(|| format.default_document_path())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            document: None,
            archive: default_archive_path(),
        }
    }
}

// Default functions
fn default_provider() -> String {
    "aws".to_string()
}

fn default_archive_path() -> PathBuf {
    PathBuf::from("pipeline.tar.gz")
}
