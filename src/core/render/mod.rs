#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use blueprint_types::Template;
use sha2::{Digest, Sha256};

/// Text formats a merged template can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// YAML pipeline document
    #[default]
    Yaml,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Conventional file name for a document in this format.
    pub fn default_document_path(self) -> &'static str {
        match self {
            OutputFormat::Yaml => "pipeline.yaml",
            OutputFormat::Json => "pipeline.json",
        }
    }
}

/// Render `template` as YAML. Keys keep their insertion order.
pub fn render_yaml(template: &Template) -> Result<String, AppError> {
    serde_yaml::to_string(template).map_err(|err| {
        AppError::with_source(
            ErrorCategory::RenderError,
            "failed to render template as YAML",
            Box::new(err),
        )
        .with_code("RND-001")
    })
}

pub fn render_json(template: &Template) -> Result<String, AppError> {
    serde_json::to_string_pretty(template)
        .map(|mut text| {
            text.push('\n');
            text
        })
        .map_err(|err| {
            AppError::with_source(
                ErrorCategory::RenderError,
                "failed to render template as JSON",
                Box::new(err),
            )
            .with_code("RND-001")
        })
}

pub fn render(template: &Template, format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Yaml => render_yaml(template),
        OutputFormat::Json => render_json(template),
    }
}

/// Hex SHA-256 of a rendered document.
pub fn document_digest(document: &str) -> String {
    hex::encode(Sha256::digest(document.as_bytes()))
}
