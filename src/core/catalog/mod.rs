#![allow(clippy::result_large_err)]

//! Registry of base templates and add-on fragments.
//!
//! Built-in documents are embedded at compile time. A catalog directory laid
//! out as `templates/<runner>/<name>.{json,yaml,yml}` and
//! `addons/<id>.{json,yaml,yml}` can be overlaid on top to replace or extend
//! entries.

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use crate::utils::serialization::{DocumentFormat, FileUtils};
use blueprint_types::{Addon, Practice, Runner, Selector, Template, Workload};
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Template used when no route matches the selector.
pub const FALLBACK_TEMPLATE: &str = "actions/commercial-node";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        "actions/commercial-node",
        include_str!("../../../data/templates/actions/commercial-node.json"),
    ),
    (
        "actions/gov-container",
        include_str!("../../../data/templates/actions/gov-container.json"),
    ),
    (
        "actions/iac-terraform",
        include_str!("../../../data/templates/actions/iac-terraform.json"),
    ),
    (
        "azdo/commercial-dotnet",
        include_str!("../../../data/templates/azdo/commercial-dotnet.json"),
    ),
];

const BUILTIN_ADDONS: &[(&str, &str)] = &[
    ("sast", include_str!("../../../data/addons/sast.json")),
    ("sbom", include_str!("../../../data/addons/sbom.json")),
    ("opa", include_str!("../../../data/addons/opa.json")),
    ("tfsec", include_str!("../../../data/addons/tfsec.json")),
    ("trivy", include_str!("../../../data/addons/trivy.json")),
];

/// Template name routed to by a selector, if the combination is supported.
pub fn route(selector: &Selector) -> Option<&'static str> {
    match (selector.runner, selector.workload, selector.practice) {
        (Runner::Actions, Workload::Application, _) => Some("actions/commercial-node"),
        (Runner::Actions, Workload::Container, Practice::Commercial) => {
            Some("actions/commercial-node")
        }
        (Runner::Actions, Workload::Container, Practice::Government) => {
            Some("actions/gov-container")
        }
        (Runner::Actions, Workload::Iac, _) => Some("actions/iac-terraform"),
        (Runner::Azdo, Workload::Application, Practice::Commercial) => {
            Some("azdo/commercial-dotnet")
        }
        _ => None,
    }
}

/// Outcome of resolving a selector to a base template.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub name: &'a str,
    pub template: &'a Template,
    /// `true` when the selector had no route and the fallback template was used.
    pub fallback: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    templates: IndexMap<String, Template>,
    addons: IndexMap<String, Addon>,
}

impl Catalog {
    /// Catalog holding only the embedded templates and add-ons.
    pub fn builtin() -> Result<Self, AppError> {
        let mut catalog = Catalog::default();
        for (name, source) in BUILTIN_TEMPLATES {
            let value: Value = serde_json::from_str(source).map_err(|err| {
                parse_error(format!("built-in template '{}': {}", name, err))
            })?;
            catalog.insert_template(*name, template_from_value(name, value)?);
        }
        for (id, source) in BUILTIN_ADDONS {
            let addon: Addon = serde_json::from_str(source)
                .map_err(|err| parse_error(format!("built-in add-on '{}': {}", id, err)))?;
            catalog.insert_addon(*id, addon);
        }
        Ok(catalog)
    }

    /// Built-in catalog with `dir` overlaid, when given.
    pub fn with_overlay(dir: Option<&Path>) -> Result<Self, AppError> {
        let mut catalog = Self::builtin()?;
        if let Some(dir) = dir {
            catalog.load_dir(dir)?;
        }
        Ok(catalog)
    }

    pub fn insert_template(&mut self, name: impl Into<String>, template: Template) {
        self.templates.insert(name.into(), template);
    }

    pub fn insert_addon(&mut self, id: impl Into<String>, addon: Addon) {
        self.addons.insert(id.into(), addon);
    }

    /// Overlay documents from a catalog directory, returning how many were loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, AppError> {
        if !dir.is_dir() {
            return Err(AppError::new(
                ErrorCategory::CatalogError,
                format!("catalog directory {} does not exist", dir.display()),
            )
            .with_code("CAT-003"));
        }

        let mut loaded = 0;
        let templates_dir = dir.join("templates");
        if templates_dir.is_dir() {
            for runner_dir in sorted_entries(&templates_dir)? {
                if !runner_dir.is_dir() {
                    continue;
                }
                let runner = file_stem(&runner_dir);
                for path in document_files(&runner_dir)? {
                    let name = format!("{}/{}", runner, file_stem(&path));
                    let value: Value = load(&path)?;
                    self.insert_template(name.clone(), template_from_value(&name, value)?);
                    debug!(template = %name, path = %path.display(), "loaded template");
                    loaded += 1;
                }
            }
        }

        let addons_dir = dir.join("addons");
        if addons_dir.is_dir() {
            for path in document_files(&addons_dir)? {
                let id = file_stem(&path);
                let addon: Addon = load(&path)?;
                self.insert_addon(id.clone(), addon);
                debug!(addon = %id, path = %path.display(), "loaded add-on");
                loaded += 1;
            }
        }
        Ok(loaded)
    }

    /// Resolve the base template for `selector`, falling back when unrouted.
    pub fn template(&self, selector: &Selector) -> Result<Resolution<'_>, AppError> {
        if let Some(name) = route(selector) {
            if let Some((name, template)) = self.templates.get_key_value(name) {
                return Ok(Resolution {
                    name,
                    template,
                    fallback: false,
                });
            }
        }

        warn!(
            selector = %selector,
            fallback = FALLBACK_TEMPLATE,
            "no template for selector; using fallback"
        );
        self.templates
            .get_key_value(FALLBACK_TEMPLATE)
            .map(|(name, template)| Resolution {
                name,
                template,
                fallback: true,
            })
            .ok_or_else(|| {
                AppError::new(
                    ErrorCategory::CatalogError,
                    format!("fallback template '{}' is missing", FALLBACK_TEMPLATE),
                )
                .with_code("CAT-004")
            })
    }

    pub fn template_by_name(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    pub fn addon(&self, id: &str) -> Option<&Addon> {
        self.addons.get(id)
    }

    /// Look up add-ons by id, preserving the requested order and repeats.
    pub fn addons<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<Addon>, AppError> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                self.addon(id).cloned().ok_or_else(|| {
                    AppError::new(
                        ErrorCategory::CatalogError,
                        format!("unknown add-on '{}'", id),
                    )
                    .with_code("CAT-001")
                    .with_suggestion(format!("available add-ons: {}", self.addon_ids().join(", ")))
                })
            })
            .collect()
    }

    pub fn addon_ids(&self) -> Vec<&str> {
        self.addons.keys().map(String::as_str).collect()
    }

    pub fn template_names(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }
}

fn template_from_value(name: &str, value: Value) -> Result<Template, AppError> {
    Template::from_value(value)
        .ok_or_else(|| parse_error(format!("template '{}' is not a mapping", name)))
}

fn parse_error(message: String) -> AppError {
    AppError::new(ErrorCategory::CatalogError, message).with_code("CAT-002")
}

fn load<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    FileUtils.load_document(path).map_err(|err| {
        let mut error = parse_error(format!("failed to load {}: {}", path.display(), err));
        error.add_context("path", &path.display().to_string());
        error
    })
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let entries = fs::read_dir(dir).map_err(|err| {
        AppError::new(
            ErrorCategory::CatalogError,
            format!("failed to scan catalog directory {}: {}", dir.display(), err),
        )
        .with_code("CAT-003")
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        paths.push(entry?.path());
    }
    paths.sort();
    Ok(paths)
}

fn document_files(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|path| path.is_file() && DocumentFormat::from_path(path).is_some())
        .collect())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}
