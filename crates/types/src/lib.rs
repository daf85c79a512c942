//! Shared data model for pipeline templates, add-ons and catalog selectors.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Top-level key that holds the job table of a template.
pub const JOBS_KEY: &str = "jobs";
/// Job that add-ons contribute steps and permissions to.
pub const BUILD_JOB_KEY: &str = "build";
pub const STEPS_KEY: &str = "steps";
pub const PERMISSIONS_KEY: &str = "permissions";

/// A pipeline document: an insertion-ordered mapping of arbitrary values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template(pub Map<String, Value>);

impl Template {
    pub fn new(document: Map<String, Value>) -> Self {
        Self(document)
    }

    /// Wraps a parsed document, returning `None` unless it is a mapping.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The `jobs.build` mapping, if the template has one.
    pub fn build_job(&self) -> Option<&Map<String, Value>> {
        self.0
            .get(JOBS_KEY)
            .and_then(Value::as_object)
            .and_then(|jobs| jobs.get(BUILD_JOB_KEY))
            .and_then(Value::as_object)
    }

    pub fn build_job_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.0
            .get_mut(JOBS_KEY)
            .and_then(Value::as_object_mut)
            .and_then(|jobs| jobs.get_mut(BUILD_JOB_KEY))
            .and_then(Value::as_object_mut)
    }

    /// Steps of the build job; empty when the job or its step list is missing.
    pub fn steps(&self) -> &[Value] {
        self.build_job()
            .and_then(|job| job.get(STEPS_KEY))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn permissions(&self) -> Option<&Map<String, Value>> {
        self.build_job()
            .and_then(|job| job.get(PERMISSIONS_KEY))
            .and_then(Value::as_object)
    }

    /// Display names of the build job steps, in order. Unnamed steps are skipped.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps()
            .iter()
            .filter_map(|step| step.get("name").and_then(Value::as_str))
            .collect()
    }
}

impl From<Map<String, Value>> for Template {
    fn from(document: Map<String, Value>) -> Self {
        Self(document)
    }
}

/// Auxiliary file shipped next to the generated pipeline document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonFile {
    pub path: String,
    pub content: String,
}

impl AddonFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Independently authored fragment merged into a base template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Addon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<AddonFile>>,
}

impl Addon {
    pub fn with_steps(steps: Vec<Value>) -> Self {
        Self {
            steps: Some(steps),
            ..Self::default()
        }
    }

    pub fn with_permissions<I, K, V>(permissions: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            permissions: Some(
                permissions
                    .into_iter()
                    .map(|(scope, level)| (scope.into(), level.into()))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub fn with_files(files: Vec<AddonFile>) -> Self {
        Self {
            files: Some(files),
            ..Self::default()
        }
    }
}

/// Privilege granted to a permission scope, totally ordered `None < Read < Write`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PrivilegeLevel {
    #[default]
    None,
    Read,
    Write,
}

impl PrivilegeLevel {
    /// Unrecognised levels rank as `None`.
    pub fn from_level(level: &str) -> Self {
        match level {
            "write" => PrivilegeLevel::Write,
            "read" => PrivilegeLevel::Read,
            _ => PrivilegeLevel::None,
        }
    }

    /// Rank of a permission value as stored in a template; non-strings rank as `None`.
    pub fn from_value(value: &Value) -> Self {
        value.as_str().map(Self::from_level).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrivilegeLevel::None => "none",
            PrivilegeLevel::Read => "read",
            PrivilegeLevel::Write => "write",
        }
    }
}

impl fmt::Display for PrivilegeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CI system the generated document targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Runner {
    #[default]
    Actions,
    Azdo,
}

/// Kind of repository the pipeline builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Workload {
    #[default]
    Application,
    Container,
    Iac,
}

/// Compliance regime the pipeline must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Practice {
    #[default]
    Commercial,
    Government,
}

/// Error returned when a selector axis value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub axis: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.axis, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

fn unknown(axis: &'static str, value: &str) -> UnknownVariant {
    UnknownVariant {
        axis,
        value: value.to_string(),
    }
}

impl Runner {
    pub const ALL: [Runner; 2] = [Runner::Actions, Runner::Azdo];

    pub fn as_str(self) -> &'static str {
        match self {
            Runner::Actions => "actions",
            Runner::Azdo => "azdo",
        }
    }
}

impl Workload {
    pub const ALL: [Workload; 3] = [Workload::Application, Workload::Container, Workload::Iac];

    pub fn as_str(self) -> &'static str {
        match self {
            Workload::Application => "application",
            Workload::Container => "container",
            Workload::Iac => "iac",
        }
    }
}

impl Practice {
    pub const ALL: [Practice; 2] = [Practice::Commercial, Practice::Government];

    pub fn as_str(self) -> &'static str {
        match self {
            Practice::Commercial => "commercial",
            Practice::Government => "government",
        }
    }
}

impl FromStr for Runner {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "actions" | "github" | "github-actions" => Ok(Runner::Actions),
            "azdo" | "azure-devops" => Ok(Runner::Azdo),
            _ => Err(unknown("runner", value)),
        }
    }
}

impl FromStr for Workload {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "application" | "app" => Ok(Workload::Application),
            "container" => Ok(Workload::Container),
            "iac" | "infrastructure-as-code" => Ok(Workload::Iac),
            _ => Err(unknown("workload", value)),
        }
    }
}

impl FromStr for Practice {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "commercial" => Ok(Practice::Commercial),
            "government" | "gov" => Ok(Practice::Government),
            _ => Err(unknown("practice", value)),
        }
    }
}

// Deserialization accepts the same spellings as `FromStr`.
impl TryFrom<String> for Runner {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Workload {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Practice {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Practice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-axis key that picks a base template from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Selector {
    pub runner: Runner,
    pub workload: Workload,
    pub practice: Practice,
}

impl Selector {
    pub fn new(runner: Runner, workload: Workload, practice: Practice) -> Self {
        Self {
            runner,
            workload,
            practice,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.runner, self.workload, self.practice)
    }
}
