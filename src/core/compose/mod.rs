//! Template composition: merges add-on fragments into a base pipeline template.

mod permissions;
mod step_key;

pub use permissions::widen_permissions;
pub use step_key::StepKey;

use blueprint_types::{Addon, AddonFile, Template, PERMISSIONS_KEY, STEPS_KEY};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

/// Merged template plus the auxiliary files collected from every add-on.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeResult {
    pub template: Template,
    pub files: Vec<AddonFile>,
}

/// Compose `base` with `addons`, in order.
///
/// The result owns a deep copy of `base`; the inputs are never modified.
/// Add-on steps are appended to the build job unless a step with the same
/// [`StepKey`] is already present (from the base or an earlier add-on).
/// Permissions are widened per scope, never lowered. Files are concatenated
/// in add-on order. Without a build job only files are collected.
pub fn compose(base: &Template, addons: &[Addon]) -> MergeResult {
    let mut template = base.clone();
    let mut files = Vec::new();

    let mut merger = template.build_job_mut().map(BuildJobMerger::new);
    if merger.is_none() && !addons.is_empty() {
        debug!("base template has no build job; only add-on files will be collected");
    }

    for (index, addon) in addons.iter().enumerate() {
        if let Some(merger) = merger.as_mut() {
            let appended = merger.apply(addon);
            debug!(addon = index, appended, "merged add-on into build job");
        }
        if let Some(addon_files) = &addon.files {
            files.extend(addon_files.iter().cloned());
        }
    }

    MergeResult { template, files }
}

/// Mutable view of the build job for the duration of one composition.
struct BuildJobMerger<'a> {
    job: &'a mut Map<String, Value>,
    seen: HashSet<StepKey>,
}

impl<'a> BuildJobMerger<'a> {
    fn new(job: &'a mut Map<String, Value>) -> Self {
        let seen = job
            .get(STEPS_KEY)
            .and_then(Value::as_array)
            .map(|steps| steps.iter().map(StepKey::of).collect())
            .unwrap_or_default();
        Self { job, seen }
    }

    /// Apply one add-on, returning how many steps were appended.
    fn apply(&mut self, addon: &Addon) -> usize {
        if let Some(requested) = addon.permissions.as_ref().filter(|p| !p.is_empty()) {
            self.widen(requested);
        }

        let Some(steps) = &addon.steps else {
            return 0;
        };
        // Absent or null steps become a sequence once an add-on brings steps.
        if self.job.get(STEPS_KEY).map_or(true, Value::is_null) {
            self.job
                .insert(STEPS_KEY.to_string(), Value::Array(Vec::new()));
        }
        let Some(Value::Array(target)) = self.job.get_mut(STEPS_KEY) else {
            debug!("build job steps is not a sequence; skipping add-on steps");
            return 0;
        };
        let mut appended = 0;
        for step in steps {
            if self.seen.insert(StepKey::of(step)) {
                target.push(step.clone());
                appended += 1;
            }
        }
        appended
    }

    fn widen(&mut self, requested: &IndexMap<String, String>) {
        let entry = self
            .job
            .entry(PERMISSIONS_KEY.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if entry.is_null() {
            *entry = Value::Object(Map::new());
        }
        match entry {
            Value::Object(current) => widen_permissions(current, requested),
            // Shorthand such as `read-all` is not a per-scope mapping.
            other => debug!(permissions = %other, "leaving non-mapping permissions untouched"),
        }
    }
}
