//! Selection state <-> query string encoding, so a generated pipeline can be
//! reproduced from a shareable link or a CLI flag.

use blueprint_types::{Practice, Runner, Selector, Workload};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

const DEFAULT_PROVIDER: &str = "aws";

/// Everything needed to regenerate one pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub provider: String,
    pub workload: Workload,
    pub practice: Practice,
    pub runner: Runner,
    pub addons: Vec<String>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            workload: Workload::default(),
            practice: Practice::default(),
            runner: Runner::default(),
            addons: Vec::new(),
        }
    }
}

impl SelectionState {
    pub fn selector(&self) -> Selector {
        Selector::new(self.runner, self.workload, self.practice)
    }
}

/// Decoded query; fields absent or unparseable in the query are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartialState {
    pub provider: Option<String>,
    pub workload: Option<Workload>,
    pub practice: Option<Practice>,
    pub runner: Option<Runner>,
    pub addons: Option<Vec<String>>,
}

impl PartialState {
    pub fn is_empty(&self) -> bool {
        *self == PartialState::default()
    }

    /// Fill the missing fields from `defaults`.
    pub fn complete(self, defaults: SelectionState) -> SelectionState {
        SelectionState {
            provider: self.provider.unwrap_or(defaults.provider),
            workload: self.workload.unwrap_or(defaults.workload),
            practice: self.practice.unwrap_or(defaults.practice),
            runner: self.runner.unwrap_or(defaults.runner),
            addons: self.addons.unwrap_or(defaults.addons),
        }
    }
}

/// Encode `state` as `provider=..&workload=..&practice=..&runner=..[&addons=a,b]`.
///
/// Key order is fixed and `addons` is omitted when empty.
pub fn encode_state(state: &SelectionState) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("provider", &state.provider)
        .append_pair("workload", state.workload.as_str())
        .append_pair("practice", state.practice.as_str())
        .append_pair("runner", state.runner.as_str());
    if !state.addons.is_empty() {
        query.append_pair("addons", &state.addons.join(","));
    }
    query.finish()
}

/// Decode a query string (with or without a leading `?`).
///
/// The first usable occurrence of a key wins; empty values, unknown keys and
/// unrecognised axis values are ignored.
pub fn decode_state(query: &str) -> PartialState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut state = PartialState::default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match &*key {
            "provider" if state.provider.is_none() => state.provider = Some(value.into_owned()),
            "workload" if state.workload.is_none() => state.workload = value.parse().ok(),
            "practice" if state.practice.is_none() => state.practice = value.parse().ok(),
            "runner" if state.runner.is_none() => state.runner = value.parse().ok(),
            "addons" if state.addons.is_none() => {
                state.addons = Some(
                    value
                        .split(',')
                        .filter(|id| !id.is_empty())
                        .map(str::to_string)
                        .collect(),
                )
            }
            _ => {}
        }
    }
    state
}
