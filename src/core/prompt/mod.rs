//! Heuristic extraction of cluster parameters from a free-text request.

use blueprint_types::Practice;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Cloud provider named in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cloud {
    #[default]
    Azure,
    Aws,
    Gcp,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PromptParams {
    pub cloud: Cloud,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance: Option<Practice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub private_cluster: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodepools: Option<u32>,
}

impl PromptParams {
    /// Compliance practice implied by the request, commercial unless stated.
    pub fn practice(&self) -> Practice {
        self.compliance.unwrap_or_default()
    }
}

static CLOUD: OnceLock<Regex> = OnceLock::new();
static GOVERNMENT: OnceLock<Regex> = OnceLock::new();
static REGION: OnceLock<Regex> = OnceLock::new();
static PRIVATE: OnceLock<Regex> = OnceLock::new();
static NODEPOOLS: OnceLock<Regex> = OnceLock::new();

const REGION_PATTERN: &str = concat!(
    r"\b(",
    r"us-gov-(?:east|west)-\d",
    r"|us[- ]?(?:east|west|north|south|central)(?:[- ]?\d)?",
    r"|(?:eu|ap|sa|ca|me|af)-(?:north|south)?(?:east|west|central)-\d",
    r"|(?:east|west|north|south|central)(?:us|europe|asia)\d?",
    r"|usgov[a-z]+",
    r"|(?:europe|asia|australia|canada|uk|japan|brazil)-[a-z]+\d?",
    r")\b"
);

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern compiles"))
}

/// Extract cloud, compliance, region, private-cluster and node pool hints.
///
/// Matching is case-insensitive. The first cloud mentioned wins and the
/// cloud defaults to Azure when none is named.
pub fn parse_prompt(prompt: &str) -> PromptParams {
    let lower = prompt.to_lowercase();

    let cloud = regex(&CLOUD, r"(azure|aws|gcp)")
        .captures(&lower)
        .and_then(|caps| caps.get(1))
        .map(|found| match found.as_str() {
            "aws" => Cloud::Aws,
            "gcp" => Cloud::Gcp,
            _ => Cloud::Azure,
        })
        .unwrap_or_default();

    let compliance = regex(&GOVERNMENT, r"gov")
        .is_match(&lower)
        .then_some(Practice::Government);

    let region = regex(&REGION, REGION_PATTERN)
        .find(&lower)
        .map(|found| found.as_str().split_whitespace().collect::<String>());

    let private_cluster = regex(&PRIVATE, r"private").is_match(&lower);

    let nodepools = regex(&NODEPOOLS, r"(\d+)\s*nodepools?")
        .captures(&lower)
        .and_then(|caps| caps.get(1))
        .and_then(|count| count.as_str().parse().ok());

    PromptParams {
        cloud,
        compliance,
        region,
        private_cluster,
        nodepools,
    }
}
