use crate::core::render::OutputFormat;
use blueprint_types::{Practice, Runner, Workload};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// CI system the pipeline targets (actions, azdo)
    #[arg(long, value_name = "RUNNER", help_heading = "Selection")]
    pub runner: Option<Runner>,

    /// Kind of software being built (application, container, iac)
    #[arg(long, value_name = "WORKLOAD", help_heading = "Selection")]
    pub workload: Option<Workload>,

    /// Compliance practice (commercial, government)
    #[arg(long, value_name = "PRACTICE", help_heading = "Selection")]
    pub practice: Option<Practice>,

    /// Cloud provider recorded in the selection state
    #[arg(long, value_name = "PROVIDER", help_heading = "Selection")]
    pub provider: Option<String>,

    /// Add-on to apply, in order (repeatable)
    #[arg(long = "addon", value_name = "ID", help_heading = "Selection")]
    pub addons: Vec<String>,

    /// Selection query as printed by a previous run, e.g. "runner=azdo&addons=sast"
    #[arg(long, value_name = "QUERY", help_heading = "Selection")]
    pub state: Option<String>,

    /// Document format (default: yaml)
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Write the document to FILE instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also write a .tar.gz with the document and add-on files (default path from config)
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    pub archive: Option<Option<PathBuf>>,

    /// Configuration file (default: ./blueprint.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Configuration file (default: ./blueprint.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct PromptArgs {
    /// Free-text request, e.g. "private AKS in usgovvirginia with 3 nodepools"
    #[arg(value_name = "TEXT")]
    pub text: String,
}

#[derive(Args, Debug, Clone)]
pub struct ScaffoldArgs {
    #[command(subcommand)]
    pub target: ScaffoldTarget,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ScaffoldTarget {
    /// Terraform + apply workflow for an AKS cluster
    Aks(AksArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AksArgs {
    /// Cluster base name
    #[arg(long)]
    pub name: String,

    /// Environment name; selects env/<ENV>.tfvars
    #[arg(long, value_name = "ENV")]
    pub env: String,

    /// Azure region
    #[arg(long)]
    pub region: String,

    /// Target the Azure US Government cloud
    #[arg(long)]
    pub gov: bool,

    /// Create a private cluster
    #[arg(long)]
    pub private: bool,

    /// Directory the files are written beneath
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out: PathBuf,
}
