#![allow(clippy::result_large_err)]

//! Terraform scaffolding for an AKS cluster with an apply workflow.

use crate::core::error::AppError;
use crate::core::package::{mode_for, validate_entry_path};
use crate::core::types::ErrorCategory;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Azure cloud the provider block targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AzureEnvironment {
    #[default]
    Public,
    UsGovernment,
}

impl AzureEnvironment {
    pub fn as_str(self) -> &'static str {
        match self {
            AzureEnvironment::Public => "public",
            AzureEnvironment::UsGovernment => "usgovernment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AksParams {
    pub name: String,
    pub env: String,
    pub region: String,
    pub azure_environment: AzureEnvironment,
    pub private_cluster: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScaffoldError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} '{value}' may only contain letters, digits, '-' and '_'")]
    InvalidCharacters { field: &'static str, value: String },
}

/// Render the scaffold as `path -> content`, in a stable order.
pub fn generate_aks(params: &AksParams) -> Result<IndexMap<String, String>, ScaffoldError> {
    check_identifier("name", &params.name)?;
    check_identifier("env", &params.env)?;
    check_identifier("region", &params.region)?;

    let mut files = IndexMap::new();
    files.insert("infra/terraform/providers.tf".to_string(), PROVIDERS_TF.to_string());
    files.insert("infra/terraform/main.tf".to_string(), MAIN_TF.to_string());
    files.insert("scripts/tf-init-plan-apply.sh".to_string(), APPLY_SCRIPT.to_string());
    files.insert(
        ".github/workflows/infra-apply.yml".to_string(),
        APPLY_WORKFLOW.to_string(),
    );
    files.insert(
        format!("env/{}.tfvars", params.env),
        format!(
            "name = \"{}\"\nregion = \"{}\"\nazure_environment = \"{}\"\nprivate_cluster = {}\n",
            params.name,
            params.region,
            params.azure_environment.as_str(),
            params.private_cluster
        ),
    );
    Ok(files)
}

/// Write scaffold files beneath `root`, returning the paths written.
pub fn write_files(root: &Path, files: &IndexMap<String, String>) -> Result<Vec<PathBuf>, AppError> {
    let mut written = Vec::with_capacity(files.len());
    for (relative, content) in files {
        validate_entry_path(relative)?;
        let target = root.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|err| write_error(&target, err))?;
        }
        fs::write(&target, content).map_err(|err| write_error(&target, err))?;
        set_mode(&target, mode_for(relative))?;
        debug!(path = %target.display(), "wrote scaffold file");
        written.push(target);
    }
    Ok(written)
}

#[allow(unused_variables)]
fn set_mode(path: &Path, mode: u32) -> Result<(), AppError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
            .map_err(|err| write_error(path, err))?;
    }
    Ok(())
}

fn write_error(path: &Path, err: std::io::Error) -> AppError {
    AppError::new(
        ErrorCategory::IoError,
        format!("failed to write {}: {}", path.display(), err),
    )
}

fn check_identifier(field: &'static str, value: &str) -> Result<(), ScaffoldError> {
    if value.is_empty() {
        return Err(ScaffoldError::Empty { field });
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ScaffoldError::InvalidCharacters {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

const PROVIDERS_TF: &str = r#"terraform {
  required_version = ">= 1.7.0"
  required_providers {
    azurerm = { source = "hashicorp/azurerm", version = "~> 3.120" }
    random  = { source = "hashicorp/random",  version = "~> 3.6" }
  }
  backend "azurerm" {}
}

provider "azurerm" {
  features {}
  environment = var.azure_environment # "public" | "usgovernment"
}
"#;

const MAIN_TF: &str = r#"module "rg" {
  source   = "./modules/resource_group"
  name     = "${var.name}-${var.env}-rg"
  location = var.region
}

module "network" {
  source              = "./modules/network"
  name                = "${var.name}-${var.env}-vnet"
  location            = var.region
  resource_group_name = module.rg.name
  address_space       = ["10.10.0.0/16"]
}

module "aks" {
  source                  = "./modules/aks_cluster"
  name                    = "${var.name}-${var.env}-aks"
  location                = var.region
  resource_group_name     = module.rg.name
  vnet_subnet_id          = module.network.subnet_ids["aks"]
  private_cluster_enabled = var.private_cluster
  network_plugin          = "azure"
  nodepools               = var.nodepools
  enable_azure_monitor    = true
}
"#;

const APPLY_SCRIPT: &str = r#"#!/usr/bin/env bash
set -euo pipefail
ENV=${1:-dev}
WORKDIR="infra/terraform"
TFVARS="env/${ENV}.tfvars"

pushd "${WORKDIR}"
terraform init -input=false
terraform workspace select "${ENV}" || terraform workspace new "${ENV}"
terraform plan -var-file="../../${TFVARS}" -out plan.tfplan
conftest test . --policy ../policy/opa || { echo "OPA gate failed"; exit 1; }
tfsec --soft-fail . || echo "tfsec findings recorded"
terraform apply -auto-approve plan.tfplan
popd
"#;

const APPLY_WORKFLOW: &str = r#"name: Infra Apply
on:
  workflow_dispatch:
    inputs:
      env: { description: "Environment", required: true, default: "dev", type: choice, options: [dev, qa, prod] }
jobs:
  apply:
    runs-on: ubuntu-latest
    permissions: { id-token: write, contents: read, security-events: write }
    steps:
      - uses: actions/checkout@v4
      - uses: hashicorp/setup-terraform@v3
      - name: Azure Login (OIDC)
        uses: azure/login@v2
        with:
          client-id: ${{ secrets.AZURE_CLIENT_ID }}
          tenant-id: ${{ secrets.AZURE_TENANT_ID }}
          subscription-id: ${{ secrets.AZURE_SUBSCRIPTION_ID }}
          enable-AzPSSession: true
      - name: Install tools
        run: |
          curl -sSfL https://raw.githubusercontent.com/aquasecurity/tfsec/master/scripts/install_linux.sh | sh
          curl -sSfL https://raw.githubusercontent.com/open-policy-agent/conftest/master/install.sh | sh
      - name: Terraform Apply
        run: ./scripts/tf-init-plan-apply.sh ${{ github.event.inputs.env }}
      - name: Generate SBOM
        run: ./scripts/generate-sbom.sh
      - name: Upload SARIF (tfsec)
        if: always()
        uses: github/codeql-action/upload-sarif@v3
        with: { sarif_file: results.sarif }
"#;
