use blueprint::core::config::{ConfigLoader, ConfigValidator};
use blueprint::core::render::OutputFormat;
use blueprint_types::{Practice, Runner, Workload};
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

fn clear_blueprint_env() {
    for v in &[
        "BLUEPRINT_CATALOG_DIR",
        "BLUEPRINT_PROVIDER",
        "BLUEPRINT_RUNNER",
        "BLUEPRINT_WORKLOAD",
        "BLUEPRINT_PRACTICE",
        "BLUEPRINT_ADDONS",
        "BLUEPRINT_DOCUMENT_PATH",
    ] {
        env::remove_var(v);
    }
}

/// Test integration of config loading with environment variables
#[test]
#[serial]
fn test_config_loading_integration() {
    clear_blueprint_env();
    let temp_dir = TempDir::new().unwrap();
    let workspace_path = temp_dir.path();

    let config_content = r#"
[catalog]
dir = "catalog"

[defaults]
provider = "azure"
runner = "actions"
workload = "container"
practice = "government"
addons = ["trivy", "sbom"]

[output]
archive = "dist/pipeline.tar.gz"
"#;
    fs::write(workspace_path.join("blueprint.toml"), config_content).unwrap();

    let config = ConfigLoader::load_from_workspace(workspace_path).unwrap();
    assert_eq!(config.defaults.provider, "azure");
    assert_eq!(config.defaults.runner, Runner::Actions);
    assert_eq!(config.defaults.workload, Workload::Container);
    assert_eq!(config.defaults.practice, Practice::Government);
    assert_eq!(config.defaults.addons, vec!["trivy", "sbom"]);
    assert_eq!(config.catalog.dir, Some(workspace_path.join("catalog")));
    assert_eq!(config.output.archive, std::path::PathBuf::from("dist/pipeline.tar.gz"));
    assert_eq!(config.output.document_path(OutputFormat::Yaml), "pipeline.yaml");
    assert_eq!(config.output.document_path(OutputFormat::Json), "pipeline.json");

    env::set_var("BLUEPRINT_PRACTICE", "commercial");
    env::set_var("BLUEPRINT_DOCUMENT_PATH", ".github/workflows/ci.yml");
    env::set_var("BLUEPRINT_CATALOG_DIR", "/opt/catalog");

    let config = ConfigLoader::load_from_workspace(workspace_path).unwrap();
    assert_eq!(config.defaults.practice, Practice::Commercial);
    assert_eq!(
        config.output.document_path(OutputFormat::Json),
        ".github/workflows/ci.yml"
    );
    assert_eq!(config.catalog.dir, Some(std::path::PathBuf::from("/opt/catalog")));

    clear_blueprint_env();
}

#[test]
#[serial]
fn test_env_document_path_is_validated() {
    clear_blueprint_env();
    let temp_dir = TempDir::new().unwrap();
    env::set_var("BLUEPRINT_DOCUMENT_PATH", "../../etc/pipeline.yaml");

    let err = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap_err();
    assert_eq!(err.code, "CFG-002");

    clear_blueprint_env();
}

#[test]
#[serial]
fn test_unknown_axis_value_in_file_is_a_parse_error() {
    clear_blueprint_env();
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("blueprint.toml"),
        "[defaults]\nrunner = \"jenkins\"\n",
    )
    .unwrap();

    let err = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap_err();
    assert_eq!(err.code, "CFG-001");
}

#[test]
#[serial]
fn test_explicit_config_resolves_catalog_relative_to_file() {
    clear_blueprint_env();
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("ci");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("settings.toml"), "[catalog]\ndir = \"catalog\"\n").unwrap();

    let config = ConfigLoader::load_explicit(&nested.join("settings.toml")).unwrap();
    assert_eq!(config.catalog.dir, Some(nested.join("catalog")));
    assert!(ConfigValidator::validate(&config).is_ok());
}
