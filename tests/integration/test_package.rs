use blueprint::core::catalog::Catalog;
use blueprint::core::compose::compose;
use blueprint::core::package::{package, package_to_file};
use blueprint::core::render::render_yaml;
use blueprint_types::{AddonFile, Practice, Runner, Selector, Workload};
use flate2::read::GzDecoder;
use std::io::Read;
use tempfile::TempDir;

struct Entry {
    path: String,
    mode: u32,
    mtime: u64,
    content: String,
}

fn read_entries(bytes: &[u8]) -> Vec<Entry> {
    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    archive
        .entries()
        .unwrap()
        .map(|entry| {
            let mut entry = entry.unwrap();
            let mut content = String::new();
            entry.read_to_string(&mut content).unwrap();
            let header = entry.header();
            Entry {
                path: entry.path().unwrap().to_string_lossy().to_string(),
                mode: header.mode().unwrap(),
                mtime: header.mtime().unwrap(),
                content,
            }
        })
        .collect()
}

#[test]
fn test_document_first_then_files_in_order() {
    let files = vec![
        AddonFile::new("scripts/generate-sbom.sh", "#!/usr/bin/env bash\n"),
        AddonFile::new(".trivyignore", "# none\n"),
        AddonFile::new("scripts/generate-sbom.sh", "echo second\n"),
    ];
    let bytes = package("pipeline.yaml", "name: CI\n", &files, Vec::new()).unwrap();

    let entries = read_entries(&bytes);
    let paths: Vec<&str> = entries.iter().map(|entry| entry.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "pipeline.yaml",
            "scripts/generate-sbom.sh",
            ".trivyignore",
            "scripts/generate-sbom.sh"
        ]
    );
    assert_eq!(entries[0].content, "name: CI\n");
    assert_eq!(entries[0].mode, 0o644);
    assert_eq!(entries[1].mode, 0o755);
    assert_eq!(entries[3].content, "echo second\n");
    assert!(entries.iter().all(|entry| entry.mtime == 0));
}

#[test]
fn test_archive_bytes_are_reproducible() {
    let files = vec![AddonFile::new("policy/opa/deny_latest.rego", "package main\n")];
    let first = package("pipeline.yaml", "name: CI\n", &files, Vec::new()).unwrap();
    let second = package("pipeline.yaml", "name: CI\n", &files, Vec::new()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_escaping_paths_are_rejected_before_writing() {
    let files = vec![AddonFile::new("../evil.sh", "rm -rf /")];
    let err = package("pipeline.yaml", "", &files, Vec::new()).unwrap_err();
    assert_eq!(err.code, "PKG-002");

    let err = package("/pipeline.yaml", "", &[], Vec::new()).unwrap_err();
    assert_eq!(err.code, "PKG-002");
}

#[test]
fn test_composed_pipeline_archive_on_disk() {
    let catalog = Catalog::builtin().unwrap();
    let selector = Selector::new(Runner::Actions, Workload::Application, Practice::Commercial);
    let base = catalog.template(&selector).unwrap().template;
    let merged = compose(base, &catalog.addons(&["sast", "sbom", "opa"]).unwrap());
    let document = render_yaml(&merged.template).unwrap();

    let dir = TempDir::new().unwrap();
    let archive_path = dir.path().join("out").join("pipeline.tar.gz");
    package_to_file(&archive_path, "pipeline.yaml", &document, &merged.files).unwrap();

    let bytes = std::fs::read(&archive_path).unwrap();
    let entries = read_entries(&bytes);
    let paths: Vec<&str> = entries.iter().map(|entry| entry.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "pipeline.yaml",
            ".semgrepignore",
            "scripts/generate-sbom.sh",
            "policy/opa/deny_latest.rego"
        ]
    );
    assert_eq!(entries[0].content, document);
}
