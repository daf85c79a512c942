use blueprint::core::compose::compose;
use blueprint_types::{Addon, AddonFile, Template};
use serde_json::{json, Value};

fn template(value: Value) -> Template {
    Template::from_value(value).unwrap()
}

fn base() -> Template {
    template(json!({
        "name": "CI",
        "jobs": {
            "build": {
                "runs-on": "ubuntu-latest",
                "permissions": {"contents": "read"},
                "steps": [{"name": "checkout", "uses": "actions/checkout@v4"}]
            }
        }
    }))
}

fn run_step(name: &str) -> Addon {
    Addon::with_steps(vec![json!({"name": name, "run": format!("echo {}", name)})])
}

#[test]
fn test_addons_append_in_request_order() {
    let result = compose(&base(), &[run_step("B"), run_step("C")]);
    assert_eq!(result.template.step_names(), vec!["checkout", "B", "C"]);

    let result = compose(&base(), &[run_step("C"), run_step("B")]);
    assert_eq!(result.template.step_names(), vec!["checkout", "C", "B"]);
}

#[test]
fn test_repeated_addon_is_idempotent() {
    let once = compose(&base(), &[run_step("B")]);
    let twice = compose(&base(), &[run_step("B"), run_step("B")]);
    assert_eq!(once.template, twice.template);
}

#[test]
fn test_step_identical_to_base_is_not_duplicated() {
    let addon = Addon::with_steps(vec![json!({"name": "checkout", "uses": "actions/checkout@v4"})]);
    let result = compose(&base(), &[addon]);
    assert_eq!(result.template.steps().len(), 1);
}

#[test]
fn test_same_name_different_body_is_a_duplicate() {
    let addon = Addon::with_steps(vec![json!({
        "name": "checkout",
        "uses": "actions/checkout@v3",
        "with": {"fetch-depth": 0}
    })]);
    let result = compose(&base(), &[addon]);
    assert_eq!(result.template.steps().len(), 1);
    assert_eq!(
        result.template.steps()[0]["uses"],
        json!("actions/checkout@v4")
    );
}

#[test]
fn test_unnamed_action_steps_dedup_on_uses_and_with() {
    let scan = json!({"uses": "aquasecurity/trivy-action@0.24.0", "with": {"format": "sarif", "scan-type": "fs"}});
    let reordered = json!({"with": {"scan-type": "fs", "format": "sarif"}, "uses": "aquasecurity/trivy-action@0.24.0"});
    let other = json!({"uses": "aquasecurity/trivy-action@0.24.0", "with": {"scan-type": "image"}});

    let result = compose(
        &base(),
        &[Addon::with_steps(vec![scan, reordered, other])],
    );
    assert_eq!(result.template.steps().len(), 3);
}

#[test]
fn test_unnamed_run_steps_dedup_on_command() {
    let addon = Addon::with_steps(vec![
        json!({"run": "make lint"}),
        json!({"run": "make lint", "env": {"CI": "1"}}),
        json!({"run": "make test"}),
    ]);
    let result = compose(&base(), &[addon]);
    assert_eq!(result.template.steps().len(), 3);
    assert_eq!(result.template.steps()[1], json!({"run": "make lint"}));
}

#[test]
fn test_permissions_widen_to_the_maximum() {
    let addon = Addon::with_permissions([("contents", "write"), ("id-token", "write")]);
    let result = compose(&base(), &[addon]);
    assert_eq!(
        Value::Object(result.template.permissions().unwrap().clone()),
        json!({"contents": "write", "id-token": "write"})
    );
}

#[test]
fn test_permissions_never_narrow() {
    let widened = compose(
        &base(),
        &[Addon::with_permissions([("contents", "write")])],
    );
    let result = compose(
        &widened.template,
        &[Addon::with_permissions([("contents", "read"), ("packages", "none")])],
    );
    let permissions = result.template.permissions().unwrap();
    assert_eq!(permissions["contents"], json!("write"));
    assert_eq!(permissions["packages"], json!("none"));
}

#[test]
fn test_files_concatenate_in_order_without_dedup() {
    let first = Addon::with_files(vec![AddonFile::new("scripts/a.sh", "one")]);
    let second = Addon::with_files(vec![
        AddonFile::new("scripts/a.sh", "two"),
        AddonFile::new("policy/b.rego", "package main"),
    ]);
    let result = compose(&base(), &[first, second]);
    let paths: Vec<&str> = result.files.iter().map(|file| file.path.as_str()).collect();
    assert_eq!(paths, vec!["scripts/a.sh", "scripts/a.sh", "policy/b.rego"]);
    assert_eq!(result.files[1].content, "two");
}

#[test]
fn test_base_is_not_mutated() {
    let original = base();
    let snapshot = original.clone();
    let addon = Addon {
        steps: Some(vec![json!({"name": "Scan", "run": "scan"})]),
        permissions: Some([("contents".to_string(), "write".to_string())].into_iter().collect()),
        files: Some(vec![AddonFile::new("x.txt", "x")]),
    };
    let _ = compose(&original, &[addon]);
    assert_eq!(original, snapshot);
}

#[test]
fn test_template_without_build_job_passes_through() {
    let deploy_only = template(json!({"jobs": {"deploy": {"steps": []}}}));
    let result = compose(&deploy_only, &[run_step("B")]);
    assert_eq!(result.template, deploy_only);
}

#[test]
fn test_files_collected_without_build_job() {
    let deploy_only = template(json!({"jobs": {"deploy": {"steps": [{"run": "deploy"}]}}}));
    let addon = Addon {
        steps: Some(vec![json!({"name": "Scan", "run": "scan"})]),
        permissions: Some([("contents".to_string(), "write".to_string())].into_iter().collect()),
        files: Some(vec![
            AddonFile::new("scripts/scan.sh", "scan"),
            AddonFile::new(".semgrepignore", "vendor/"),
        ]),
    };
    let result = compose(&deploy_only, &[addon]);
    assert_eq!(result.template, deploy_only);
    let paths: Vec<&str> = result.files.iter().map(|file| file.path.as_str()).collect();
    assert_eq!(paths, vec!["scripts/scan.sh", ".semgrepignore"]);
}

#[test]
fn test_empty_addon_changes_nothing() {
    let result = compose(&base(), &[Addon::default()]);
    assert_eq!(result.template, base());
    assert!(result.files.is_empty());

    let bare = template(json!({"jobs": {"build": {"runs-on": "ubuntu-latest"}}}));
    assert_eq!(compose(&bare, &[Addon::default()]).template, bare);
}

#[test]
fn test_no_addons_is_a_copy() {
    let result = compose(&base(), &[]);
    assert_eq!(result.template, base());
    assert!(result.files.is_empty());
}

#[test]
fn test_keys_keep_insertion_order() {
    let result = compose(&base(), &[Addon::with_permissions([("id-token", "write")])]);
    let keys: Vec<&String> = result.template.as_map().keys().collect();
    assert_eq!(keys, vec!["name", "jobs"]);
    let job = result.template.build_job().unwrap();
    let job_keys: Vec<&String> = job.keys().collect();
    assert_eq!(job_keys, vec!["runs-on", "permissions", "steps"]);
    let scopes: Vec<&String> = result.template.permissions().unwrap().keys().collect();
    assert_eq!(scopes, vec!["contents", "id-token"]);
}
