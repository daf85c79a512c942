use blueprint::core::catalog::Catalog;
use blueprint::core::compose::compose;
use blueprint::core::render::{document_digest, render, render_json, render_yaml, OutputFormat};
use blueprint_types::{Practice, Runner, Selector, Template, Workload};
use serde_json::{json, Value};

#[test]
fn test_yaml_is_plain_block_style() {
    let template = Template::from_value(json!({"a": 1, "b": {"c": 2}})).unwrap();
    let yaml = render_yaml(&template).unwrap();
    insta::assert_snapshot!(yaml, @r"
    a: 1
    b:
      c: 2
    ");
}

#[test]
fn test_yaml_parses_back_to_the_same_document() {
    let catalog = Catalog::builtin().unwrap();
    for runner in Runner::ALL {
        for workload in Workload::ALL {
            for practice in Practice::ALL {
                let selector = Selector::new(runner, workload, practice);
                let base = catalog.template(&selector).unwrap().template;
                let merged = compose(base, &catalog.addons(&["sast", "sbom", "trivy"]).unwrap());
                let yaml = render_yaml(&merged.template).unwrap();
                let parsed: Value = serde_yaml::from_str(&yaml).unwrap();
                assert_eq!(parsed, merged.template.clone().into_value(), "{}", selector);
            }
        }
    }
}

#[test]
fn test_rendering_is_byte_stable() {
    let catalog = Catalog::builtin().unwrap();
    let selector = Selector::new(Runner::Actions, Workload::Iac, Practice::Government);
    let base = catalog.template(&selector).unwrap().template;
    let addons = catalog.addons(&["tfsec", "opa"]).unwrap();

    let first = render_yaml(&compose(base, &addons).template).unwrap();
    let second = render_yaml(&compose(base, &addons).template).unwrap();
    assert_eq!(first, second);
    assert_eq!(document_digest(&first), document_digest(&second));
}

#[test]
fn test_on_key_is_not_coerced() {
    let catalog = Catalog::builtin().unwrap();
    let base = catalog.template_by_name("actions/commercial-node").unwrap();
    let yaml = render_yaml(base).unwrap();
    let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    assert!(parsed.get("on").is_some());
}

#[test]
fn test_json_format() {
    let template = Template::from_value(json!({"name": "CI", "jobs": {}})).unwrap();
    let rendered = render(&template, OutputFormat::Json).unwrap();
    assert_eq!(rendered, render_json(&template).unwrap());
    let parsed: Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed, json!({"name": "CI", "jobs": {}}));
}
