use blueprint::core::prompt::{parse_prompt, Cloud};
use blueprint_types::Practice;

#[test]
fn test_extracts_basic_azure_params() {
    let params = parse_prompt("AKS cluster in Azure, 3 nodepools, private cluster, Azure CNI");
    assert_eq!(params.cloud, Cloud::Azure);
    assert!(params.private_cluster);
    assert_eq!(params.nodepools, Some(3));
    assert_eq!(params.practice(), Practice::Commercial);
}

#[test]
fn test_detects_government_compliance() {
    let params = parse_prompt("EKS on AWS GovCloud");
    assert_eq!(params.cloud, Cloud::Aws);
    assert_eq!(params.compliance, Some(Practice::Government));
}

#[test]
fn test_recognises_region_names() {
    assert_eq!(
        parse_prompt("cluster in us-west-2").region.as_deref(),
        Some("us-west-2")
    );
    assert_eq!(
        parse_prompt("private AKS in usgovvirginia").region.as_deref(),
        Some("usgovvirginia")
    );
    assert_eq!(
        parse_prompt("Deploy to eastus with 1 nodepool").region.as_deref(),
        Some("eastus")
    );
    assert_eq!(parse_prompt("a small cluster").region, None);
}

#[test]
fn test_single_nodepool() {
    assert_eq!(parse_prompt("1 nodepool").nodepools, Some(1));
}

#[test]
fn test_json_shape() {
    let params = parse_prompt("GCP private cluster, 2 nodepools");
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"cloud": "gcp", "private_cluster": true, "nodepools": 2})
    );
}
