//! Integration tests for parsing MCS cost responses.

use spotinst_core::envelope::decode_items_as;
use spotinst_mcs::models::{ClusterCost, ClusterCostOutput};
use std::fs;
use std::path::PathBuf;

fn load_fixture(name: &str) -> Vec<u8> {
    let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    })
}

#[test]
fn test_deserialize_cluster_costs() {
    let body = load_fixture("cluster_costs.json");
    let costs: Vec<ClusterCost> = decode_items_as(&body).unwrap();
    assert_eq!(costs.len(), 2, "Expected 2 cost entries in test data");

    let prod = &costs[0];
    assert_eq!(prod.total_cost, Some(1834.72));
    assert_eq!(prod.stand_alone_pods_cost, Some(18.62));
    assert_eq!(prod.headroom_cost, Some(286.25));
    assert_eq!(prod.namespace_cost("payments"), Some(1021.4));

    let deployments = prod.deployments.as_ref().unwrap();
    assert_eq!(deployments.len(), 3);
    assert_eq!(deployments[0].deployment_name.as_deref(), Some("checkout-api"));
    assert_eq!(deployments[0].namespace.as_deref(), Some("payments"));
}

#[test]
fn test_zero_values_are_present_not_absent() {
    let body = load_fixture("cluster_costs.json");
    let costs: Vec<ClusterCost> = decode_items_as(&body).unwrap();

    let empty = &costs[1];
    assert_eq!(empty.total_cost, Some(0.0));
    assert!(empty.namespaces.as_ref().is_some_and(Vec::is_empty));
    assert!(empty.deployments.is_none());
    assert!(empty.headroom_cost.is_none());
}

#[test]
fn test_output_total() {
    let body = load_fixture("cluster_costs.json");
    let out = ClusterCostOutput {
        cluster_costs: decode_items_as(&body).unwrap(),
    };
    assert!((out.total_cost() - 1834.72).abs() < 1e-9);
}
