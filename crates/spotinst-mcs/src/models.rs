//! MCS request and response models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use spotinst_core::optional::value_or_default;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Input for [`Service::get_cluster_costs`](crate::Service::get_cluster_costs).
///
/// Dates are passed through verbatim and may be either `yyyy-mm-dd` or a Unix
/// timestamp in milliseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterCostInput {
    /// Kubernetes cluster identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    /// End of the reporting window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    /// Start of the reporting window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
}

impl ClusterCostInput {
    /// Input for the given cluster with an open reporting window.
    #[must_use]
    pub fn new(cluster_id: impl Into<String>) -> Self {
        Self {
            cluster_id: Some(cluster_id.into()),
            ..Self::default()
        }
    }

    /// Set the start of the window.
    #[must_use]
    pub fn with_from_date(mut self, date: impl Into<String>) -> Self {
        self.from_date = Some(date.into());
        self
    }

    /// Set the end of the window.
    #[must_use]
    pub fn with_to_date(mut self, date: impl Into<String>) -> Self {
        self.to_date = Some(date.into());
        self
    }

    /// Set both bounds as calendar dates.
    #[must_use]
    pub fn with_date_range(self, from: NaiveDate, to: NaiveDate) -> Self {
        self.with_from_date(from.format(DATE_FORMAT).to_string())
            .with_to_date(to.format(DATE_FORMAT).to_string())
    }

    /// Set both bounds as millisecond timestamps.
    #[must_use]
    pub fn with_time_range(self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.with_from_date(from.timestamp_millis().to_string())
            .with_to_date(to.timestamp_millis().to_string())
    }
}

/// Output of [`Service::get_cluster_costs`](crate::Service::get_cluster_costs).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterCostOutput {
    /// One entry per item in the response envelope.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cluster_costs: Vec<ClusterCost>,
}

impl ClusterCostOutput {
    /// Sum of every entry's total cost; absent totals count as zero.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.cluster_costs
            .iter()
            .map(|cost| value_or_default(cost.total_cost))
            .sum()
    }
}

/// Cost breakdown of a cluster.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterCost {
    /// Total cluster cost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    /// Cost per namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespaces: Option<Vec<Namespace>>,
    /// Cost per deployment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployments: Option<Vec<Deployment>>,
    /// Cost of pods not owned by a controller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stand_alone_pods_cost: Option<f64>,
    /// Cost of spare headroom capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headroom_cost: Option<f64>,
}

impl ClusterCost {
    /// Cost of the named namespace, if reported.
    #[must_use]
    pub fn namespace_cost(&self, name: &str) -> Option<f64> {
        self.namespaces
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|ns| ns.namespace.as_deref() == Some(name))
            .and_then(|ns| ns.cost)
    }
}

/// Namespace cost entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Namespace {
    /// Namespace name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Cost attributed to the namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// Deployment cost entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Deployment name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_name: Option<String>,
    /// Namespace the deployment runs in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Cost attributed to the deployment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn input_omits_unset_fields() {
        let input = ClusterCostInput::new("c-1");
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({"clusterId": "c-1"})
        );
    }

    #[test]
    fn input_date_range_formats_calendar_dates() {
        let input = ClusterCostInput::new("c-1").with_date_range(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        assert_eq!(input.from_date.as_deref(), Some("2024-01-01"));
        assert_eq!(input.to_date.as_deref(), Some("2024-01-31"));
    }

    #[test]
    fn input_time_range_uses_millis() {
        let from = Utc.timestamp_millis_opt(1_494_751_821_472).unwrap();
        let to = Utc.timestamp_millis_opt(1_494_838_221_472).unwrap();
        let input = ClusterCostInput::new("c-1").with_time_range(from, to);
        assert_eq!(input.from_date.as_deref(), Some("1494751821472"));
        assert_eq!(input.to_date.as_deref(), Some("1494838221472"));
    }

    #[test]
    fn cluster_cost_partial_fields() {
        let cost: ClusterCost = serde_json::from_value(json!({"totalCost": 12.5})).unwrap();
        assert_eq!(cost.total_cost, Some(12.5));
        assert!(cost.namespaces.is_none());
        assert!(cost.deployments.is_none());
        assert!(cost.stand_alone_pods_cost.is_none());
        assert!(cost.headroom_cost.is_none());
        assert_eq!(serde_json::to_value(&cost).unwrap(), json!({"totalCost": 12.5}));
    }

    #[test]
    fn namespace_cost_lookup() {
        let cost: ClusterCost = serde_json::from_value(json!({
            "namespaces": [
                {"namespace": "default", "cost": 1.5},
                {"namespace": "kube-system"}
            ]
        }))
        .unwrap();
        assert_eq!(cost.namespace_cost("default"), Some(1.5));
        assert_eq!(cost.namespace_cost("kube-system"), None);
        assert_eq!(cost.namespace_cost("missing"), None);
        assert_eq!(ClusterCost::default().namespace_cost("default"), None);
    }

    #[test]
    fn output_total_ignores_absent() {
        let out = ClusterCostOutput {
            cluster_costs: vec![
                ClusterCost {
                    total_cost: Some(10.0),
                    ..ClusterCost::default()
                },
                ClusterCost::default(),
                ClusterCost {
                    total_cost: Some(2.5),
                    ..ClusterCost::default()
                },
            ],
        };
        assert!((out.total_cost() - 12.5).abs() < f64::EPSILON);
    }
}
