//! GCP Ocean cluster models.

use crate::models::{AutoScaler, Capacity, InstanceTypes};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An Ocean cluster on GKE.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    /// Ocean ID. Assigned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Cluster name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Identifier the Ocean controller reports with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_cluster_id: Option<String>,
    /// Underlying GKE cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gke: Option<Gke>,
    /// Node count bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Capacity>,
    /// Preemptible/on-demand strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    /// Compute configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<Compute>,
    /// Autoscaler settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_scaler: Option<AutoScaler>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Cluster {
    /// Copy of the cluster without the fields the API assigns itself.
    #[must_use]
    pub fn without_read_only(&self) -> Self {
        Self {
            id: None,
            created_at: None,
            updated_at: None,
            ..self.clone()
        }
    }
}

/// GKE cluster reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Gke {
    /// GKE cluster name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    /// Zone or region of the GKE master.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_location: Option<String>,
}

/// Preemptible/on-demand strategy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    /// Percentage of preemptible nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preemptible_percentage: Option<i32>,
    /// Launch on-demand when no preemptible capacity is available.
    #[serde(rename = "fallbackToOd", default, skip_serializing_if = "Option::is_none")]
    pub fallback_to_on_demand: Option<bool>,
    /// Seconds to drain a node before termination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draining_timeout: Option<i32>,
}

/// Compute configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Compute {
    /// Zones nodes are launched in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_zones: Option<Vec<String>>,
    /// Allowed machine types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_types: Option<InstanceTypes>,
    /// Subnet name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_name: Option<String>,
}

/// Input for [`Service::list`](super::Service::list).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListClustersInput {}

/// Output of [`Service::list`](super::Service::list).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListClustersOutput {
    /// Every cluster in the account.
    pub clusters: Vec<Cluster>,
}

/// Input for [`Service::create`](super::Service::create).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateClusterInput {
    /// Cluster to create.
    pub cluster: Option<Cluster>,
}

/// Output of [`Service::create`](super::Service::create).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateClusterOutput {
    /// The created cluster.
    pub cluster: Option<Cluster>,
}

/// Input for [`Service::read`](super::Service::read).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadClusterInput {
    /// Cluster to read.
    pub cluster_id: Option<String>,
}

impl ReadClusterInput {
    /// Input for the given cluster.
    #[must_use]
    pub fn new(cluster_id: impl Into<String>) -> Self {
        Self {
            cluster_id: Some(cluster_id.into()),
        }
    }
}

/// Output of [`Service::read`](super::Service::read).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadClusterOutput {
    /// The cluster, or `None` if the response carried no items.
    pub cluster: Option<Cluster>,
}

/// Input for [`Service::update`](super::Service::update).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateClusterInput {
    /// Changes to apply. `id` selects the cluster and is not sent in the body.
    pub cluster: Option<Cluster>,
}

/// Output of [`Service::update`](super::Service::update).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateClusterOutput {
    /// The updated cluster.
    pub cluster: Option<Cluster>,
}

/// Input for [`Service::delete`](super::Service::delete).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteClusterInput {
    /// Cluster to delete.
    pub cluster_id: Option<String>,
}

/// Output of [`Service::delete`](super::Service::delete).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteClusterOutput {}
