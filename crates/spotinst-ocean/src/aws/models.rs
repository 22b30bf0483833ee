//! AWS Ocean cluster models.

use crate::models::{AutoScaler, Capacity, InstanceTypes};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spotinst_core::Nullable;

/// An Ocean cluster on AWS.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    /// Ocean ID (`o-...`). Assigned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Cluster name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Identifier the Ocean controller reports with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_cluster_id: Option<String>,
    /// AWS region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Node count bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Capacity>,
    /// Spot/on-demand strategy.
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

/// Spot/on-demand strategy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    /// Percentage of spot nodes. Send `Null` to fall back to the default.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub spot_percentage: Nullable<f64>,
    /// Launch on-demand when no spot capacity is available.
    #[serde(rename = "fallbackToOd", default, skip_serializing_if = "Option::is_none")]
    pub fallback_to_on_demand: Option<bool>,
    /// Prefer unused reserved instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utilize_reserved_instances: Option<bool>,
    /// Seconds to drain a node before termination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draining_timeout: Option<i32>,
}

/// Compute configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Compute {
    /// Subnets nodes are launched into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_ids: Option<Vec<String>>,
    /// Allowed instance types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_types: Option<InstanceTypes>,
    /// Launch specification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_specification: Option<LaunchSpecification>,
}

/// Launch specification.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LaunchSpecification {
    /// AMI ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    /// Security group IDs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_group_ids: Option<Vec<String>>,
    /// Base64 user data. Send `Null` to clear it.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub user_data: Nullable<String>,
    /// SSH key pair name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_pair: Option<String>,
    /// Node tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

/// Node tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Tag key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_key: Option<String>,
    /// Tag value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_value: Option<String>,
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
