//! GCP Elastigroup models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spotinst_core::Nullable;

/// An Elastigroup running on GCP Compute Engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Group ID. Assigned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Group name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description. Send `Null` to clear it.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub description: Nullable<String>,
    /// Instance count bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Capacity>,
    /// Preemptible/on-demand strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    /// Compute configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<Compute>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Group {
    /// Copy of the group without the fields the API assigns itself.
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

/// Instance count bounds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Capacity {
    /// Minimum instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i32>,
    /// Maximum instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i32>,
    /// Desired instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<i32>,
}

/// Preemptible/on-demand strategy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    /// Percentage of preemptible instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preemptible_percentage: Option<i32>,
    /// Fixed number of on-demand instances.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub on_demand_count: Nullable<i32>,
    /// Seconds to drain an instance before termination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draining_timeout: Option<i32>,
    /// Launch on-demand when no preemptible capacity is available.
    #[serde(rename = "fallbackToOd", default, skip_serializing_if = "Option::is_none")]
    pub fallback_to_on_demand: Option<bool>,
}

/// Compute configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Compute {
    /// Zones to launch in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_zones: Option<Vec<String>>,
    /// Machine types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_types: Option<InstanceTypes>,
    /// Subnets per region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnets: Option<Vec<Subnet>>,
    /// Launch specification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_specification: Option<LaunchSpecification>,
}

/// Machine types.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceTypes {
    /// On-demand machine type.
    #[serde(rename = "ondemand", default, skip_serializing_if = "Option::is_none")]
    pub on_demand: Option<String>,
    /// Preemptible machine types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preemptible: Option<Vec<String>>,
}

/// Subnets of one region.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subnet {
    /// Region name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Subnet names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_names: Option<Vec<String>>,
}

/// Launch specification.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LaunchSpecification {
    /// Service account email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account: Option<String>,
    /// Startup script. Send `Null` to clear it.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub startup_script: Nullable<String>,
    /// Network tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Instance labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
}

/// Instance label.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    /// Label key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Label value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Input for [`Service::list`](super::Service::list).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListGroupsInput {}

/// Output of [`Service::list`](super::Service::list).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListGroupsOutput {
    /// Every group in the account.
    pub groups: Vec<Group>,
}

/// Input for [`Service::create`](super::Service::create).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateGroupInput {
    /// Group to create.
    pub group: Option<Group>,
}

/// Output of [`Service::create`](super::Service::create).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateGroupOutput {
    /// The created group.
    pub group: Option<Group>,
}

/// Input for [`Service::read`](super::Service::read).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadGroupInput {
    /// Group to read.
    pub group_id: Option<String>,
}

impl ReadGroupInput {
    /// Input for the given group.
    #[must_use]
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: Some(group_id.into()),
        }
    }
}

/// Output of [`Service::read`](super::Service::read).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadGroupOutput {
    /// The group, or `None` if the response carried no items.
    pub group: Option<Group>,
}

/// Input for [`Service::update`](super::Service::update).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateGroupInput {
    /// Changes to apply. `id` selects the group and is not sent in the body.
    pub group: Option<Group>,
}

/// Output of [`Service::update`](super::Service::update).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateGroupOutput {
    /// The updated group.
    pub group: Option<Group>,
}

/// Input for [`Service::delete`](super::Service::delete).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteGroupInput {
    /// Group to delete.
    pub group_id: Option<String>,
}

/// Output of [`Service::delete`](super::Service::delete).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteGroupOutput {}
