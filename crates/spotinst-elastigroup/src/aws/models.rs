//! AWS Elastigroup models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spotinst_core::Nullable;

/// An Elastigroup running on AWS EC2.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Group ID (`sig-...`). Assigned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Group name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description. Send `Null` to clear it.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub description: Nullable<String>,
    /// AWS region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Instance count bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Capacity>,
    /// Spot/on-demand strategy.
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
#[serde(rename_all = "camelCase")]
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
    /// `instance` or `weight`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Spot/on-demand strategy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    /// Percentage of spot instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<f64>,
    /// Fixed number of on-demand instances. Mutually exclusive with `risk`.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub on_demand_count: Nullable<i32>,
    /// `balanced`, `costOriented`, `availabilityOriented` or `cheapest`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_vs_cost: Option<String>,
    /// Seconds to drain an instance before termination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draining_timeout: Option<i32>,
    /// Launch on-demand when no spot capacity is available.
    #[serde(rename = "fallbackToOd", default, skip_serializing_if = "Option::is_none")]
    pub fallback_to_on_demand: Option<bool>,
    /// Prefer unused reserved instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utilize_reserved_instances: Option<bool>,
}

/// Compute configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Compute {
    /// Operating system product, e.g. `Linux/UNIX`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    /// Instance types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_types: Option<InstanceTypes>,
    /// Availability zones and their subnets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_zones: Option<Vec<AvailabilityZone>>,
    /// Launch specification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_specification: Option<LaunchSpecification>,
}

/// Instance types.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceTypes {
    /// On-demand instance type.
    #[serde(rename = "ondemand", default, skip_serializing_if = "Option::is_none")]
    pub on_demand: Option<String>,
    /// Spot instance types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot: Option<Vec<String>>,
    /// Spot types to try first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_spot: Option<Vec<String>>,
}

/// Availability zone placement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityZone {
    /// Zone name, e.g. `us-west-2a`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Single subnet ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    /// Subnet IDs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_ids: Option<Vec<String>>,
}

/// Launch specification.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LaunchSpecification {
    /// AMI ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    /// SSH key pair name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_pair: Option<String>,
    /// Security group IDs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_group_ids: Option<Vec<String>>,
    /// Base64 user data. Send `Null` to clear it.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub user_data: Nullable<String>,
    /// Detailed CloudWatch monitoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitoring: Option<bool>,
    /// EBS optimization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ebs_optimized: Option<bool>,
    /// IAM instance profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iam_role: Option<IamInstanceProfile>,
    /// Instance tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

/// IAM instance profile, by name or ARN.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IamInstanceProfile {
    /// Profile name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Profile ARN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
}

/// Instance tag.
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

/// Resources to release when deleting a stateful group.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatefulDeallocation {
    /// Delete persisted images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_delete_images: Option<bool>,
    /// Delete persisted network interfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_delete_network_interfaces: Option<bool>,
    /// Delete persisted volumes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_delete_volumes: Option<bool>,
    /// Delete persisted snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_delete_snapshots: Option<bool>,
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
    /// The created group, as returned by the API.
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
    /// Resume stateful instances after the update.
    pub should_resume_stateful: Option<bool>,
    /// Apply tag changes to running instances.
    pub auto_apply_tags: Option<bool>,
}

/// Output of [`Service::update`](super::Service::update).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateGroupOutput {
    /// The updated group, as returned by the API.
    pub group: Option<Group>,
}

/// Input for [`Service::delete`](super::Service::delete).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteGroupInput {
    /// Group to delete.
    pub group_id: Option<String>,
    /// Stateful resources to release.
    pub stateful_deallocation: Option<StatefulDeallocation>,
}

/// Output of [`Service::delete`](super::Service::delete).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteGroupOutput {}
