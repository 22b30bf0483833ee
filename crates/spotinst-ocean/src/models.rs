//! Cluster settings shared by every cloud provider.

use serde::{Deserialize, Serialize};

/// Worker node count bounds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Capacity {
    /// Minimum nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i32>,
    /// Maximum nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i32>,
    /// Desired nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<i32>,
}

/// Allowed and excluded machine types.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceTypes {
    /// Only these types may be launched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitelist: Option<Vec<String>>,
    /// These types are never launched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blacklist: Option<Vec<String>>,
}

/// Cluster autoscaler settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutoScaler {
    /// Whether Ocean scales the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    /// Derive headroom from cluster size instead of `headroom`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_auto_config: Option<bool>,
    /// Seconds between scaling actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown: Option<i32>,
    /// Spare capacity kept available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headroom: Option<Headroom>,
    /// Scale-down behaviour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down: Option<AutoScalerDown>,
    /// Upper bounds on cluster resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_limits: Option<ResourceLimits>,
}

impl AutoScaler {
    /// Returns true only when scaling is explicitly enabled.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.is_enabled.unwrap_or_default()
    }
}

/// Spare capacity kept available for new pods.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Headroom {
    /// CPU per unit, in millicores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_per_unit: Option<i32>,
    /// Memory per unit, in MiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_per_unit: Option<i32>,
    /// GPUs per unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_per_unit: Option<i32>,
    /// Number of units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_of_units: Option<i32>,
}

/// Scale-down behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutoScalerDown {
    /// Evaluation periods before a node is considered idle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_periods: Option<i32>,
    /// Largest share of the cluster removed in one step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_scale_down_percentage: Option<f64>,
}

/// Upper bounds on cluster resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLimits {
    /// Maximum vCPUs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_v_cpu: Option<i32>,
    /// Maximum memory, in GiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_memory_gib: Option<i32>,
}
