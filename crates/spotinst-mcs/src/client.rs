//! MCS service implementation.

use crate::models::{ClusterCost, ClusterCostInput, ClusterCostOutput};
use crate::Result;
use async_trait::async_trait;
use reqwest::Method;
use spotinst_core::uritemplates::{self, Values};
use spotinst_core::{Client, Config, Context, Request, Session};
use tracing::debug;

const CLUSTER_COSTS_PATH: &str = "/mcs/kubernetes/cluster/{clusterIdentifier}/costs";

/// Operations of the MCS service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Service: Send + Sync {
    /// Fetch the cost breakdown of a Kubernetes cluster.
    ///
    /// `from_date` and `to_date` are sent as query parameters only when set.
    ///
    /// # Errors
    ///
    /// Returns [`spotinst_core::Error::Template`] if the cluster ID is missing
    /// or empty, or any executor or decode error.
    async fn get_cluster_costs(
        &self,
        ctx: &Context,
        input: &ClusterCostInput,
    ) -> Result<ClusterCostOutput>;
}

/// MCS service backed by a shared [`Client`].
#[derive(Debug, Clone)]
pub struct ServiceOp {
    client: Client,
}

impl ServiceOp {
    /// Create the service from a session, with optional per-service overrides.
    #[must_use]
    pub fn new<'a>(session: &Session, overrides: impl IntoIterator<Item = &'a Config>) -> Self {
        Self {
            client: Client::from_session(session, overrides),
        }
    }

    /// The underlying executor.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Service for ServiceOp {
    async fn get_cluster_costs(
        &self,
        ctx: &Context,
        input: &ClusterCostInput,
    ) -> Result<ClusterCostOutput> {
        let path = uritemplates::expand(
            CLUSTER_COSTS_PATH,
            &Values::new().with(
                "clusterIdentifier",
                input.cluster_id.clone().unwrap_or_default(),
            ),
        )?;

        let mut request = Request::new(Method::GET, path);
        request.params.set_opt("toDate", input.to_date.as_deref());
        request.params.set_opt("fromDate", input.from_date.as_deref());

        let cluster_costs: Vec<ClusterCost> = self.client.call_items(ctx, request).await?;

        debug!(
            cluster_id = ?input.cluster_id,
            entries = cluster_costs.len(),
            "Fetched cluster costs"
        );

        Ok(ClusterCostOutput { cluster_costs })
    }
}
