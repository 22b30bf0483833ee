//! GCP Ocean cluster operations.

use super::models::{
    Cluster, CreateClusterInput, CreateClusterOutput, DeleteClusterInput, DeleteClusterOutput,
    ListClustersInput, ListClustersOutput, ReadClusterInput, ReadClusterOutput,
    UpdateClusterInput, UpdateClusterOutput,
};
use crate::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use spotinst_core::uritemplates::{self, Values};
use spotinst_core::{require_ok, Client, Context, Error, Request};

const CLUSTERS_PATH: &str = "/ocean/gcp/k8s/cluster";
const CLUSTER_PATH: &str = "/ocean/gcp/k8s/cluster/{clusterId}";

#[derive(Serialize)]
struct ClusterBody<'a> {
    cluster: &'a Cluster,
}

/// CRUD operations on GCP Ocean clusters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Service: Send + Sync {
    /// List every cluster in the account.
    async fn list(&self, ctx: &Context, input: &ListClustersInput) -> Result<ListClustersOutput>;

    /// Create a cluster.
    async fn create(
        &self,
        ctx: &Context,
        input: &CreateClusterInput,
    ) -> Result<CreateClusterOutput>;

    /// Read a cluster by ID.
    async fn read(&self, ctx: &Context, input: &ReadClusterInput) -> Result<ReadClusterOutput>;

    /// Update the cluster identified by `input.cluster.id`.
    async fn update(
        &self,
        ctx: &Context,
        input: &UpdateClusterInput,
    ) -> Result<UpdateClusterOutput>;

    /// Delete a cluster by ID.
    async fn delete(
        &self,
        ctx: &Context,
        input: &DeleteClusterInput,
    ) -> Result<DeleteClusterOutput>;
}

/// GCP Ocean service backed by a shared [`Client`].
#[derive(Debug, Clone)]
pub struct ServiceOp {
    client: Client,
}

impl ServiceOp {
    /// Wrap an existing executor.
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

fn cluster_path(cluster_id: Option<&str>) -> Result<String> {
    uritemplates::expand(
        CLUSTER_PATH,
        &Values::new().with("clusterId", cluster_id.unwrap_or_default()),
    )
}

fn require_cluster(cluster: Option<&Cluster>) -> Result<&Cluster> {
    cluster.ok_or_else(|| Error::Encode("missing cluster".to_string()))
}

#[async_trait]
impl Service for ServiceOp {
    async fn list(&self, ctx: &Context, _input: &ListClustersInput) -> Result<ListClustersOutput> {
        let clusters = self
            .client
            .call_items(ctx, Request::new(Method::GET, CLUSTERS_PATH))
            .await?;
        Ok(ListClustersOutput { clusters })
    }

    async fn create(
        &self,
        ctx: &Context,
        input: &CreateClusterInput,
    ) -> Result<CreateClusterOutput> {
        let cluster = require_cluster(input.cluster.as_ref())?;
        let request =
            Request::new(Method::POST, CLUSTERS_PATH).with_body(&ClusterBody { cluster })?;
        let cluster = self.client.call_first(ctx, request).await?;
        Ok(CreateClusterOutput { cluster })
    }

    async fn read(&self, ctx: &Context, input: &ReadClusterInput) -> Result<ReadClusterOutput> {
        let path = cluster_path(input.cluster_id.as_deref())?;
        let cluster = self
            .client
            .call_first(ctx, Request::new(Method::GET, path))
            .await?;
        Ok(ReadClusterOutput { cluster })
    }

    async fn update(
        &self,
        ctx: &Context,
        input: &UpdateClusterInput,
    ) -> Result<UpdateClusterOutput> {
        let cluster = require_cluster(input.cluster.as_ref())?;
        let path = cluster_path(cluster.id.as_deref())?;
        let request = Request::new(Method::PUT, path).with_body(&ClusterBody {
            cluster: &cluster.without_read_only(),
        })?;
        let cluster = self.client.call_first(ctx, request).await?;
        Ok(UpdateClusterOutput { cluster })
    }

    async fn delete(
        &self,
        ctx: &Context,
        input: &DeleteClusterInput,
    ) -> Result<DeleteClusterOutput> {
        let path = cluster_path(input.cluster_id.as_deref())?;
        require_ok(
            self.client
                .execute(ctx, Request::new(Method::DELETE, path))
                .await,
        )?;
        Ok(DeleteClusterOutput {})
    }
}
