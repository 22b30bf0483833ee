//! GCP group operations.

use super::models::{
    CreateGroupInput, CreateGroupOutput, DeleteGroupInput, DeleteGroupOutput, Group,
    ListGroupsInput, ListGroupsOutput, ReadGroupInput, ReadGroupOutput, UpdateGroupInput,
    UpdateGroupOutput,
};
use crate::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use spotinst_core::uritemplates::{self, Values};
use spotinst_core::{require_ok, Client, Context, Error, Request};

const GROUPS_PATH: &str = "/gcp/gce/group";
const GROUP_PATH: &str = "/gcp/gce/group/{groupId}";

#[derive(Serialize)]
struct GroupBody<'a> {
    group: &'a Group,
}

/// CRUD operations on GCP Elastigroups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Service: Send + Sync {
    /// List every group in the account.
    async fn list(&self, ctx: &Context, input: &ListGroupsInput) -> Result<ListGroupsOutput>;

    /// Create a group.
    async fn create(&self, ctx: &Context, input: &CreateGroupInput) -> Result<CreateGroupOutput>;

    /// Read a group by ID.
    async fn read(&self, ctx: &Context, input: &ReadGroupInput) -> Result<ReadGroupOutput>;

    /// Update the group identified by `input.group.id`.
    async fn update(&self, ctx: &Context, input: &UpdateGroupInput) -> Result<UpdateGroupOutput>;

    /// Delete a group by ID.
    async fn delete(&self, ctx: &Context, input: &DeleteGroupInput) -> Result<DeleteGroupOutput>;
}

/// GCP group service backed by a shared [`Client`].
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

fn group_path(group_id: Option<&str>) -> Result<String> {
    uritemplates::expand(
        GROUP_PATH,
        &Values::new().with("groupId", group_id.unwrap_or_default()),
    )
}

#[async_trait]
impl Service for ServiceOp {
    async fn list(&self, ctx: &Context, _input: &ListGroupsInput) -> Result<ListGroupsOutput> {
        let groups = self
            .client
            .call_items(ctx, Request::new(Method::GET, GROUPS_PATH))
            .await?;
        Ok(ListGroupsOutput { groups })
    }

    async fn create(&self, ctx: &Context, input: &CreateGroupInput) -> Result<CreateGroupOutput> {
        let group = input
            .group
            .as_ref()
            .ok_or_else(|| Error::Encode("missing group".to_string()))?;
        let request = Request::new(Method::POST, GROUPS_PATH).with_body(&GroupBody { group })?;
        let group = self.client.call_first(ctx, request).await?;
        Ok(CreateGroupOutput { group })
    }

    async fn read(&self, ctx: &Context, input: &ReadGroupInput) -> Result<ReadGroupOutput> {
        let path = group_path(input.group_id.as_deref())?;
        let group = self
            .client
            .call_first(ctx, Request::new(Method::GET, path))
            .await?;
        Ok(ReadGroupOutput { group })
    }

    async fn update(&self, ctx: &Context, input: &UpdateGroupInput) -> Result<UpdateGroupOutput> {
        let group = input
            .group
            .as_ref()
            .ok_or_else(|| Error::Encode("missing group".to_string()))?;
        let path = group_path(group.id.as_deref())?;
        let request = Request::new(Method::PUT, path).with_body(&GroupBody {
            group: &group.without_read_only(),
        })?;
        let group = self.client.call_first(ctx, request).await?;
        Ok(UpdateGroupOutput { group })
    }

    async fn delete(&self, ctx: &Context, input: &DeleteGroupInput) -> Result<DeleteGroupOutput> {
        let path = group_path(input.group_id.as_deref())?;
        require_ok(
            self.client
                .execute(ctx, Request::new(Method::DELETE, path))
                .await,
        )?;
        Ok(DeleteGroupOutput {})
    }
}
