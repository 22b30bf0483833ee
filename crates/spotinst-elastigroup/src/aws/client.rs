//! AWS group operations.

use super::models::{
    CreateGroupInput, CreateGroupOutput, DeleteGroupInput, DeleteGroupOutput, Group,
    ListGroupsInput, ListGroupsOutput, ReadGroupInput, ReadGroupOutput, StatefulDeallocation,
    UpdateGroupInput, UpdateGroupOutput,
};
use crate::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use spotinst_core::uritemplates::{self, Values};
use spotinst_core::{require_ok, Client, Context, Error, Request};
use tracing::debug;

const GROUPS_PATH: &str = "/aws/ec2/group";
const GROUP_PATH: &str = "/aws/ec2/group/{groupId}";

#[derive(Serialize)]
struct GroupBody<'a> {
    group: &'a Group,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteBody<'a> {
    stateful_deallocation: &'a StatefulDeallocation,
}

/// CRUD operations on AWS Elastigroups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Service: Send + Sync {
    /// List every group in the account.
    async fn list(&self, ctx: &Context, input: &ListGroupsInput) -> Result<ListGroupsOutput>;

    /// Create a group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if `input.group` is not set.
    async fn create(&self, ctx: &Context, input: &CreateGroupInput) -> Result<CreateGroupOutput>;

    /// Read a group by ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] if the group ID is missing.
    async fn read(&self, ctx: &Context, input: &ReadGroupInput) -> Result<ReadGroupOutput>;

    /// Update the group identified by `input.group.id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if `input.group` is not set, or
    /// [`Error::Template`] if it has no ID.
    async fn update(&self, ctx: &Context, input: &UpdateGroupInput) -> Result<UpdateGroupOutput>;

    /// Delete a group by ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] if the group ID is missing.
    async fn delete(&self, ctx: &Context, input: &DeleteGroupInput) -> Result<DeleteGroupOutput>;
}

/// AWS group service backed by a shared [`Client`].
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

fn require_group(group: Option<&Group>) -> Result<&Group> {
    group.ok_or_else(|| Error::Encode("missing group".to_string()))
}

#[async_trait]
impl Service for ServiceOp {
    async fn list(&self, ctx: &Context, _input: &ListGroupsInput) -> Result<ListGroupsOutput> {
        let request = Request::new(Method::GET, GROUPS_PATH);
        let groups: Vec<Group> = self.client.call_items(ctx, request).await?;
        debug!(count = groups.len(), "Listed AWS groups");
        Ok(ListGroupsOutput { groups })
    }

    async fn create(&self, ctx: &Context, input: &CreateGroupInput) -> Result<CreateGroupOutput> {
        let group = require_group(input.group.as_ref())?;
        let request = Request::new(Method::POST, GROUPS_PATH).with_body(&GroupBody { group })?;
        let group: Option<Group> = self.client.call_first(ctx, request).await?;
        debug!(group_id = ?group.as_ref().and_then(|g| g.id.as_deref()), "Created AWS group");
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
        let group = require_group(input.group.as_ref())?;
        let path = group_path(group.id.as_deref())?;

        let mut request = Request::new(Method::PUT, path).with_body(&GroupBody {
            group: &group.without_read_only(),
        })?;
        request
            .params
            .set_opt("shouldResumeStateful", input.should_resume_stateful);
        request.params.set_opt("autoApplyTags", input.auto_apply_tags);

        let group = self.client.call_first(ctx, request).await?;
        Ok(UpdateGroupOutput { group })
    }

    async fn delete(&self, ctx: &Context, input: &DeleteGroupInput) -> Result<DeleteGroupOutput> {
        let path = group_path(input.group_id.as_deref())?;
        let mut request = Request::new(Method::DELETE, path);
        if let Some(stateful_deallocation) = &input.stateful_deallocation {
            request = request.with_body(&DeleteBody {
                stateful_deallocation,
            })?;
        }

        require_ok(self.client.execute(ctx, request).await)?;
        debug!(group_id = ?input.group_id, "Deleted AWS group");
        Ok(DeleteGroupOutput {})
    }
}
