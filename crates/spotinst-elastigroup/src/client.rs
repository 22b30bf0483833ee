//! Elastigroup service entry point.

use crate::{aws, gcp};
use spotinst_core::{Client, Config, Session};
use std::sync::Arc;

/// Access to the per-provider group services.
#[cfg_attr(test, mockall::automock)]
pub trait Service: Send + Sync {
    /// Groups running on AWS EC2.
    fn cloud_provider_aws(&self) -> Arc<dyn aws::Service>;

    /// Groups running on GCP Compute Engine.
    fn cloud_provider_gcp(&self) -> Arc<dyn gcp::Service>;
}

/// Elastigroup service backed by a shared [`Client`].
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

impl Service for ServiceOp {
    fn cloud_provider_aws(&self) -> Arc<dyn aws::Service> {
        Arc::new(aws::ServiceOp::new(self.client.clone()))
    }

    fn cloud_provider_gcp(&self) -> Arc<dyn gcp::Service> {
        Arc::new(gcp::ServiceOp::new(self.client.clone()))
    }
}
