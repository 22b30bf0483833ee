//! Ocean service entry point.

use crate::{aws, gcp};
use spotinst_core::{Client, Config, Session};
use std::sync::Arc;

/// Access to the per-provider cluster services.
#[cfg_attr(test, mockall::automock)]
pub trait Service: Send + Sync {
    /// Clusters running on AWS.
    fn cloud_provider_aws(&self) -> Arc<dyn aws::Service>;

    /// Clusters running on GCP.
    fn cloud_provider_gcp(&self) -> Arc<dyn gcp::Service>;
}

/// Ocean service backed by a shared [`Client`].
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
}

impl Service for ServiceOp {
    fn cloud_provider_aws(&self) -> Arc<dyn aws::Service> {
        Arc::new(aws::ServiceOp::new(self.client.clone()))
    }

    fn cloud_provider_gcp(&self) -> Arc<dyn gcp::Service> {
        Arc::new(gcp::ServiceOp::new(self.client.clone()))
    }
}
