//! Read an AWS Elastigroup and print it.
//!
//! ```text
//! SPOTINST_TOKEN=... SPOTINST_ACCOUNT=act-... cargo run -p spotinst-elastigroup --example read_group -- sig-12345
//! ```

use anyhow::Context as _;
use spotinst_core::{Config, Context, Session};
use spotinst_elastigroup::aws::ReadGroupInput;
use spotinst_elastigroup::{Service, ServiceOp};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let token = std::env::var("SPOTINST_TOKEN").context("SPOTINST_TOKEN is not set")?;
    let group_id = std::env::args().nth(1).unwrap_or_else(|| "sig-12345".to_string());

    let mut config = Config::new().with_token(token);
    if let Ok(account) = std::env::var("SPOTINST_ACCOUNT") {
        config = config.with_account(account);
    }

    // One session per process, shared by every service.
    let session = Session::new([config])?;
    let svc = ServiceOp::new(&session, []);

    let out = svc
        .cloud_provider_aws()
        .read(&Context::background(), &ReadGroupInput::new(&group_id))
        .await
        .with_context(|| format!("failed to read group {group_id}"))?;

    match out.group {
        Some(group) => info!(
            id = group.id.as_deref().unwrap_or_default(),
            "Group: {}",
            serde_json::to_string_pretty(&group)?
        ),
        None => info!(%group_id, "Group not found"),
    }

    Ok(())
}
