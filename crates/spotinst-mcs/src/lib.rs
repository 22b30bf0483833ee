//! Kubernetes cluster cost reporting (MCS) for the Spotinst API.
//!
//! ```no_run
//! use spotinst_core::{Config, Context, Session};
//! use spotinst_mcs::{ClusterCostInput, Service, ServiceOp};
//!
//! # async fn run() -> spotinst_mcs::Result<()> {
//! let session = Session::new([Config::new().with_token("my-token")])?;
//! let svc = ServiceOp::new(&session, []);
//!
//! let input = ClusterCostInput::new("k8s-cluster-1")
//!     .with_from_date("2024-01-01")
//!     .with_to_date("2024-01-31");
//! let out = svc.get_cluster_costs(&Context::background(), &input).await?;
//! println!("{:?}", out.total_cost());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{Service, ServiceOp};
pub use models::{ClusterCost, ClusterCostInput, ClusterCostOutput, Deployment, Namespace};

/// Convenient result alias that reuses the shared Spotinst error type.
pub type Result<T> = spotinst_core::Result<T>;
