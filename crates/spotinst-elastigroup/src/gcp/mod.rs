//! Elastigroups on GCP Compute Engine.

mod client;
mod models;

#[cfg(test)]
pub use client::MockService;
pub use client::{Service, ServiceOp};
pub use models::*;
