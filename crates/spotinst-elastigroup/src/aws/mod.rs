//! Elastigroups on AWS EC2.

mod client;
mod models;

#[cfg(test)]
pub use client::MockService;
pub use client::{Service, ServiceOp};
pub use models::*;
