//! Ocean clusters on GCP.

mod client;
mod models;

#[cfg(test)]
pub use client::MockService;
pub use client::{Service, ServiceOp};
pub use models::*;
