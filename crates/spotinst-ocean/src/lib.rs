//! Ocean cluster orchestration for the Spotinst API.
//!
//! Ocean manages the worker capacity of Kubernetes clusters. [`ServiceOp`]
//! hands out the [`aws::Service`] and [`gcp::Service`] implementations.

#![deny(missing_docs)]

pub mod aws;
pub mod client;
pub mod gcp;
pub mod models;

pub use client::{Service, ServiceOp};

/// Convenient result alias that reuses the shared Spotinst error type.
pub type Result<T> = spotinst_core::Result<T>;
