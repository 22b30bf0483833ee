//! Elastigroup service for the Spotinst API.
//!
//! Groups are managed per cloud provider. [`ServiceOp`] hands out the
//! [`aws::Service`] and [`gcp::Service`] implementations, all sharing one
//! executor.

#![deny(missing_docs)]

pub mod aws;
pub mod client;
pub mod gcp;

pub use client::{Service, ServiceOp};

/// Convenient result alias that reuses the shared Spotinst error type.
pub type Result<T> = spotinst_core::Result<T>;
