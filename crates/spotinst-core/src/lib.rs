//! # spotinst-core
//!
//! Shared request pipeline for the Spotinst management API.
//!
//! Service crates build a [`Request`], hand it to a [`Client`] derived from a
//! [`Session`], and decode the returned envelope into their own types.
//!
//! ## Modules
//!
//! - [`config`] - Optional-field configuration, merging, and retry policy
//! - [`session`] - Resolved, shared configuration and connection pool
//! - [`uritemplates`] - Path templates with named placeholders
//! - [`request`] - Outbound request description and query parameters
//! - [`client`] - Request executor with retry and `require_ok`
//! - [`context`] - Cancellation and deadlines
//! - [`envelope`] - Response envelope and error body decoding
//! - [`optional`] - Absent/null/set field conventions
//! - [`error`] - Error taxonomy
//!
//! ## Example
//!
//! ```no_run
//! use spotinst_core::{Client, Config, Context, Request, Session};
//! use reqwest::Method;
//!
//! # async fn run() -> spotinst_core::Result<()> {
//! let session = Session::new([Config::new().with_token("my-token")])?;
//! let client = Client::from_session(&session, []);
//!
//! let response = spotinst_core::require_ok(
//!     client
//!         .execute(&Context::background(), Request::new(Method::GET, "/aws/ec2/group"))
//!         .await,
//! )?;
//! let groups: Vec<serde_json::Value> = response.items()?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod context;
pub mod envelope;
pub mod error;
pub mod optional;
pub mod request;
pub mod session;
pub mod uritemplates;

// Re-export commonly used types
pub use client::{require_ok, Client, Response};
pub use config::{Config, RetryPolicy};
pub use context::{CancelHandle, Context};
pub use error::{ApiError, ApiErrorDetail, Error, Result};
pub use optional::Nullable;
pub use request::{Params, Request};
pub use session::Session;
pub use uritemplates::Values;
