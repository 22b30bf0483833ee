//! Long-lived, shared connection handle.
//!
//! A [`Session`] is created once per process or tenant. It merges the
//! caller's configs onto the built-in defaults, builds the HTTP transport
//! (connection pool) once, and never changes afterwards. Cloning a session is
//! cheap and every clone shares the same config and pool.

use crate::config::{self, Config, DEFAULT_POOL_IDLE_TIMEOUT, DEFAULT_POOL_MAX_IDLE_PER_HOST};
use crate::error::{Error, Result};
use reqwest::ClientBuilder;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Immutable, resolved configuration shared by every service.
#[derive(Debug, Clone)]
pub struct Session {
    config: Arc<Config>,
}

impl Session {
    /// Resolve a session from zero or more configs, applied in order.
    ///
    /// Fields still unset after merging take their defaults. If no transport
    /// was supplied, one is built from the timeout and pool settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the transport cannot be built.
    pub fn new<I>(configs: I) -> Result<Self>
    where
        I: IntoIterator<Item = Config>,
    {
        let mut resolved = config::defaults()?;
        for config in configs {
            resolved = resolved.merge(&config);
        }

        if resolved.http_client.is_none() {
            resolved.http_client = Some(build_transport(&resolved)?);
        }

        debug!(
            base_url = ?resolved.base_url.as_ref().map(url::Url::as_str),
            account = ?resolved.account,
            has_token = resolved.token.is_some(),
            "Resolved Spotinst session"
        );

        Ok(Self {
            config: Arc::new(resolved),
        })
    }

    /// The resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The resolved configuration with `overrides` applied on top.
    ///
    /// The session itself is not modified. Unless an override supplies its own
    /// transport, the result keeps the session's transport, so pool settings
    /// in `overrides` have no effect.
    #[must_use]
    pub fn config_with<'a>(&self, overrides: impl IntoIterator<Item = &'a Config>) -> Config {
        config::merge(&self.config, overrides)
    }
}

fn build_transport(config: &Config) -> Result<reqwest::Client> {
    let mut builder = ClientBuilder::new()
        .pool_idle_timeout(
            config
                .pool_idle_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT)),
        )
        .pool_max_idle_per_host(
            config
                .pool_max_idle_per_host
                .unwrap_or(DEFAULT_POOL_MAX_IDLE_PER_HOST),
        )
        .connect_timeout(CONNECT_TIMEOUT);

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|err| Error::Config(format!("Failed to build HTTP transport: {err}")))
}
