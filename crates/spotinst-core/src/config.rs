//! Connection configuration and layered merging.
//!
//! Every [`Config`] field is optional so that "not provided" stays distinct
//! from "provided as empty". Configs are combined with [`Config::merge`]: a
//! field set on the override wins, a field left unset keeps the base value.
//! Defaults are only applied when a [`Session`](crate::session::Session) is
//! resolved.

use secrecy::SecretString;
use std::time::Duration;
use url::Url;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.spotinst.io";

/// Default content type for request bodies
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Default user agent
pub const DEFAULT_USER_AGENT: &str = concat!("spotinst-sdk-rust/", env!("CARGO_PKG_VERSION"));

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

// Retry settings

/// Default maximum number of attempts, including the first
pub const DEFAULT_MAX_ATTEMPTS: u32 = 4;

/// Default initial retry delay in milliseconds
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// Default maximum retry delay in milliseconds (for exponential backoff)
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 5000;

/// Retry policy with exponential backoff.
///
/// Governs how many times the executor attempts a request that failed with a
/// retryable error, and how long it waits between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,

    /// Delay before the first retry
    pub initial_delay: Duration,

    /// Maximum delay between retries (cap for exponential backoff)
    pub max_delay: Duration,

    /// Backoff multiplier (typically 2 for exponential backoff)
    pub backoff_multiplier: u32,
}

impl RetryPolicy {
    /// Create a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_RETRY_MAX_DELAY_MS),
            backoff_multiplier: 2,
        }
    }

    /// Create a retry policy that makes a single attempt.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::from_millis(0),
            max_delay: Duration::from_millis(0),
            backoff_multiplier: 1,
        }
    }

    /// Set the maximum number of attempts.
    #[must_use]
    pub const fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the initial delay.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the backoff multiplier.
    #[must_use]
    pub const fn with_backoff_multiplier(mut self, multiplier: u32) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Calculate the delay to wait after a failed attempt.
    ///
    /// Uses exponential backoff: delay = min(initial_delay * multiplier^(attempt - 1), max_delay)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::from_secs(0);
        }

        let multiplier = self.backoff_multiplier.saturating_pow(attempt - 1);
        let delay = self.initial_delay.saturating_mul(multiplier);

        std::cmp::min(delay, self.max_delay)
    }

    /// Check if more than one attempt is allowed.
    #[must_use]
    pub const fn has_retries(&self) -> bool {
        self.max_attempts > 1
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Connection parameters for the Spotinst API.
///
/// All fields are optional. Use the `with_*` builders to set them and
/// [`Config::merge`] to layer configs on top of each other.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// API endpoint
    pub base_url: Option<Url>,

    /// Bearer token sent with every request
    pub token: Option<SecretString>,

    /// Account ID appended as the `accountId` query parameter
    pub account: Option<String>,

    /// User-Agent header value
    pub user_agent: Option<String>,

    /// Content-Type header value for request bodies
    pub content_type: Option<String>,

    /// Per-request timeout
    pub timeout: Option<Duration>,

    /// Connection pool idle timeout.
    ///
    /// Read only when a session builds its transport; per-service overrides
    /// share the session's pool and do not change it.
    pub pool_idle_timeout: Option<Duration>,

    /// Maximum idle connections per host. Same scope as `pool_idle_timeout`.
    pub pool_max_idle_per_host: Option<usize>,

    /// Retry policy
    pub retry_policy: Option<RetryPolicy>,

    /// Shared HTTP transport
    pub http_client: Option<reqwest::Client>,
}

impl Config {
    /// Create an empty configuration with every field unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API endpoint.
    #[must_use]
    pub fn with_base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Set the account ID.
    #[must_use]
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Set the User-Agent header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the Content-Type header.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set connection pool idle timeout.
    ///
    /// Takes effect only in a config passed to [`Session::new`](crate::Session::new).
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Set maximum idle connections per host.
    ///
    /// Takes effect only in a config passed to [`Session::new`](crate::Session::new).
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = Some(max);
        self
    }

    /// Set the retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Disable retries.
    #[must_use]
    pub const fn without_retries(self) -> Self {
        self.with_retry_policy(RetryPolicy::no_retry())
    }

    /// Use a caller-provided HTTP transport.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Return a new config with every field set in `other` overriding `self`.
    ///
    /// Fields left unset in `other` keep the value from `self`. Neither input
    /// is modified.
    #[must_use]
    pub fn merge(&self, other: &Config) -> Config {
        Config {
            base_url: other.base_url.clone().or_else(|| self.base_url.clone()),
            token: other.token.clone().or_else(|| self.token.clone()),
            account: other.account.clone().or_else(|| self.account.clone()),
            user_agent: other.user_agent.clone().or_else(|| self.user_agent.clone()),
            content_type: other
                .content_type
                .clone()
                .or_else(|| self.content_type.clone()),
            timeout: other.timeout.or(self.timeout),
            pool_idle_timeout: other.pool_idle_timeout.or(self.pool_idle_timeout),
            pool_max_idle_per_host: other.pool_max_idle_per_host.or(self.pool_max_idle_per_host),
            retry_policy: other.retry_policy.or(self.retry_policy),
            http_client: other
                .http_client
                .clone()
                .or_else(|| self.http_client.clone()),
        }
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base_url.is_none()
            && self.token.is_none()
            && self.account.is_none()
            && self.user_agent.is_none()
            && self.content_type.is_none()
            && self.timeout.is_none()
            && self.pool_idle_timeout.is_none()
            && self.pool_max_idle_per_host.is_none()
            && self.retry_policy.is_none()
            && self.http_client.is_none()
    }
}

/// Apply each override onto `base` in order.
#[must_use]
pub fn merge<'a>(base: &Config, overrides: impl IntoIterator<Item = &'a Config>) -> Config {
    overrides
        .into_iter()
        .fold(base.clone(), |acc, next| acc.merge(next))
}

/// The configuration every session starts from before user configs apply.
///
/// # Errors
///
/// Returns an error if [`DEFAULT_BASE_URL`] cannot be parsed.
pub fn defaults() -> crate::Result<Config> {
    Ok(Config {
        base_url: Some(Url::parse(DEFAULT_BASE_URL)?),
        token: None,
        account: None,
        user_agent: Some(DEFAULT_USER_AGENT.to_string()),
        content_type: Some(DEFAULT_CONTENT_TYPE.to_string()),
        timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT)),
        pool_idle_timeout: Some(Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT)),
        pool_max_idle_per_host: Some(DEFAULT_POOL_MAX_IDLE_PER_HOST),
        retry_policy: Some(RetryPolicy::new()),
        http_client: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    /// Comparable view of a config; the transport and token are not `PartialEq`.
    fn snapshot(
        config: &Config,
    ) -> (
        Option<String>,
        Option<String>,
        Option<String>,
        Option<String>,
        Option<String>,
        Option<Duration>,
        Option<Duration>,
        Option<usize>,
        Option<RetryPolicy>,
        bool,
    ) {
        (
            config.base_url.as_ref().map(ToString::to_string),
            config.token.as_ref().map(|t| t.expose_secret().to_string()),
            config.account.clone(),
            config.user_agent.clone(),
            config.content_type.clone(),
            config.timeout,
            config.pool_idle_timeout,
            config.pool_max_idle_per_host,
            config.retry_policy,
            config.http_client.is_some(),
        )
    }

    fn config_a() -> Config {
        Config::new()
            .with_base_url(Url::parse("https://a.example.com").unwrap())
            .with_token("token-a")
            .with_account("act-a")
            .with_timeout(Duration::from_secs(5))
    }

    fn config_b() -> Config {
        Config::new()
            .with_token("token-b")
            .with_user_agent("agent-b")
            .with_retry_policy(RetryPolicy::no_retry())
    }

    fn config_c() -> Config {
        Config::new()
            .with_account("")
            .with_base_url(Url::parse("https://c.example.com").unwrap())
            .with_pool_max_idle(0)
    }

    #[test]
    fn test_retry_policy_new() {
        let policy = RetryPolicy::new();
        assert_eq!(policy.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(policy.initial_delay, Duration::from_millis(DEFAULT_RETRY_DELAY_MS));
        assert_eq!(policy.max_delay, Duration::from_millis(DEFAULT_RETRY_MAX_DELAY_MS));
        assert_eq!(policy.backoff_multiplier, 2);
        assert!(policy.has_retries());
    }

    #[test]
    fn test_retry_policy_no_retry() {
        let policy = RetryPolicy::no_retry();
        assert_eq!(policy.max_attempts, 1);
        assert!(!policy.has_retries());
    }

    #[test]
    fn test_retry_policy_delay_calculation() {
        let policy = RetryPolicy::new();

        assert_eq!(policy.delay_for_attempt(0), Duration::from_secs(0));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(500));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(1000));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(2000));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_millis(4000));

        // Capped at max_delay (5000ms)
        assert_eq!(policy.delay_for_attempt(5), Duration::from_millis(5000));
        assert_eq!(policy.delay_for_attempt(40), Duration::from_millis(5000));
    }

    #[test]
    fn test_merge_overrides_set_fields_only() {
        let merged = config_a().merge(&config_b());

        assert_eq!(
            merged.base_url.as_ref().map(Url::as_str),
            Some("https://a.example.com/")
        );
        assert_eq!(merged.token.as_ref().unwrap().expose_secret(), "token-b");
        assert_eq!(merged.account.as_deref(), Some("act-a"));
        assert_eq!(merged.user_agent.as_deref(), Some("agent-b"));
        assert_eq!(merged.timeout, Some(Duration::from_secs(5)));
        assert_eq!(merged.retry_policy, Some(RetryPolicy::no_retry()));
    }

    #[test]
    fn test_merge_keeps_explicit_empty_values() {
        let merged = config_a().merge(&config_c());
        assert_eq!(merged.account.as_deref(), Some(""));
        assert_eq!(merged.pool_max_idle_per_host, Some(0));
    }

    #[test]
    fn test_merge_is_associative() {
        let (a, b, c) = (config_a(), config_b(), config_c());

        let nested = a.merge(&b).merge(&c);
        let right_nested = a.merge(&b.merge(&c));
        let flat = merge(&a, [&b, &c]);

        assert_eq!(snapshot(&nested), snapshot(&flat));
        assert_eq!(snapshot(&right_nested), snapshot(&flat));
    }

    #[test]
    fn test_merge_with_empty_config_is_identity() {
        let a = config_a();
        let merged = a.merge(&Config::new());
        assert_eq!(snapshot(&merged), snapshot(&a));

        let merged = Config::new().merge(&a);
        assert_eq!(snapshot(&merged), snapshot(&a));
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let a = config_a();
        let b = config_b();
        let before = snapshot(&a);
        let _ = merge(&a, [&b]);
        assert_eq!(snapshot(&a), before);
    }

    #[test]
    fn test_defaults() {
        let config = defaults().unwrap();
        assert_eq!(
            config.base_url.as_ref().map(Url::as_str),
            Some("https://api.spotinst.io/")
        );
        assert!(config.token.is_none());
        assert_eq!(config.content_type.as_deref(), Some(DEFAULT_CONTENT_TYPE));
        assert_eq!(config.retry_policy, Some(RetryPolicy::new()));
    }

    #[test]
    fn test_is_empty() {
        assert!(Config::new().is_empty());
        assert!(!config_b().is_empty());
    }

    #[test]
    fn test_token_is_redacted_in_debug() {
        let config = Config::new().with_token("super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
