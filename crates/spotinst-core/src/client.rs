//! Request executor with retry and error classification.
//!
//! [`Client::execute`] sends one [`Request`] and retries transient failures
//! (transport errors, timeouts, HTTP 429 and 5xx) under the configured
//! [`RetryPolicy`]. Any other status is handed back as a [`Response`];
//! [`require_ok`] turns non-2xx responses into [`Error::Api`].

use crate::config::{Config, DEFAULT_CONTENT_TYPE, DEFAULT_USER_AGENT};
use crate::context::Context;
use crate::envelope;
use crate::error::{is_retryable_status, Error, Result};
use crate::request::Request;
use crate::session::Session;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

/// Query parameter carrying the account ID.
pub const ACCOUNT_PARAM: &str = "accountId";

/// A fully read HTTP response.
///
/// The body is buffered before the executor returns, so the underlying
/// connection has already been released back to the pool.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    attempts: u32,
}

impl Response {
    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consume the response, returning the body.
    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Number of attempts it took to get this response.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Decode the body as a single JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        envelope::decode_single(&self.body)
    }

    /// Decode the body as a response envelope of `T` items.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the envelope or any item is malformed.
    pub fn items<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        envelope::decode_items_as(&self.body)
    }

    /// Decode the first envelope item, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the envelope or first item is malformed.
    pub fn first_item<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        envelope::decode_first(&self.body)
    }
}

/// Pass errors through and turn non-2xx responses into [`Error::Api`].
///
/// # Errors
///
/// Returns the input error unchanged, or [`Error::Api`] decoded from the body
/// of a non-2xx response.
pub fn require_ok(result: Result<Response>) -> Result<Response> {
    let response = result?;
    if response.status.is_success() {
        Ok(response)
    } else {
        Err(Error::Api(envelope::decode_error(
            response.status.as_u16(),
            &response.body,
        )))
    }
}

/// Executes requests against the Spotinst API.
///
/// Cheap to clone; clones share the configuration and connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    config: Arc<Config>,
}

impl Client {
    /// Create a client from a config.
    ///
    /// The config is normally a session's resolved config, possibly with
    /// service-specific overrides. Nothing is validated until the first call.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Create a client from a session and per-service overrides.
    #[must_use]
    pub fn from_session<'a>(
        session: &Session,
        overrides: impl IntoIterator<Item = &'a Config>,
    ) -> Self {
        Self::new(session.config_with(overrides))
    }

    /// The configuration this client executes with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send `request`, retrying transient failures.
    ///
    /// Returns the response for any non-retryable status, including 4xx;
    /// pass the result through [`require_ok`] to reject those.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the token or transport is missing
    /// - [`Error::Cancelled`] / [`Error::DeadlineExceeded`] if `ctx` ends first
    /// - [`Error::RetryExhausted`] once every allowed attempt has failed
    /// - any non-retryable transport or encoding error
    pub async fn execute(&self, ctx: &Context, request: Request) -> Result<Response> {
        let prepared = self.prepare(&request)?;
        let policy = self.config.retry_policy.unwrap_or_default();
        let max_attempts = policy.max_attempts.max(1);
        let start = Instant::now();
        let mut attempt = 0;

        loop {
            if let Some(err) = ctx.err() {
                return Err(err);
            }
            attempt += 1;

            debug!(
                method = %request.method,
                path = %request.path,
                attempt,
                "Sending Spotinst request"
            );

            let outcome = tokio::select! {
                biased;
                () = ctx.done() => return Err(ctx.done_err()),
                outcome = self.send_once(&prepared, &request, attempt) => outcome,
            };

            let error = match outcome {
                Ok(response) if is_retryable_status(response.status.as_u16()) => Error::Api(
                    envelope::decode_error(response.status.as_u16(), &response.body),
                ),
                Ok(response) => {
                    info!(
                        method = %request.method,
                        path = %request.path,
                        status = response.status.as_u16(),
                        attempts = attempt,
                        latency_ms = start.elapsed().as_millis(),
                        "Spotinst request completed"
                    );
                    return Ok(response);
                }
                Err(err) if err.is_retryable() => err,
                Err(err) => return Err(err),
            };

            if attempt >= max_attempts {
                return Err(Error::RetryExhausted {
                    attempts: attempt,
                    last_error: Box::new(error),
                });
            }

            let delay = policy.delay_for_attempt(attempt);
            warn!(
                method = %request.method,
                path = %request.path,
                attempt,
                delay_ms = delay.as_millis(),
                error = %error,
                "Retrying Spotinst request"
            );

            tokio::select! {
                biased;
                () = ctx.done() => return Err(ctx.done_err()),
                () = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// Execute `request`, require a 2xx status, and decode every envelope item.
    ///
    /// # Errors
    ///
    /// Any error from [`execute`](Self::execute) or [`require_ok`], or
    /// [`Error::Decode`] for a malformed envelope.
    pub async fn call_items<T>(&self, ctx: &Context, request: Request) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        require_ok(self.execute(ctx, request).await)?.items()
    }

    /// Execute `request`, require a 2xx status, and decode the first item.
    ///
    /// # Errors
    ///
    /// Same as [`call_items`](Self::call_items).
    pub async fn call_first<T>(&self, ctx: &Context, request: Request) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        require_ok(self.execute(ctx, request).await)?.first_item()
    }

    /// Resolve everything about the call that does not change between attempts.
    fn prepare(&self, request: &Request) -> Result<Prepared> {
        let token = self
            .config
            .token
            .as_ref()
            .ok_or_else(|| Error::Config("missing auth token".to_string()))?;
        let http = self
            .config
            .http_client
            .clone()
            .ok_or_else(|| Error::Config("missing HTTP transport".to_string()))?;
        let base_url = self
            .config
            .base_url
            .as_ref()
            .ok_or_else(|| Error::Config("missing base URL".to_string()))?;

        let mut url = base_url.clone();
        url.set_path(&request.path);
        url.set_query(None);
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(account) = &self.config.account {
                pairs.append_pair(ACCOUNT_PARAM, account);
            }
            for (key, value) in request.params.iter() {
                pairs.append_pair(key, value);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        Ok(Prepared {
            http,
            url,
            authorization: format!("Bearer {}", token.expose_secret()),
            user_agent: self
                .config
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            content_type: self
                .config
                .content_type
                .clone()
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
        })
    }

    async fn send_once(
        &self,
        prepared: &Prepared,
        request: &Request,
        attempt: u32,
    ) -> Result<Response> {
        let mut builder = prepared
            .http
            .request(request.method.clone(), prepared.url.clone())
            .header(AUTHORIZATION, &prepared.authorization)
            .header(USER_AGENT, &prepared.user_agent)
            .header(ACCEPT, "application/json");

        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(body) = &request.body {
            let bytes = serde_json::to_vec(body)
                .map_err(|err| Error::Encode(format!("request body: {err}")))?;
            builder = builder
                .header(CONTENT_TYPE, &prepared.content_type)
                .body(bytes);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(Response {
            status,
            headers,
            body,
            attempts: attempt,
        })
    }
}

struct Prepared {
    http: reqwest::Client,
    url: Url,
    authorization: String,
    user_agent: String,
    content_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use reqwest::Method;
    use serde_json::json;
    use std::time::Duration;
    use tokio_test::assert_ok;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_retries(attempts: u32) -> RetryPolicy {
        RetryPolicy::new()
            .with_max_attempts(attempts)
            .with_initial_delay(Duration::from_millis(5))
            .with_max_delay(Duration::from_millis(20))
    }

    fn test_client(server: &MockServer, policy: RetryPolicy) -> Client {
        let session = Session::new([Config::new()
            .with_base_url(Url::parse(&server.uri()).unwrap())
            .with_token("test-token")
            .with_retry_policy(policy)])
        .unwrap();
        Client::from_session(&session, [])
    }

    #[tokio::test]
    async fn execute_sends_auth_account_and_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/aws/ec2/group/sig-1"))
            .and(header("authorization", "Bearer test-token"))
            .and(query_param("accountId", "act-1"))
            .and(query_param("fromDate", "2024-01-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": {"items": [{"id": "sig-1"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = Session::new([Config::new()
            .with_base_url(Url::parse(&server.uri()).unwrap())
            .with_token("test-token")
            .with_account("act-1")])
        .unwrap();
        let client = Client::from_session(&session, []);

        let request =
            Request::new(Method::GET, "/aws/ec2/group/sig-1").with_param("fromDate", "2024-01-01");
        let response = assert_ok!(require_ok(
            client.execute(&Context::background(), request).await
        ));
        assert_eq!(response.attempts(), 1);
        let items: Vec<serde_json::Value> = response.items().unwrap();
        assert_eq!(items, vec![json!({"id": "sig-1"})]);
    }

    #[tokio::test]
    async fn execute_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/aws/ec2/group"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"group": {"name": "web"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, RetryPolicy::no_retry());
        let request = Request::new(Method::POST, "/aws/ec2/group")
            .with_body(&json!({"group": {"name": "web"}}))
            .unwrap();
        assert_ok!(client.execute(&Context::background(), request).await);
    }

    #[tokio::test]
    async fn require_ok_passes_success_through() {
        let server = MockServer::start().await;
        let body = json!({"response": {"items": [{"totalCost": 12.5}]}});
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let client = test_client(&server, RetryPolicy::no_retry());
        let response = require_ok(
            client
                .execute(&Context::background(), Request::new(Method::GET, "/ok"))
                .await,
        )
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let echoed: serde_json::Value = response.json().unwrap();
        assert_eq!(echoed, body);
    }

    #[tokio::test]
    async fn require_ok_decodes_structured_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/aws/ec2/group/sig-404"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "request": {"id": "req-404"},
                "response": {
                    "errors": [{"code": "GROUP_DOESNT_EXIST", "message": "Group not found"}]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, fast_retries(3));
        let err = require_ok(
            client
                .execute(
                    &Context::background(),
                    Request::new(Method::GET, "/aws/ec2/group/sig-404"),
                )
                .await,
        )
        .unwrap_err();

        let Error::Api(api) = err else {
            panic!("expected API error");
        };
        assert_eq!(api.status, 404);
        assert_eq!(api.request_id.as_deref(), Some("req-404"));
        assert_eq!(api.code(), Some("GROUP_DOESNT_EXIST"));
    }

    #[tokio::test]
    async fn call_first_decodes_first_item() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ocean/aws/k8s/cluster/o-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": {"items": [{"id": "o-1"}, {"id": "o-2"}]}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server, RetryPolicy::no_retry());
        let first: Option<serde_json::Value> = client
            .call_first(
                &Context::background(),
                Request::new(Method::GET, "/ocean/aws/k8s/cluster/o-1"),
            )
            .await
            .unwrap();
        assert_eq!(first, Some(json!({"id": "o-1"})));
    }

    #[tokio::test]
    async fn call_items_rejects_non_2xx() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forbidden"))
            .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
            .mount(&server)
            .await;

        let client = test_client(&server, RetryPolicy::no_retry());
        let err = client
            .call_items::<serde_json::Value>(
                &Context::background(),
                Request::new(Method::GET, "/forbidden"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.api_error().map(|a| a.status), Some(403));
        assert_eq!(err.api_error().and_then(|a| a.message()), Some("denied"));
    }

    #[tokio::test]
    async fn retries_until_exhausted_on_503() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .expect(3)
            .mount(&server)
            .await;

        let client = test_client(&server, fast_retries(3));
        let err = client
            .execute(&Context::background(), Request::new(Method::GET, "/flaky"))
            .await
            .unwrap_err();

        match err {
            Error::RetryExhausted {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, 3);
                assert_eq!(last_error.api_error().map(|a| a.status), Some(503));
            }
            other => panic!("expected RetryExhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn recovers_after_transient_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recover"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/recover"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, fast_retries(4));
        let response = client
            .execute(&Context::background(), Request::new(Method::GET, "/recover"))
            .await
            .unwrap();
        assert_eq!(response.attempts(), 3);
    }

    #[tokio::test]
    async fn does_not_retry_400() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bad"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, fast_retries(5));
        let response = client
            .execute(&Context::background(), Request::new(Method::GET, "/bad"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(require_ok(Ok(response)), Err(Error::Api(_))));
    }

    #[tokio::test]
    async fn cancel_during_backoff_aborts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow-retry"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let policy = RetryPolicy::new()
            .with_max_attempts(5)
            .with_initial_delay(Duration::from_secs(30))
            .with_max_delay(Duration::from_secs(30));
        let client = test_client(&server, policy);

        let (ctx, handle) = Context::background().with_cancel();
        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            handle.cancel();
        });

        let err = client
            .execute(&ctx, Request::new(Method::GET, "/slow-retry"))
            .await
            .unwrap_err();
        canceller.await.unwrap();

        assert_eq!(err, Error::Cancelled);
        assert!(err.is_cancellation());
    }

    #[tokio::test]
    async fn deadline_during_backoff_aborts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow-retry"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let policy = RetryPolicy::new()
            .with_max_attempts(5)
            .with_initial_delay(Duration::from_secs(30))
            .with_max_delay(Duration::from_secs(30));
        let client = test_client(&server, policy);

        let ctx = Context::background().with_timeout(Duration::from_millis(300));
        let err = client
            .execute(&ctx, Request::new(Method::GET, "/slow-retry"))
            .await
            .unwrap_err();
        assert_eq!(err, Error::DeadlineExceeded);
    }

    #[tokio::test]
    async fn cancelled_context_never_sends() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server, fast_retries(3));
        let (ctx, handle) = Context::background().with_cancel();
        handle.cancel();

        let err = client
            .execute(&ctx, Request::new(Method::GET, "/never"))
            .await
            .unwrap_err();
        assert_eq!(err, Error::Cancelled);
    }

    #[tokio::test]
    async fn missing_token_is_config_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let session = Session::new([
            Config::new().with_base_url(Url::parse(&server.uri()).unwrap())
        ])
        .unwrap();
        let client = Client::from_session(&session, []);

        let err = client
            .execute(&Context::background(), Request::new(Method::GET, "/x"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("token")));
    }

    #[tokio::test]
    async fn transport_errors_are_retried() {
        // Nothing listens on port 1
        let session = Session::new([Config::new()
            .with_base_url(Url::parse("http://127.0.0.1:1").unwrap())
            .with_token("t")
            .with_retry_policy(fast_retries(2))])
        .unwrap();
        let client = Client::from_session(&session, []);

        let err = client
            .execute(&Context::background(), Request::new(Method::GET, "/x"))
            .await
            .unwrap_err();

        match err {
            Error::RetryExhausted {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, 2);
                assert!(last_error.is_retryable());
            }
            other => panic!("expected RetryExhausted, got {other:?}"),
        }
    }
}
