//! The authenticated dispatch path.
//!
//! [`HivebaseClient`] owns the HTTP stack and the session token; every other
//! module in the crate funnels its traffic through [`HivebaseClient::send`].
//! There is no retry loop, no response cache, and no status-code
//! interpretation here: a round-trip that produces JSON is a success, and
//! whatever the server said about it lives in the returned document.

use crate::api::{Api, ApiBuilder};
use crate::auth::Auth;
use crate::client::config::ClientConfig;
use crate::client::session::{MemoryTokenStore, Session, TokenStore};
use crate::db::Database;
use crate::error::{HivebaseError, Result};
use crate::protocol;
use crate::types::RequestSpec;
use http::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::sync::Arc;

/// The Hivebase client: a cheaply cloneable handle over one HTTP connection
/// pool, one configuration, and one process-wide session.
///
/// Clones share the session, so a login performed through any clone
/// authenticates them all.
///
/// # Examples
///
/// ```no_run
/// use hivebase::HivebaseClient;
///
/// #[tokio::main]
/// async fn main() -> hivebase::Result<()> {
///     let client = HivebaseClient::new("https://app.hivebase.dev", "pk_live_123");
///
///     client.auth().login("ada@example.com", "hunter2").await?;
///
///     let users = client
///         .db()
///         .from("users")
///         .list()
///         .eq("active", true)
///         .order("age", "desc")
///         .page(1, 20)
///         .await?;
///
///     println!("{}", users);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct HivebaseClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    session: Arc<Session>,
}

impl HivebaseClient {
    /// Create a client for `base_url` authenticated with `api_key`, using
    /// default configuration and an in-memory token store.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_config(ClientConfig {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        })
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryTokenStore::default()))
    }

    /// Create a client with custom configuration and a host-provided token
    /// store. The session hydrates from the store, so a token persisted by a
    /// previous process is active immediately.
    pub fn with_store(config: ClientConfig, store: Arc<dyn TokenStore>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .unwrap_or_default();

        HivebaseClient {
            http,
            config: Arc::new(config),
            session: Arc::new(Session::new(store)),
        }
    }

    /// The session and account surface.
    pub fn auth(&self) -> Auth {
        Auth::new(self.clone())
    }

    /// The structured-query surface.
    pub fn db(&self) -> Database {
        Database::new(self.clone())
    }

    /// The ad-hoc named-API surface.
    pub fn api(&self) -> Api {
        Api::new(self.clone())
    }

    /// Start a builder for one named API call; shorthand for
    /// [`api().call(name)`](Api::call).
    pub fn call(&self, name: impl Into<String>) -> ApiBuilder {
        self.api().call(name)
    }

    /// The current session token, if one is active.
    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// Replace the session token in memory and persisted storage; `None`
    /// clears both. The sole mutator of auth state; the client never infers
    /// a token from response content outside the auth module's login path.
    pub fn set_token(&self, token: Option<&str>) {
        self.session.set(token);
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one request and parse the response body as JSON.
    ///
    /// Headers are composed in a fixed order, later entries replacing
    /// earlier ones on conflict:
    ///
    /// 1. `Content-Type: application/json`
    /// 2. `x-api-key` with the configured API key
    /// 3. `Authorization: Bearer <token>` when a session is active
    /// 4. the spec's per-call headers
    ///
    /// Step 4 last means a caller can override even the bearer header for a
    /// single call.
    ///
    /// # Errors
    ///
    /// [`HivebaseError::Network`] when the host is unreachable or the
    /// connection fails mid-response; [`HivebaseError::Decode`] when the
    /// body is not valid JSON; [`HivebaseError::Validation`] when a header
    /// name or value is not legal HTTP. Status codes are not inspected.
    pub async fn send(&self, path: &str, spec: RequestSpec) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(protocol::headers::API_KEY),
            HeaderValue::from_str(&self.config.api_key).map_err(|e| {
                HivebaseError::Validation(format!("invalid api key header value: {}", e))
            })?,
        );
        if let Some(token) = self.session.token() {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                    HivebaseError::Validation(format!("invalid session token: {}", e))
                })?,
            );
        }
        for (name, value) in &spec.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                HivebaseError::Validation(format!("invalid header name '{}': {}", name, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                HivebaseError::Validation(format!("invalid header value: {}", e))
            })?;
            headers.insert(name, value);
        }

        let mut request = self
            .http
            .request(spec.method.clone(), url.as_str())
            .headers(headers);
        if let Some(body) = spec.body {
            request = request.body(body);
        }

        tracing::debug!(method = %spec.method, %url, "dispatching request");

        let response = request
            .send()
            .await
            .map_err(|e| HivebaseError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| HivebaseError::Network(e.to_string()))?;

        tracing::trace!(status, bytes = body.len(), "response received");

        serde_json::from_slice(&body).map_err(|e| HivebaseError::Decode(e.to_string()))
    }
}

impl std::fmt::Debug for HivebaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HivebaseClient")
            .field("base_url", &self.config.base_url)
            .field("session", &self.session)
            .finish()
    }
}
