//! Ad-hoc named API invocation.
//!
//! Backend functions published outside the data surface are reachable as
//! `POST /api/<name>`. [`ApiBuilder`] accumulates a flat parameter object
//! and optional per-call headers, and dispatches when awaited, under the same
//! deferred contract as the query chain.
//!
//! # Examples
//!
//! ```no_run
//! use hivebase::HivebaseClient;
//!
//! # #[tokio::main]
//! # async fn main() -> hivebase::Result<()> {
//! let client = HivebaseClient::new("http://localhost:8080", "dev-key");
//!
//! let receipt = client
//!     .api()
//!     .call("sendSms")
//!     .param("to", "+15551234567")
//!     .param("template", "welcome")
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::client::HivebaseClient;
use crate::error::Result;
use crate::protocol;
use crate::types::RequestSpec;
use futures::future::BoxFuture;
use serde_json::{Map, Value};
use std::future::IntoFuture;

/// Entry point to the named-API surface, obtained from
/// [`HivebaseClient::api`](crate::client::HivebaseClient::api).
#[derive(Debug, Clone)]
pub struct Api {
    client: HivebaseClient,
}

impl Api {
    pub(crate) fn new(client: HivebaseClient) -> Self {
        Api { client }
    }

    /// Start a builder for the API published under `name`.
    pub fn call(&self, name: impl Into<String>) -> ApiBuilder {
        ApiBuilder {
            client: self.client.clone(),
            name: name.into(),
            params: Map::new(),
            headers: Vec::new(),
        }
    }
}

/// Builder for one named API call.
///
/// The accumulated parameters are the request body; a call with no
/// parameters posts `{}`. Awaiting consumes the builder and dispatches
/// exactly once; clone it for independent re-dispatch.
#[derive(Debug, Clone)]
pub struct ApiBuilder {
    client: HivebaseClient,
    name: String,
    params: Map<String, Value>,
    headers: Vec<(String, String)>,
}

impl ApiBuilder {
    /// Set one parameter; re-setting a key overwrites it.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Merge a batch of parameters.
    pub fn params<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in entries {
            self.params.insert(key.into(), value.into());
        }
        self
    }

    /// Add one per-call header; applied after the client's auth headers, so
    /// it wins on conflict.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a batch of per-call headers.
    pub fn headers<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in entries {
            self.headers.push((name.into(), value.into()));
        }
        self
    }

    /// Dispatch the call. Equivalent to awaiting the builder directly.
    pub async fn execute(self) -> Result<Value> {
        let path = protocol::api_path(&self.name);
        let mut spec = RequestSpec::post().json(&Value::Object(self.params))?;
        for (name, value) in self.headers {
            spec = spec.header(name, value);
        }
        self.client.send(&path, spec).await
    }
}

impl IntoFuture for ApiBuilder {
    type Output = Result<Value>;
    type IntoFuture = BoxFuture<'static, Result<Value>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_call_posts_param_object() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/sendSms")
            .match_body(Matcher::Json(json!({"to": "+1555", "template": "welcome"})))
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        let client = HivebaseClient::new(server.url(), "k");
        client
            .api()
            .call("sendSms")
            .param("to", "+1555")
            .params([("template", "welcome")])
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_call_posts_empty_object() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/ping")
            .match_body(Matcher::Json(json!({})))
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        let client = HivebaseClient::new(server.url(), "k");
        client.call("ping").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_per_call_headers_attached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/echo")
            .match_header("x-trace-id", "abc")
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        let client = HivebaseClient::new(server.url(), "k");
        client
            .call("echo")
            .header("x-trace-id", "abc")
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[test]
    fn test_param_overwrites() {
        let client = HivebaseClient::new("http://localhost:8080", "k");
        let builder = client.call("x").param("a", 1).param("a", 2);
        assert_eq!(builder.params.get("a"), Some(&json!(2)));
    }
}
