//! Client configuration.

/// Configuration for a [`HivebaseClient`](crate::client::HivebaseClient).
///
/// All fields are public so callers can use struct-update syntax:
///
/// ```
/// use hivebase::ClientConfig;
///
/// let config = ClientConfig {
///     base_url: "https://app.hivebase.dev".to_string(),
///     api_key: "pk_live_123".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend; endpoint paths are appended verbatim, so a
    /// path prefix (e.g. `https://host/v1`) is preserved.
    pub base_url: String,
    /// Static project API key, sent on every request.
    pub api_key: String,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: "http://localhost:8080".to_string(),
            api_key: String::new(),
            request_timeout_ms: 30_000,
        }
    }
}
