//! HTTP transport, configuration, and session state.
//!
//! This module owns everything that touches the network exactly once per
//! call: one authenticated request out, one parsed JSON value back.
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── transport - HivebaseClient and request dispatch
//! ├── config    - Client configuration
//! └── session   - Session token state and the TokenStore seam
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`HivebaseClient`] | Cloneable client handle; all traffic goes through it |
//! | [`ClientConfig`] | Base URL, API key, timeout |
//! | [`Session`] | In-memory token slot with write-through persistence |
//! | [`TokenStore`] | Host persistence seam for the session token |
//! | [`MemoryTokenStore`] | Default process-lifetime store |
//!
//! # Examples
//!
//! ```
//! use hivebase::{ClientConfig, HivebaseClient};
//!
//! // Default configuration
//! let client = HivebaseClient::new("http://localhost:8080", "dev-key");
//!
//! // Custom configuration
//! let config = ClientConfig {
//!     base_url: "https://app.hivebase.dev".to_string(),
//!     api_key: "pk_live_123".to_string(),
//!     request_timeout_ms: 5_000,
//! };
//! let client = HivebaseClient::with_config(config);
//! ```

mod config;
mod session;
mod transport;

pub use config::ClientConfig;
pub use session::{MemoryTokenStore, Session, TokenStore, SESSION_TOKEN_KEY};
pub use transport::HivebaseClient;
