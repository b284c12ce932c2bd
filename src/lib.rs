#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Hivebase: client SDK
//!
//! This crate turns method calls into authenticated HTTP requests against a
//! Hivebase backend, with fluent builders for structured queries and generic
//! API invocations.
//!
//! ## How a query flows
//!
//! 1. [`HivebaseClient::db`] → [`Database::from`] binds a table.
//! 2. [`QueryBuilder::list`] yields a [`FilterBuilder`].
//! 3. Chained calls (`eq`, `gte`, `or`, `order`, `page`, …) accumulate a
//!    [`FilterDocument`]; chaining order is free, each call returns the
//!    builder.
//! 4. Awaiting the builder serializes the document and performs exactly one
//!    `POST /api/data/invoke` round-trip; the resolved value is the parsed
//!    JSON response.
//!
//! The same deferred-execution contract backs [`ApiBuilder`] for ad-hoc
//! calls to `POST /api/<name>`.
//!
//! ## Authentication
//!
//! [`Auth::login`] (or [`Auth::login_with_password`]) adopts the returned
//! token as the session; from then on every request carries
//! `Authorization: Bearer <token>` next to the static `x-api-key` header,
//! until [`Auth::logout`] clears it. The token round-trips through a
//! [`TokenStore`] so hosts with durable key-value storage keep sessions
//! across restarts.
//!
//! ## Module Structure
//!
//! - **[client]** - HTTP transport, configuration, session state
//! - **[db]** - Query builders and the filter chain
//! - **[api]** - Named-API invocation builder
//! - **[auth]** - Login, registration, profile, logout
//! - **[types]** - The filter document model and request spec
//! - **[error]** - Error types and result handling
//! - **[protocol]** - Endpoint paths and header names

pub mod api;
pub mod auth;
pub mod client;
pub mod db;
pub mod error;
pub mod protocol;
pub mod types;

pub use api::{Api, ApiBuilder};
pub use auth::Auth;
pub use client::{
    ClientConfig, HivebaseClient, MemoryTokenStore, Session, TokenStore, SESSION_TOKEN_KEY,
};
pub use db::{Database, FilterBuilder, QueryBuilder, QueryMethod};
pub use error::{HivebaseError, Result};
pub use types::{Direction, FilterDocument, OrderEntry, OrderSpec, RequestSpec};
