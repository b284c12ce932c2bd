//! The fluent filter chain and its deferred dispatch.
//!
//! A [`FilterBuilder`] accumulates one
//! [`FilterDocument`](crate::types::FilterDocument) across chained calls, in
//! any order, and dispatches it as `POST /api/data/invoke` when awaited. The
//! builder itself is the pending computation: it implements [`IntoFuture`],
//! so there is no terminal `execute()` step to remember, though one exists
//! for callers who prefer it spelled out.
//!
//! Awaiting consumes the builder, so a given instance dispatches at most
//! once. There is no result cache behind that guarantee: clone the builder
//! and await both halves and two independent requests go out.
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
//! let rows = client
//!     .db()
//!     .from("users")
//!     .list()
//!     .eq("status", "active")
//!     .gte("age", 18)
//!     .or(|b| b.eq("role", "admin").eq("verified", true))
//!     .order("created_at", "desc")
//!     .page(1, 50)
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::client::HivebaseClient;
use crate::db::QueryMethod;
use crate::error::Result;
use crate::protocol;
use crate::types::{FilterDocument, OrderSpec, RequestSpec};
use futures::future::BoxFuture;
use serde_json::Value;
use std::future::IntoFuture;

/// Fluent, chainable query filter bound to one table and method.
///
/// Every chain call consumes and returns the builder, so chains read
/// left-to-right in any order. Re-applying an operator to a field it was
/// already applied to overwrites the earlier value; distinct operators on
/// the same field accumulate, which is how ranges are expressed:
///
/// ```no_run
/// # use hivebase::HivebaseClient;
/// # #[tokio::main]
/// # async fn main() -> hivebase::Result<()> {
/// # let client = HivebaseClient::new("http://localhost:8080", "dev-key");
/// let in_range = client
///     .db()
///     .from("orders")
///     .list()
///     .gte("total", 10)
///     .lte("total", 100)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FilterBuilder {
    client: HivebaseClient,
    table: String,
    method: QueryMethod,
    document: FilterDocument,
}

impl FilterBuilder {
    pub(crate) fn new(client: HivebaseClient, table: String, method: QueryMethod) -> Self {
        FilterBuilder {
            client,
            table,
            method,
            document: FilterDocument::new(),
        }
    }

    fn set(mut self, field: impl Into<String>, operator: &str, value: Value) -> Self {
        self.document.set_operator(field.into(), operator, value);
        self
    }

    /// `field = value`
    pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, "eq", value.into())
    }

    /// `field != value`
    pub fn neq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, "neq", value.into())
    }

    /// `field > value`
    pub fn gt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, "gt", value.into())
    }

    /// `field >= value`
    pub fn gte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, "gte", value.into())
    }

    /// `field < value`
    pub fn lt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, "lt", value.into())
    }

    /// `field <= value`
    pub fn lte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, "lte", value.into())
    }

    /// `field` is one of `values`.
    ///
    /// Named `in_` because `in` is a Rust keyword.
    pub fn in_<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let list = Value::Array(values.into_iter().map(Into::into).collect());
        self.set(field, "in", list)
    }

    /// `lo <= field <= hi`, sent as a two-element range.
    pub fn between(
        self,
        field: impl Into<String>,
        lo: impl Into<Value>,
        hi: impl Into<Value>,
    ) -> Self {
        self.set(field, "between", Value::Array(vec![lo.into(), hi.into()]))
    }

    /// Add a disjunction group.
    ///
    /// `build` receives a fresh child builder with its own empty document;
    /// whatever the child accumulates is appended as one entry to this
    /// builder's `or` list. The child's calls never touch the parent's
    /// top-level filters, and calling `or` again appends another entry
    /// rather than merging.
    pub fn or<F>(mut self, build: F) -> Self
    where
        F: FnOnce(FilterBuilder) -> FilterBuilder,
    {
        let child = FilterBuilder::new(self.client.clone(), self.table.clone(), self.method);
        let child = build(child);
        self.document.push_or(child.build());
        self
    }

    /// Set the pagination cursor and page size together.
    pub fn page(mut self, number: u64, size: u64) -> Self {
        self.document.set_page(number, size);
        self
    }

    /// Append one ordering entry; earlier entries take precedence server-side.
    ///
    /// The direction accepts a bare string, an ascending flag, or an
    /// explicit [`OrderSpec`]:
    ///
    /// ```no_run
    /// # use hivebase::{HivebaseClient, OrderSpec};
    /// # let client = HivebaseClient::new("http://localhost:8080", "dev-key");
    /// let b = client.db().from("users").list();
    /// let b = b.order("age", "desc");
    /// let b = b.order("name", true); // ascending
    /// let b = b.order("id", OrderSpec::Direction("DESC".to_string()));
    /// ```
    pub fn order(mut self, field: impl Into<String>, spec: impl Into<OrderSpec>) -> Self {
        let direction = spec.into().resolve();
        self.document.push_order(field.into(), direction);
        self
    }

    /// Accepted for compatibility with existing callers; the list method
    /// pages with [`page`](FilterBuilder::page) and a limit is not part of
    /// the filter document, so this has no effect on the built query.
    pub fn limit(self, count: u64) -> Self {
        let _ = count;
        self
    }

    /// The document accumulated so far, without dispatching.
    pub fn build(&self) -> FilterDocument {
        self.document.clone()
    }

    /// Dispatch the query. Equivalent to awaiting the builder directly.
    ///
    /// An empty document sends no request body at all; anything else is
    /// serialized as the JSON body.
    pub async fn execute(self) -> Result<Value> {
        let path = protocol::invoke_path(&self.table, self.method.as_str());
        let mut spec = RequestSpec::post();
        if !self.document.is_empty() {
            spec = spec.json(&self.document)?;
        }
        self.client.send(&path, spec).await
    }
}

impl IntoFuture for FilterBuilder {
    type Output = Result<Value>;
    type IntoFuture = BoxFuture<'static, Result<Value>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}
