//! Structured data queries.
//!
//! The query surface is a three-step chain:
//!
//! 1. [`Database::from`] binds a table name.
//! 2. [`QueryBuilder::list`] picks the query method and yields a
//!    [`FilterBuilder`].
//! 3. Chained filter calls accumulate the document; awaiting the builder
//!    dispatches it.
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
//! let adults = client
//!     .db()
//!     .from("users")
//!     .list()
//!     .gte("age", 18)
//!     .order("age", "desc")
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod filter;

pub use filter::FilterBuilder;

use crate::client::HivebaseClient;

/// Query method invoked on a table.
///
/// Only listing is served today; the enum exists so further methods extend
/// [`QueryBuilder`] without touching [`FilterBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMethod {
    /// Filtered listing of a table's rows.
    List,
}

impl QueryMethod {
    /// The method name as it appears in the invoke query string.
    pub fn as_str(self) -> &'static str {
        match self {
            QueryMethod::List => "list",
        }
    }
}

/// Entry point to the query surface, obtained from
/// [`HivebaseClient::db`](crate::client::HivebaseClient::db).
#[derive(Debug, Clone)]
pub struct Database {
    client: HivebaseClient,
}

impl Database {
    pub(crate) fn new(client: HivebaseClient) -> Self {
        Database { client }
    }

    /// Target a table by name.
    pub fn from(&self, table: impl Into<String>) -> QueryBuilder {
        QueryBuilder {
            client: self.client.clone(),
            table: table.into(),
        }
    }
}

/// A query scoped to one table, awaiting a method choice.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    client: HivebaseClient,
    table: String,
}

impl QueryBuilder {
    /// Query the table's rows; yields the filter chain.
    pub fn list(self) -> FilterBuilder {
        FilterBuilder::new(self.client, self.table, QueryMethod::List)
    }

    /// The bound table name.
    pub fn table(&self) -> &str {
        &self.table
    }
}
