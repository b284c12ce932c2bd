//! Core data types for queries and requests.
//!
//! The central type is [`FilterDocument`], the nested structure a
//! [`FilterBuilder`](crate::db::FilterBuilder) accumulates and the invoke
//! endpoint consumes. It is pure data: builders populate it, the transport
//! serializes it, nothing here performs I/O.
//!
//! # Wire shape
//!
//! A document serializes to a single JSON object. Plain filters flatten into
//! the top level as `field -> { operator -> value }`; the reserved keys are
//! only present when populated:
//!
//! ```json
//! {
//!   "age": { "gte": 18, "lte": 65 },
//!   "status": { "eq": "active" },
//!   "or": [ { "role": { "eq": "admin" } } ],
//!   "order_by": [ { "field": "age", "direction": "desc" } ],
//!   "current": 2,
//!   "pageSize": 20
//! }
//! ```
//!
//! Entry order in `or` and `order_by` is preserved and is meaningful to the
//! server; the flattened field map is sorted by field name.

use bytes::Bytes;
use http::Method;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{HivebaseError, Result};

/// Canonical sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

/// One entry in a document's `order_by` sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderEntry {
    /// Field to sort on.
    pub field: String,
    /// Resolved sort direction.
    pub direction: Direction,
}

/// How a caller names a sort direction in [`order`](crate::db::FilterBuilder::order).
///
/// Three source shapes are accepted and resolved to a canonical [`Direction`]
/// at the call site:
///
/// | Shape | Conversion | Resolution |
/// |-------|------------|------------|
/// | plain string | `From<&str>` / `From<String>` | case-insensitive; `"desc"` descends, anything else ascends |
/// | ascending flag | `From<bool>` | `true` → asc, `false` → desc |
/// | direction field | [`OrderSpec::Direction`] | same as plain string |
#[derive(Debug, Clone)]
pub enum OrderSpec {
    /// A bare direction string (`"asc"` / `"desc"`, any case).
    Plain(String),
    /// Flag form: `true` sorts ascending, `false` descending.
    Ascending(bool),
    /// Explicit direction-field form, string handled like [`OrderSpec::Plain`].
    Direction(String),
}

impl OrderSpec {
    /// Resolve this spec to a canonical direction.
    pub fn resolve(&self) -> Direction {
        match self {
            OrderSpec::Plain(s) | OrderSpec::Direction(s) => {
                if s.eq_ignore_ascii_case("desc") {
                    Direction::Desc
                } else {
                    Direction::Asc
                }
            }
            OrderSpec::Ascending(true) => Direction::Asc,
            OrderSpec::Ascending(false) => Direction::Desc,
        }
    }
}

impl Default for OrderSpec {
    /// An unspecified direction sorts ascending.
    fn default() -> Self {
        OrderSpec::Plain("asc".to_string())
    }
}

impl From<&str> for OrderSpec {
    fn from(s: &str) -> Self {
        OrderSpec::Plain(s.to_string())
    }
}

impl From<String> for OrderSpec {
    fn from(s: String) -> Self {
        OrderSpec::Plain(s)
    }
}

impl From<bool> for OrderSpec {
    fn from(ascending: bool) -> Self {
        OrderSpec::Ascending(ascending)
    }
}

/// The accumulated state of one query: filters, nested `or` groups,
/// ordering, and pagination.
///
/// Populated through [`FilterBuilder`](crate::db::FilterBuilder); obtainable
/// without dispatching via [`build`](crate::db::FilterBuilder::build). An
/// empty document is valid and stands for an unfiltered result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterDocument {
    #[serde(flatten)]
    fields: BTreeMap<String, BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    or: Vec<FilterDocument>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    order_by: Vec<OrderEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current: Option<u64>,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    page_size: Option<u64>,
}

impl FilterDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing has been recorded; the dispatch path omits the
    /// request body entirely for an empty document.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
            && self.or.is_empty()
            && self.order_by.is_empty()
            && self.current.is_none()
            && self.page_size.is_none()
    }

    /// The operator map recorded for `field`, if any.
    pub fn operators(&self, field: &str) -> Option<&BTreeMap<String, Value>> {
        self.fields.get(field)
    }

    /// The nested `or` groups, in insertion order.
    pub fn or_groups(&self) -> &[FilterDocument] {
        &self.or
    }

    /// The ordering entries, in insertion order.
    pub fn order_entries(&self) -> &[OrderEntry] {
        &self.order_by
    }

    /// The pagination pair `(current, pageSize)`, if set.
    pub fn page(&self) -> Option<(u64, u64)> {
        self.current.zip(self.page_size)
    }

    /// Set `operator` for `field`, overwriting any previous value for that
    /// operator. Other operators already recorded for the field are kept, so
    /// ranges compose from separate calls.
    pub(crate) fn set_operator(&mut self, field: String, operator: &str, value: Value) {
        self.fields
            .entry(field)
            .or_default()
            .insert(operator.to_string(), value);
    }

    /// Append a finished sub-document to the `or` sequence.
    pub(crate) fn push_or(&mut self, group: FilterDocument) {
        self.or.push(group);
    }

    /// Append one ordering entry.
    pub(crate) fn push_order(&mut self, field: String, direction: Direction) {
        self.order_by.push(OrderEntry { field, direction });
    }

    /// Set the pagination cursor and page size together.
    pub(crate) fn set_page(&mut self, number: u64, size: u64) {
        self.current = Some(number);
        self.page_size = Some(size);
    }
}

/// One outbound call: method, per-call headers, optional body.
///
/// Ephemeral: constructed once per dispatch and handed to
/// [`HivebaseClient::send`](crate::client::HivebaseClient::send), never
/// reused. Per-call headers are applied *after* the client's baseline,
/// API-key, and bearer headers, so they win on conflict.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// HTTP method.
    pub method: Method,
    /// Caller-supplied headers for this call, applied in order.
    pub headers: Vec<(String, String)>,
    /// Request body; `None` attaches no body at all.
    pub body: Option<Bytes>,
}

impl RequestSpec {
    /// A spec with the given method, no headers, and no body.
    pub fn new(method: Method) -> Self {
        RequestSpec {
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Shorthand for a GET spec.
    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    /// Shorthand for a POST spec.
    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    /// Add one per-call header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Serialize `value` as the JSON body.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self> {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| HivebaseError::Validation(format!("unserializable body: {}", e)))?;
        self.body = Some(Bytes::from(bytes));
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document_serializes_to_empty_object() {
        let doc = FilterDocument::new();
        assert!(doc.is_empty());
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({}));
    }

    #[test]
    fn test_operators_accumulate_per_field() {
        let mut doc = FilterDocument::new();
        doc.set_operator("age".into(), "gte", json!(18));
        doc.set_operator("age".into(), "lte", json!(65));
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"age": {"gte": 18, "lte": 65}})
        );
    }

    #[test]
    fn test_same_operator_overwrites() {
        let mut doc = FilterDocument::new();
        doc.set_operator("age".into(), "eq", json!(1));
        doc.set_operator("age".into(), "eq", json!(2));
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({"age": {"eq": 2}}));
    }

    #[test]
    fn test_reserved_keys_omitted_until_set() {
        let mut doc = FilterDocument::new();
        doc.set_operator("x".into(), "eq", json!(1));
        let value = serde_json::to_value(&doc).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("or"));
        assert!(!obj.contains_key("order_by"));
        assert!(!obj.contains_key("current"));
        assert!(!obj.contains_key("pageSize"));
    }

    #[test]
    fn test_page_serializes_both_keys() {
        let mut doc = FilterDocument::new();
        doc.set_page(2, 20);
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"current": 2, "pageSize": 20})
        );
        assert_eq!(doc.page(), Some((2, 20)));
    }

    #[test]
    fn test_order_entries_keep_insertion_order() {
        let mut doc = FilterDocument::new();
        doc.push_order("b".into(), Direction::Desc);
        doc.push_order("a".into(), Direction::Asc);
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"order_by": [
                {"field": "b", "direction": "desc"},
                {"field": "a", "direction": "asc"}
            ]})
        );
    }

    #[test]
    fn test_order_spec_resolution() {
        assert_eq!(OrderSpec::from("DESC").resolve(), Direction::Desc);
        assert_eq!(OrderSpec::from("asc").resolve(), Direction::Asc);
        assert_eq!(OrderSpec::from(false).resolve(), Direction::Desc);
        assert_eq!(OrderSpec::from(true).resolve(), Direction::Asc);
        assert_eq!(
            OrderSpec::Direction("Desc".to_string()).resolve(),
            Direction::Desc
        );
        assert_eq!(OrderSpec::default().resolve(), Direction::Asc);
    }

    #[test]
    fn test_unrecognized_direction_sorts_ascending() {
        assert_eq!(OrderSpec::from("sideways").resolve(), Direction::Asc);
    }

    #[test]
    fn test_request_spec_json_body() {
        let spec = RequestSpec::post().json(&json!({"a": 1})).unwrap();
        assert_eq!(spec.body.as_deref(), Some(br#"{"a":1}"#.as_slice()));
    }
}
