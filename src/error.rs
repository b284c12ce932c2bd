//! Error types and result handling.
//!
//! All fallible operations in this crate return [`Result`], which wraps
//! [`HivebaseError`]. The taxonomy is small:
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`HivebaseError::Validation`] | caller input is rejected before any network I/O |
//! | [`HivebaseError::Network`] | the transport cannot reach the host or the connection drops |
//! | [`HivebaseError::Decode`] | a response body is received but is not valid JSON |
//!
//! HTTP status codes are not part of the taxonomy: a response
//! that reaches the client and parses as JSON is returned as a successful
//! value regardless of status. Success and failure semantics live in the
//! response document's `success` field convention, which is the caller's to
//! interpret.

use thiserror::Error;

/// Errors that can occur when talking to a Hivebase backend.
#[derive(Error, Debug)]
pub enum HivebaseError {
    /// Caller input was rejected before any request was issued.
    ///
    /// Raised synchronously, e.g. for an empty login identifier or password,
    /// or a caller-supplied header name that is not a legal HTTP header.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The underlying transport could not complete the round-trip.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was received but is not valid JSON.
    ///
    /// The request itself is considered delivered; only the body failed to
    /// parse.
    #[error("response is not valid JSON: {0}")]
    Decode(String),
}

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, HivebaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HivebaseError::Validation("password is required".to_string());
        assert_eq!(err.to_string(), "validation failed: password is required");
    }

    #[test]
    fn test_network_error_display() {
        let err = HivebaseError::Network("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
