//! Endpoint paths and header names for the Hivebase wire protocol.
//!
//! Everything here is a plain constant or a small path-building helper; the
//! actual request assembly lives in [`crate::client`].

use url::form_urlencoded;

/// Well-known endpoint paths.
pub mod paths {
    /// Email + password login.
    pub const AUTH_LOGIN: &str = "/auth/login";
    /// Identifier + password login (username, phone, or email).
    pub const PASSWD_LOGIN: &str = "/login/passwd";
    /// Account registration.
    pub const REGISTER: &str = "/login/register";
    /// Profile of the authenticated user.
    pub const USER_INFO: &str = "/getUserInfo";
    /// Session termination.
    pub const LOGOUT: &str = "/logout";
    /// Structured data queries.
    pub const DATA_INVOKE: &str = "/api/data/invoke";
}

/// Header names.
pub mod headers {
    /// Static project API key, attached to every request.
    pub const API_KEY: &str = "x-api-key";
}

/// Build the data-invoke path for one query dispatch.
///
/// The table and method names are percent-encoded, so table names containing
/// reserved characters survive the query string intact.
///
/// # Examples
///
/// ```
/// use hivebase::protocol::invoke_path;
///
/// assert_eq!(
///     invoke_path("users", "list"),
///     "/api/data/invoke?table=users&method=list"
/// );
/// ```
pub fn invoke_path(table: &str, method: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("table", table)
        .append_pair("method", method)
        .finish();
    format!("{}?{}", paths::DATA_INVOKE, query)
}

/// Build the path for an ad-hoc named API call.
pub fn api_path(name: &str) -> String {
    format!("/api/{}", name)
}
