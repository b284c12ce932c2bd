//! Session and account operations.
//!
//! Two login shapes are served, matching the backend's two credential
//! endpoints:
//!
//! | Method | Endpoint | Body |
//! |--------|----------|------|
//! | [`Auth::login`] | `POST /auth/login` | `{"email", "password"}` |
//! | [`Auth::login_with_password`] | `POST /login/passwd` | `{"phone", "password"}` |
//!
//! In the second shape the `phone` key carries whichever identifier the user
//! typed (username, phone number, or email); the backend disambiguates.
//!
//! A login response with a truthy `success` field and a string `data` field
//! establishes the session: `data` becomes the bearer token for every
//! subsequent request until [`Auth::logout`] or an explicit
//! [`set_token(None)`](crate::client::HivebaseClient::set_token). Responses
//! are otherwise returned to the caller untouched: a rejected login is an
//! `Ok` value whose `success` is false, not an error.

use crate::client::HivebaseClient;
use crate::error::{HivebaseError, Result};
use crate::protocol::paths;
use crate::types::RequestSpec;
use serde_json::{json, Value};

/// The auth surface, obtained from
/// [`HivebaseClient::auth`](crate::client::HivebaseClient::auth).
#[derive(Debug, Clone)]
pub struct Auth {
    client: HivebaseClient,
}

impl Auth {
    pub(crate) fn new(client: HivebaseClient) -> Self {
        Auth { client }
    }

    /// Log in with email and password.
    ///
    /// Both fields are validated non-empty before any request is issued.
    /// On success the returned token is adopted as the session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<Value> {
        require("email", email)?;
        require("password", password)?;

        let body = json!({ "email": email, "password": password });
        let response = self
            .client
            .send(paths::AUTH_LOGIN, RequestSpec::post().json(&body)?)
            .await?;
        self.adopt_session(&response);
        Ok(response)
    }

    /// Log in with a free-form identifier (username, phone, or email) and
    /// password, via the password-login endpoint.
    pub async fn login_with_password(&self, identifier: &str, password: &str) -> Result<Value> {
        require("identifier", identifier)?;
        require("password", password)?;

        // The wire key is `phone` regardless of what the identifier is.
        let body = json!({ "phone": identifier, "password": password });
        let response = self
            .client
            .send(paths::PASSWD_LOGIN, RequestSpec::post().json(&body)?)
            .await?;
        self.adopt_session(&response);
        Ok(response)
    }

    /// Register an account. The body is passed through untouched and so is
    /// the response; registration does not establish a session.
    pub async fn register(&self, body: &Value) -> Result<Value> {
        self.client
            .send(paths::REGISTER, RequestSpec::post().json(body)?)
            .await
    }

    /// Fetch the authenticated user's profile.
    pub async fn user_info(&self) -> Result<Value> {
        self.client.send(paths::USER_INFO, RequestSpec::get()).await
    }

    /// End the session.
    ///
    /// The token is cleared from memory and persisted storage *before* the
    /// logout request goes out, so the request itself is already
    /// unauthenticated and a transport failure still leaves the client
    /// logged out locally.
    pub async fn logout(&self) -> Result<Value> {
        self.client.set_token(None);
        self.client.send(paths::LOGOUT, RequestSpec::get()).await
    }

    fn adopt_session(&self, response: &Value) {
        if !is_truthy(response.get("success")) {
            return;
        }
        if let Some(token) = response.get("data").and_then(Value::as_str) {
            self.client.set_token(Some(token));
            tracing::debug!("session established");
        }
    }
}

fn require(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(HivebaseError::Validation(format!("{} is required", name)));
    }
    Ok(())
}

/// JSON truthiness: absent, `null`, `false`, `0`, and `""` are falsy,
/// everything else is truthy.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_login_validates_before_network() {
        // Unroutable host: reaching the network would fail differently.
        let client = HivebaseClient::new("http://127.0.0.1:1", "k");
        let err = client.auth().login("", "pw").await.unwrap_err();
        assert!(matches!(err, HivebaseError::Validation(_)));
        let err = client.auth().login("a@b.c", "").await.unwrap_err();
        assert!(matches!(err, HivebaseError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login_adopts_token_on_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/login")
            .match_body(Matcher::Json(json!({"email": "a@b.c", "password": "pw"})))
            .with_body(r#"{"success": true, "data": "tok123"}"#)
            .create_async()
            .await;

        let client = HivebaseClient::new(server.url(), "k");
        let response = client.auth().login("a@b.c", "pw").await.unwrap();
        assert_eq!(response["data"], json!("tok123"));
        assert_eq!(client.token(), Some("tok123".to_string()));
    }

    #[tokio::test]
    async fn test_rejected_login_is_ok_without_session() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_body(r#"{"success": false, "message": "bad credentials"}"#)
            .create_async()
            .await;

        let client = HivebaseClient::new(server.url(), "k");
        let response = client.auth().login("a@b.c", "wrong").await.unwrap();
        assert_eq!(response["success"], json!(false));
        assert_eq!(client.token(), None);
    }

    #[tokio::test]
    async fn test_password_login_uses_phone_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/login/passwd")
            .match_body(Matcher::Json(json!({"phone": "ada", "password": "pw"})))
            .with_body(r#"{"success": true, "data": "tok456"}"#)
            .create_async()
            .await;

        let client = HivebaseClient::new(server.url(), "k");
        client.auth().login_with_password("ada", "pw").await.unwrap();
        assert_eq!(client.token(), Some("tok456".to_string()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_logout_clears_token_before_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/logout")
            .match_header("authorization", Matcher::Missing)
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        let client = HivebaseClient::new(server.url(), "k");
        client.set_token(Some("tok123"));
        client.auth().logout().await.unwrap();
        assert_eq!(client.token(), None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_logout_clears_token_even_when_unreachable() {
        let client = HivebaseClient::new("http://127.0.0.1:1", "k");
        client.set_token(Some("tok123"));
        let err = client.auth().logout().await.unwrap_err();
        assert!(matches!(err, HivebaseError::Network(_)));
        assert_eq!(client.token(), None);
    }

    #[tokio::test]
    async fn test_register_passes_body_through() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/login/register")
            .match_body(Matcher::Json(json!({"email": "a@b.c", "password": "pw"})))
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        let client = HivebaseClient::new(server.url(), "k");
        client
            .auth()
            .register(&json!({"email": "a@b.c", "password": "pw"}))
            .await
            .unwrap();
        assert_eq!(client.token(), None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_user_info_is_get() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/getUserInfo")
            .with_body(r#"{"success": true, "data": {"name": "Ada"}}"#)
            .create_async()
            .await;

        let client = HivebaseClient::new(server.url(), "k");
        let info = client.auth().user_info().await.unwrap();
        assert_eq!(info["data"]["name"], json!("Ada"));
        mock.assert_async().await;
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&Value::Null)));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(is_truthy(Some(&json!(true))));
        assert!(is_truthy(Some(&json!(1))));
        assert!(is_truthy(Some(&json!("yes"))));
        assert!(is_truthy(Some(&json!({}))));
    }
}
