//! REST API seam for the auth and editor-request endpoints.
//!
//! `AuthApi` is the boundary the provider talks to; `HttpAuthApi` is the
//! reqwest implementation. Cookies set by the server are kept in the
//! client's cookie store and replayed on every later call.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become `ApiError::Status` carrying the server's
//! `{"error": "..."}` message when present. Callers (the provider) turn
//! these into `ActionResult` failures; nothing here panics.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde_json::Value;

use super::error::ApiError;
use super::types::{LoginRequest, RegisterRequest, User};

pub const ME_ENDPOINT: &str = "/api/auth/me";
pub const LOGIN_ENDPOINT: &str = "/api/auth/login";
pub const REGISTER_ENDPOINT: &str = "/api/auth/register";
pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout";
pub const REQUEST_EDITOR_ENDPOINT: &str = "/api/users/request-editor";
pub const EDITOR_REQUESTS_ENDPOINT: &str = "/api/users/editor-requests";

/// What an admin can do with a pending editor request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorDecision {
    Approve,
    Reject,
}

impl EditorDecision {
    fn path_segment(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

fn editor_decision_endpoint(user_id: &str, decision: EditorDecision) -> String {
    format!(
        "{EDITOR_REQUESTS_ENDPOINT}/{}/{}",
        urlencoding::encode(user_id),
        decision.path_segment()
    )
}

/// Pull the server-provided message out of an error body shaped like `{"error": "..."}`.
fn error_message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("error")?.as_str().map(str::to_owned)
}

/// Decode a success body. Empty bodies become `null`; non-JSON text is kept as a string.
fn parse_success_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_owned()))
}

// =============================================================================
// TRAIT
// =============================================================================

/// One method per endpoint. Implementations perform exactly one request per call.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `GET /api/auth/me`
    async fn current_user(&self) -> Result<User, ApiError>;

    /// `POST /api/auth/login`, returning the raw `{user, token?}` body.
    async fn login(&self, email: &str, password: &str) -> Result<Value, ApiError>;

    /// `POST /api/auth/register`, returning the raw `{user, token?}` body.
    async fn register(&self, username: &str, email: &str, password: &str) -> Result<Value, ApiError>;

    /// `POST /api/auth/logout`
    async fn logout(&self) -> Result<(), ApiError>;

    /// `POST /api/users/request-editor`
    async fn request_editor(&self) -> Result<Value, ApiError>;

    /// `GET /api/users/editor-requests`
    async fn editor_requests(&self) -> Result<Value, ApiError>;

    /// `POST /api/users/editor-requests/{user_id}/{approve|reject}`
    async fn decide_editor_request(&self, user_id: &str, decision: EditorDecision) -> Result<Value, ApiError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpAuthApi {
    http: reqwest::Client,
    base_url: String,
    bearer: Option<String>,
}

impl HttpAuthApi {
    /// Build a client rooted at `base_url` (scheme + host, trailing `/` ignored).
    ///
    /// # Errors
    ///
    /// Returns `InvalidBaseUrl` if the URL does not parse, or `HttpClientBuild`
    /// if reqwest cannot construct the client.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let parsed = reqwest::Url::parse(&base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url));
        }
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url, bearer: None })
    }

    /// Attach `Authorization: Bearer <token>` to every request when a token is given.
    #[must_use]
    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer = token.filter(|t| !t.is_empty());
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let request = match &self.bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await.map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;

        if !status.is_success() {
            let message = error_message_from_body(&text);
            tracing::debug!(status = status.as_u16(), server_message = message.as_deref(), "auth api error response");
            return Err(ApiError::Status { status: status.as_u16(), message });
        }

        Ok(parse_success_body(&text))
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn current_user(&self) -> Result<User, ApiError> {
        let body = self.execute(self.http.get(self.url(ME_ENDPOINT))).await?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn login(&self, email: &str, password: &str) -> Result<Value, ApiError> {
        let payload = LoginRequest { email, password };
        self.execute(self.http.post(self.url(LOGIN_ENDPOINT)).json(&payload))
            .await
    }

    async fn register(&self, username: &str, email: &str, password: &str) -> Result<Value, ApiError> {
        let payload = RegisterRequest { username, email, password };
        self.execute(self.http.post(self.url(REGISTER_ENDPOINT)).json(&payload))
            .await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.execute(self.http.post(self.url(LOGOUT_ENDPOINT)))
            .await
            .map(|_| ())
    }

    async fn request_editor(&self) -> Result<Value, ApiError> {
        self.execute(self.http.post(self.url(REQUEST_EDITOR_ENDPOINT)))
            .await
    }

    async fn editor_requests(&self) -> Result<Value, ApiError> {
        self.execute(self.http.get(self.url(EDITOR_REQUESTS_ENDPOINT)))
            .await
    }

    async fn decide_editor_request(&self, user_id: &str, decision: EditorDecision) -> Result<Value, ApiError> {
        let url = self.url(&editor_decision_endpoint(user_id, decision));
        self.execute(self.http.post(url)).await
    }
}
