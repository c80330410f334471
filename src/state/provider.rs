//! The session-state provider: one owned handle over the current session,
//! the remote auth API, and the fallback token store.
//!
//! DESIGN
//! ======
//! The provider is built once at the composition root and passed to
//! whatever needs it; there is no global. Clones share the same state.
//! State lives in a `watch` channel so consumers can either take a
//! snapshot or subscribe to changes. No lock is held across an await.
//!
//! Every action performs exactly one API call and never retries.
//! Concurrent calls are not serialized: the last response to arrive wins.
//!
//! CREDENTIAL POLICY
//! =================
//! The session cookie (held by the HTTP client) is the primary credential.
//! A token returned by login/register is also written to the token store
//! as a fallback; logout removes it. Token store failures are logged and
//! never change an action's outcome.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::auth::{AuthState, SessionPhase};
use crate::net::api::{AuthApi, EditorDecision};
use crate::net::error::ApiError;
use crate::net::types::{ActionResult, AuthResponse, Role, User};
use crate::store::token::TokenStore;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const REQUEST_FAILED: &str = "Request failed";
pub const FETCH_REQUESTS_FAILED: &str = "Failed to fetch requests";
pub const APPROVE_FAILED: &str = "Approve failed";
pub const REJECT_FAILED: &str = "Reject failed";
/// A 2xx login/register body that carried no usable `user`.
pub const UNEXPECTED_RESPONSE: &str = "Unexpected response from server";

/// Normalize an API error into a failure result, preferring the server's message.
fn failure(operation: &'static str, error: &ApiError, default: &str) -> ActionResult {
    tracing::warn!(operation, error = %error, status = error.status(), "auth action failed");
    ActionResult::failure(error.message().unwrap_or(default))
}

/// Shared handle to the session state and the actions that mutate it.
#[derive(Clone)]
pub struct AuthProvider {
    api: Arc<dyn AuthApi>,
    tokens: Arc<dyn TokenStore>,
    state: Arc<watch::Sender<AuthState>>,
}

impl AuthProvider {
    fn new(api: Arc<dyn AuthApi>, tokens: Arc<dyn TokenStore>) -> Self {
        let (state, _) = watch::channel(AuthState::loading());
        Self { api, tokens, state: Arc::new(state) }
    }

    /// Create the provider and start the initial session check on the current
    /// tokio runtime. `loading` stays true until the returned task completes.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(api: Arc<dyn AuthApi>, tokens: Arc<dyn TokenStore>) -> (Self, JoinHandle<()>) {
        let provider = Self::new(api, tokens);
        let checker = provider.clone();
        let handle = tokio::spawn(async move {
            checker.check_session().await;
        });
        (provider, handle)
    }

    /// Create the provider and wait for the initial session check to resolve.
    pub async fn connect(api: Arc<dyn AuthApi>, tokens: Arc<dyn TokenStore>) -> Self {
        let provider = Self::new(api, tokens);
        provider.check_session().await;
        provider
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change from now on.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    #[must_use]
    pub fn is_editor(&self) -> bool {
        self.state.borrow().is_editor()
    }

    #[must_use]
    pub fn is_viewer(&self) -> bool {
        self.state.borrow().is_viewer()
    }

    // =========================================================================
    // SESSION ACTIONS
    // =========================================================================

    /// Ask the server who we are. Any failure clears the session.
    /// Clears `loading` either way; never sets it.
    pub async fn check_session(&self) -> Option<User> {
        let user = match self.api.current_user().await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, role = %user.role, "session check succeeded");
                Some(user)
            }
            Err(e) => {
                tracing::debug!(error = %e, "session check found no active session");
                None
            }
        };
        self.state.send_modify(|state| {
            state.user.clone_from(&user);
            state.loading = false;
        });
        user
    }

    pub async fn login(&self, email: &str, password: &str) -> ActionResult {
        match self.api.login(email, password).await {
            Ok(body) => self.accept_auth_response("login", body),
            Err(e) => failure("login", &e, LOGIN_FAILED),
        }
    }

    /// Register a new account. The server assigns the role; `role` is only
    /// recorded in the log.
    pub async fn register(&self, username: &str, email: &str, password: &str, role: Role) -> ActionResult {
        tracing::debug!(%role, "requested role is assigned server-side and not sent");
        match self.api.register(username, email, password).await {
            Ok(body) => self.accept_auth_response("register", body),
            Err(e) => failure("register", &e, REGISTRATION_FAILED),
        }
    }

    /// End the session. Local state and the fallback token are cleared even
    /// if the server cannot be reached.
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            tracing::error!(error = %e, "logout request failed; clearing local session anyway");
        }
        self.state.send_modify(|state| state.user = None);
        if let Err(e) = self.tokens.remove() {
            tracing::warn!(error = %e, "failed to remove fallback token");
        }
    }

    // =========================================================================
    // EDITOR REQUEST ACTIONS
    // =========================================================================

    /// Viewer: ask to be promoted to Editor.
    pub async fn request_editor_role(&self) -> ActionResult {
        match self.api.request_editor().await {
            Ok(data) => ActionResult::success(data),
            Err(e) => failure("request_editor_role", &e, REQUEST_FAILED),
        }
    }

    /// Admin: list pending editor requests.
    pub async fn list_editor_requests(&self) -> ActionResult {
        match self.api.editor_requests().await {
            Ok(data) => ActionResult::success(data),
            Err(e) => failure("list_editor_requests", &e, FETCH_REQUESTS_FAILED),
        }
    }

    pub async fn approve_editor_request(&self, user_id: &str) -> ActionResult {
        match self.api.decide_editor_request(user_id, EditorDecision::Approve).await {
            Ok(data) => {
                tracing::info!(%user_id, "editor request approved");
                ActionResult::success(data)
            }
            Err(e) => failure("approve_editor_request", &e, APPROVE_FAILED),
        }
    }

    pub async fn reject_editor_request(&self, user_id: &str) -> ActionResult {
        match self.api.decide_editor_request(user_id, EditorDecision::Reject).await {
            Ok(data) => {
                tracing::info!(%user_id, "editor request rejected");
                ActionResult::success(data)
            }
            Err(e) => failure("reject_editor_request", &e, REJECT_FAILED),
        }
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    /// Install the user from a login/register body and persist any issued token.
    /// A body without a decodable `user` is reported as `UNEXPECTED_RESPONSE`
    /// and leaves the session alone. Only one request is made per action, so
    /// any cookie the server set is left for the next session check to judge.
    fn accept_auth_response(&self, operation: &'static str, body: Value) -> ActionResult {
        let response = match AuthResponse::deserialize(&body) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(operation, error = %e, "auth response missing a valid user");
                return ActionResult::failure(UNEXPECTED_RESPONSE);
            }
        };

        tracing::info!(operation, user_id = %response.user.id, role = %response.user.role, "session established");
        self.state.send_modify(|state| state.user = Some(response.user));

        if let Some(token) = response.token.filter(|t| !t.is_empty()) {
            if let Err(e) = self.tokens.save(&token) {
                tracing::warn!(operation, error = %e, "failed to persist fallback token");
            }
        }

        ActionResult::success(body)
    }
}
