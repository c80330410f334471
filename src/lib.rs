//! Client-side authentication state provider.
//!
//! Tracks the current user session against a remote auth API, exposes
//! login/registration/logout, and the editor-request approval workflow.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use session_client::{AuthProvider, FileTokenStore, HttpAuthApi};
//!
//! # async fn run() -> Result<(), session_client::ApiError> {
//! let api = Arc::new(HttpAuthApi::new("http://localhost:5000")?);
//! let tokens = Arc::new(FileTokenStore::new(".session-client/token.json"));
//! let auth = AuthProvider::connect(api, tokens).await;
//! if !auth.is_authenticated() {
//!     let result = auth.login("a@b.com", "pw").await;
//!     println!("{}", serde_json::to_string(&result).unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod net;
pub mod state;
pub mod store;

pub use config::{ClientConfig, ConfigError};
pub use net::api::{AuthApi, EditorDecision, HttpAuthApi};
pub use net::error::ApiError;
pub use net::types::{ActionResult, AuthResponse, Role, User};
pub use state::auth::{AuthState, SessionPhase};
pub use state::provider::AuthProvider;
pub use store::token::{FileTokenStore, MemoryTokenStore, StoreError, TokenStore};
