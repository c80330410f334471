//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Snapshots of this struct are what UI consumers read and subscribe to.
//! Role flags are derived from `user` on every call, never stored.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{Role, User};

/// Coarse lifecycle of the session as seen by the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// The initial session check has not resolved yet.
    Loading,
    Authenticated,
    Unauthenticated,
}

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// State held while the initial session check is in flight.
    #[must_use]
    pub fn loading() -> Self {
        Self { user: None, loading: true }
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    #[must_use]
    pub fn is_editor(&self) -> bool {
        self.role() == Some(Role::Editor)
    }

    #[must_use]
    pub fn is_viewer(&self) -> bool {
        self.role() == Some(Role::Viewer)
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Loading
        } else if self.user.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Unauthenticated
        }
    }
}
