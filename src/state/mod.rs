//! Session state and the provider that owns it.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` is the plain snapshot consumers read; `provider` wraps it with
//! the API and token store and exposes the actions.

pub mod auth;
pub mod provider;
