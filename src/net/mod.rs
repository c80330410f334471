//! Networking modules for the auth REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls, `error` is the transport error type, and
//! `types` defines the shared wire schema.

pub mod api;
pub mod error;
pub mod types;
