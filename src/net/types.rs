//! Wire DTOs for the auth and user-management endpoints.
//!
//! DESIGN
//! ======
//! Response bodies are kept as raw `serde_json::Value` inside
//! `ActionResult` so callers see exactly what the server sent; only the
//! `user` portion of auth responses is decoded into a typed `User`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Account role as reported by the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Editor => "Editor",
            Self::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}' (expected Admin, Editor or Viewer)")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Case-insensitive so CLI input like `viewer` is accepted.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            "viewer" => Ok(Self::Viewer),
            _ => Err(ParseRoleError(raw.to_owned())),
        }
    }
}

/// An authenticated user as returned by `/api/auth/me` and inside auth responses.
///
/// The identifier may arrive as `id`, `_id`, or both (documents serialized
/// with virtuals). `id` wins when both are present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserWire")]
pub struct User {
    /// Server-side identifier. Accepted as a string or integer, stored as a string.
    pub id: String,
    /// Display/login name.
    pub username: String,
    /// Account email address.
    pub email: String,
    /// Current role.
    pub role: Role,
}

/// Body of a successful `login`/`register` response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    /// Bearer token echoed by the server, persisted as a fallback credential.
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Uniform outcome of one provider action.
///
/// Serializes as `{"success": true, "data": ...}` or
/// `{"success": false, "error": "..."}`.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionResult {
    Success { data: Value },
    Failure { error: String },
}

impl ActionResult {
    #[must_use]
    pub fn success(data: Value) -> Self {
        Self::Success { data }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure { error: error.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }
}

#[derive(Serialize)]
struct ActionResultWire<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl Serialize for ActionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ActionResultWire { success: self.is_success(), data: self.data(), error: self.error() }.serialize(serializer)
    }
}

#[derive(Deserialize)]
struct UserWire {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "_id")]
    object_id: Option<Value>,
    username: String,
    email: String,
    role: Role,
}

impl TryFrom<UserWire> for User {
    type Error = String;

    fn try_from(wire: UserWire) -> Result<Self, Self::Error> {
        let raw = wire
            .id
            .filter(|v| !v.is_null())
            .or(wire.object_id.filter(|v| !v.is_null()))
            .ok_or_else(|| "missing user id".to_owned())?;
        Ok(Self { id: id_from_value(raw)?, username: wire.username, email: wire.email, role: wire.role })
    }
}

fn id_from_value(value: Value) -> Result<String, String> {
    match value {
        Value::String(id) if !id.is_empty() => Ok(id),
        Value::String(_) => Err("user id must not be empty".to_owned()),
        Value::Number(number) if number.is_i64() || number.is_u64() => Ok(number.to_string()),
        Value::Number(_) => Err("expected integer-compatible user id".to_owned()),
        _ => Err("expected string or integer user id".to_owned()),
    }
}
