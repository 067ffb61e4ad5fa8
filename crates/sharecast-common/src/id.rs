use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest code `new_session_code` can produce (hex digits in a UUID).
pub const MAX_CODE_LENGTH: usize = 32;

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Mint a short, human-typeable session code of `len` lowercase hex digits.
///
/// `len` is clamped to `1..=MAX_CODE_LENGTH`. Uniqueness is not guaranteed
/// here; the session registry re-rolls on collision.
pub fn new_session_code(len: usize) -> SessionCode {
    let len = len.clamp(1, MAX_CODE_LENGTH);
    let hex = uuid::Uuid::new_v4().simple().to_string();
    SessionCode(hex[..len].to_string())
}

/// Opaque identifier of a live transport connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new() -> Self {
        Self(new_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ConnectionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ConnectionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Public token a viewer types to join a sharing session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCode(String);

impl SessionCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SessionCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for SessionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
