use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Capability level of a signed-in identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Elevated capability.
    Admin,
    /// Standard capability.
    Member,
}

impl Role {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }

    /// Helper: convert input from CLI (any case).
    pub fn from_code(code: &str) -> AppResult<Self> {
        match code.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            other => Err(AppError::InvalidRole(other.to_string())),
        }
    }

    pub fn is_elevated(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// A credentials row. Once matched at login it becomes the session identity
/// and is persisted as is, password included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub created_at: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCredential {
    pub email: String,
    pub password: String,
    pub role: Role,
}
