//! User domain model

use serde::{Deserialize, Serialize};

/// Role text that grants administrator capability (compared case-insensitively)
pub const ADMIN_ROLE: &str = "admin";

/// Capability level decided once when a user record is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Ordinary,
    Administrator,
}

impl Role {
    /// Resolve a free-text role field
    pub fn from_text(text: &str) -> Self {
        if text.eq_ignore_ascii_case(ADMIN_ROLE) {
            Role::Administrator
        } else {
            Role::Ordinary
        }
    }
}

/// A library user, loaded from the credential list
///
/// Users are never created or deleted while the program runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    /// Role text as it appears in users.txt
    pub role_text: String,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
        role_text: impl Into<String>,
    ) -> Self {
        let role_text = role_text.into();
        Self {
            id: id.into(),
            name: name.into(),
            password: password.into(),
            role: Role::from_text(&role_text),
            role_text,
        }
    }

    pub fn is_administrator(&self) -> bool {
        self.role == Role::Administrator
    }
}
