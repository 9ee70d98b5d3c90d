/*
 * Responsibility
 * - authenticated identity attached to a request
 * - the JWT filter builds it from token claims and stores it in request extensions
 */
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Authority string granted to members with this role.
    pub const fn as_authority(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Admin => "ROLE_ADMIN",
        }
    }

    pub fn from_db(value: &str) -> Self {
        match value {
            "ROLE_ADMIN" => Role::Admin,
            _ => Role::User,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: i64,
    pub username: String,
    pub nickname: String,
    pub role: Role,
    pub authorities: Vec<String>,
}

impl Principal {
    /// Principal for a freshly loaded member: authorities are derived from the role.
    pub fn for_member(id: i64, username: String, nickname: String, role: Role) -> Self {
        Self {
            id,
            username,
            nickname,
            role,
            authorities: vec![role.as_authority().to_string()],
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}
