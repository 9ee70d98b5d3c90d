/*
 * Responsibility
 * - signup / login / nickname-check request and response DTOs
 * - validate() for shape checks before touching the DB
 */
use serde::{Deserialize, Serialize};

use crate::services::auth::{Principal, Role};

pub const USERNAME_MAX_CHARS: usize = 50;
pub const NICKNAME_MIN_CHARS: usize = 2;
pub const NICKNAME_MAX_CHARS: usize = 20;
pub const PASSWORD_MIN_CHARS: usize = 8;

fn validate_nickname(nickname: &str) -> Result<(), &'static str> {
    let len = nickname.trim().chars().count();
    if len < NICKNAME_MIN_CHARS || len > NICKNAME_MAX_CHARS {
        return Err("nickname must be 2 to 20 characters");
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub nickname: String,
    pub password: String,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().is_empty() {
            return Err("username is required");
        }
        if self.username.chars().count() > USERNAME_MAX_CHARS {
            return Err("username must be <= 50 chars");
        }
        validate_nickname(&self.nickname)?;
        if self.password.chars().count() < PASSWORD_MIN_CHARS {
            return Err("password must be >= 8 chars");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().is_empty() {
            return Err("username is required");
        }
        if self.password.is_empty() {
            return Err("password is required");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct NicknameRequest {
    pub nickname: String,
}

impl NicknameRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_nickname(&self.nickname)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i64,
    pub username: String,
    pub nickname: String,
    pub role: Role,
}

impl From<Principal> for MemberResponse {
    fn from(p: Principal) -> Self {
        Self {
            id: p.id,
            username: p.username,
            nickname: p.nickname,
            role: p.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(username: &str, nickname: &str, password: &str) -> SignupRequest {
        SignupRequest {
            username: username.into(),
            nickname: nickname.into(),
            password: password.into(),
        }
    }

    #[test]
    fn signup_validation() {
        assert!(signup("alice", "al", "12345678").validate().is_ok());
        assert!(signup(" ", "al", "12345678").validate().is_err());
        assert!(signup("alice", "a", "12345678").validate().is_err());
        assert!(signup("alice", &"n".repeat(21), "12345678").validate().is_err());
        assert!(signup("alice", "al", "short").validate().is_err());
    }

    #[test]
    fn nickname_length_counts_characters() {
        let req = NicknameRequest {
            nickname: "씨앗".into(),
        };
        assert!(req.validate().is_ok());
    }
}
