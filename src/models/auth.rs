//! Authentication payloads
//!
//! Tokens are handed back to the caller and never written to disk.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::ids::UserId;

/// JWT pair returned by `POST /token/`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct AuthTokens {
    pub access: String,
    #[serde(default)]
    pub refresh: String,
}

impl fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .finish()
    }
}

/// Response of `POST /token/refresh/`
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct AccessToken {
    pub access: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.email.is_empty() {
            write!(f, "{}", self.username)
        } else {
            write!(f, "{} <{}>", self.username, self.email)
        }
    }
}

#[derive(Serialize, Zeroize, ZeroizeOnDrop)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

#[derive(Serialize, Zeroize, ZeroizeOnDrop)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_debug_is_redacted() {
        let tokens = AuthTokens {
            access: "secret-access".into(),
            refresh: "secret-refresh".into(),
        };
        let debug = format!("{:?}", tokens);
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_user_display() {
        let user = User {
            id: UserId::new(1),
            username: "ana".into(),
            email: "ana@example.com".into(),
        };
        assert_eq!(user.to_string(), "ana <ana@example.com>");
    }
}
