//! Authentication service
//!
//! Tokens are returned to the caller; nothing here touches disk.

use crate::error::{TrackerError, TrackerResult};
use crate::models::{AuthTokens, User};
use crate::session::Session;

pub struct AuthService<'a> {
    session: &'a Session,
}

impl<'a> AuthService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub fn login(&self, username: &str, password: &str) -> TrackerResult<AuthTokens> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(TrackerError::Validation(
                "Username and password are required".into(),
            ));
        }
        let tokens = self.session.api.login(username.trim(), password)?;
        tracing::info!(username = username.trim(), "logged in");
        Ok(tokens)
    }

    pub fn refresh(&self, refresh_token: &str) -> TrackerResult<String> {
        if refresh_token.trim().is_empty() {
            return Err(TrackerError::Validation("Refresh token is required".into()));
        }
        self.session.api.refresh_token(refresh_token.trim())
    }

    pub fn register(&self, username: &str, email: &str, password: &str) -> TrackerResult<User> {
        if username.trim().is_empty() {
            return Err(TrackerError::Validation("Username is required".into()));
        }
        if !email.contains('@') {
            return Err(TrackerError::Validation(format!("Invalid email address: {}", email)));
        }
        if password.len() < 8 {
            return Err(TrackerError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }
        let user = self.session.api.register(username.trim(), email.trim(), password)?;
        tracing::info!(username = %user.username, "registered");
        Ok(user)
    }
}
