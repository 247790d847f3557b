//! Authentication CLI commands
//!
//! Tokens are printed for the caller to export; nothing is stored. Logging
//! in or registering empties the query cache.

use clap::Subcommand;

use crate::api::ACCESS_TOKEN_ENV;
use crate::error::{TrackerError, TrackerResult};
use crate::services::AuthService;
use crate::session::Session;

/// Authentication subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Obtain an access/refresh token pair
    Login {
        /// Username
        username: String,
        /// Password (prompted when omitted)
        #[arg(long, env = "VATU_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Exchange a refresh token for a new access token
    Refresh {
        /// Refresh token
        refresh: String,
    },

    /// Create a new account
    Register {
        /// Username
        username: String,
        /// Email address
        email: String,
        /// Password (prompted when omitted)
        #[arg(long, env = "VATU_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> TrackerResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| TrackerError::Auth(format!("Failed to read password: {}", e)))
}

/// Handle an auth command
pub fn handle_auth_command(session: &Session, cmd: AuthCommands) -> TrackerResult<()> {
    let service = AuthService::new(session);

    match cmd {
        AuthCommands::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt_password("Password: ")?,
            };
            let tokens = service.login(&username, &password)?;
            session.cache.clear()?;

            println!("Logged in as {}.", username.trim());
            println!();
            println!("export {}={}", ACCESS_TOKEN_ENV, tokens.access);
            if !tokens.refresh.is_empty() {
                println!();
                println!("Refresh token (use with 'vatu auth refresh'):");
                println!("{}", tokens.refresh);
            }
        }

        AuthCommands::Refresh { refresh } => {
            let access = service.refresh(&refresh)?;
            println!("export {}={}", ACCESS_TOKEN_ENV, access);
        }

        AuthCommands::Register {
            username,
            email,
            password,
        } => {
            let password = match password {
                Some(p) => p,
                None => {
                    let first = prompt_password("Password: ")?;
                    let second = prompt_password("Confirm password: ")?;
                    if first != second {
                        return Err(TrackerError::Validation("Passwords do not match".into()));
                    }
                    first
                }
            };
            let user = service.register(&username, &email, &password)?;
            session.cache.clear()?;
            println!("Registered {}.", user);
            println!("Run 'vatu auth login {}' to get a token.", user.username);
        }
    }

    Ok(())
}
