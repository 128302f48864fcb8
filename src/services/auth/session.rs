use std::sync::Arc;

use tracing::{debug, error};

use crate::repos::user_repo::{UserRow, UserStore};
use crate::services::auth::password::{verify_dummy_password, verify_password};
use crate::services::auth::token::{IssuedToken, TokenService};
use crate::services::auth::{AuthError, Principal};
use crate::services::users::normalize_email;

/// A successful login: the user and the access token minted for them.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserRow,
    pub token: IssuedToken,
}

/// Exchanges email/password credentials for a signed access token.
#[derive(Clone)]
pub struct SessionService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
}

impl SessionService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Unknown email and wrong password fail the same way.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = normalize_email(email);

        let user = self.users.find_by_email(&email).await.map_err(|e| {
            error!(error = %e, "failed to look up user for login");
            AuthError::Internal
        })?;

        let Some(user) = user else {
            // Same Argon2 cost as a wrong password, so timing does not reveal the email.
            check_password(password, None).await?;
            debug!("login rejected: unknown email");
            return Err(AuthError::InvalidLoginCredentials);
        };

        let matches = check_password(password, Some(user.password_hash.clone())).await?;

        if !matches {
            debug!(user_id = %user.id, "login rejected: password mismatch");
            return Err(AuthError::InvalidLoginCredentials);
        }

        let token = self.tokens.issue(&Principal::new(user.id))?;
        debug!(user_id = %user.id, expires_at = %token.expires_at, "session issued");

        Ok(Session { user, token })
    }
}

// Verifies on the blocking pool. `None` checks against the dummy hash and never matches.
async fn check_password(password: &str, hash: Option<String>) -> Result<bool, AuthError> {
    let plain = password.to_owned();
    tokio::task::spawn_blocking(move || match hash {
        Some(hash) => verify_password(&plain, &hash),
        None => verify_dummy_password(&plain),
    })
    .await
    .map_err(|e| {
        error!(error = %e, "password verification task failed");
        AuthError::Internal
    })?
    .map_err(|e| {
        error!(error = %e, "password verification failed");
        AuthError::Internal
    })
}
