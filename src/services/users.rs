use std::sync::Arc;

use tracing::{debug, error};

use crate::error::AppError;
use crate::repos::error::RepoError;
use crate::repos::user_repo::{NewUser, UserRow, UserStore};
use crate::services::auth::password::hash_password;

/// Emails are compared and stored trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Create a user, storing only the hash of `password`.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRow, AppError> {
        let email = normalize_email(email);

        let plain = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&plain))
            .await
            .map_err(|e| {
                error!(error = %e, "password hashing task failed");
                AppError::Internal
            })?
            .map_err(|e| {
                error!(error = %e, "failed to hash password");
                AppError::Internal
            })?;

        let user = self
            .store
            .create(NewUser {
                name: name.trim().to_string(),
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                RepoError::Conflict => {
                    AppError::conflict("EMAIL_TAKEN", "a user with this email already exists")
                }
                other => other.into(),
            })?;

        debug!(user_id = %user.id, "user created");

        Ok(user)
    }
}
