use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::dto::users::UserResponse;
use crate::services::auth::session::Session;

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for CreateSessionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateSessionRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    /// Always "Bearer"
    pub token_type: &'static str,
    /// Seconds until expiry.
    pub expires_in: u64,
    pub user: UserResponse,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            user: UserResponse::from(&session.user),
            token: session.token.token,
            token_type: "Bearer",
            expires_in: session.token.expires_in,
        }
    }
}
