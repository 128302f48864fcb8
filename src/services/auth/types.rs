use thiserror::Error;
use uuid::Uuid;

/// The authenticated identity a verified token maps back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Principal {
    pub user_id: Uuid,
}

impl Principal {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Why a request or a login attempt was not authenticated.
///
/// Only `Internal` is a server fault; everything else becomes a plain 401
/// (see `From<AuthError> for AppError`).
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("no Authorization header")]
    MissingCredentials,

    #[error("Authorization header is not of the form `Bearer <token>`")]
    MalformedCredentials,

    #[error("token signature, claims or expiry did not verify")]
    InvalidToken,

    #[error("unknown email or wrong password")]
    InvalidLoginCredentials,

    #[error("authentication backend failure")]
    Internal,
}
