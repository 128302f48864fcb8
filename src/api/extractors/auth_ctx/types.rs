/*
 * Responsibility
 * - the "authenticated context" type handlers see
 * - the bearer middleware verifies the token and stores this in request extensions
 */

use uuid::Uuid;

use crate::services::auth::Principal;

/// Context attached to a request admitted by the bearer guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: Uuid,
}

impl AuthCtx {
    pub fn new(principal: Principal) -> Self {
        Self {
            user_id: principal.user_id,
        }
    }
}
