/*
 * Responsibility
 * - shared context bound to the Router (AppState)
 * - cheap to Clone (everything inside is an Arc)
 */
use std::sync::Arc;

use crate::repos::user_repo::UserStore;
use crate::services::auth::{session::SessionService, token::TokenService};
use crate::services::users::UserService;

#[derive(Clone)]
pub struct AppState {
    /// Read-only after startup; the bearer guard verifies against it.
    pub tokens: Arc<TokenService>,
    pub sessions: SessionService,
    pub users: UserService,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Self {
        Self {
            sessions: SessionService::new(store.clone(), tokens.clone()),
            users: UserService::new(store),
            tokens,
        }
    }
}
