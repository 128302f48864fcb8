/*
 * Responsibility
 * - URL structure
 * - which routes sit behind the bearer guard
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{
    dashboard::dashboard, health::health, sessions::create_session, users::create_user,
};
use crate::middleware::bearer_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/sessions", post(create_session))
        .route("/users", post(create_user));

    let protected = Router::new().route("/dashboard", get(dashboard));
    let protected = bearer_auth::apply(protected, state);

    public.merge(protected)
}
