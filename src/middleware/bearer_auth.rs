/*
 * Responsibility
 * - run the bearer guard (header extraction -> verification -> rejection)
 * - on success, put the authenticated principal into request extensions as AuthCtx
 */
use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};
use tracing::{debug, warn};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::guard;
use crate::state::AppState;

/// Guard every route of `router` with the bearer-token check.
///
/// Uses `route_layer`, so unknown paths still 404 instead of 401.
///
/// ```ignore
/// let protected = Router::new().route("/dashboard", get(dashboard));
/// let protected = middleware::bearer_auth::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, bearer_auth_middleware))
}

async fn bearer_auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let principal = match guard::authenticate(req.headers(), &state.tokens) {
        Ok(principal) => principal,
        Err(err) => {
            warn!(
                reason = %err,
                method = %req.method(),
                path = %req.uri().path(),
                "request rejected by bearer guard"
            );
            return Err(err.into());
        }
    };

    debug!(user_id = %principal.user_id, "bearer token accepted");

    // middleware -> extractor
    req.extensions_mut().insert(AuthCtx::new(principal));

    Ok(next.run(req).await)
}
