/*
 * Responsibility
 * - POST /sessions: email/password -> signed access token
 * - every credential failure is the same 401
 */
use axum::{Json, extract::State};

use crate::api::dto::sessions::{CreateSessionRequest, SessionResponse};
use crate::api::extractors::ApiJson;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_session(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateSessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.login(&req.email, &req.password).await?;

    Ok(Json(SessionResponse::from(session)))
}
