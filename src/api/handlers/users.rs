/*
 * Responsibility
 * - POST /users: create a user (password is hashed before it is stored)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::users::{CreateUserRequest, UserResponse};
use crate::api::extractors::ApiJson;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_USER", msg))?;

    let user = state
        .users
        .create(&req.name, &req.email, &req.password)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}
