/*
 * Responsibility
 * - GET /dashboard, the private route
 * - only reachable through the bearer guard; reads the principal from AuthCtx
 */
use axum::Json;

use crate::api::dto::dashboard::DashboardResponse;
use crate::api::extractors::AuthCtxExtractor;

pub async fn dashboard(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<DashboardResponse> {
    Json(DashboardResponse {
        user_id: ctx.user_id,
    })
}
