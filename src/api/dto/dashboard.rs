use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub user_id: Uuid,
}
