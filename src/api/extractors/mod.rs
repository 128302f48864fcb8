pub mod auth_ctx;
pub mod json;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use json::ApiJson;
