pub mod dashboard;
pub mod fallback;
pub mod health;
pub mod sessions;
pub mod users;
