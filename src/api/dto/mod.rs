pub mod dashboard;
pub mod sessions;
pub mod users;
