pub mod guard;
pub mod password;
pub mod session;
pub mod token;
mod types;

pub use types::{AuthError, Principal};
