//! Session issuance and bearer-token route protection over axum.
//!
//! `POST /sessions` exchanges an email/password pair for a signed JWT;
//! routes behind [`middleware::bearer_auth`] only run once the token in
//! `Authorization: Bearer <token>` has been verified.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
