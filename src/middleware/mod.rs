/*
 * Responsibility
 * - public surface of the middleware layer
 * - each module exposes `apply(router, ...)`
 */
pub mod bearer_auth;
pub mod cors;
pub mod http;
pub mod security_headers;
