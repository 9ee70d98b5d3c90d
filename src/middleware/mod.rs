/*
 * Responsibility
 * - router-level middleware (auth filter, CORS, HTTP plumbing, security headers)
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
