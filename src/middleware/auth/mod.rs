/*
 * Responsibility
 * - jwt_filter: Authorization header → Principal / AuthFailure in request extensions
 * - entry_point: AuthFailure → JSON error response for protected routes
 */
pub mod entry_point;
pub mod jwt_filter;

pub use jwt_filter::AuthFailure;
