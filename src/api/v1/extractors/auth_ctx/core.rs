use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Response;

use crate::middleware::auth::{AuthFailure, entry_point};
use crate::services::auth::Principal;

/// Marks a handler as protected.
///
/// The JWT filter must run first; it leaves either a `Principal` or an
/// `AuthFailure` in the request extensions. Without a principal the request is
/// answered by the entry point using that marker.
#[derive(Debug, Clone)]
pub struct AuthPrincipal(pub Principal);

impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Principal>() {
            Some(principal) => Ok(AuthPrincipal(principal.clone())),
            None => Err(entry_point::commence(
                parts.extensions.get::<AuthFailure>().copied(),
            )),
        }
    }
}
