//! Bearer token → Principal in request extensions.
//!
//! The filter never rejects. It either installs a `Principal` or leaves an
//! `AuthFailure` marker behind; handlers that require a principal take the
//! `AuthPrincipal` extractor, whose rejection renders the marker through the
//! entry point.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::{self, Next},
    response::Response,
};
use tracing::debug;

use crate::services::auth::{ErrorCode, Principal, TokenError, TokenProvider};

pub const BEARER_PREFIX: &str = "Bearer ";

/// Classification left on the request when no principal could be installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthFailure(pub ErrorCode);

/// Apply the JWT filter to every route of `router`.
///
/// ```ignore
/// let api = api::v1::routes();
/// let api = middleware::auth::jwt_filter::apply(api, tokens.clone());
/// ```
pub fn apply<S>(router: Router<S>, tokens: Arc<TokenProvider>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(tokens, jwt_filter))
}

async fn jwt_filter(
    State(tokens): State<Arc<TokenProvider>>,
    mut req: Request,
    next: Next,
) -> Response {
    let outcome = match resolve_token(req.headers()) {
        Some(token) => authenticate_request(&tokens, token).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            classify(&err)
        }),
        None => Err(ErrorCode::UnknownError),
    };

    match outcome {
        Ok(principal) => {
            debug!(member_id = principal.id, "principal installed");
            req.extensions_mut().insert(principal);
        }
        Err(code) => {
            req.extensions_mut().insert(AuthFailure(code));
        }
    }

    next.run(req).await
}

/// `Authorization: Bearer <token>`; the prefix is case-sensitive.
fn resolve_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .filter(|token| !token.trim().is_empty())
}

fn authenticate_request(tokens: &TokenProvider, token: &str) -> Result<Principal, TokenError> {
    if tokens.validate(token)? {
        tokens.authenticate(token)
    } else {
        Err(TokenError::Invalid)
    }
}

fn classify(err: &TokenError) -> ErrorCode {
    match err {
        TokenError::Expired => ErrorCode::ExpiredToken,
        TokenError::Malformed => ErrorCode::WrongTypeToken,
        TokenError::Unsupported => ErrorCode::UnsupportedToken,
        TokenError::MissingAuthorities => ErrorCode::AccessDenied,
        TokenError::Invalid | TokenError::Signing => ErrorCode::UnknownError,
    }
}
