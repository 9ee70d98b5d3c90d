//! Response for a protected handler reached without a principal.
//!
//! Reads the `AuthFailure` marker left by the JWT filter and renders it as
//! `{"message": ..., "code": ...}`.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::warn;

use crate::middleware::auth::jwt_filter::AuthFailure;
use crate::services::auth::ErrorCode;

const CONTENT_TYPE_JSON_UTF8: &str = "application/json;charset=UTF-8";

#[derive(Debug, Serialize)]
struct EntryPointBody {
    message: &'static str,
    code: &'static str,
}

/// Map the marker to the code the client sees.
pub fn resolve(failure: Option<AuthFailure>) -> ErrorCode {
    match failure {
        None => ErrorCode::UnknownError,
        Some(AuthFailure(
            code @ (ErrorCode::UnknownError
            | ErrorCode::WrongTypeToken
            | ErrorCode::ExpiredToken
            | ErrorCode::UnsupportedToken),
        )) => code,
        Some(AuthFailure(_)) => ErrorCode::AccessDenied,
    }
}

pub fn commence(failure: Option<AuthFailure>) -> Response {
    let code = resolve(failure);
    warn!(code = %code, "unauthenticated access to protected route");
    render(code)
}

fn render(code: ErrorCode) -> Response {
    let status = if code.code() == "400" {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::UNAUTHORIZED
    };

    let body = EntryPointBody {
        message: code.message(),
        code: code.code(),
    };

    (
        status,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static(CONTENT_TYPE_JSON_UTF8),
        )],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(res: Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn resolves_markers() {
        assert_eq!(resolve(None), ErrorCode::UnknownError);
        assert_eq!(
            resolve(Some(AuthFailure(ErrorCode::ExpiredToken))),
            ErrorCode::ExpiredToken
        );
        assert_eq!(
            resolve(Some(AuthFailure(ErrorCode::WrongTypeToken))),
            ErrorCode::WrongTypeToken
        );
        assert_eq!(
            resolve(Some(AuthFailure(ErrorCode::UnsupportedToken))),
            ErrorCode::UnsupportedToken
        );
        assert_eq!(
            resolve(Some(AuthFailure(ErrorCode::BoardNotFound))),
            ErrorCode::AccessDenied
        );
        assert_eq!(
            resolve(Some(AuthFailure(ErrorCode::AccessDenied))),
            ErrorCode::AccessDenied
        );
    }

    #[tokio::test]
    async fn missing_marker_renders_unknown_error_as_bad_request() {
        let res = commence(None);
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            CONTENT_TYPE_JSON_UTF8
        );

        let body = body_json(res).await;
        assert_eq!(body["code"], "400");
        assert_eq!(body["message"], ErrorCode::UnknownError.message());
    }

    #[tokio::test]
    async fn expired_marker_renders_expired_message() {
        let body = body_json(commence(Some(AuthFailure(ErrorCode::ExpiredToken)))).await;
        assert_eq!(body["code"], "400");
        assert_eq!(body["message"], ErrorCode::ExpiredToken.message());
    }

    #[tokio::test]
    async fn non_400_code_is_unauthorized() {
        let res = render(ErrorCode::IndexNotFound);
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(res).await;
        assert_eq!(body["code"], "1001");
    }
}
