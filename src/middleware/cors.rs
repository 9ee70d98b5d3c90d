//! CORS policy for the browser front-end.
//!
//! Development allows any origin; production only the origins listed in
//! `CORS_ALLOWED_ORIGINS`. Credentials are never allowed, so the bearer token
//! travels in the `Authorization` header only. All response headers are exposed
//! so the client can read the request id.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer, ExposeHeaders};

use crate::config::Config;

pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config))
}

fn layer(config: &Config) -> CorsLayer {
    let allow_origin = if config.app_env.is_production() {
        // An empty allowlist allows nobody.
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter(|s| s.as_str() != "*")
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        AllowOrigin::list(allowed)
    } else {
        AllowOrigin::from(Any)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(ExposeHeaders::from(Any))
        .max_age(std::time::Duration::from_secs(60 * 10))
}
