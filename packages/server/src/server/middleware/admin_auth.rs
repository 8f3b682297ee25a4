use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

/// Admin token middleware
///
/// When a token is configured, the request must carry
/// `Authorization: Bearer <token>` or it is rejected with 401.
/// Without a configured token every request passes.
pub async fn admin_auth_middleware(
    admin_token: Option<Arc<str>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(expected) = admin_token.as_deref() {
        if !is_authorized(&request, expected) {
            debug!(path = %request.uri().path(), "Rejected unauthorized setup request");
            return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        }
    }

    next.run(request).await
}

fn is_authorized(request: &Request<Body>, expected: &str) -> bool {
    let Some(header) = request.headers().get("authorization") else {
        return false;
    };
    let Ok(value) = header.to_str() else {
        return false;
    };

    value
        .strip_prefix("Bearer ")
        .is_some_and(|token| token.trim() == expected)
}
