//! Authentication middleware that checks the `Authorization` header of each request.

use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{Error, auth::parse_token};

/// Middleware function that checks for a valid token in the `Authorization` header.
///
/// The request is executed normally if the header holds a date in the
/// [token format](crate::auth::parse_token), otherwise a 401 JSON error is
/// returned and the handler does not run.
pub async fn auth_guard(request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    match parse_token(token) {
        Ok(_) => next.run(request).await,
        Err(error) => {
            tracing::debug!("Rejected authorization token {token:?}: {error}");
            Error::Unauthorized.into_response()
        }
    }
}
