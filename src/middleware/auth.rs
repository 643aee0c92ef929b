use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::{ApiError, LOGIN_REQUIRED_MESSAGE};
use crate::state::AppState;

/// Authenticated caller extracted from the token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

/// Token gate for protected routes. Rejections never reach the handler.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(request.headers()).map_err(|msg| {
        tracing::warn!("Rejected request to {}: {}", request.uri().path(), msg);
        ApiError::unauthorized(LOGIN_REQUIRED_MESSAGE)
    })?;

    let user_id = state.tokens.validate(&token)?;
    tracing::debug!("Authenticated user {}", user_id);

    request.extensions_mut().insert(AuthUser { user_id });
    Ok(next.run(request).await)
}

/// Accepts `Bearer <token>` or the bare token
pub(crate) fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, &'static str> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or("Missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .unwrap_or(auth_str)
        .trim();

    if token.is_empty() {
        return Err("Empty JWT token");
    }
    Ok(token.to_string())
}
