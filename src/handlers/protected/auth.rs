// handlers/protected/auth.rs - POST /auth/validateToken

use axum::{extract::State, Extension};

use crate::database::models::UserView;
use crate::error::{ApiError, LOGIN_REQUIRED_MESSAGE};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// The user the presented token belongs to
pub async fn validate_token(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<UserView> {
    // A valid signature for a deleted account is still a failed login
    let Some(account) = state.users.select_id(&user.user_id).await? else {
        tracing::warn!("Token for unknown user {}", user.user_id);
        return Err(ApiError::unauthorized(LOGIN_REQUIRED_MESSAGE));
    };
    Ok(ApiResponse::success(UserView::from(&account)))
}
