// handlers/protected/user.rs - /user endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use crate::database::models::{IdInput, User, UserView};
use crate::database::Filter;
use crate::handlers::lifecycle::{bind, not_found, require_id};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /user
pub async fn user_list(State(state): State<AppState>) -> ApiResult<Vec<UserView>> {
    let users = state.users.select_any(Filter::new()).await?;
    Ok(ApiResponse::success(users.iter().map(UserView::from).collect()))
}

/// GET /user/:id
pub async fn user_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<UserView> {
    let user = state.users.select_404(Filter::by_id(id)).await?;
    Ok(ApiResponse::success(UserView::from(&user)))
}

/// POST /user/delete - callers may only remove their own account
pub async fn user_delete(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    payload: Result<Json<IdInput>, JsonRejection>,
) -> ApiResult<UserView> {
    let input = bind(payload)?;
    let id = require_id(input.id.as_deref(), "id")?;

    if id != caller.user_id {
        tracing::warn!("User {} attempted to delete user {}", caller.user_id, id);
        return Err(not_found::<User>());
    }

    let user = state.users.select_404(Filter::by_id(id)).await?;
    if state.users.delete_by_id(id).await? == 0 {
        return Err(not_found::<User>());
    }
    tracing::info!("Deleted user {}", id);
    Ok(ApiResponse::success(UserView::from(&user)).with_message("User deleted"))
}
