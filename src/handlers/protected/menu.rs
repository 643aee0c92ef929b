// handlers/protected/menu.rs - /menu endpoints scoped to the caller's menus

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};

use crate::database::models::{IdInput, Menu, MenuInput};
use crate::database::{Filter, Repository};
use crate::error::ApiError;
use crate::handlers::lifecycle::{self, bind, not_found, Owned, Resource, Scope};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[async_trait]
impl Owned for Menu {
    fn repository(state: &AppState) -> &Repository<Self> {
        &state.menus
    }

    async fn load_owned(scope: &Scope<'_>, id: &str) -> Result<Self, ApiError> {
        scope
            .state
            .menus
            .select_one(Filter::by_id(id).eq("user_id", scope.user_id()))
            .await?
            .ok_or_else(not_found::<Menu>)
    }
}

#[async_trait]
impl Resource for Menu {
    type Input = MenuInput;
    type Parent = String;

    const MUTABLE_FIELDS: &'static [&'static str] = &["name", "logo", "banner"];

    fn input_id(input: &MenuInput) -> Option<&str> {
        input.id.as_deref()
    }

    async fn authorize_parent(scope: &Scope<'_>, _input: &MenuInput) -> Result<String, ApiError> {
        Ok(scope.user_id().to_string())
    }

    fn create(input: MenuInput, user_id: String, id: String, now: DateTime<Utc>) -> Self {
        Menu {
            id,
            user_id,
            name: input.name.unwrap_or_default().trim().to_string(),
            logo: input.logo,
            banner: input.banner,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: MenuInput, now: DateTime<Utc>) {
        self.name = input.name.unwrap_or_default().trim().to_string();
        self.logo = input.logo;
        self.banner = input.banner;
        self.updated_at = now;
    }
}

/// GET /menu - every menu the caller owns, in stored order
pub async fn menu_list(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<Vec<Menu>> {
    let menus = state
        .menus
        .select_any(Filter::new().eq("user_id", user.user_id.as_str()))
        .await?;
    Ok(ApiResponse::success(menus))
}

/// POST /menu - one of the caller's menus, by `{"id": ...}`
pub async fn menu_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<IdInput>, JsonRejection>,
) -> ApiResult<Menu> {
    let input = bind(payload)?;
    let id = lifecycle::require_id(input.id.as_deref(), "id")?;
    let menu = Menu::load_owned(&Scope::new(&state, &user), id).await?;
    Ok(ApiResponse::success(menu))
}

/// POST /menu/add - create a menu, or update one when `id` is given
pub async fn menu_add(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<MenuInput>, JsonRejection>,
) -> ApiResult<Menu> {
    let input = bind(payload)?;
    let menu = lifecycle::upsert::<Menu>(&Scope::new(&state, &user), input).await?;
    Ok(ApiResponse::success(menu).with_message("Menu saved"))
}

/// POST /menu/delete - remove one of the caller's menus; its groups stay behind
pub async fn menu_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<IdInput>, JsonRejection>,
) -> ApiResult<Menu> {
    let input = bind(payload)?;
    let menu = lifecycle::remove::<Menu>(&Scope::new(&state, &user), input.id.as_deref()).await?;
    Ok(ApiResponse::success(menu).with_message("Menu deleted"))
}
