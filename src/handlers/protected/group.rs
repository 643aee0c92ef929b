// handlers/protected/group.rs - /menu/group endpoints

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};

use crate::database::models::{IdInput, Menu, MenuGroup, MenuGroupInput, MenuRef};
use crate::database::{Filter, Repository};
use crate::error::ApiError;
use crate::handlers::lifecycle::{self, bind, hide_parent, not_found, Owned, Resource, Scope};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[async_trait]
impl Owned for MenuGroup {
    fn repository(state: &AppState) -> &Repository<Self> {
        &state.groups
    }

    async fn load_owned(scope: &Scope<'_>, id: &str) -> Result<Self, ApiError> {
        let group = scope
            .state
            .groups
            .select_id(id)
            .await?
            .ok_or_else(not_found::<MenuGroup>)?;

        Menu::load_owned(scope, &group.menu_id)
            .await
            .map_err(hide_parent::<MenuGroup>)?;
        Ok(group)
    }
}

#[async_trait]
impl Resource for MenuGroup {
    type Input = MenuGroupInput;
    type Parent = Menu;

    const MUTABLE_FIELDS: &'static [&'static str] = &["name"];

    fn input_id(input: &MenuGroupInput) -> Option<&str> {
        input.id.as_deref()
    }

    async fn authorize_parent(scope: &Scope<'_>, input: &MenuGroupInput) -> Result<Menu, ApiError> {
        let menu_id = lifecycle::require_id(input.menu_id.as_deref(), "menu_id")?;
        Menu::load_owned(scope, menu_id).await
    }

    fn create(input: MenuGroupInput, menu: Menu, id: String, now: DateTime<Utc>) -> Self {
        MenuGroup {
            id,
            menu_id: menu.id,
            name: input.name.unwrap_or_default().trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: MenuGroupInput, now: DateTime<Utc>) {
        self.name = input.name.unwrap_or_default().trim().to_string();
        self.updated_at = now;
    }
}

/// POST /menu/group - groups of one of the caller's menus
pub async fn group_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<MenuRef>, JsonRejection>,
) -> ApiResult<Vec<MenuGroup>> {
    let input = bind(payload)?;
    let menu_id = lifecycle::require_id(input.menu_id.as_deref(), "menu_id")?;
    let menu = Menu::load_owned(&Scope::new(&state, &user), menu_id).await?;

    let groups = state
        .groups
        .select_any(Filter::new().eq("menu_id", menu.id))
        .await?;
    Ok(ApiResponse::success(groups))
}

/// POST /menu/group/add
pub async fn group_add(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<MenuGroupInput>, JsonRejection>,
) -> ApiResult<MenuGroup> {
    let input = bind(payload)?;
    let group = lifecycle::upsert::<MenuGroup>(&Scope::new(&state, &user), input).await?;
    Ok(ApiResponse::success(group).with_message("Menu group saved"))
}

/// POST /menu/group/delete
pub async fn group_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<IdInput>, JsonRejection>,
) -> ApiResult<MenuGroup> {
    let input = bind(payload)?;
    let group = lifecycle::remove::<MenuGroup>(&Scope::new(&state, &user), input.id.as_deref()).await?;
    Ok(ApiResponse::success(group).with_message("Menu group deleted"))
}
