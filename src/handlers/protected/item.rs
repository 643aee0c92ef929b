// handlers/protected/item.rs - /menu/group/item endpoints

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};

use crate::database::models::{GroupRef, IdInput, MenuGroup, MenuItem, MenuItemInput};
use crate::database::{Filter, Repository};
use crate::error::ApiError;
use crate::handlers::lifecycle::{self, bind, hide_parent, not_found, Owned, Resource, Scope};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[async_trait]
impl Owned for MenuItem {
    fn repository(state: &AppState) -> &Repository<Self> {
        &state.items
    }

    async fn load_owned(scope: &Scope<'_>, id: &str) -> Result<Self, ApiError> {
        let item = scope
            .state
            .items
            .select_id(id)
            .await?
            .ok_or_else(not_found::<MenuItem>)?;

        MenuGroup::load_owned(scope, &item.group_id)
            .await
            .map_err(hide_parent::<MenuItem>)?;
        Ok(item)
    }
}

#[async_trait]
impl Resource for MenuItem {
    type Input = MenuItemInput;
    type Parent = MenuGroup;

    const MUTABLE_FIELDS: &'static [&'static str] = &["name", "price", "description", "image"];

    fn input_id(input: &MenuItemInput) -> Option<&str> {
        input.id.as_deref()
    }

    async fn authorize_parent(scope: &Scope<'_>, input: &MenuItemInput) -> Result<MenuGroup, ApiError> {
        let group_id = lifecycle::require_id(input.group_id.as_deref(), "group_id")?;
        MenuGroup::load_owned(scope, group_id).await
    }

    fn create(input: MenuItemInput, group: MenuGroup, id: String, now: DateTime<Utc>) -> Self {
        MenuItem {
            id,
            group_id: group.id,
            name: input.name.unwrap_or_default().trim().to_string(),
            price: input.price.unwrap_or_default(),
            description: input.description,
            image: input.image,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: MenuItemInput, now: DateTime<Utc>) {
        self.name = input.name.unwrap_or_default().trim().to_string();
        self.price = input.price.unwrap_or_default();
        self.description = input.description;
        self.image = input.image;
        self.updated_at = now;
    }
}

/// POST /menu/group/item - items of one of the caller's groups
pub async fn item_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<GroupRef>, JsonRejection>,
) -> ApiResult<Vec<MenuItem>> {
    let input = bind(payload)?;
    let group_id = lifecycle::require_id(input.group_id.as_deref(), "group_id")?;
    let group = MenuGroup::load_owned(&Scope::new(&state, &user), group_id).await?;

    let items = state
        .items
        .select_any(Filter::new().eq("group_id", group.id))
        .await?;
    Ok(ApiResponse::success(items))
}

/// POST /menu/group/item/add
pub async fn item_add(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<MenuItemInput>, JsonRejection>,
) -> ApiResult<MenuItem> {
    let input = bind(payload)?;
    let item = lifecycle::upsert::<MenuItem>(&Scope::new(&state, &user), input).await?;
    Ok(ApiResponse::success(item).with_message("Menu item saved"))
}

/// POST /menu/group/item/delete
pub async fn item_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<IdInput>, JsonRejection>,
) -> ApiResult<MenuItem> {
    let input = bind(payload)?;
    let item = lifecycle::remove::<MenuItem>(&Scope::new(&state, &user), input.id.as_deref()).await?;
    Ok(ApiResponse::success(item).with_message("Menu item deleted"))
}
