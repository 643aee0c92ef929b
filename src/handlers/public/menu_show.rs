// handlers/public/menu_show.rs - POST /menu/show

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::database::models::{GroupTree, IdInput, MenuTree};
use crate::database::Filter;
use crate::handlers::lifecycle::{bind, require_id};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Public read of a whole menu: the menu, its groups, and each group's items.
///
/// One query per level, issued in sequence. Not transactional: a group removed
/// between the two reads simply drops out of the tree.
pub async fn menu_show(
    State(state): State<AppState>,
    payload: Result<Json<IdInput>, JsonRejection>,
) -> ApiResult<MenuTree> {
    let input = bind(payload)?;
    let id = require_id(input.id.as_deref(), "id")?;

    let menu = state.menus.select_404(Filter::by_id(id)).await?;
    let groups = state
        .groups
        .select_any(Filter::new().eq("menu_id", menu.id.as_str()))
        .await?;

    let mut tree = Vec::with_capacity(groups.len());
    for group in groups {
        let items = state
            .items
            .select_any(Filter::new().eq("group_id", group.id.as_str()))
            .await?;
        tree.push(GroupTree { group, items });
    }

    Ok(ApiResponse::success(MenuTree { menu, groups: tree }))
}
