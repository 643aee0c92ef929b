// handlers/public/system.rs - GET / and GET /health

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, Envelope};
use crate::state::AppState;

pub async fn root() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": "Menu API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "account": "/account/register, /account/login (public)",
            "show": "/menu/show (public)",
            "auth": "/auth/validateToken (protected)",
            "user": "/user[/:id], /user/delete (protected)",
            "menu": "/menu, /menu/add, /menu/delete (protected)",
            "group": "/menu/group, /menu/group/add, /menu/group/delete (protected)",
            "item": "/menu/group/item, /menu/group/item/add, /menu/group/item/delete (protected)",
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> Response {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok"
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            let envelope = Envelope::failed(
                Some(json!({"status": "degraded", "timestamp": now})),
                "Database unavailable",
            );
            (StatusCode::SERVICE_UNAVAILABLE, Json(envelope)).into_response()
        }
    }
}
