use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, StoreBackend};
use crate::database::{DatabaseError, DocumentStore, MemoryStore, PgStore};
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Build the configured document store
pub async fn build_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>, DatabaseError> {
    match config.database.backend {
        StoreBackend::Memory => {
            tracing::info!("Document store ready (memory)");
            Ok(Arc::new(MemoryStore::for_application()))
        }
        StoreBackend::Postgres => Ok(Arc::new(PgStore::connect(&config.database).await?)),
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(account_routes())
        .route("/menu/show", post(public::menu_show))
        // Protected
        .merge(protected_routes(state.clone()))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/account/register", post(public::register))
        .route("/account/login", post(public::login))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/validateToken", post(protected::validate_token))
        // Users
        .route("/user", get(protected::user_list))
        .route("/user/:id", get(protected::user_get))
        .route("/user/delete", post(protected::user_delete))
        // Menus
        .route("/menu", get(protected::menu_list).post(protected::menu_get))
        .route("/menu/add", post(protected::menu_add))
        .route("/menu/delete", post(protected::menu_delete))
        // Groups
        .route("/menu/group", post(protected::group_list))
        .route("/menu/group/add", post(protected::group_add))
        .route("/menu/group/delete", post(protected::group_delete))
        // Items
        .route("/menu/group/item", post(protected::item_list))
        .route("/menu/group/item/add", post(protected::item_add))
        .route("/menu/group/item/delete", post(protected::item_delete))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter(|origin| origin.as_str() != "*")
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if parsed.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
