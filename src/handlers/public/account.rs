// handlers/public/account.rs - POST /account/register and POST /account/login

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::user::normalize_email;
use crate::database::models::{LoginInput, RegisterInput, User, UserView};
use crate::database::{DatabaseError, Filter};
use crate::error::ApiError;
use crate::handlers::lifecycle::{bind, validate};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const EMAIL_TAKEN: &str = "Email already registered";

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenView {
    pub token: String,
}

/**
 * POST /account/register - create an account
 *
 * ```json
 * { "name": "Ada", "lastname": "Lovelace", "email": "ada@example.com", "password": "..." }
 * ```
 *
 * 201 with the stored user (no password), 400 on invalid fields,
 * 409 when the email is already registered.
 */
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> ApiResult<UserView> {
    let input = bind(payload)?;
    validate(&input)?;

    let email = normalize_email(input.email.as_deref().unwrap_or_default());
    if state.users.select_one(Filter::new().eq("email", email.as_str())).await?.is_some() {
        return Err(ApiError::conflict(EMAIL_TAKEN));
    }

    let password = state
        .credentials
        .hash_blocking(input.password.unwrap_or_default())
        .await?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        name: input.name.unwrap_or_default().trim().to_string(),
        lastname: input.lastname.unwrap_or_default().trim().to_string(),
        email,
        password,
    };

    // Two concurrent registrations can both pass the lookup above
    state.users.insert(&user).await.map_err(|e| match e {
        DatabaseError::Duplicate { .. } => ApiError::conflict(EMAIL_TAKEN),
        other => ApiError::from(other),
    })?;

    tracing::info!("Registered user {}", user.id);
    Ok(ApiResponse::created(UserView::from(&user)).with_message("Account created"))
}

/// POST /account/login - exchange email and password for a token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> ApiResult<TokenView> {
    let input = bind(payload)?;
    validate(&input)?;

    let email = normalize_email(input.email.as_deref().unwrap_or_default());
    let password = input.password.unwrap_or_default();
    let Some(user) = state.users.select_one(Filter::new().eq("email", email.as_str())).await? else {
        // Unknown emails pay the same hashing cost as wrong passwords
        state.credentials.verify_absent_blocking(password).await?;
        tracing::warn!("Login failed: unknown email");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    let matches = state
        .credentials
        .verify_blocking(user.password.clone(), password)
        .await?;
    if !matches {
        tracing::warn!("Login failed for user {}", user.id);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = state.tokens.issue(&user.id)?;
    tracing::info!("User {} logged in", user.id);
    Ok(ApiResponse::success(TokenView { token }).with_message("Login successful"))
}
