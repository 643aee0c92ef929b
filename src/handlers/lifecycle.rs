// handlers/lifecycle.rs - bind, validate, insert-or-update and delete shared by the resource handlers
//
// A request body with a non-empty `id` updates the caller's existing document;
// without one a new document is created under an authorized parent.

use async_trait::async_trait;
use axum::{extract::rejection::JsonRejection, Json};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::database::models::Entity;
use crate::database::repository::to_document;
use crate::database::{DatabaseError, Document, Repository};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::validation::{non_blank, Validate};

/// The authenticated caller together with the shared handles
pub struct Scope<'a> {
    pub state: &'a AppState,
    pub user: &'a AuthUser,
}

impl<'a> Scope<'a> {
    pub fn new(state: &'a AppState, user: &'a AuthUser) -> Self {
        Self { state, user }
    }

    pub fn user_id(&self) -> &str {
        &self.user.user_id
    }
}

/// An entity reachable only through a chain of parents ending at its owning user
#[async_trait]
pub trait Owned: Entity + Clone {
    fn repository(state: &AppState) -> &Repository<Self>;

    /// Load `id` if the caller owns it; anything else is "not found"
    async fn load_owned(scope: &Scope<'_>, id: &str) -> Result<Self, ApiError>;
}

/// An owned entity that can be created and updated from a request body
#[async_trait]
pub trait Resource: Owned {
    type Input: Validate + DeserializeOwned + Send + Sync + 'static;
    type Parent: Send;

    /// Fields an update may overwrite, besides `updated_at`
    const MUTABLE_FIELDS: &'static [&'static str];

    fn input_id(input: &Self::Input) -> Option<&str>;

    /// Resolve the parent a new document will hang under
    async fn authorize_parent(scope: &Scope<'_>, input: &Self::Input) -> Result<Self::Parent, ApiError>;

    fn create(input: Self::Input, parent: Self::Parent, id: String, now: DateTime<Utc>) -> Self;

    fn apply(&mut self, input: Self::Input, now: DateTime<Utc>);

    fn mutable_fields(&self) -> Result<Document, DatabaseError> {
        let mut document = to_document(self)?;
        document.retain(|field, _| field == "updated_at" || Self::MUTABLE_FIELDS.contains(&field.as_str()));
        Ok(document)
    }
}

/// Unwrap a JSON body, turning a rejection into a 400
pub fn bind<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(value)| value).map_err(ApiError::from)
}

pub fn validate<I: Validate>(input: &I) -> Result<(), ApiError> {
    let errors = input.validate();
    if errors.is_empty() {
        return Ok(());
    }
    tracing::debug!("Validation failed on {} field(s)", errors.len());
    Err(ApiError::validation_error("Validation failed", errors))
}

/// Required identifier from a lookup body
pub fn require_id<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ApiError> {
    non_blank(value).ok_or_else(|| ApiError::bad_request(format!("'{}' is required", field)))
}

pub fn not_found<T: Entity>() -> ApiError {
    ApiError::not_found(format!("{} not found", T::LABEL))
}

/// Report a missing parent as the child being missing
pub fn hide_parent<T: Entity>(err: ApiError) -> ApiError {
    match err {
        ApiError::NotFound(_) => not_found::<T>(),
        other => other,
    }
}

/// Insert a new document or update the caller's existing one
pub async fn upsert<R: Resource>(scope: &Scope<'_>, input: R::Input) -> Result<R, ApiError> {
    validate(&input)?;
    let now = Utc::now();

    match non_blank(R::input_id(&input)).map(str::to_string) {
        Some(id) => {
            tracing::debug!("Updating {} {}", R::LABEL, id);
            let mut entity = R::load_owned(scope, &id).await?;
            entity.apply(input, now);

            let fields = entity.mutable_fields()?;
            let matched = R::repository(scope.state).update_by_id(&id, fields).await?;
            if matched == 0 {
                return Err(not_found::<R>());
            }
            Ok(entity)
        }
        None => {
            let parent = R::authorize_parent(scope, &input).await?;
            let entity = R::create(input, parent, Uuid::new_v4().to_string(), now);
            tracing::debug!("Inserting {} {}", R::LABEL, entity.id());

            R::repository(scope.state).insert(&entity).await?;
            Ok(entity)
        }
    }
}

/// Delete the caller's document `id`. Children are left in place.
pub async fn remove<R: Owned>(scope: &Scope<'_>, id: Option<&str>) -> Result<R, ApiError> {
    let id = require_id(id, "id")?;
    let entity = R::load_owned(scope, id).await?;

    let removed = R::repository(scope.state).delete_by_id(id).await?;
    if removed == 0 {
        return Err(not_found::<R>());
    }
    tracing::debug!("Deleted {} {}", R::LABEL, id);
    Ok(entity)
}
