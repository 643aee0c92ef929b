use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::menu_group::GroupTree;
use super::Entity;
use crate::validation::{FieldErrors, Validate, MAX_NAME_LENGTH, MAX_TEXT_LENGTH};

/// A menu owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub logo: Option<String>,
    pub banner: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Menu {
    const COLLECTION: &'static str = "menu";
    const LABEL: &'static str = "Menu";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of `POST /menu/add`. A non-empty `id` updates, otherwise inserts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuInput {
    pub id: Option<String>,
    pub name: Option<String>,
    pub logo: Option<String>,
    pub banner: Option<String>,
}

impl Validate for MenuInput {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("name", self.name.as_deref(), MAX_NAME_LENGTH);
        errors.optional_text("logo", self.logo.as_deref(), MAX_TEXT_LENGTH);
        errors.optional_text("banner", self.banner.as_deref(), MAX_TEXT_LENGTH);
        errors
    }
}

/// A menu with its groups and their items, as returned by `/menu/show`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuTree {
    #[serde(flatten)]
    pub menu: Menu,
    pub groups: Vec<GroupTree>,
}
