use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::validation::{non_blank, FieldErrors, Validate, MAX_NAME_LENGTH, MAX_TEXT_LENGTH};

/// A priced dish or drink within a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub group_id: String,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for MenuItem {
    const COLLECTION: &'static str = "menu-item";
    const LABEL: &'static str = "Menu item";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItemInput {
    pub id: Option<String>,
    pub group_id: Option<String>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl Validate for MenuItemInput {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("name", self.name.as_deref(), MAX_NAME_LENGTH);
        errors.require_non_negative("price", self.price);
        errors.optional_text("description", self.description.as_deref(), MAX_TEXT_LENGTH);
        errors.optional_text("image", self.image.as_deref(), MAX_TEXT_LENGTH);
        if non_blank(self.id.as_deref()).is_none() && non_blank(self.group_id.as_deref()).is_none() {
            errors.add("group_id", "This field is required");
        }
        errors
    }
}
