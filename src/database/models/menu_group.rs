use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::menu_item::MenuItem;
use super::Entity;
use crate::validation::{non_blank, FieldErrors, Validate, MAX_NAME_LENGTH};

/// A section of a menu ("Starters", "Drinks")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuGroup {
    pub id: String,
    pub menu_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for MenuGroup {
    const COLLECTION: &'static str = "menu-group";
    const LABEL: &'static str = "Menu group";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuGroupInput {
    pub id: Option<String>,
    pub menu_id: Option<String>,
    pub name: Option<String>,
}

impl Validate for MenuGroupInput {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("name", self.name.as_deref(), MAX_NAME_LENGTH);
        // The parent is only needed when creating
        if non_blank(self.id.as_deref()).is_none() && non_blank(self.menu_id.as_deref()).is_none() {
            errors.add("menu_id", "This field is required");
        }
        errors
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupTree {
    #[serde(flatten)]
    pub group: MenuGroup,
    pub items: Vec<MenuItem>,
}
