pub mod menu;
pub mod menu_group;
pub mod menu_item;
pub mod user;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub use menu::{Menu, MenuInput, MenuTree};
pub use menu_group::{GroupTree, MenuGroup, MenuGroupInput};
pub use menu_item::{MenuItem, MenuItemInput};
pub use user::{LoginInput, RegisterInput, User, UserView};

/// A document type stored in its own collection
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection the documents live in
    const COLLECTION: &'static str;
    /// Human-readable name used in messages
    const LABEL: &'static str;

    fn id(&self) -> &str;
}

/// Lookup body carrying only an identifier, e.g. `{"id": "..."}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdInput {
    pub id: Option<String>,
}

/// Lookup body for the groups of one menu
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuRef {
    pub menu_id: Option<String>,
}

/// Lookup body for the items of one group
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupRef {
    pub group_id: Option<String>,
}
