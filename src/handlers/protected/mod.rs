// handlers/protected/mod.rs - endpoints behind the token gate

pub mod auth;
pub mod group;
pub mod item;
pub mod menu;
pub mod user;

pub use auth::validate_token;
pub use group::{group_add, group_delete, group_list};
pub use item::{item_add, item_delete, item_list};
pub use menu::{menu_add, menu_delete, menu_get, menu_list};
pub use user::{user_delete, user_get, user_list};
