// handlers/public/mod.rs - endpoints that need no token

pub mod account;
pub mod menu_show;
pub mod system;

pub use account::{login, register};
pub use menu_show::menu_show;
pub use system::{health, root};
