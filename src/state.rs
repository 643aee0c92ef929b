use std::sync::Arc;

use crate::auth::{Credentials, TokenService};
use crate::config::{AppConfig, ConfigError};
use crate::database::models::{Menu, MenuGroup, MenuItem, User};
use crate::database::{DocumentStore, Repository, Timeouts};

/// Shared handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub users: Repository<User>,
    pub menus: Repository<Menu>,
    pub groups: Repository<MenuGroup>,
    pub items: Repository<MenuItem>,
    pub tokens: Arc<TokenService>,
    pub credentials: Arc<Credentials>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: &AppConfig) -> Result<Self, ConfigError> {
        let timeouts = Timeouts::from_config(config);
        let tokens = TokenService::from_config(&config.security)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let credentials = Credentials::from_config(&config.security)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(Self {
            users: Repository::new(Arc::clone(&store), timeouts),
            menus: Repository::new(Arc::clone(&store), timeouts),
            groups: Repository::new(Arc::clone(&store), timeouts),
            items: Repository::new(Arc::clone(&store), timeouts),
            store,
            tokens: Arc::new(tokens),
            credentials: Arc::new(credentials),
        })
    }
}
