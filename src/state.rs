use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::{AccountConfig, AppConfig};
use crate::database::ContainerStore;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: ContainerStore,
    pub tokens: Arc<TokenService>,
    pub accounts: Arc<[AccountConfig]>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: ContainerStore::new(),
            tokens: Arc::new(TokenService::from_config(&config.security)),
            accounts: config.accounts.clone().into(),
        }
    }

    /// Look up the account matching a username/password pair
    pub fn find_account(&self, username: &str, password: &str) -> Option<&AccountConfig> {
        self.accounts
            .iter()
            .find(|account| account.matches(username, password))
    }
}
