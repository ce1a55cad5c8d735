use std::sync::Arc;

use service::{
    auth::{repository::ConfiguredCredentialRepository, Authenticator, PasswordAuthenticator, SessionConfig},
    menu::MenuService,
    settings::SettingsService,
    storage::Storage,
};

use crate::metrics::Metrics;

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub menu: MenuService,
    pub settings: SettingsService,
    pub auth: Arc<dyn Authenticator>,
    pub metrics: Arc<Metrics>,
}

impl ServerState {
    pub fn new(storage: &Storage, auth: Arc<dyn Authenticator>, metrics: Arc<Metrics>) -> Self {
        Self {
            menu: MenuService::new(storage.menu.clone()),
            settings: SettingsService::new(storage.settings.clone()),
            auth,
            metrics,
        }
    }

    /// Password authenticator over the admin account from configuration.
    pub fn configured_authenticator(cfg: &configs::AuthConfig) -> Arc<dyn Authenticator> {
        let repo = Arc::new(ConfiguredCredentialRepository::from_config(cfg));
        Arc::new(PasswordAuthenticator::new(repo, SessionConfig::from_config(cfg)))
    }
}
