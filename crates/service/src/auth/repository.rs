use async_trait::async_trait;

use super::domain::StoredCredential;
use super::errors::AuthError;

/// Repository abstraction for admin credentials.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredCredential>, AuthError>;
}

/// The single admin account declared in configuration.
pub struct ConfiguredCredentialRepository {
    credential: Option<StoredCredential>,
}

impl ConfiguredCredentialRepository {
    /// Without `admin_password_hash` every login is rejected.
    pub fn from_config(cfg: &configs::AuthConfig) -> Self {
        let credential = cfg.admin_password_hash.as_ref().map(|hash| StoredCredential {
            username: cfg.admin_username.clone(),
            password_hash: hash.clone(),
        });
        if credential.is_none() {
            tracing::warn!("no admin password hash configured; logins will be rejected");
        }
        Self { credential }
    }
}

#[async_trait]
impl CredentialRepository for ConfiguredCredentialRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredCredential>, AuthError> {
        Ok(self.credential.as_ref().filter(|c| c.username == username).cloned())
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockCredentialRepository {
        creds: Mutex<HashMap<String, StoredCredential>>, // key: username
    }

    impl MockCredentialRepository {
        pub fn with_user(username: &str, password_hash: String) -> Self {
            let repo = Self::default();
            repo.creds.lock().unwrap().insert(
                username.to_string(),
                StoredCredential { username: username.to_string(), password_hash },
            );
            repo
        }
    }

    #[async_trait]
    impl CredentialRepository for MockCredentialRepository {
        async fn find_by_username(&self, username: &str) -> Result<Option<StoredCredential>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(username).cloned())
        }
    }
}
