use std::sync::Arc;

use argon2::{password_hash::{PasswordHasher, PasswordVerifier, SaltString}, Argon2, PasswordHash};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{AdminIdentity, AuthSession, Claims, LoginInput};
use super::errors::AuthError;
use super::repository::CredentialRepository;

/// Session token settings
#[derive(Clone)]
pub struct SessionConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl SessionConfig {
    pub fn from_config(cfg: &configs::AuthConfig) -> Self {
        Self { jwt_secret: cfg.jwt_secret.clone(), token_ttl: Duration::hours(cfg.token_ttl_hours) }
    }
}

/// Turns credentials into sessions and sessions back into identities.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, input: LoginInput) -> Result<AuthSession, AuthError>;
    fn verify_token(&self, token: &str) -> Result<AdminIdentity, AuthError>;
}

/// Produce an argon2 PHC string for `password`.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    if password.is_empty() {
        return Err(AuthError::Validation("password must not be empty".into()));
    }
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .to_string())
}

/// Password check against hashed credentials, HS256 session tokens.
pub struct PasswordAuthenticator<R: CredentialRepository> {
    repo: Arc<R>,
    cfg: SessionConfig,
}

impl<R: CredentialRepository> PasswordAuthenticator<R> {
    pub fn new(repo: Arc<R>, cfg: SessionConfig) -> Self { Self { repo, cfg } }

    fn issue(&self, username: &str) -> Result<AuthSession, AuthError> {
        let now = Utc::now();
        let expires_at = now + self.cfg.token_ttl;
        let claims = Claims { sub: username.to_string(), iat: now.timestamp(), exp: expires_at.timestamp() };
        let token = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        Ok(AuthSession { identity: AdminIdentity { username: username.to_string() }, token, expires_at })
    }
}

#[async_trait]
impl<R: CredentialRepository> Authenticator for PasswordAuthenticator<R> {
    /// Authenticate the admin and issue a session token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{hash_password, Authenticator, PasswordAuthenticator, SessionConfig};
    /// use service::auth::{domain::LoginInput, repository::mock::MockCredentialRepository};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockCredentialRepository::with_user("admin", hash_password("Passw0rd").unwrap()));
    /// let cfg = SessionConfig { jwt_secret: "secret".into(), token_ttl: chrono::Duration::hours(1) };
    /// let auth = PasswordAuthenticator::new(repo, cfg);
    /// let session = tokio_test::block_on(auth.authenticate(LoginInput { username: "admin".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(auth.verify_token(&session.token).unwrap().username, "admin");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    async fn authenticate(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        if input.username.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Unauthorized);
        }
        let cred = self.repo.find_by_username(&input.username).await?.ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            debug!("password mismatch");
            return Err(AuthError::Unauthorized);
        }

        let session = self.issue(&cred.username)?;
        info!(username = %cred.username, expires_at = %session.expires_at, "admin_login");
        Ok(session)
    }

    fn verify_token(&self, token: &str) -> Result<AdminIdentity, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AuthError::InvalidSession)?;
        Ok(AdminIdentity { username: data.claims.sub })
    }
}
