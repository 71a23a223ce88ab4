use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Usuario};
use crate::features::auth::services::password::verify_password;
use crate::features::auth::services::TokenService;

/// Checks a username/password pair against the credential store.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> Result<AuthenticatedUser>;
}

/// Verifier backed by the `usuarios` table with Argon2id password hashes
pub struct PgCredentialVerifier {
    pool: PgPool,
}

impl PgCredentialVerifier {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Unknown user, wrong password and disabled account all map to the
    /// same rejection, so responses do not reveal which check failed.
    fn rejected() -> AppError {
        AppError::Unauthorized("Credenciales inválidas".to_string())
    }
}

#[async_trait]
impl CredentialVerifier for PgCredentialVerifier {
    async fn verify(&self, username: &str, password: &str) -> Result<AuthenticatedUser> {
        let usuario = sqlx::query_as::<_, Usuario>(
            "SELECT id, username, password, enabled FROM usuarios WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load usuario '{}': {:?}", username, e);
            AppError::Database(e)
        })?;

        let usuario = usuario.ok_or_else(Self::rejected)?;

        if !usuario.enabled {
            tracing::warn!("Login attempt for disabled account '{}'", usuario.username);
            return Err(Self::rejected());
        }

        let matches = verify_password(password, &usuario.password)
            .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {}", e)))?;
        if !matches {
            return Err(Self::rejected());
        }

        Ok(AuthenticatedUser {
            username: usuario.username,
        })
    }
}

/// Login facade: verifies credentials, then issues the access token.
pub struct AuthService {
    verifier: Arc<dyn CredentialVerifier>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, tokens: Arc<TokenService>) -> Self {
        Self { verifier, tokens }
    }

    /// Authenticate the credentials and return the principal with its token.
    pub async fn login(&self, username: &str, password: &str) -> Result<(AuthenticatedUser, String)> {
        let user = self.verifier.verify(username, password).await?;
        let token = self.tokens.issue(&user.username)?;

        tracing::info!("Usuario '{}' authenticated", user.username);
        Ok((user, token))
    }
}
