use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Authenticated principal attached to a request after token validation.
///
/// Flat authentication model: the principal carries the subject and no
/// granted roles.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Claims carried by an issued access token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject -- the authenticated username
    pub sub: String,
    /// Issued-at time (UTC Unix timestamp)
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp)
    pub exp: i64,
}

/// Row of the `usuarios` credential store
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Usuario {
    pub id: i64,
    pub username: String,
    /// Argon2id hash in PHC string format
    pub password: String,
    pub enabled: bool,
}
