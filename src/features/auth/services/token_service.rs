use std::collections::HashMap;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Claims};

/// Issues and validates HS256 access tokens.
///
/// Tokens are signed with the active key and carry its `kid` in the header.
/// Retired keys remain in the verification map so tokens issued before a
/// rotation stay valid until they expire; they are never used for signing.
pub struct TokenService {
    active_kid: String,
    signing_key: EncodingKey,
    verification_keys: HashMap<String, DecodingKey>,
    validity_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut verification_keys = HashMap::new();
        verification_keys.insert(
            config.key_id.clone(),
            DecodingKey::from_secret(config.secret.as_bytes()),
        );
        for (kid, secret) in &config.retired_keys {
            verification_keys.insert(kid.clone(), DecodingKey::from_secret(secret.as_bytes()));
        }

        Self {
            active_kid: config.key_id.clone(),
            signing_key: EncodingKey::from_secret(config.secret.as_bytes()),
            verification_keys,
            validity_secs: config.token_validity_secs as i64,
        }
    }

    /// Issue a signed access token whose subject is the given username.
    pub fn issue(&self, username: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.validity_secs)).timestamp(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(self.active_kid.clone());

        encode(&header, &claims, &self.signing_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign access token: {}", e)))
    }

    /// Verify a presented token and recover its principal.
    ///
    /// Every verification failure (malformed token, unknown key id, bad
    /// signature, expired) uniformly maps to `None`; callers treat all of
    /// them as "not authenticated".
    pub fn validate(&self, token: &str) -> Option<AuthenticatedUser> {
        let header = decode_header(token).ok()?;
        let kid = header.kid.unwrap_or_else(|| self.active_kid.clone());
        let key = self.verification_keys.get(&kid)?;

        let data = decode::<Claims>(token, key, &Validation::new(Algorithm::HS256)).ok()?;

        Some(AuthenticatedUser {
            username: data.claims.sub,
        })
    }
}
