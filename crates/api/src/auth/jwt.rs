//! Access and refresh tokens.
//!
//! An access token is an HS256 JWT carrying the caller's id and role name,
//! which is all [`AuthUser`](crate::middleware::auth::AuthUser) needs to
//! make authorization decisions without a database round trip. A refresh
//! token is an opaque random string; the `user_sessions` row keeps only its
//! SHA-256 digest.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use pawlink_core::types::DbId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::{parse_var, ConfigError};

/// Token lifetimes and the signing secret.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `7`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self {
            secret,
            access_token_expiry_mins: parse_var("JWT_ACCESS_EXPIRY_MINS", "15")?,
            refresh_token_expiry_days: parse_var("JWT_REFRESH_EXPIRY_DAYS", "7")?,
        })
    }

    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_mins)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_expiry_days)
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        validation
    }
}

/// Payload of an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: DbId,
    /// `admin`, `staff` or `member`.
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

impl Claims {
    fn issue(user_id: DbId, role: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role: role.to_owned(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::now_v7(),
        }
    }
}

/// Sign an access token for `user_id` acting as `role`.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::issue(user_id, role, config.access_ttl());
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature and expiry, returning the claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &JwtConfig::validation(),
    )
    .map(|data| data.claims)
}

/// A freshly minted refresh token. `plaintext` goes to the client once;
/// `hash` is what gets stored.
#[derive(Debug)]
pub struct RefreshToken {
    pub plaintext: String,
    pub hash: String,
}

impl RefreshToken {
    pub fn generate() -> Self {
        let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let hash = Self::digest(&plaintext);
        Self { plaintext, hash }
    }

    /// Lowercase hex SHA-256 of a presented token.
    pub fn digest(token: &str) -> String {
        Sha256::digest(token.as_bytes())
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        }
    }

    #[test]
    fn access_token_carries_id_and_role() {
        let config = config("pawlink-test-secret");
        let token = generate_access_token(7, "staff", &config).unwrap();
        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, "staff");
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn numeric_subject_is_accepted() {
        let config = config("pawlink-test-secret");
        let token = generate_access_token(42, "member", &config).unwrap();

        let raw = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(config.secret.as_bytes()),
            &JwtConfig::validation(),
        )
        .unwrap();
        assert_eq!(raw.claims["sub"], serde_json::json!(42));

        assert_eq!(validate_token(&token, &config).unwrap().sub, 42);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = config("pawlink-test-secret");
        let claims = Claims::issue(1, "member", Duration::minutes(-10));
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let token = generate_access_token(1, "member", &config("alpha")).unwrap();
        assert!(validate_token(&token, &config("bravo")).is_err());
    }

    #[test]
    fn refresh_token_hash_matches_digest() {
        let token = RefreshToken::generate();
        assert_eq!(token.plaintext.len(), 64);
        assert_eq!(token.hash.len(), 64);
        assert_eq!(token.hash, RefreshToken::digest(&token.plaintext));
        assert_ne!(token.plaintext, RefreshToken::generate().plaintext);
    }
}
