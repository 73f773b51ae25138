//! Signed bearer token issuance and verification.
//!
//! Tokens are stateless HS256 JWTs carrying the subject id, display fields,
//! and role tags. Verification here only checks signature and expiry; the
//! authorization gate additionally re-resolves the subject against the live
//! user record (`middleware::auth`).

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use loommarket_core::{Role, UserId};

use crate::models::User;

/// Errors from token operations.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Signing failed (malformed key material).
    #[error("token signing failed: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),

    /// Signature, expiry, or structural verification failed.
    #[error("token verification failed: {0}")]
    Verify(#[source] jsonwebtoken::errors::Error),

    /// The `sub` claim is not a valid user id.
    #[error("invalid token subject: {0}")]
    InvalidSubject(String),
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id, as a string.
    pub sub: String,
    /// Display name at issuance time.
    pub name: String,
    /// Email at issuance time.
    pub email: String,
    /// Role tags at issuance time.
    pub roles: Vec<Role>,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
}

impl Claims {
    /// Parse the subject claim back into a [`UserId`].
    ///
    /// # Errors
    ///
    /// Returns `TokenError::InvalidSubject` if `sub` is not an integer id.
    pub fn user_id(&self) -> Result<UserId, TokenError> {
        self.sub
            .parse::<i32>()
            .map(UserId::new)
            .map_err(|_| TokenError::InvalidSubject(self.sub.clone()))
    }
}

/// Issues and verifies session tokens with a process-wide signing key.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service from the configured signing secret and TTL.
    #[must_use]
    pub fn new(secret: &SecretString, ttl_hours: i64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Sign a token asserting the given user's identity and roles.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Sign` if encoding fails.
    pub fn sign(&self, user: &User) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.to_string(),
            roles: user.roles.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Sign)
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Verify` for any malformed, tampered, or expired
    /// token.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(TokenError::Verify)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use loommarket_core::Email;

    use super::*;

    fn secret() -> SecretString {
        SecretString::from("kX9#mP2$vL8@qR4!wN6^zT1&yU3*bE5%")
    }

    fn test_user() -> User {
        User {
            id: UserId::new(17),
            name: "ada".to_owned(),
            email: Email::parse("ada@example.com").unwrap(),
            roles: vec![Role::User, Role::Retailer],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let service = TokenService::new(&secret(), 24);
        let token = service.sign(&test_user()).unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, "17");
        assert_eq!(claims.user_id().unwrap(), UserId::new(17));
        assert_eq!(claims.name, "ada");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.roles, vec![Role::User, Role::Retailer]);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative TTL produces an already-expired token
        let service = TokenService::new(&secret(), -2);
        let token = service.sign(&test_user()).unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(TokenError::Verify(_))
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenService::new(&secret(), 24);
        let token = issuer.sign(&test_user()).unwrap();

        let other = TokenService::new(
            &SecretString::from("zQ7!nB4$cF1@jH8#dK5^gM2&sW9*xV6%"),
            24,
        );
        assert!(matches!(other.verify(&token), Err(TokenError::Verify(_))));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = TokenService::new(&secret(), 24);
        assert!(matches!(
            service.verify("not-a-jwt"),
            Err(TokenError::Verify(_))
        ));
    }

    #[test]
    fn test_invalid_subject() {
        let claims = Claims {
            sub: "not-a-number".to_owned(),
            name: String::new(),
            email: String::new(),
            roles: vec![],
            iat: 0,
            exp: 0,
        };
        assert!(matches!(
            claims.user_id(),
            Err(TokenError::InvalidSubject(_))
        ));
    }
}
