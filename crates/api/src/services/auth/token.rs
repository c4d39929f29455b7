//! Bearer token issuing and verification.
//!
//! Tokens are HS256 JWTs carrying the user ID and username, expiring one
//! hour after issue.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use bazaar_core::UserId;

use super::AuthError;

/// Token lifetime in seconds: one hour.
const TOKEN_TTL_SECS: i64 = 3600;

/// Claims carried by a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID.
    pub sub: i32,
    /// Username at issue time.
    pub username: String,
    /// Expiry (seconds since epoch).
    pub exp: i64,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
}

impl Claims {
    /// The authenticated user's ID.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::new(self.sub)
    }
}

/// Signing and verification keys derived once from the configured secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    /// Derive keys from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    /// Issue a token for a user, valid for one hour.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenSigning` if encoding fails.
    pub fn issue(&self, user_id: UserId, username: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.as_i32(),
            username: username.to_owned(),
            exp: (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|_| AuthError::TokenSigning)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token is malformed,
    /// tampered with, or expired.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> TokenKeys {
        TokenKeys::new(&SecretString::from(
            "kV9mXq2LwZ7rTn4FbJ8cHd3PsG6yAe1u".to_string(),
        ))
    }

    #[test]
    fn issued_tokens_verify_and_carry_identity() {
        let keys = keys();
        let token = keys.issue(UserId::new(7), "priya123").expect("issue");

        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.user_id(), UserId::new(7));
        assert_eq!(claims.username, "priya123");
    }

    #[test]
    fn tokens_expire_after_one_hour() {
        let keys = keys();
        let token = keys.issue(UserId::new(7), "priya123").expect("issue");
        let claims = keys.verify(&token).expect("verify");

        let lifetime = claims.exp - claims.iat;
        assert_eq!(lifetime, 3600);
    }

    #[test]
    fn rejects_expired_tokens() {
        let keys = keys();
        let stale = Claims {
            sub: 7,
            username: "priya123".to_owned(),
            // Well past the default 60s validation leeway
            exp: (Utc::now() - Duration::hours(2)).timestamp(),
            iat: (Utc::now() - Duration::hours(3)).timestamp(),
        };
        let token = encode(&Header::default(), &stale, &keys.encoding).expect("encode");

        assert!(matches!(keys.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn rejects_tokens_signed_with_another_secret() {
        let token = keys().issue(UserId::new(7), "priya123").expect("issue");

        let other = TokenKeys::new(&SecretString::from(
            "Qp5zRw8NvM2kYt6HcD4jXb9FsL3gUe7a".to_string(),
        ));
        assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn rejects_garbage_tokens() {
        assert!(matches!(
            keys().verify("not.a.token"),
            Err(AuthError::InvalidToken)
        ));
    }
}
