//! Session token issuance and verification.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::{Principal, Role, UserRecord, UserUuid};

/// Default session lifetime.
pub const DEFAULT_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(24);

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token rejected")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub role: Role,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            user_uuid: UserUuid::from_uuid(claims.sub),
            username: claims.username,
            role: claims.role,
            name: claims.name,
        }
    }
}

/// A freshly signed token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Signs and verifies HS256 session tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: SignedDuration,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("secret", &"**redacted**")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: &[u8], ttl: SignedDuration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Issue a token for `user` valid from now.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn issue(&self, user: &UserRecord) -> Result<IssuedToken, TokenError> {
        self.issue_at(user, Timestamp::now())
    }

    /// Issue a token for `user` as if signed at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn issue_at(
        &self,
        user: &UserRecord,
        issued_at: Timestamp,
    ) -> Result<IssuedToken, TokenError> {
        let iat = issued_at.as_second();
        let exp = iat.saturating_add(self.ttl.as_secs());

        let claims = Claims {
            sub: user.uuid.into_uuid(),
            username: user.username.clone(),
            role: user.role,
            name: user.name.clone(),
            iat,
            exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Encode)?;

        let expires_at = Timestamp::from_second(exp).unwrap_or(Timestamp::MAX);

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token's signature and expiry and return its principal.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for tampered, malformed or expired tokens.
    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims.into())
            .map_err(TokenError::Invalid)
    }
}
