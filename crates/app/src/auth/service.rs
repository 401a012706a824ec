//! Auth service.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tokio::task;
use tracing::{info, warn};

use crate::auth::{
    AuthServiceError, LoginSession, Password, PasswordChange, Principal, ProfileUpdate, SeedUser,
    DEFAULT_TOKEN_TTL, TokenIssuer, UserRecord, UserUuid, hash_password,
    password::verify_against_dummy,
    repository::{NewUserRow, PgUsersRepository},
    verify_password,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgUsersRepository,
    tokens: TokenIssuer,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, tokens: TokenIssuer) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
            tokens,
        }
    }

    /// Service for offline user administration.
    ///
    /// Sessions are signed with a random per-process key, so any token it
    /// issues is useless to the HTTP server.
    #[must_use]
    pub fn for_administration(pool: PgPool) -> Self {
        let mut key = [0_u8; 32];
        OsRng.fill_bytes(&mut key);

        Self::new(pool, TokenIssuer::new(&key, DEFAULT_TOKEN_TTL))
    }

    /// Overwrite a user's password without knowing the current one.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::NotFound`] if no user has `username`.
    pub async fn reset_password(
        &self,
        username: &str,
        password: Password,
    ) -> Result<(), AuthServiceError> {
        if password.is_blank() {
            return Err(AuthServiceError::InvalidData("password is required"));
        }

        let password_hash = hash(password).await?;

        let rows_affected = self
            .repository
            .update_password_by_username(username, &password_hash)
            .await?;

        if rows_affected == 0 {
            return Err(AuthServiceError::NotFound);
        }

        info!(username, "password reset");

        Ok(())
    }
}

async fn hash(password: Password) -> Result<String, AuthServiceError> {
    Ok(task::spawn_blocking(move || hash_password(&password)).await??)
}

async fn verify(password: Password, password_hash: String) -> Result<bool, AuthServiceError> {
    Ok(task::spawn_blocking(move || verify_password(&password, &password_hash)).await??)
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn login(
        &self,
        username: &str,
        password: Password,
    ) -> Result<LoginSession, AuthServiceError> {
        let Some(stored) = self.repository.find_user_by_username(username).await? else {
            task::spawn_blocking(move || verify_against_dummy(&password)).await?;

            return Err(AuthServiceError::InvalidCredentials);
        };

        if !verify(password, stored.password_hash).await? {
            warn!(username, "login rejected");

            return Err(AuthServiceError::InvalidCredentials);
        }

        let issued = self
            .tokens
            .issue(&stored.user)
            .map_err(AuthServiceError::Signing)?;

        Ok(LoginSession {
            token: issued.token,
            expires_at: issued.expires_at,
            user: stored.user,
        })
    }

    async fn verify_token(&self, token: &str) -> Result<Principal, AuthServiceError> {
        self.tokens
            .verify(token)
            .map_err(AuthServiceError::InvalidToken)
    }

    async fn get_profile(&self, user: UserUuid) -> Result<UserRecord, AuthServiceError> {
        Ok(self.repository.find_user(user).await?.user)
    }

    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, AuthServiceError> {
        let update = ProfileUpdate {
            name: normalize(update.name),
            email: normalize(update.email),
            phone: normalize(update.phone),
        };

        if update.email.as_deref().is_some_and(|email| !email.contains('@')) {
            return Err(AuthServiceError::InvalidData("email address is malformed"));
        }

        Ok(self.repository.update_profile(user, &update).await?.user)
    }

    async fn change_password(
        &self,
        user: UserUuid,
        change: PasswordChange,
    ) -> Result<(), AuthServiceError> {
        if change.new.is_blank() {
            return Err(AuthServiceError::InvalidData("new password is required"));
        }

        let stored = self.repository.find_user(user).await?;

        if !verify(change.current, stored.password_hash).await? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let password_hash = hash(change.new).await?;

        let rows_affected = self.repository.update_password(user, &password_hash).await?;

        if rows_affected == 0 {
            return Err(AuthServiceError::NotFound);
        }

        Ok(())
    }

    async fn ensure_user(&self, seed: SeedUser) -> Result<bool, AuthServiceError> {
        let username = seed.username.trim();

        if username.is_empty() {
            return Err(AuthServiceError::InvalidData("username is required"));
        }

        if seed.password.is_blank() {
            return Err(AuthServiceError::InvalidData("password is required"));
        }

        if self.repository.find_user_by_username(username).await?.is_some() {
            return Ok(false);
        }

        let password_hash = hash(seed.password).await?;

        let created = self
            .repository
            .create_user_if_absent(NewUserRow {
                uuid: UserUuid::new(),
                username,
                password_hash: &password_hash,
                role: seed.role,
                name: &seed.name,
                email: seed.email.as_deref(),
            })
            .await?;

        if created.is_some() {
            info!(username, role = %seed.role, "seeded user");
        }

        Ok(created.is_some())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a session token.
    async fn login(
        &self,
        username: &str,
        password: Password,
    ) -> Result<LoginSession, AuthServiceError>;

    /// Resolve a bearer token to the principal it was issued for.
    async fn verify_token(&self, token: &str) -> Result<Principal, AuthServiceError>;

    async fn get_profile(&self, user: UserUuid) -> Result<UserRecord, AuthServiceError>;

    /// Change the supplied, non-empty profile fields.
    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, AuthServiceError>;

    /// Replace the password after re-verifying the current one.
    async fn change_password(
        &self,
        user: UserUuid,
        change: PasswordChange,
    ) -> Result<(), AuthServiceError>;

    /// Insert the user unless the username exists. Returns `true` when inserted.
    async fn ensure_user(&self, seed: SeedUser) -> Result<bool, AuthServiceError>;
}
