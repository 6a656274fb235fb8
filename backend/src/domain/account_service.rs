//! Account use-cases: signup, login and cache-aside profile reads.
//!
//! Login failures are deliberately uniform. An unknown email and a wrong
//! password return the same error; the distinction is only visible in the
//! `reason` field of a debug event.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    AccountCommand, CredentialError, PasswordHasher, ProfileQuery, TokenCodec, UserCache,
    UserCacheError, UserCacheKey, UserRepository, UserRepositoryError,
};
use crate::domain::{
    AccessToken, Error, LoginCredentials, OperationDeadline, ProfileSource, SignUpDetails, User,
    UserId, UserProfile,
};

/// How long a cached profile stays valid.
pub const PROFILE_CACHE_TTL: Duration = Duration::from_secs(120);

/// Client-facing message for any failed login.
pub const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Account service implementing [`AccountCommand`] and [`ProfileQuery`].
#[derive(Clone)]
pub struct AccountService<U, C> {
    users: Arc<U>,
    cache: Arc<C>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenCodec>,
    deadline: OperationDeadline,
    profile_ttl: Duration,
}

impl<U, C> AccountService<U, C> {
    /// Create a service with the default deadline and profile TTL.
    pub fn new(
        users: Arc<U>,
        cache: Arc<C>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenCodec>,
    ) -> Self {
        Self {
            users,
            cache,
            hasher,
            tokens,
            deadline: OperationDeadline::default(),
            profile_ttl: PROFILE_CACHE_TTL,
        }
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: OperationDeadline) -> Self {
        self.deadline = deadline;
        self
    }

    #[must_use]
    pub fn with_profile_ttl(mut self, ttl: Duration) -> Self {
        self.profile_ttl = ttl;
        self
    }
}

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::DuplicateEmail { email } => {
            Error::conflict(format!("email {email} is already registered"))
        }
        UserRepositoryError::NotFound => Error::not_found("user not found"),
        UserRepositoryError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::Timeout { message } => {
            Error::internal(format!("user repository timed out: {message}"))
        }
    }
}

fn map_credential_error(error: CredentialError) -> Error {
    Error::internal(error.to_string())
}

fn invalid_credentials() -> Error {
    Error::invalid_request(INVALID_CREDENTIALS)
}

impl<U, C> AccountService<U, C>
where
    U: UserRepository,
    C: UserCache,
{
    async fn cached_user(&self, key: &UserCacheKey) -> Option<User> {
        let lookup = self.deadline.run("cache.get", self.cache.get(key)).await;
        match lookup {
            Ok(bytes) => match serde_json::from_slice::<User>(&bytes) {
                Ok(user) => Some(user),
                Err(error) => {
                    warn!(%key, %error, "discarding undecodable cache entry");
                    None
                }
            },
            Err(UserCacheError::Miss) => {
                debug!(%key, "profile cache miss");
                None
            }
            Err(UserCacheError::Unavailable { message }) => {
                warn!(%key, %message, "profile cache unavailable; reading from store");
                None
            }
        }
    }

    /// Populate the cache. Failures are logged and never fail the read; the
    /// deadline bounds how long the read can wait on the write.
    async fn refresh_cache(&self, key: &UserCacheKey, user: &User) {
        let bytes = match serde_json::to_vec(user) {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(%key, %error, "failed to encode user for cache");
                return;
            }
        };
        let result = self
            .deadline
            .run("cache.set", self.cache.set(key, bytes, self.profile_ttl))
            .await;
        if let Err(error) = result {
            warn!(%key, %error, "profile cache write failed");
        }
    }
}

#[async_trait]
impl<U, C> AccountCommand for AccountService<U, C>
where
    U: UserRepository,
    C: UserCache,
{
    async fn sign_up(&self, details: SignUpDetails) -> Result<UserProfile, Error> {
        let digest = self
            .hasher
            .hash(details.password())
            .await
            .map_err(map_credential_error)?;
        let user = User::new(
            UserId::random(),
            details.username().clone(),
            details.email().clone(),
            digest,
        );
        self.deadline
            .run("user.create", self.users.create(&user))
            .await
            .map_err(map_user_repository_error)?;
        info!(user_id = %user.id(), "user signed up");
        Ok(user.to_profile())
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AccessToken, Error> {
        let lookup = self
            .deadline
            .run("user.get_by_email", self.users.get_by_email(credentials.email()))
            .await;
        let user = match lookup {
            Ok(user) => user,
            Err(UserRepositoryError::NotFound) => {
                // Unknown emails cost one bcrypt round, like a real verify.
                let _ = self.hasher.hash(credentials.password()).await;
                debug!(reason = "unknown_email", "login rejected");
                return Err(invalid_credentials());
            }
            Err(other) => return Err(map_user_repository_error(other)),
        };

        if !self
            .hasher
            .verify(credentials.password(), user.password_digest())
            .await
        {
            debug!(user_id = %user.id(), reason = "password_mismatch", "login rejected");
            return Err(invalid_credentials());
        }

        let token = self
            .tokens
            .issue(user.id(), user.email())
            .map_err(map_credential_error)?;
        info!(user_id = %user.id(), "user logged in");
        Ok(token)
    }
}

#[async_trait]
impl<U, C> ProfileQuery for AccountService<U, C>
where
    U: UserRepository,
    C: UserCache,
{
    async fn get_profile(&self, user_id: &UserId) -> Result<(UserProfile, ProfileSource), Error> {
        let key = UserCacheKey::for_user(user_id);
        if let Some(user) = self.cached_user(&key).await {
            return Ok((user.to_profile(), ProfileSource::Cache));
        }

        let user = self
            .deadline
            .run("user.get_by_id", self.users.get_by_id(user_id))
            .await
            .map_err(map_user_repository_error)?;
        self.refresh_cache(&key, &user).await;
        Ok((user.to_profile(), ProfileSource::Store))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
