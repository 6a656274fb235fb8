//! Port for the user profile cache.
//!
//! The cache stores opaque bytes; serialisation is the caller's concern. A
//! miss is an expected outcome and is kept apart from infrastructure
//! failures so callers can log the latter as degraded service.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{DeadlineExceeded, UserId};

use super::define_port_error;

define_port_error! {
    /// Outcomes of a cache call other than success.
    pub enum UserCacheError {
        /// Nothing stored under the key (or the entry expired).
        Miss => "cache miss",
        /// Cache backend unreachable, failing or too slow.
        Unavailable { message: String } => "user cache unavailable: {message}",
    }
}

impl From<DeadlineExceeded> for UserCacheError {
    fn from(value: DeadlineExceeded) -> Self {
        Self::unavailable(value.to_string())
    }
}

/// Cache key for a user record: `user_<id>`.
///
/// # Examples
/// ```
/// use taskboard::domain::UserId;
/// use taskboard::domain::ports::UserCacheKey;
///
/// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
/// assert_eq!(
///     UserCacheKey::for_user(&id).as_str(),
///     "user_3fa85f64-5717-4562-b3fc-2c963f66afa6"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserCacheKey(String);

impl UserCacheKey {
    pub fn for_user(id: &UserId) -> Self {
        Self(format!("user_{id}"))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for UserCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCache: Send + Sync {
    /// Read the bytes stored under `key`.
    async fn get(&self, key: &UserCacheKey) -> Result<Vec<u8>, UserCacheError>;

    /// Store `value` under `key` for `ttl`.
    async fn set(
        &self,
        key: &UserCacheKey,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), UserCacheError>;
}
